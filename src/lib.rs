//! # as-mccfr
//!
//! Approximates Nash-equilibrium play in two-player, zero-sum,
//! imperfect-information poker variants via Monte Carlo Counterfactual
//! Regret Minimization with average-strategy (AS) sampling.
//!
//! ## Features
//!
//! - **Generic core**: the walker, trainer, and policy work with any rules
//!   engine implementing the [`mccfr::GameEngine`] trait
//! - **AS sampling**: exploration at the traverser's nodes follows the
//!   evolving average strategy, with an epsilon floor and importance-sampled
//!   utilities (Gibson et al., 2012)
//! - **Persistence**: trained tables round-trip exactly through JSON
//! - **Reference players**: random, naive, human, and trained-policy seats
//!   plus a seat-alternating match runner
//!
//! ## Quick Start
//!
//! ```ignore
//! use as_mccfr::games::kuhn::KuhnEngine;
//! use as_mccfr::mccfr::{TrainParams, Trainer};
//!
//! // 1. Train on the canonical Kuhn game
//! let mut trainer = Trainer::new(KuhnEngine::new(), TrainParams::default());
//! trainer.train(500_000)?;
//!
//! // 2. Play live from the trained regret table
//! let policy = trainer.policy();
//! let action = policy.act(&engine, &state, &mut rng)?;
//! ```
//!
//! ## Modules
//!
//! - [`mccfr`]: the solver core
//! - [`games`]: rules engines (Kuhn poker)
//! - [`players`]: reference players and match plumbing

#![warn(missing_docs)]

pub mod games;
pub mod mccfr;
pub mod players;

// Re-export commonly used types at crate root for convenience
pub use mccfr::{
    Action, Card, GameEngine, InfoSet, InfoSetMap, Policy, SolverError, TableFile, TrainParams,
    TrainStats, Trainer,
};
