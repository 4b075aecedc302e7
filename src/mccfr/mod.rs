//! Average-strategy sampling MCCFR.
//!
//! This module implements Monte Carlo Counterfactual Regret Minimization
//! with average-strategy (AS) sampling for two-player, zero-sum,
//! imperfect-information games.
//!
//! # Overview
//!
//! CFR converges to Nash equilibrium by:
//! 1. Computing counterfactual regret for each action at each decision point
//! 2. Updating strategies to minimize regret over time (regret matching)
//! 3. Averaging strategies across iterations; the *average* strategy is what
//!    converges to equilibrium, not the instantaneous one
//!
//! The Monte Carlo flavor here samples one outcome per epoch instead of
//! traversing the full tree. AS sampling biases which of the traverser's
//! actions get explored toward actions the evolving average strategy already
//! favors, with an epsilon floor; sampled utilities are divided by their
//! sampling probability to keep the estimator unbiased.
//!
//! # Usage
//!
//! 1. Implement [`GameEngine`] for your game (or use the bundled Kuhn
//!    engine)
//! 2. Create a [`Trainer`] with [`TrainParams`] and call `train()`
//! 3. Persist the tables with [`TableFile`] or play live with [`Policy`]
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete
//!   Information" (2007)
//! - Gibson, R., et al. "Efficient Monte Carlo Counterfactual Regret
//!   Minimization in Games with Many Player Actions" (2012)

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod infoset;
pub mod persistence;
pub mod policy;
pub mod storage;
pub mod strategy;
pub mod trainer;
pub mod walker;

// Re-export main types for convenient access
pub use action::Action;
pub use config::{ConfigError, TrainParams, TrainStats};
pub use engine::{Card, EngineError, GameEngine};
pub use error::SolverError;
pub use infoset::InfoSet;
pub use persistence::TableFile;
pub use policy::Policy;
pub use storage::{ActionValues, InfoSetMap, TableRow};
pub use strategy::{average_strategy, regret_matching, sample_action};
pub use trainer::Trainer;
pub use walker::walk;
