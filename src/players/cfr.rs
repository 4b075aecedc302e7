//! The trained-policy player.

use std::path::Path;

use rand::rngs::StdRng;

use crate::mccfr::action::Action;
use crate::mccfr::config::TrainParams;
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::mccfr::policy::Policy;
use crate::mccfr::trainer::Trainer;
use crate::players::Player;

/// Plays the strategy held in a trained regret table.
///
/// Construct it from a persisted table file, from an in-memory [`Policy`],
/// or by training from scratch on the spot.
#[derive(Debug)]
pub struct CfrPlayer {
    policy: Policy,
}

impl CfrPlayer {
    /// Wrap an existing policy.
    pub fn from_policy(policy: Policy) -> Self {
        Self { policy }
    }

    /// Load the regret table from a persisted file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SolverError> {
        Ok(Self {
            policy: Policy::load_from_file(path)?,
        })
    }

    /// Train a fresh table before sitting down.
    pub fn trained<E: GameEngine>(
        engine: E,
        epochs: u64,
        params: TrainParams,
    ) -> Result<Self, SolverError> {
        let mut trainer = Trainer::new(engine, params);
        trainer.train(epochs)?;
        Ok(Self {
            policy: trainer.policy(),
        })
    }

    /// The wrapped policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

impl<E: GameEngine> Player<E> for CfrPlayer {
    fn name(&self) -> &str {
        "cfr"
    }

    fn act(
        &mut self,
        engine: &E,
        state: &E::State,
        rng: &mut StdRng,
    ) -> Result<Action, SolverError> {
        self.policy.act(engine, state, rng)
    }
}
