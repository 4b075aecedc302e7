//! Uniform-random baseline player.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::mccfr::action::Action;
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::players::Player;

/// Picks uniformly among the legal actions.
///
/// The weakest sensible opponent; useful as a sanity baseline that any
/// trained policy should beat from either seat.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    /// Create a random player.
    pub fn new() -> Self {
        Self
    }
}

impl<E: GameEngine> Player<E> for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn act(
        &mut self,
        engine: &E,
        state: &E::State,
        rng: &mut StdRng,
    ) -> Result<Action, SolverError> {
        let legal = engine.legal_actions(state);
        legal
            .choose(rng)
            .copied()
            .ok_or_else(|| SolverError::NoLegalActions(format!("{:?}", state)))
    }
}
