//! Reference players and match plumbing.
//!
//! Players exist for comparison and live play around the solver core: a
//! uniform-random baseline, a rank-based naive heuristic, an interactive
//! human seat, and the trained CFR policy. The [`matchup`] module runs
//! hands between any two of them.

pub mod cfr;
pub mod human;
pub mod matchup;
pub mod naive;
pub mod random;

use rand::rngs::StdRng;

use crate::mccfr::action::Action;
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;

pub use cfr::CfrPlayer;
pub use human::HumanPlayer;
pub use matchup::{play_match, play_round, MatchStats};
pub use naive::NaivePlayer;
pub use random::RandomPlayer;

/// A seat at the table: produces actions, observes hand results.
pub trait Player<E: GameEngine> {
    /// Short display name for logs and summaries.
    fn name(&self) -> &str;

    /// Choose an action for the current state. Only called when this
    /// player's seat is the current actor.
    fn act(&mut self, engine: &E, state: &E::State, rng: &mut StdRng)
        -> Result<Action, SolverError>;

    /// Observe the finished hand from this player's seat.
    fn handle_round_over(&mut self, _engine: &E, _state: &E::State, _my_seat: usize) {}
}
