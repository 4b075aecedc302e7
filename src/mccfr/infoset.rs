//! Information sets: the player-private view of a decision point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mccfr::engine::{Card, GameEngine};
use crate::mccfr::error::SolverError;

/// A canonical, player-private view of a game history.
///
/// Two histories that are indistinguishable to the acting player map to the
/// same `InfoSet`, so this value is used directly as the composite key of the
/// regret and average-strategy tables. Equality and hashing cover exactly the
/// fields below; hidden opponent cards and deck order never enter the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfoSet {
    /// The acting player's own private cards.
    pub hole_cards: Vec<Card>,
    /// Chips collected into the pot before the current betting round.
    pub pot: u32,
    /// The acting player's live bet in the current round.
    pub my_bet: u32,
    /// The opponent's live bet in the current round. Public information:
    /// bets are posted face-up.
    pub opponent_bet: u32,
    /// Whether the acting player opened the betting this hand.
    pub opening: bool,
}

impl InfoSet {
    /// Build the information set for `player` at `state`.
    ///
    /// Pure and deterministic; defined at every decision point. Fails with
    /// [`SolverError::InvalidState`] if `player` is not the current actor,
    /// which would mean the caller is violating the engine contract.
    pub fn from_state<E: GameEngine>(
        engine: &E,
        state: &E::State,
        player: usize,
    ) -> Result<InfoSet, SolverError> {
        if engine.current_actor(state) != Some(player) {
            return Err(SolverError::InvalidState(format!(
                "player {} is not entitled to act at {:?}",
                player, state
            )));
        }

        let opponent = 1 - player;
        Ok(InfoSet {
            hole_cards: engine.private_cards(state, player).to_vec(),
            pot: engine.pot(state),
            my_bet: engine.bet(state, player),
            opponent_bet: engine.bet(state, opponent),
            opening: engine.opener(state) == player,
        })
    }
}

impl fmt::Display for InfoSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.hole_cards {
            write!(f, "{}", card)?;
        }
        write!(
            f,
            "|pot:{} me:{} opp:{}{}",
            self.pot,
            self.my_bet,
            self.opponent_bet,
            if self.opening { " opening" } else { "" }
        )
    }
}
