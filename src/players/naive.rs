//! Rank-based naive player.

use rand::rngs::StdRng;

use crate::mccfr::action::Action;
use crate::mccfr::engine::{Card, GameEngine};
use crate::mccfr::error::SolverError;
use crate::players::Player;

/// Plays a fixed pure strategy from card strength alone.
///
/// King: bet or raise whenever possible. Queen: check or call. Jack: fold
/// when facing a bet, check otherwise. Never mixes, so it is exploitable by
/// construction; it exists as a stronger-than-random comparison point.
#[derive(Debug, Default)]
pub struct NaivePlayer;

impl NaivePlayer {
    /// Create a naive player.
    pub fn new() -> Self {
        Self
    }

    fn preference(card: Card) -> [Action; 3] {
        match card {
            Card::KING => [Action::BetRaise, Action::CheckCall, Action::Fold],
            Card::QUEEN => [Action::CheckCall, Action::Fold, Action::BetRaise],
            _ => [Action::Fold, Action::CheckCall, Action::BetRaise],
        }
    }
}

impl<E: GameEngine> Player<E> for NaivePlayer {
    fn name(&self) -> &str {
        "naive"
    }

    fn act(
        &mut self,
        engine: &E,
        state: &E::State,
        _rng: &mut StdRng,
    ) -> Result<Action, SolverError> {
        let actor = engine.current_actor(state).ok_or_else(|| {
            SolverError::InvalidState(format!("no actor at state {:?}", state))
        })?;
        let legal = engine.legal_actions(state);
        if legal.is_empty() {
            return Err(SolverError::NoLegalActions(format!("{:?}", state)));
        }

        let cards = engine.private_cards(state, actor);
        let card = cards.first().copied().unwrap_or(Card::JACK);

        for action in Self::preference(card) {
            if legal.contains(&action) {
                return Ok(action);
            }
        }
        Ok(legal[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnEngine;
    use rand::SeedableRng;

    #[test]
    fn king_bets_queen_checks_jack_folds() {
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut player = NaivePlayer::new();

        let king = engine.deal_fixed([Card::KING, Card::JACK]);
        assert_eq!(player.act(&engine, &king, &mut rng).unwrap(), Action::BetRaise);

        let queen = engine.deal_fixed([Card::QUEEN, Card::JACK]);
        assert_eq!(player.act(&engine, &queen, &mut rng).unwrap(), Action::CheckCall);

        // The Jack cannot fold without a bet to fold to; it checks.
        let jack = engine.deal_fixed([Card::JACK, Card::QUEEN]);
        assert_eq!(player.act(&engine, &jack, &mut rng).unwrap(), Action::CheckCall);

        // Facing a bet the Jack folds.
        let jack_vs_bet = engine
            .apply_action(&engine.deal_fixed([Card::QUEEN, Card::JACK]), Action::BetRaise)
            .unwrap();
        assert_eq!(
            player.act(&engine, &jack_vs_bet, &mut rng).unwrap(),
            Action::Fold
        );
    }
}
