//! Live-play policy backed by a trained regret table.

use std::path::Path;

use rand::Rng;

use crate::mccfr::action::Action;
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::mccfr::infoset::InfoSet;
use crate::mccfr::persistence::TableFile;
use crate::mccfr::storage::InfoSetMap;
use crate::mccfr::strategy::{regret_matching, sample_action};

/// An action-selection policy over a trained (or loaded) regret table.
///
/// The only interface a match runner needs: hand it a live state and it
/// derives the acting player's strategy by regret matching and samples one
/// action. The table is read-only here; information sets never seen in
/// training fall back to a uniform distribution.
#[derive(Debug, Clone)]
pub struct Policy {
    regrets: InfoSetMap,
}

impl Policy {
    /// Wrap a trained regret table.
    pub fn new(regrets: InfoSetMap) -> Self {
        Self { regrets }
    }

    /// Load a policy from a persisted table file.
    ///
    /// Missing or corrupt files are fatal; there is no partial load.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SolverError> {
        let tables = TableFile::load_from_file(path)?;
        Ok(Self::new(tables.regrets))
    }

    /// The legal actions and their probabilities at the acting player's
    /// information set.
    pub fn strategy<E: GameEngine>(
        &self,
        engine: &E,
        state: &E::State,
    ) -> Result<(Vec<Action>, Vec<f64>), SolverError> {
        let actor = engine.current_actor(state).ok_or_else(|| {
            SolverError::InvalidState(format!("no actor at state {:?}", state))
        })?;
        let legal = engine.legal_actions(state);
        if legal.is_empty() {
            return Err(SolverError::NoLegalActions(format!("{:?}", state)));
        }

        let infoset = InfoSet::from_state(engine, state, actor)?;
        let strategy = regret_matching(&self.regrets, &infoset, &legal);
        Ok((legal, strategy))
    }

    /// Sample one action for the acting player.
    pub fn act<E, R>(&self, engine: &E, state: &E::State, rng: &mut R) -> Result<Action, SolverError>
    where
        E: GameEngine,
        R: Rng + ?Sized,
    {
        let (legal, strategy) = self.strategy(engine, state)?;
        Ok(sample_action(&legal, &strategy, rng))
    }

    /// The underlying regret table.
    pub fn regrets(&self) -> &InfoSetMap {
        &self.regrets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnEngine;
    use crate::mccfr::engine::Card;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_only_legal_actions() {
        let engine = KuhnEngine::new();
        let policy = Policy::new(InfoSetMap::new());
        let mut rng = StdRng::seed_from_u64(2);

        // Facing a bet: fold or call, never bet/raise (stack is exhausted).
        let state = engine.deal_fixed([Card::QUEEN, Card::KING]);
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();

        for _ in 0..50 {
            let action = policy.act(&engine, &state, &mut rng).unwrap();
            assert!(action == Action::Fold || action == Action::CheckCall);
        }
    }

    #[test]
    fn follows_positive_regret() {
        let engine = KuhnEngine::new();
        let state = engine.deal_fixed([Card::KING, Card::JACK]);
        let infoset = InfoSet::from_state(&engine, &state, 0).unwrap();

        let mut regrets = InfoSetMap::new();
        regrets.set(&infoset, Action::CheckCall, 0.0);
        regrets.set(&infoset, Action::BetRaise, 10.0);
        let policy = Policy::new(regrets);

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            assert_eq!(policy.act(&engine, &state, &mut rng).unwrap(), Action::BetRaise);
        }
    }

    #[test]
    fn terminal_state_is_an_error() {
        let engine = KuhnEngine::new();
        let policy = Policy::new(InfoSetMap::new());

        let state = engine.deal_fixed([Card::JACK, Card::KING]);
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();
        let state = engine.apply_action(&state, Action::Fold).unwrap();

        assert!(policy.strategy(&engine, &state).is_err());
    }
}
