//! Kuhn poker rules engine.
//!
//! Kuhn poker is the standard validation game for CFR implementations
//! because its Nash equilibrium is known in closed form.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack, Queen, King
//! - 2 players, each antes 1 chip from a stack of 2
//! - Each player receives 1 card
//! - The opener checks or bets 1 chip; facing a bet, the other player folds
//!   or calls
//! - Higher card wins at showdown
//!
//! ## Known Nash Equilibrium
//!
//! - **Opener with Jack**: bet (bluff) with probability alpha, 0 <= alpha <= 1/3
//! - **Opener with Queen**: always check
//! - **Opener with King**: bet with probability 3*alpha
//! - **Responder facing a bet with Jack**: always fold
//! - **Responder facing a bet with Queen**: call with probability 1/3
//! - **Responder facing a bet with King**: always call

use rand::Rng;

use crate::mccfr::action::Action;
use crate::mccfr::engine::{Card, EngineError, GameEngine};

const DECK: [Card; 3] = [Card::JACK, Card::QUEEN, Card::KING];

/// One Kuhn poker hand in progress.
///
/// The betting history is the single round's action sequence; the hand is
/// over once a second action arrives that is not a bet (a fold, or a
/// check/call closing the action).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KuhnState {
    cards: [Option<Card>; 2],
    history: Vec<Action>,
    bets: [u32; 2],
}

impl KuhnState {
    fn dealt(&self) -> bool {
        self.cards[0].is_some()
    }

    fn facing_bet(&self) -> bool {
        self.history.last() == Some(&Action::BetRaise)
    }
}

/// Heads-up Kuhn poker, generalized over table configuration.
///
/// `new()` gives the canonical game: starting stack 2, ante 1, fixed bet 1.
#[derive(Debug, Clone)]
pub struct KuhnEngine {
    starting_stack: u32,
    ante: u32,
    bet_size: u32,
}

impl Default for KuhnEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl KuhnEngine {
    /// The canonical Kuhn game: stack 2, ante 1, bet 1.
    pub fn new() -> Self {
        Self {
            starting_stack: 2,
            ante: 1,
            bet_size: 1,
        }
    }

    /// A Kuhn game with custom stacks, antes, and fixed bet size.
    pub fn with_config(starting_stack: u32, ante: u32, bet_size: u32) -> Self {
        debug_assert!(ante <= starting_stack, "ante exceeds the stack");
        Self {
            starting_stack,
            ante,
            bet_size,
        }
    }

    /// A dealt state with chosen hole cards. Test and analysis hook; live
    /// play goes through `new_state` + `deal`.
    pub fn deal_fixed(&self, cards: [Card; 2]) -> KuhnState {
        debug_assert_ne!(cards[0], cards[1], "both players dealt the same card");
        KuhnState {
            cards: [Some(cards[0]), Some(cards[1])],
            history: Vec::new(),
            bets: [0, 0],
        }
    }

    fn chips_behind(&self, state: &KuhnState, player: usize) -> u32 {
        self.starting_stack - self.ante - state.bets[player]
    }

    fn showdown_winner(&self, state: &KuhnState) -> usize {
        let cards = [state.cards[0].unwrap(), state.cards[1].unwrap()];
        if cards[0] > cards[1] {
            0
        } else {
            1
        }
    }

    fn winner(&self, state: &KuhnState) -> usize {
        if state.history.last() == Some(&Action::Fold) {
            // The folder was the actor of the final action.
            let folder = (state.history.len() - 1) % 2;
            1 - folder
        } else {
            self.showdown_winner(state)
        }
    }
}

impl GameEngine for KuhnEngine {
    type State = KuhnState;

    fn new_state(&self) -> KuhnState {
        KuhnState {
            cards: [None, None],
            history: Vec::new(),
            bets: [0, 0],
        }
    }

    fn deal<R: Rng>(&self, state: &mut KuhnState, rng: &mut R) {
        let mut deck = DECK;
        // Fisher-Yates shuffle, then deal the top two.
        for i in (1..deck.len()).rev() {
            let j = rng.gen_range(0..=i);
            deck.swap(i, j);
        }
        state.cards = [Some(deck[0]), Some(deck[1])];
    }

    fn current_actor(&self, state: &KuhnState) -> Option<usize> {
        if !state.dealt() || self.is_over(state) {
            return None;
        }
        // The opener acts at even history lengths, the responder at odd.
        Some(state.history.len() % 2)
    }

    fn is_over(&self, state: &KuhnState) -> bool {
        state.history.len() >= 2 && state.history.last() != Some(&Action::BetRaise)
    }

    fn legal_actions(&self, state: &KuhnState) -> Vec<Action> {
        let actor = match self.current_actor(state) {
            Some(actor) => actor,
            None => return Vec::new(),
        };

        let opponent = 1 - actor;
        let mut actions = Vec::with_capacity(2);

        if state.facing_bet() {
            actions.push(Action::Fold);
            actions.push(Action::CheckCall);
            // A raise needs chips beyond the call amount.
            let to_call = state.bets[opponent] - state.bets[actor];
            if self.chips_behind(state, actor) >= to_call + self.bet_size {
                actions.push(Action::BetRaise);
            }
        } else {
            actions.push(Action::CheckCall);
            if self.chips_behind(state, actor) >= self.bet_size {
                actions.push(Action::BetRaise);
            }
        }

        actions
    }

    fn apply_action(&self, state: &KuhnState, action: Action) -> Result<KuhnState, EngineError> {
        if !state.dealt() {
            return Err(EngineError::NotDealt);
        }
        if !self.legal_actions(state).contains(&action) {
            return Err(EngineError::InvalidAction {
                action,
                reason: format!("not legal at {:?}", state),
            });
        }

        let actor = self
            .current_actor(state)
            .expect("legal action implies an actor");
        let opponent = 1 - actor;

        let mut next = state.clone();
        match action {
            Action::Fold => {}
            Action::CheckCall => {
                next.bets[actor] = state.bets[opponent];
            }
            Action::BetRaise => {
                next.bets[actor] = state.bets[opponent] + self.bet_size;
            }
        }
        next.history.push(action);
        Ok(next)
    }

    fn utility(&self, state: &KuhnState, player: usize) -> f64 {
        debug_assert!(self.is_over(state), "utility of a live hand");

        let winner = self.winner(state);
        let loser = 1 - winner;
        // The winner collects everything the loser committed.
        let swing = (self.ante + state.bets[loser]) as f64;

        if player == winner {
            swing
        } else {
            -swing
        }
    }

    fn private_cards<'a>(&self, state: &'a KuhnState, player: usize) -> &'a [Card] {
        match state.cards[player] {
            Some(ref card) => std::slice::from_ref(card),
            None => &[],
        }
    }

    fn pot(&self, _state: &KuhnState) -> u32 {
        2 * self.ante
    }

    fn bet(&self, state: &KuhnState, player: usize) -> u32 {
        state.bets[player]
    }

    fn opener(&self, _state: &KuhnState) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::config::TrainParams;
    use crate::mccfr::infoset::InfoSet;
    use crate::mccfr::strategy::average_strategy;
    use crate::mccfr::trainer::Trainer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dealing_gives_distinct_cards() {
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..100 {
            let mut state = engine.new_state();
            assert_eq!(engine.current_actor(&state), None);
            engine.deal(&mut state, &mut rng);
            let a = engine.private_cards(&state, 0);
            let b = engine.private_cards(&state, 1);
            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 1);
            assert_ne!(a[0], b[0]);
        }
    }

    #[test]
    fn opening_actions_and_turn_order() {
        let engine = KuhnEngine::new();
        let state = engine.deal_fixed([Card::QUEEN, Card::JACK]);

        assert_eq!(engine.current_actor(&state), Some(0));
        assert_eq!(
            engine.legal_actions(&state),
            vec![Action::CheckCall, Action::BetRaise]
        );

        let checked = engine.apply_action(&state, Action::CheckCall).unwrap();
        assert_eq!(engine.current_actor(&checked), Some(1));
        assert!(!engine.is_over(&checked));
    }

    #[test]
    fn facing_bet_cannot_reraise_with_canonical_stack() {
        let engine = KuhnEngine::new();
        let state = engine.deal_fixed([Card::KING, Card::QUEEN]);
        let bet = engine.apply_action(&state, Action::BetRaise).unwrap();

        // Stack 2 minus ante minus call leaves nothing to raise with.
        assert_eq!(
            engine.legal_actions(&bet),
            vec![Action::Fold, Action::CheckCall]
        );
    }

    #[test]
    fn fold_is_illegal_without_a_bet() {
        let engine = KuhnEngine::new();
        let state = engine.deal_fixed([Card::JACK, Card::QUEEN]);
        assert!(engine.apply_action(&state, Action::Fold).is_err());
    }

    #[test]
    fn terminal_payoffs() {
        let engine = KuhnEngine::new();

        // Check-check: showdown for the antes.
        let state = engine.deal_fixed([Card::KING, Card::JACK]);
        let state = engine.apply_action(&state, Action::CheckCall).unwrap();
        let state = engine.apply_action(&state, Action::CheckCall).unwrap();
        assert!(engine.is_over(&state));
        assert_eq!(engine.utility(&state, 0), 1.0);
        assert_eq!(engine.utility(&state, 1), -1.0);

        // Bet-fold: the bettor takes the lone ante.
        let state = engine.deal_fixed([Card::JACK, Card::KING]);
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();
        let state = engine.apply_action(&state, Action::Fold).unwrap();
        assert!(engine.is_over(&state));
        assert_eq!(engine.utility(&state, 0), 1.0);
        assert_eq!(engine.utility(&state, 1), -1.0);

        // Bet-call: showdown for two chips each.
        let state = engine.deal_fixed([Card::JACK, Card::KING]);
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();
        let state = engine.apply_action(&state, Action::CheckCall).unwrap();
        assert!(engine.is_over(&state));
        assert_eq!(engine.utility(&state, 0), -2.0);
        assert_eq!(engine.utility(&state, 1), 2.0);

        // Check-bet-call: same pot as bet-call.
        let state = engine.deal_fixed([Card::KING, Card::QUEEN]);
        let state = engine.apply_action(&state, Action::CheckCall).unwrap();
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();
        let state = engine.apply_action(&state, Action::CheckCall).unwrap();
        assert!(engine.is_over(&state));
        assert_eq!(engine.utility(&state, 0), 2.0);
        assert_eq!(engine.utility(&state, 1), -2.0);
    }

    #[test]
    fn zero_sum_at_every_terminal() {
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(13);
        let params = TrainParams::default();
        let mut regrets = crate::mccfr::InfoSetMap::new();
        let mut avg = crate::mccfr::InfoSetMap::new();

        // Drive random playouts through the walker and spot-check the
        // terminal states it produces.
        for _ in 0..50 {
            let mut state = engine.new_state();
            engine.deal(&mut state, &mut rng);
            crate::mccfr::walk(
                &engine, &state, 0, 1.0, &params, &mut regrets, &mut avg, &mut rng,
            )
            .unwrap();
        }

        let state = engine.deal_fixed([Card::QUEEN, Card::KING]);
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();
        let state = engine.apply_action(&state, Action::CheckCall).unwrap();
        assert_eq!(
            engine.utility(&state, 0) + engine.utility(&state, 1),
            0.0
        );
    }

    fn opener_infoset(card: Card) -> InfoSet {
        InfoSet {
            hole_cards: vec![card],
            pot: 2,
            my_bet: 0,
            opponent_bet: 0,
            opening: true,
        }
    }

    fn responder_facing_bet(card: Card) -> InfoSet {
        InfoSet {
            hole_cards: vec![card],
            pot: 2,
            my_bet: 0,
            opponent_bet: 1,
            opening: false,
        }
    }

    #[test]
    fn converges_to_kuhn_equilibrium() {
        let params = TrainParams::default().with_seed(42);
        assert!(params.validate().is_ok());
        let mut trainer = Trainer::new(KuhnEngine::new(), params);
        trainer.train(500_000).unwrap();

        let avg = trainer.avg_strategy();
        let open = [Action::CheckCall, Action::BetRaise];
        let respond = [Action::Fold, Action::CheckCall];

        // Every derived distribution is a valid probability distribution.
        for (infoset, _) in avg.iter() {
            let legal = if infoset.opponent_bet > infoset.my_bet {
                &respond[..]
            } else {
                &open[..]
            };
            let probs = average_strategy(avg, infoset, legal);
            assert!(probs.iter().all(|&p| p >= 0.0));
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }

        // Opener with the King bets almost always.
        let king = average_strategy(avg, &opener_infoset(Card::KING), &open);
        assert!(king[1] > 0.85, "King opening bet frequency {}", king[1]);

        // Opener with the Jack bluffs at most about a third of the time.
        let jack = average_strategy(avg, &opener_infoset(Card::JACK), &open);
        assert!(jack[1] < 0.45, "Jack opening bet frequency {}", jack[1]);

        // Opener with the Queen mostly checks.
        let queen = average_strategy(avg, &opener_infoset(Card::QUEEN), &open);
        assert!(queen[0] > 0.7, "Queen opening check frequency {}", queen[0]);

        // Facing a bet: fold dominates with the Jack, calling with the King.
        let jack_vs_bet = average_strategy(avg, &responder_facing_bet(Card::JACK), &respond);
        assert!(jack_vs_bet[0] > 0.8, "Jack fold-to-bet frequency {}", jack_vs_bet[0]);

        let king_vs_bet = average_strategy(avg, &responder_facing_bet(Card::KING), &respond);
        assert!(king_vs_bet[1] > 0.85, "King call frequency {}", king_vs_bet[1]);

        // The Queen mixes calls around one third.
        let queen_vs_bet = average_strategy(avg, &responder_facing_bet(Card::QUEEN), &respond);
        assert!(
            queen_vs_bet[1] > 0.1 && queen_vs_bet[1] < 0.6,
            "Queen call frequency {}",
            queen_vs_bet[1]
        );
    }
}
