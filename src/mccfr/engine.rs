//! Game engine contract for the solver.
//!
//! The MCCFR core is generic over any rules engine implementing
//! [`GameEngine`]. The engine owns everything card-game specific: dealing,
//! betting legality, hand ranking, and payout settlement. The solver only
//! ever interacts with it through this trait, so the tree walker, trainer,
//! and policy work unchanged across game variants.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::mccfr::action::Action;

/// A playing card, reduced to its rank.
///
/// Suits never matter in the variants this crate ships (Kuhn poker plays a
/// three-card deck of distinct ranks), so a card is an ordered rank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(pub u8);

impl Card {
    /// The Jack, the lowest rank in the Kuhn deck.
    pub const JACK: Card = Card(0);
    /// The Queen.
    pub const QUEEN: Card = Card(1);
    /// The King, the highest rank in the Kuhn deck.
    pub const KING: Card = Card(2);
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Card::JACK => write!(f, "J"),
            Card::QUEEN => write!(f, "Q"),
            Card::KING => write!(f, "K"),
            Card(r) => write!(f, "#{}", r),
        }
    }
}

/// Errors raised by a game engine.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// An illegal or out-of-turn action was attempted.
    ///
    /// The solver never triggers this as long as it samples from
    /// `legal_actions()`; seeing it means an engine contract violation, so
    /// callers propagate it and never retry.
    InvalidAction {
        /// The rejected action.
        action: Action,
        /// Engine-provided context for the rejection.
        reason: String,
    },
    /// An operation was attempted before private cards were dealt.
    NotDealt,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidAction { action, reason } => {
                write!(f, "illegal action {}: {}", action, reason)
            }
            EngineError::NotDealt => write!(f, "private cards have not been dealt"),
        }
    }
}

impl std::error::Error for EngineError {}

/// The rules-engine collaborator contract.
///
/// Implementations are constructed with their table configuration (stacks,
/// antes, bet sizing); the trait covers a single hand from ante posting to
/// settlement.
///
/// # Contract
///
/// - `apply_action` returns a new owned state and must leave its input
///   untouched. The tree walker explores sibling continuations from the same
///   ancestor, so one branch's mutation must not leak into another.
/// - `legal_actions` must be non-empty at every non-terminal, dealt state.
/// - `private_cards(state, p)` exposes player `p`'s cards and nothing else;
///   the solver builds information sets from it and relies on the engine
///   never to leak the opponent's holding through any other accessor it
///   uses.
pub trait GameEngine {
    /// A complete hand state, including private information.
    type State: Clone + fmt::Debug;

    /// Start a fresh hand: antes posted, no cards dealt yet.
    fn new_state(&self) -> Self::State;

    /// Deal private cards in place.
    fn deal<R: Rng>(&self, state: &mut Self::State, rng: &mut R);

    /// The player entitled to act, or `None` at terminal or undealt states.
    fn current_actor(&self, state: &Self::State) -> Option<usize>;

    /// Whether the hand has ended.
    fn is_over(&self, state: &Self::State) -> bool;

    /// Actions legal for the current actor. Empty only at terminal or
    /// undealt states.
    fn legal_actions(&self, state: &Self::State) -> Vec<Action>;

    /// Apply an action for the current actor, producing a new owned state.
    fn apply_action(&self, state: &Self::State, action: Action) -> Result<Self::State, EngineError>;

    /// Signed chip result for `player` at a terminal state, relative to the
    /// start of the hand.
    fn utility(&self, state: &Self::State, player: usize) -> f64;

    /// Private cards of `player`. Visibility scoping is the caller's duty:
    /// only pass a `player` whose view you are allowed to construct.
    fn private_cards<'a>(&self, state: &'a Self::State, player: usize) -> &'a [Card];

    /// Chips collected into the pot from previous betting, antes included,
    /// excluding live bets of the current round.
    fn pot(&self, state: &Self::State) -> u32;

    /// Live chips `player` has committed in the current betting round.
    fn bet(&self, state: &Self::State, player: usize) -> u32;

    /// The player who opens the betting.
    fn opener(&self, state: &Self::State) -> usize;

    /// Number of seats. Heads-up throughout this crate.
    fn num_players(&self) -> usize {
        2
    }
}
