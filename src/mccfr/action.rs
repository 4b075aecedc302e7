//! Player actions for limit heads-up poker.
//!
//! The action set collapses every betting decision into three choices:
//! fold, check/call, and bet/raise. Larger variants with richer bet sizing
//! (all-in, fractional pot bets) would extend this enum.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A betting action.
///
/// Which of these are legal at a given state depends on whether the acting
/// player is facing an outstanding bet; the game engine is the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Surrender the pot. Only legal when facing a bet.
    Fold,
    /// Check if no bet is outstanding, otherwise call.
    CheckCall,
    /// Open a bet, or raise over an outstanding one.
    BetRaise,
}

impl Action {
    /// Every action variant, in a fixed order.
    pub const ALL: [Action; 3] = [Action::Fold, Action::CheckCall, Action::BetRaise];

    /// Short name used in logs and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::CheckCall => "check/call",
            Action::BetRaise => "bet/raise",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Action::Fold.to_string(), "fold");
        assert_eq!(Action::CheckCall.to_string(), "check/call");
        assert_eq!(Action::BetRaise.to_string(), "bet/raise");
    }

    #[test]
    fn all_is_exhaustive() {
        assert_eq!(Action::ALL.len(), 3);
        assert!(Action::ALL.contains(&Action::Fold));
        assert!(Action::ALL.contains(&Action::CheckCall));
        assert!(Action::ALL.contains(&Action::BetRaise));
    }
}
