//! Strategy derivation by regret matching.

use rand::Rng;

use crate::mccfr::action::Action;
use crate::mccfr::infoset::InfoSet;
use crate::mccfr::storage::InfoSetMap;

/// Derive the current strategy at `infoset` over `legal` actions.
///
/// Probabilities are proportional to positive accumulated regret; an action
/// with no stored regret counts as zero. When no action has positive
/// regret, or the information set has never been visited, the distribution
/// is uniform.
///
/// Recomputed fresh on every visit. Legal actions and regrets both change
/// between visits, so a cached distribution would go stale.
///
/// # Arguments
/// * `regrets` - the regret table
/// * `infoset` - the information set of the acting player
/// * `legal` - the legal actions at the matching state; must be non-empty
///
/// # Returns
/// Action probabilities aligned with `legal`, summing to 1.0.
pub fn regret_matching(regrets: &InfoSetMap, infoset: &InfoSet, legal: &[Action]) -> Vec<f64> {
    debug_assert!(!legal.is_empty(), "regret matching over an empty action set");

    let uniform = 1.0 / legal.len() as f64;
    let entry = match regrets.get(infoset) {
        Some(entry) => entry,
        None => return vec![uniform; legal.len()],
    };

    let positive: Vec<f64> = legal
        .iter()
        .map(|a| entry.get(a).copied().unwrap_or(0.0).max(0.0))
        .collect();
    let sum: f64 = positive.iter().sum();

    if sum > 0.0 {
        positive.iter().map(|&r| r / sum).collect()
    } else {
        vec![uniform; legal.len()]
    }
}

/// Derive the time-averaged strategy at `infoset` over `legal` actions.
///
/// Normalizes the accumulated average-strategy mass. This is the
/// distribution that converges to Nash equilibrium in two-player zero-sum
/// games; the instantaneous regret-matching strategy does not. Absent or
/// all-zero entries yield a uniform distribution.
pub fn average_strategy(
    avg_strategy: &InfoSetMap,
    infoset: &InfoSet,
    legal: &[Action],
) -> Vec<f64> {
    debug_assert!(!legal.is_empty(), "average strategy over an empty action set");

    let uniform = 1.0 / legal.len() as f64;
    let entry = match avg_strategy.get(infoset) {
        Some(entry) => entry,
        None => return vec![uniform; legal.len()],
    };

    let mass: Vec<f64> = legal
        .iter()
        .map(|a| entry.get(a).copied().unwrap_or(0.0))
        .collect();
    let total: f64 = mass.iter().sum();

    if total > 0.0 {
        mass.iter().map(|&m| m / total).collect()
    } else {
        vec![uniform; legal.len()]
    }
}

/// Sample an index from a probability distribution.
///
/// Cumulative-sum draw; falls back to the last index to absorb
/// floating-point remainder.
pub fn sample_index<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;

    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return i;
        }
    }

    probabilities.len() - 1
}

/// Sample one action from a strategy aligned with `legal`.
pub fn sample_action<R: Rng + ?Sized>(
    legal: &[Action],
    strategy: &[f64],
    rng: &mut R,
) -> Action {
    legal[sample_index(strategy, rng)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::engine::Card;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn infoset() -> InfoSet {
        InfoSet {
            hole_cards: vec![Card::QUEEN],
            pot: 2,
            my_bet: 0,
            opponent_bet: 1,
            opening: false,
        }
    }

    fn assert_distribution(strategy: &[f64]) {
        assert!(strategy.iter().all(|&p| p >= 0.0));
        let sum: f64 = strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "probabilities sum to {}", sum);
    }

    #[test]
    fn unseen_infoset_is_uniform() {
        let regrets = InfoSetMap::new();
        let legal = [Action::Fold, Action::CheckCall];

        let strategy = regret_matching(&regrets, &infoset(), &legal);
        assert_distribution(&strategy);
        assert_eq!(strategy, vec![0.5, 0.5]);
    }

    #[test]
    fn positive_regrets_are_normalized() {
        let mut regrets = InfoSetMap::new();
        let key = infoset();
        regrets.set(&key, Action::Fold, -1.0);
        regrets.set(&key, Action::CheckCall, 3.0);
        regrets.set(&key, Action::BetRaise, 1.0);

        let legal = [Action::Fold, Action::CheckCall, Action::BetRaise];
        let strategy = regret_matching(&regrets, &key, &legal);
        assert_distribution(&strategy);
        assert_eq!(strategy, vec![0.0, 0.75, 0.25]);
    }

    #[test]
    fn all_nonpositive_falls_back_to_uniform() {
        let mut regrets = InfoSetMap::new();
        let key = infoset();
        regrets.set(&key, Action::Fold, -2.0);
        regrets.set(&key, Action::CheckCall, 0.0);

        let legal = [Action::Fold, Action::CheckCall];
        let strategy = regret_matching(&regrets, &key, &legal);
        assert_eq!(strategy, vec![0.5, 0.5]);
    }

    #[test]
    fn unstored_action_counts_as_zero_regret() {
        let mut regrets = InfoSetMap::new();
        let key = infoset();
        regrets.set(&key, Action::CheckCall, 2.0);

        // Fold never stored; it contributes zero positive regret.
        let legal = [Action::Fold, Action::CheckCall];
        let strategy = regret_matching(&regrets, &key, &legal);
        assert_eq!(strategy, vec![0.0, 1.0]);
    }

    #[test]
    fn sampling_respects_support() {
        let mut rng = StdRng::seed_from_u64(7);
        let legal = [Action::Fold, Action::CheckCall, Action::BetRaise];
        let strategy = [0.0, 1.0, 0.0];

        for _ in 0..100 {
            assert_eq!(sample_action(&legal, &strategy, &mut rng), Action::CheckCall);
        }
    }

    #[test]
    fn sampling_hits_every_positive_action() {
        let mut rng = StdRng::seed_from_u64(11);
        let strategy = [0.25, 0.5, 0.25];
        let mut seen = [false; 3];

        for _ in 0..1000 {
            seen[sample_index(&strategy, &mut rng)] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }
}
