//! The sampling tree walker.
//!
//! One call performs one outcome-sampled traversal of the hand tree for a
//! chosen traverser, accumulating regret at the traverser's decision points
//! and average-strategy mass at the opponent's. Exploration at traverser
//! nodes follows the average-strategy sampling heuristic of Gibson et al.
//! (2012): actions the average strategy already favors are sampled more
//! often, with an `epsilon` floor so no branch starves.

use rand::Rng;

use crate::mccfr::config::TrainParams;
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::mccfr::infoset::InfoSet;
use crate::mccfr::storage::InfoSetMap;
use crate::mccfr::strategy::{regret_matching, sample_action};

/// Walk the subtree rooted at `state`, returning the sampled
/// counterfactual value of `state` for `player`.
///
/// Both accumulator tables are threaded through explicitly; the walker owns
/// no state of its own. Each branch recurses on a fresh owned state from
/// `apply_action`, so sibling branches never observe each other's mutations.
///
/// # Arguments
/// * `state` - the history at the root of the subtree traversed by this call
/// * `player` - the traverser whose regrets this walk updates
/// * `sample_prob` - the probability with which this history was sampled;
///   terminal utilities are divided by it, which is the importance-sampling
///   correction that keeps the estimator unbiased under non-uniform
///   sampling. Root calls pass 1.0.
/// * `params` - exploration parameters (epsilon floor, tau threshold,
///   beta bonus)
/// * `regrets` - accumulated counterfactual regret per information set
/// * `avg_strategy` - accumulated realization-weighted strategy mass
///
/// # Returns
/// The approximated utility of `state` for `player`.
pub fn walk<E, R>(
    engine: &E,
    state: &E::State,
    player: usize,
    sample_prob: f64,
    params: &TrainParams,
    regrets: &mut InfoSetMap,
    avg_strategy: &mut InfoSetMap,
    rng: &mut R,
) -> Result<f64, SolverError>
where
    E: GameEngine,
    R: Rng + ?Sized,
{
    if engine.is_over(state) {
        return Ok(engine.utility(state, player) / sample_prob);
    }

    let actor = engine.current_actor(state).ok_or_else(|| {
        SolverError::InvalidState(format!("no actor at non-terminal state {:?}", state))
    })?;
    let legal = engine.legal_actions(state);
    if legal.is_empty() {
        return Err(SolverError::NoLegalActions(format!("{:?}", state)));
    }

    let infoset = InfoSet::from_state(engine, state, actor)?;
    let strategy = regret_matching(regrets, &infoset, &legal);

    if actor != player {
        // Opponent node: register the opponent's realization-weighted play,
        // then follow a single sampled action. The opponent's own strategy
        // drives the sampling here, so sample_prob does not rescale.
        for (i, &action) in legal.iter().enumerate() {
            avg_strategy.add(&infoset, action, strategy[i] / sample_prob);
        }

        let action = sample_action(&legal, &strategy, rng);
        let next = engine.apply_action(state, action)?;
        return walk(
            engine,
            &next,
            player,
            sample_prob,
            params,
            regrets,
            avg_strategy,
            rng,
        );
    }

    // Traverser node. Registering the legal actions at zero is what puts a
    // new information set into the table; on that first visit the cumulative
    // sum is zero and the ratio below is beta/beta = 1, so every action is
    // explored before the heuristic starts biasing.
    let cumulative: Vec<f64> = {
        let entry = avg_strategy.ensure_actions(&infoset, &legal);
        legal.iter().map(|a| entry[a]).collect()
    };
    let sum: f64 = cumulative.iter().sum();

    let mut action_values = vec![0.0; legal.len()];
    for (i, &action) in legal.iter().enumerate() {
        let ratio = (params.beta + params.tau * cumulative[i]) / (params.beta + sum);
        let explore = ratio.max(params.epsilon);

        if rng.gen::<f64>() < explore {
            let next = engine.apply_action(state, action)?;
            action_values[i] = walk(
                engine,
                &next,
                player,
                sample_prob * explore.min(1.0),
                params,
                regrets,
                avg_strategy,
                rng,
            )?;
        }
        // A skipped branch contributes 0 to this epoch's update; the branch
        // is covered probabilistically across future epochs.
    }

    let state_value: f64 = strategy
        .iter()
        .zip(action_values.iter())
        .map(|(&s, &v)| s * v)
        .sum();

    for (i, &action) in legal.iter().enumerate() {
        regrets.add(&infoset, action, action_values[i] - state_value);
    }

    Ok(state_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnEngine;
    use crate::mccfr::action::Action;
    use crate::mccfr::engine::Card;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn terminal_state_returns_weighted_utility() {
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(3);
        let params = TrainParams::default();
        let mut regrets = InfoSetMap::new();
        let mut avg = InfoSetMap::new();

        // Bet then fold: player 0 wins the lone ante.
        let state = engine.deal_fixed([Card::JACK, Card::KING]);
        let state = engine.apply_action(&state, Action::BetRaise).unwrap();
        let state = engine.apply_action(&state, Action::Fold).unwrap();
        assert!(engine.is_over(&state));

        let value = walk(
            &engine, &state, 0, 0.25, &params, &mut regrets, &mut avg, &mut rng,
        )
        .unwrap();

        // utility / sample_prob, exactly, and no recursion happened.
        assert_eq!(value, 1.0 / 0.25);
        assert!(regrets.is_empty());
        assert!(avg.is_empty());
    }

    #[test]
    fn first_visit_explores_every_action() {
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(5);
        let params = TrainParams::default();
        let mut regrets = InfoSetMap::new();
        let mut avg = InfoSetMap::new();

        let state = engine.deal_fixed([Card::QUEEN, Card::JACK]);
        walk(
            &engine, &state, 0, 1.0, &params, &mut regrets, &mut avg, &mut rng,
        )
        .unwrap();

        // With zero cumulative mass the exploration probability is 1 for
        // both root actions, so regret gets seeded for each of them.
        let root = InfoSet::from_state(&engine, &state, 0).unwrap();
        let entry = regrets.get(&root).expect("root infoset registered");
        assert!(entry.contains_key(&Action::CheckCall));
        assert!(entry.contains_key(&Action::BetRaise));
    }

    #[test]
    fn opponent_turn_accumulates_average_strategy() {
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(9);
        let params = TrainParams::default();
        let mut regrets = InfoSetMap::new();
        let mut avg = InfoSetMap::new();

        // Traverse for player 1; the root actor (player 0) is the opponent.
        let state = engine.deal_fixed([Card::KING, Card::QUEEN]);
        walk(
            &engine, &state, 1, 1.0, &params, &mut regrets, &mut avg, &mut rng,
        )
        .unwrap();

        // Fresh tables derive a uniform strategy at the root, so each legal
        // action receives 0.5 / 1.0 of average-strategy mass.
        let root = InfoSet::from_state(&engine, &state, 0).unwrap();
        let entry = avg.get(&root).expect("opponent infoset registered");
        assert_eq!(entry[&Action::CheckCall], 0.5);
        assert_eq!(entry[&Action::BetRaise], 0.5);

        // The opponent's regrets are untouched on this walk.
        assert!(regrets.get(&root).is_none());
    }

    #[test]
    fn regret_sums_to_zero_across_actions_on_first_visit() {
        // value[a] - state_value summed over actions weighted by the uniform
        // strategy is zero by construction; with two legal actions the two
        // regret deltas are negatives of each other.
        let engine = KuhnEngine::new();
        let mut rng = StdRng::seed_from_u64(17);
        let params = TrainParams::default();
        let mut regrets = InfoSetMap::new();
        let mut avg = InfoSetMap::new();

        let state = engine.deal_fixed([Card::KING, Card::JACK]);
        walk(
            &engine, &state, 0, 1.0, &params, &mut regrets, &mut avg, &mut rng,
        )
        .unwrap();

        let root = InfoSet::from_state(&engine, &state, 0).unwrap();
        let entry = regrets.get(&root).unwrap();
        let total: f64 = entry.values().sum();
        assert!(total.abs() < 1e-9, "regret deltas should cancel, got {}", total);
    }
}
