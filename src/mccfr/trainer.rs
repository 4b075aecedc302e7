//! The training loop.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::mccfr::config::{TrainParams, TrainStats};
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::mccfr::policy::Policy;
use crate::mccfr::storage::InfoSetMap;
use crate::mccfr::walker::walk;

/// Runs epochs of average-strategy sampling over a game engine.
///
/// Each epoch deals a fresh hand and performs one tree walk with a sampling
/// probability of 1.0. The traverser seat alternates deterministically with
/// epoch parity, which guarantees balanced exposure to both seats over any
/// even epoch count; both accumulator tables are keyed by information set
/// rather than seat, so each table sees updates from both seating positions.
///
/// # Example
/// ```ignore
/// use as_mccfr::games::kuhn::KuhnEngine;
/// use as_mccfr::mccfr::{Trainer, TrainParams};
///
/// let mut trainer = Trainer::new(KuhnEngine::new(), TrainParams::default().with_seed(42));
/// trainer.train(500_000)?;
/// let policy = trainer.policy();
/// ```
pub struct Trainer<E: GameEngine> {
    engine: E,
    params: TrainParams,
    regrets: InfoSetMap,
    avg_strategy: InfoSetMap,
    epoch: u64,
    stats: TrainStats,
    rng: StdRng,
}

impl<E: GameEngine> Trainer<E> {
    /// Create a trainer with empty accumulator tables.
    pub fn new(engine: E, params: TrainParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            engine,
            params,
            regrets: InfoSetMap::new(),
            avg_strategy: InfoSetMap::new(),
            epoch: 0,
            stats: TrainStats::new(),
            rng,
        }
    }

    /// Create a trainer that resumes from previously trained tables.
    pub fn with_tables(
        engine: E,
        params: TrainParams,
        regrets: InfoSetMap,
        avg_strategy: InfoSetMap,
    ) -> Self {
        let mut trainer = Self::new(engine, params);
        trainer.regrets = regrets;
        trainer.avg_strategy = avg_strategy;
        trainer
    }

    /// Run a single epoch: deal, pick the traverser by epoch parity, walk.
    ///
    /// Returns the sampled root value for the traverser.
    pub fn run_epoch(&mut self) -> Result<f64, SolverError> {
        let hero = (self.epoch % 2) as usize;

        let mut state = self.engine.new_state();
        self.engine.deal(&mut state, &mut self.rng);

        let value = walk(
            &self.engine,
            &state,
            hero,
            1.0,
            &self.params,
            &mut self.regrets,
            &mut self.avg_strategy,
            &mut self.rng,
        )?;

        self.epoch += 1;
        Ok(value)
    }

    /// Train for `epochs` epochs.
    pub fn train(&mut self, epochs: u64) -> Result<&TrainStats, SolverError> {
        let start = Instant::now();

        for _ in 0..epochs {
            self.run_epoch()?;
        }

        self.stats.epochs = self.epoch;
        self.stats.info_sets = self.num_info_sets();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        self.stats.update_rate();

        Ok(&self.stats)
    }

    /// Train with a progress callback invoked every `callback_interval`
    /// epochs.
    pub fn train_with_callback<F>(
        &mut self,
        epochs: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<&TrainStats, SolverError>
    where
        F: FnMut(&TrainStats),
    {
        let start = Instant::now();
        let interval = callback_interval.max(1);

        for i in 0..epochs {
            self.run_epoch()?;

            if (i + 1) % interval == 0 {
                self.stats.epochs = self.epoch;
                self.stats.info_sets = self.num_info_sets();
                self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
                self.stats.update_rate();
                callback(&self.stats);
            }
        }

        self.stats.epochs = self.epoch;
        self.stats.info_sets = self.num_info_sets();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        self.stats.update_rate();

        Ok(&self.stats)
    }

    /// Epochs completed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of information sets registered so far.
    ///
    /// Counted from the average-strategy table, which registers every
    /// decision point visited from either side of the walk.
    pub fn num_info_sets(&self) -> usize {
        self.avg_strategy.len()
    }

    /// Statistics from the most recent training call.
    pub fn stats(&self) -> &TrainStats {
        &self.stats
    }

    /// The trained regret table.
    pub fn regrets(&self) -> &InfoSetMap {
        &self.regrets
    }

    /// The accumulated average-strategy table.
    pub fn avg_strategy(&self) -> &InfoSetMap {
        &self.avg_strategy
    }

    /// The game engine being trained against.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The training parameters.
    pub fn params(&self) -> &TrainParams {
        &self.params
    }

    /// Derive a live-play policy from the trained regret table.
    pub fn policy(&self) -> Policy {
        Policy::new(self.regrets.clone())
    }

    /// Consume the trainer, yielding `(regrets, avg_strategy)`.
    pub fn into_tables(self) -> (InfoSetMap, InfoSetMap) {
        (self.regrets, self.avg_strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnEngine;

    #[test]
    fn epochs_advance_and_register_infosets() {
        let params = TrainParams::default().with_seed(42);
        let mut trainer = Trainer::new(KuhnEngine::new(), params);

        let stats = trainer.train(100).unwrap().clone();
        assert_eq!(stats.epochs, 100);
        assert_eq!(trainer.epoch(), 100);
        assert!(stats.info_sets > 0);
        assert!(!trainer.regrets().is_empty());
        assert!(!trainer.avg_strategy().is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let params = TrainParams::default().with_seed(7);
        let mut a = Trainer::new(KuhnEngine::new(), params.clone());
        let mut b = Trainer::new(KuhnEngine::new(), params);

        a.train(500).unwrap();
        b.train(500).unwrap();

        assert_eq!(a.regrets().len(), b.regrets().len());
        for (infoset, actions) in a.regrets().iter() {
            assert_eq!(b.regrets().get(infoset), Some(actions));
        }
        for (infoset, actions) in a.avg_strategy().iter() {
            assert_eq!(b.avg_strategy().get(infoset), Some(actions));
        }
    }

    #[test]
    fn callback_fires_at_interval() {
        let params = TrainParams::default().with_seed(1);
        let mut trainer = Trainer::new(KuhnEngine::new(), params);

        let mut calls = 0;
        trainer
            .train_with_callback(100, 25, |stats| {
                calls += 1;
                assert!(stats.epochs % 25 == 0);
            })
            .unwrap();
        assert_eq!(calls, 4);
    }
}
