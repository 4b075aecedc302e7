//! Accumulator tables keyed by information set.
//!
//! One table type serves both accumulators the algorithm needs:
//!
//! - **Regret table**: accumulated counterfactual regret per action. Values
//!   may be negative.
//! - **Average-strategy table**: realization-weighted strategy mass per
//!   action. Non-negative and monotonically non-decreasing; the running
//!   numerator of both the converged average policy and the walker's
//!   exploration heuristic.
//!
//! Tables are created empty per training run, mutated in place through every
//! walk, and either discarded or persisted at the end. At inference time they
//! are loaded once and only read. Training is purely sequential, so there is
//! no interior locking; callers pass tables by reference into every call.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::mccfr::action::Action;
use crate::mccfr::infoset::InfoSet;

/// Per-action accumulated values at one information set.
pub type ActionValues = FxHashMap<Action, f64>;

/// A map from information set to per-action accumulated floats.
///
/// The whole [`InfoSet`] value is the hash key. Lazily populated: an absent
/// entry means the information set has never been visited, which is a normal
/// condition and is reported as `None`, never as an error.
#[derive(Debug, Clone, Default)]
pub struct InfoSetMap {
    entries: FxHashMap<InfoSet, ActionValues>,
}

impl InfoSetMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Create a table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Per-action values at `infoset`, or `None` if never visited.
    pub fn get(&self, infoset: &InfoSet) -> Option<&ActionValues> {
        self.entries.get(infoset)
    }

    /// Set the value for one action, creating the entry as needed.
    pub fn set(&mut self, infoset: &InfoSet, action: Action, value: f64) {
        self.entries
            .entry(infoset.clone())
            .or_default()
            .insert(action, value);
    }

    /// Read-modify-write the value for one action. An absent value reads
    /// as 0.0, so a first visit initializes rather than adds garbage.
    pub fn update<F>(&mut self, infoset: &InfoSet, action: Action, f: F)
    where
        F: FnOnce(f64) -> f64,
    {
        let slot = self
            .entries
            .entry(infoset.clone())
            .or_default()
            .entry(action)
            .or_insert(0.0);
        *slot = f(*slot);
    }

    /// Add `delta` to the value for one action.
    pub fn add(&mut self, infoset: &InfoSet, action: Action, delta: f64) {
        self.update(infoset, action, |v| v + delta);
    }

    /// Zero-initialize every listed action that has no value yet, and return
    /// the entry. This is how a new information set is registered.
    pub fn ensure_actions(&mut self, infoset: &InfoSet, actions: &[Action]) -> &ActionValues {
        let entry = self.entries.entry(infoset.clone()).or_default();
        for &action in actions {
            entry.entry(action).or_insert(0.0);
        }
        entry
    }

    /// Number of information sets stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&InfoSet, &ActionValues)> {
        self.entries.iter()
    }

    /// Copy the table into serializable rows.
    pub fn to_rows(&self) -> Vec<TableRow> {
        self.entries
            .iter()
            .map(|(infoset, actions)| TableRow {
                infoset: infoset.clone(),
                actions: actions.clone(),
            })
            .collect()
    }

    /// Rebuild a table from serialized rows.
    pub fn from_rows(rows: Vec<TableRow>) -> Self {
        let mut entries =
            FxHashMap::with_capacity_and_hasher(rows.len(), Default::default());
        for row in rows {
            entries.insert(row.infoset, row.actions);
        }
        Self { entries }
    }
}

/// One serialized table entry.
///
/// Tables are keyed by a composite value, which JSON objects cannot express,
/// so the persisted form is a sequence of rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// The information set this row belongs to.
    pub infoset: InfoSet,
    /// Accumulated value per action.
    pub actions: ActionValues,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::engine::Card;

    fn infoset(card: Card, opponent_bet: u32) -> InfoSet {
        InfoSet {
            hole_cards: vec![card],
            pot: 2,
            my_bet: 0,
            opponent_bet,
            opening: true,
        }
    }

    #[test]
    fn absent_entry_is_none() {
        let table = InfoSetMap::new();
        assert!(table.get(&infoset(Card::JACK, 0)).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn set_and_update() {
        let mut table = InfoSetMap::new();
        let key = infoset(Card::QUEEN, 1);

        table.set(&key, Action::Fold, -1.0);
        table.update(&key, Action::Fold, |v| v + 3.0);
        // First touch of an action reads as zero.
        table.update(&key, Action::CheckCall, |v| v + 0.5);

        let entry = table.get(&key).unwrap();
        assert_eq!(entry[&Action::Fold], 2.0);
        assert_eq!(entry[&Action::CheckCall], 0.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn ensure_actions_registers_zeros() {
        let mut table = InfoSetMap::new();
        let key = infoset(Card::KING, 0);
        table.set(&key, Action::BetRaise, 4.0);

        let entry = table.ensure_actions(&key, &[Action::CheckCall, Action::BetRaise]);
        assert_eq!(entry[&Action::CheckCall], 0.0);
        // Existing values survive registration.
        assert_eq!(entry[&Action::BetRaise], 4.0);
    }

    #[test]
    fn rows_round_trip() {
        let mut table = InfoSetMap::new();
        table.set(&infoset(Card::JACK, 0), Action::BetRaise, 0.125);
        table.set(&infoset(Card::KING, 1), Action::Fold, -7.5);
        table.set(&infoset(Card::KING, 1), Action::CheckCall, 19.25);

        let rebuilt = InfoSetMap::from_rows(table.to_rows());
        assert_eq!(rebuilt.len(), table.len());
        for (key, actions) in table.iter() {
            assert_eq!(rebuilt.get(key), Some(actions));
        }
    }
}
