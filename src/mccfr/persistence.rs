//! Saving and restoring the accumulator tables.
//!
//! The persisted artifact is an opaque serialized mapping from information
//! set to per-action floats; the only guarantee is round-trip fidelity.
//! Loading is all-or-nothing: a missing or corrupt file is a fatal error,
//! never a partial or fallback load. I/O happens only at these boundaries,
//! never inside the training loop.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::mccfr::storage::{InfoSetMap, TableRow};

/// The trained tables in persistable form.
///
/// The regret table is the load-bearing artifact; the average-strategy table
/// rides along so training can resume and the converged average policy can
/// be inspected. Either may be empty.
#[derive(Debug, Clone, Default)]
pub struct TableFile {
    /// Accumulated counterfactual regrets.
    pub regrets: InfoSetMap,
    /// Accumulated average-strategy mass.
    pub avg_strategy: InfoSetMap,
}

/// On-disk shape: composite-keyed maps flatten to row sequences.
#[derive(Serialize, Deserialize)]
struct TableFileData {
    regrets: Vec<TableRow>,
    #[serde(default)]
    avg_strategy: Vec<TableRow>,
}

impl TableFile {
    /// Bundle tables for persistence.
    pub fn new(regrets: InfoSetMap, avg_strategy: InfoSetMap) -> Self {
        Self {
            regrets,
            avg_strategy,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.data())
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: TableFileData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }

    /// Save both tables to `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::mccfr::SolverError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &self.data())?;
        info!(
            "saved {} regret and {} average-strategy entries to {}",
            self.regrets.len(),
            self.avg_strategy.len(),
            path.display()
        );
        Ok(())
    }

    /// Load tables from `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::mccfr::SolverError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let data: TableFileData = serde_json::from_reader(BufReader::new(file))?;
        let tables = Self::from_data(data);
        info!(
            "loaded {} regret and {} average-strategy entries from {}",
            tables.regrets.len(),
            tables.avg_strategy.len(),
            path.display()
        );
        Ok(tables)
    }

    /// Write an indented JSON rendition to `path`.
    ///
    /// A convenience for human inspection; the compact form written by
    /// `save_to_file` is the load-bearing artifact.
    pub fn export_pretty<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::mccfr::SolverError> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.data())?;
        Ok(())
    }

    fn data(&self) -> TableFileData {
        TableFileData {
            regrets: self.regrets.to_rows(),
            avg_strategy: self.avg_strategy.to_rows(),
        }
    }

    fn from_data(data: TableFileData) -> Self {
        Self {
            regrets: InfoSetMap::from_rows(data.regrets),
            avg_strategy: InfoSetMap::from_rows(data.avg_strategy),
        }
    }
}
