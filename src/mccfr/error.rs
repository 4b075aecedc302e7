//! Solver error types.

use std::fmt;
use std::io;

use crate::mccfr::engine::EngineError;

/// Errors surfaced by the solver core.
///
/// Absence of a stored information set is never an error; it is a normal
/// condition on the training hot path, reported as `None`/uniform instead.
#[derive(Debug)]
pub enum SolverError {
    /// An information set was requested for a player not entitled to act,
    /// or the engine produced a state the walker cannot interpret.
    InvalidState(String),
    /// The engine reported no legal actions at a non-terminal state.
    NoLegalActions(String),
    /// The engine rejected an action. Propagated, never retried.
    Engine(EngineError),
    /// Table file I/O failed. Fatal at load time, no partial load.
    Io(io::Error),
    /// Table file did not parse. Fatal at load time.
    Serde(serde_json::Error),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::InvalidState(msg) => write!(f, "invalid state: {}", msg),
            SolverError::NoLegalActions(msg) => {
                write!(f, "no legal actions at non-terminal state: {}", msg)
            }
            SolverError::Engine(e) => write!(f, "engine error: {}", e),
            SolverError::Io(e) => write!(f, "table file I/O error: {}", e),
            SolverError::Serde(e) => write!(f, "table file parse error: {}", e),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Engine(e) => Some(e),
            SolverError::Io(e) => Some(e),
            SolverError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for SolverError {
    fn from(e: EngineError) -> Self {
        SolverError::Engine(e)
    }
}

impl From<io::Error> for SolverError {
    fn from(e: io::Error) -> Self {
        SolverError::Io(e)
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(e: serde_json::Error) -> Self {
        SolverError::Serde(e)
    }
}
