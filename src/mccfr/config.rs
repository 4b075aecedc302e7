//! Training parameters and statistics.

use serde::{Deserialize, Serialize};

/// Parameters of average-strategy sampling.
///
/// The exploration probability for an action `a` at one of the traverser's
/// information sets is
///
/// ```text
/// explore(a) = max(epsilon, (beta + tau * cumulative[a]) / (beta + sum))
/// ```
///
/// where `cumulative[a]` is the action's accumulated average-strategy mass
/// and `sum` is the total mass at the information set.
///
/// # Example
/// ```
/// use as_mccfr::mccfr::TrainParams;
///
/// let params = TrainParams::default().with_seed(42);
/// assert_eq!(params.epsilon, 0.05);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainParams {
    /// Exploration floor: every action is sampled with at least this
    /// probability. Keeps the estimator's importance weights bounded.
    pub epsilon: f64,

    /// Threshold parameter: weighs how strongly frequently-played
    /// average-strategy actions are preferred for exploration. Any action the
    /// average strategy plays with probability at least `1/tau` is always
    /// sampled.
    pub tau: f64,

    /// Bonus parameter: damps the exploration ratio early in training while
    /// cumulative mass is near zero, so young information sets are explored
    /// broadly.
    pub beta: f64,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            tau: 1e3,
            beta: 1e2,
            seed: None,
        }
    }
}

impl TrainParams {
    /// Create parameters with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the exploration floor.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: set the threshold parameter.
    pub fn with_tau(mut self, tau: f64) -> Self {
        self.tau = tau;
        self
    }

    /// Builder method: set the bonus parameter.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.tau < 0.0 || !self.tau.is_finite() {
            return Err(ConfigError::InvalidTau(self.tau));
        }
        // beta = 0 makes the exploration ratio 0/0 on a first visit.
        if self.beta <= 0.0 || !self.beta.is_finite() {
            return Err(ConfigError::InvalidBeta(self.beta));
        }
        Ok(())
    }
}

/// Errors from validating training parameters.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Exploration floor out of range [0, 1].
    InvalidEpsilon(f64),
    /// Threshold parameter negative or non-finite.
    InvalidTau(f64),
    /// Bonus parameter non-positive or non-finite.
    InvalidBeta(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidEpsilon(v) => {
                write!(f, "epsilon {} is out of range [0, 1]", v)
            }
            ConfigError::InvalidTau(v) => write!(f, "tau {} must be finite and >= 0", v),
            ConfigError::InvalidBeta(v) => write!(f, "beta {} must be finite and > 0", v),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked across a training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainStats {
    /// Total number of epochs completed.
    pub epochs: u64,

    /// Number of unique information sets registered.
    pub info_sets: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Epochs per second.
    pub epochs_per_second: f64,
}

impl TrainStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update epochs per second from the elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.epochs_per_second = self.epochs as f64 / self.elapsed_seconds;
        }
    }
}
