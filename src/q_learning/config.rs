//! Hyperparameters for the action-value table.

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error};

/// Exploration, learning-rate and discount settings.
///
/// Fixed for the lifetime of a table. `seed` is only consulted by
/// [`crate::q_learning::QLearner`] when it builds its random source.
///
/// # Examples
///
/// ```
/// use qlearn::q_learning::Hyperparameters;
///
/// let params = Hyperparameters::new(0.1, 0.2, 0.8).with_seed(42);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Probability of picking a uniformly random action, in [0, 1]
    pub epsilon: f64,
    /// Learning rate α, in (0, 1]
    pub alpha: f64,
    /// Discount factor γ, in [0, 1]
    pub gamma: f64,
    /// Random seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Hyperparameters {
    pub fn new(epsilon: f64, alpha: f64, gamma: f64) -> Self {
        Self {
            epsilon,
            alpha,
            gamma,
            seed: None,
        }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter. NaN fails every range check.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid_config(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::invalid_config(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::invalid_config(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}

impl Default for Hyperparameters {
    /// Settings used by the line-following exercise.
    fn default() -> Self {
        Self::new(0.1, 0.2, 0.8)
    }
}
