//! Configuration types for the schedule calculator.

use pyo3::prelude::*;

use crate::error::ScheduleError;
use crate::logging::VERBOSITY_SILENT;

/// Default tolerance when comparing slack to zero.
pub const DEFAULT_SLACK_EPSILON: f64 = 1e-9;

/// Options for one schedule computation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// A task is critical when `|slack| <= slack_epsilon`; 0 means exact comparison.
    #[pyo3(get, set)]
    pub slack_epsilon: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            slack_epsilon: DEFAULT_SLACK_EPSILON,
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl ScheduleConfig {
    /// Whether a slack value counts as zero under this config.
    #[inline]
    pub fn is_zero_slack(&self, slack: f64) -> bool {
        slack.abs() <= self.slack_epsilon
    }

    /// Reject a negative or non-finite `slack_epsilon`.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !self.slack_epsilon.is_finite() || self.slack_epsilon < 0.0 {
            return Err(ScheduleError::InvalidSlackEpsilon {
                epsilon: self.slack_epsilon,
            });
        }
        Ok(())
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (slack_epsilon=None, verbosity=None))]
    fn new(slack_epsilon: Option<f64>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            slack_epsilon: slack_epsilon.unwrap_or(defaults.slack_epsilon),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(slack_epsilon={}, verbosity={})",
            self.slack_epsilon, self.verbosity
        )
    }
}
