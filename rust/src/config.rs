//! Configuration types for network analysis.

use chrono::NaiveDate;
use pyo3::prelude::*;
use thiserror::Error;

/// Errors raised while validating an [`AnalysisConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown negative duration policy: {0:?} (expected \"reject\" or \"zero\")")]
    UnknownDurationPolicy(String),
}

/// What to do with a vertex whose duration is negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationPolicy {
    /// Fail the analysis with `AnalysisError::NegativeDuration`.
    Reject,
    /// Treat the duration as 0 and emit a warning.
    Zero,
}

impl DurationPolicy {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "reject" => Ok(Self::Reject),
            "zero" => Ok(Self::Zero),
            other => Err(ConfigError::UnknownDurationPolicy(other.to_string())),
        }
    }
}

/// Configuration for a single analysis run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Verbosity level: 0=silent, 1=stages, 2=details, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Negative duration policy: "reject" or "zero".
    #[pyo3(get, set)]
    pub negative_durations: String,
    /// Calendar date of day 0, used for calendar projection.
    #[pyo3(get, set)]
    pub project_start: Option<NaiveDate>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            negative_durations: "reject".to_string(),
            project_start: None,
        }
    }
}

impl AnalysisConfig {
    pub fn duration_policy(&self) -> Result<DurationPolicy, ConfigError> {
        DurationPolicy::parse(&self.negative_durations)
    }
}

#[pymethods]
impl AnalysisConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, negative_durations=None, project_start=None))]
    fn new(
        verbosity: Option<u8>,
        negative_durations: Option<String>,
        project_start: Option<NaiveDate>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            negative_durations: negative_durations.unwrap_or(defaults.negative_durations),
            project_start,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalysisConfig(verbosity={}, negative_durations={:?}, project_start={:?})",
            self.verbosity, self.negative_durations, self.project_start
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.duration_policy(), Ok(DurationPolicy::Reject));
        assert!(config.project_start.is_none());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(DurationPolicy::parse("zero"), Ok(DurationPolicy::Zero));
        assert_eq!(
            DurationPolicy::parse("ignore"),
            Err(ConfigError::UnknownDurationPolicy("ignore".to_string()))
        );
    }
}
