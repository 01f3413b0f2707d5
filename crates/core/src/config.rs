//! Run configuration with bounds validation (Functional Core - pure data).

use thiserror::Error;

/// Errors produced while validating run configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ratio must be between 10 and 95 percent, got {0}")]
    RatioOutOfRange(u32),

    #[error("alarm period must be at least 60 seconds, got {0}")]
    PeriodTooShort(i32),

    #[error("evaluation periods must be at least 1, got {0}")]
    EvaluationPeriodsTooFew(i32),

    #[error("SNS topic must not be empty")]
    EmptySnsTopic,
}

/// Validated settings for one reconciliation run.
///
/// Constructed once from parsed arguments and passed explicitly into the
/// planner; there is no process-wide mutable configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Fraction of provisioned capacity used as the threshold basis.
    pub ratio: f64,
    /// Alarm period in seconds.
    pub period: i32,
    /// Number of consecutive periods that must breach before alarming.
    pub evaluation_periods: i32,
    /// SNS topic ARN notified when an alarm fires.
    pub sns_topic: String,
    /// Only tables whose name starts with this prefix are managed.
    pub prefix: Option<String>,
}

impl SyncConfig {
    /// Validates bounds and builds the configuration.
    ///
    /// `ratio_percent` is carried as a fraction (`80` becomes `0.8`). All
    /// bounds are enforced here, before any remote client exists.
    pub fn new(
        ratio_percent: u32,
        period: i32,
        evaluation_periods: i32,
        sns_topic: impl Into<String>,
        prefix: Option<String>,
    ) -> Result<Self, ConfigError> {
        if !(10..=95).contains(&ratio_percent) {
            return Err(ConfigError::RatioOutOfRange(ratio_percent));
        }
        if period < 60 {
            return Err(ConfigError::PeriodTooShort(period));
        }
        if evaluation_periods < 1 {
            return Err(ConfigError::EvaluationPeriodsTooFew(evaluation_periods));
        }
        let sns_topic = sns_topic.into();
        if sns_topic.is_empty() {
            return Err(ConfigError::EmptySnsTopic);
        }

        Ok(Self {
            ratio: f64::from(ratio_percent) / 100.0,
            period,
            evaluation_periods,
            sns_topic,
            prefix,
        })
    }
}
