//! Configuration types for quality evaluation.
//!
//! This module provides configuration options using the builder pattern.
//! The as-of date has no default: the engine never reads the clock, so the
//! caller must pin the date the release-date rule is measured against.

use crate::predicates::CasingPolicy;
use crate::rules::RELEASE_DATE_FLOOR;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of offending values shown per rule.
pub const DEFAULT_EXAMPLE_LIMIT: usize = 4;

/// Configuration for one evaluation pass.
///
/// Use [`EvaluationConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_quality::config::EvaluationConfig;
/// use chrono::NaiveDate;
///
/// let config = EvaluationConfig::builder()
///     .as_of(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///     .example_limit(4)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Upper bound of the album release date range.
    pub as_of: NaiveDate,

    /// Number of distinct offending values reported per rule.
    /// Default: 4
    pub example_limit: usize,

    /// Casing expected of track names.
    /// Default: Lower
    pub casing_policy: CasingPolicy,

    /// Literal token accepted as boolean true in the `explicit` column.
    /// Default: "True"
    pub true_token: String,

    /// Literal token accepted as boolean false in the `explicit` column.
    /// Default: "False"
    pub false_token: String,

    /// Earliest plausible album release date.
    /// Default: 2006-01-01
    pub release_date_floor: NaiveDate,
}

impl EvaluationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    /// Shorthand for a default configuration pinned to `as_of`.
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            example_limit: DEFAULT_EXAMPLE_LIMIT,
            casing_policy: CasingPolicy::default(),
            true_token: "True".to_string(),
            false_token: "False".to_string(),
            release_date_floor: RELEASE_DATE_FLOOR,
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.example_limit == 0 {
            return Err(ConfigValidationError::InvalidExampleLimit(
                self.example_limit,
            ));
        }

        if self.true_token.is_empty() || self.false_token.is_empty() {
            return Err(ConfigValidationError::EmptyBooleanToken);
        }

        if self.true_token == self.false_token {
            return Err(ConfigValidationError::IdenticalBooleanTokens(
                self.true_token.clone(),
            ));
        }

        if self.release_date_floor > self.as_of {
            return Err(ConfigValidationError::InvalidDateWindow {
                floor: self.release_date_floor,
                as_of: self.as_of,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("An as-of date is required to evaluate release dates")]
    MissingAsOf,

    #[error("Invalid example limit: {0} (must be at least 1)")]
    InvalidExampleLimit(usize),

    #[error("Boolean tokens must not be empty")]
    EmptyBooleanToken,

    #[error("Boolean tokens must differ, both are '{0}'")]
    IdenticalBooleanTokens(String),

    #[error("Release date floor {floor} is after the as-of date {as_of}")]
    InvalidDateWindow { floor: NaiveDate, as_of: NaiveDate },
}

/// Builder for [`EvaluationConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EvaluationConfigBuilder {
    as_of: Option<NaiveDate>,
    example_limit: Option<usize>,
    casing_policy: Option<CasingPolicy>,
    true_token: Option<String>,
    false_token: Option<String>,
    release_date_floor: Option<NaiveDate>,
}

impl EvaluationConfigBuilder {
    /// Set the as-of date used as the release date ceiling. Required.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Set how many offending values are reported per rule.
    pub fn example_limit(mut self, limit: usize) -> Self {
        self.example_limit = Some(limit);
        self
    }

    /// Set the casing expected of track names.
    pub fn casing_policy(mut self, policy: CasingPolicy) -> Self {
        self.casing_policy = Some(policy);
        self
    }

    /// Set the two literal tokens of the boolean domain.
    pub fn boolean_tokens(
        mut self,
        true_token: impl Into<String>,
        false_token: impl Into<String>,
    ) -> Self {
        self.true_token = Some(true_token.into());
        self.false_token = Some(false_token.into());
        self
    }

    /// Set the earliest plausible album release date.
    pub fn release_date_floor(mut self, date: NaiveDate) -> Self {
        self.release_date_floor = Some(date);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EvaluationConfig` or an error if validation fails.
    pub fn build(self) -> Result<EvaluationConfig, ConfigValidationError> {
        let as_of = self.as_of.ok_or(ConfigValidationError::MissingAsOf)?;
        let defaults = EvaluationConfig::as_of(as_of);

        let config = EvaluationConfig {
            as_of,
            example_limit: self.example_limit.unwrap_or(defaults.example_limit),
            casing_policy: self.casing_policy.unwrap_or(defaults.casing_policy),
            true_token: self.true_token.unwrap_or(defaults.true_token),
            false_token: self.false_token.unwrap_or(defaults.false_token),
            release_date_floor: self
                .release_date_floor
                .unwrap_or(defaults.release_date_floor),
        };

        config.validate()?;
        Ok(config)
    }
}
