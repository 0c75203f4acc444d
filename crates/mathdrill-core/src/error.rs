//! Engine error types.
//!
//! Every failure is scoped to a single request. The classification helpers
//! let the request adapter map an error to a status and reason code without
//! string matching.

use thiserror::Error;

use crate::model::SkillTemplate;
use crate::schema::ValidationReport;

/// Errors raised while generating or grading a problem.
#[derive(Debug, Error)]
pub enum DrillError {
    /// A grade request failed the schema contract.
    #[error("invalid input: {0}")]
    InvalidInput(ValidationReport),

    /// The request names a template the engine does not know.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// The payload shape does not belong to the named template.
    #[error("payload does not match template {template}: {reason}")]
    PayloadMismatch {
        template: SkillTemplate,
        reason: String,
    },

    /// A generated instance failed its own schema check. Always a bug in
    /// the generator, never caused by caller input.
    #[error("generated instance failed self-validation: {0}")]
    InternalContract(ValidationReport),
}

impl DrillError {
    /// Returns `true` if the caller sent something the engine rejects.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, DrillError::InternalContract(_))
    }

    /// Machine-readable reason code for responses.
    pub fn reason_code(&self) -> &'static str {
        match self {
            DrillError::InvalidInput(_) => "invalid-input",
            DrillError::UnknownTemplate(_) => "unknown-template",
            DrillError::PayloadMismatch { .. } => "payload-mismatch",
            DrillError::InternalContract(_) => "internal-error",
        }
    }

    /// HTTP-style status class for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_caller_error() {
            400
        } else {
            500
        }
    }

    /// The field-level violations behind this error, if any.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            DrillError::InvalidInput(report) | DrillError::InternalContract(report) => Some(report),
            _ => None,
        }
    }
}

/// Errors in engine configuration, detected when the engine is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more tier ranges are unusable.
    #[error("invalid tier table: {}", .0.join("; "))]
    InvalidTiers(Vec<String>),

    /// The configured default unit is not a known skill.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}
