//! Report request error types

use thiserror::Error;

/// Errors raised while building filter expressions or report requests
#[derive(Debug, Error)]
pub enum ReportError {
    /// Operator string not recognized for the given filter kind
    #[error("unsupported {kind} filter operator: '{operator}'. Supported operators: {supported}")]
    InvalidOperator {
        /// Filter kind the operator was used with ("dimension" or "metric")
        kind: &'static str,
        /// The offending operator, normalized
        operator: String,
        /// Comma-separated list of accepted operators
        supported: &'static str,
    },

    /// Value shape does not match what the operator requires
    #[error("operator '{operator}' requires {expected}")]
    InvalidValueType {
        /// The operator, normalized
        operator: String,
        /// Description of the required value shape
        expected: &'static str,
    },

    /// Filter combinator invoked with zero children
    #[error("{0} requires at least one filter")]
    EmptyFilterList(&'static str),

    /// Batch request built with no sub-requests
    #[error("batch request requires at least one report request")]
    EmptyBatch,

    /// Property ID is not numeric
    #[error("invalid property ID: '{0}'. Must be numeric")]
    InvalidProperty(String),

    /// Date string could not be parsed
    #[error("invalid date: '{0}' (use YYYY-MM-DD, 'today', or 'yesterday')")]
    InvalidDate(String),
}

impl ReportError {
    pub(crate) fn invalid_value(operator: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValueType {
            operator: operator.into(),
            expected,
        }
    }
}

/// Result type for report building operations
pub type Result<T> = std::result::Result<T, ReportError>;
