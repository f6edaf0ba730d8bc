//! Error types for the gas budget estimator

use thiserror::Error;

/// Main error type for estimation and the service around it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("Unknown transaction kind: {0}")]
    UnknownKind(String),

    #[error("Coin selection failed: requested {requested}, available {available}")]
    CoinSelection { requested: u64, available: u128 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Mixed coin types: expected {expected}, found {found}")]
    MixedCoinTypes { expected: String, found: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EstimatorError {
    /// Check if the error was caused by the caller's input rather than the service
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EstimatorError::UnknownKind(_)
                | EstimatorError::InvalidRequest(_)
                | EstimatorError::CoinSelection { .. }
                | EstimatorError::MixedCoinTypes { .. }
        )
    }

    /// Short label used for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            EstimatorError::UnknownKind(_) => "unknown_kind",
            EstimatorError::InvalidRequest(_) => "invalid_request",
            EstimatorError::CoinSelection { .. } => "coin_selection",
            EstimatorError::MixedCoinTypes { .. } => "mixed_coin_types",
            EstimatorError::Config(_) => "config",
            EstimatorError::Internal(_) => "internal",
        }
    }
}

/// Result type for estimator operations
pub type EstimatorResult<T> = Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_are_classified() {
        assert!(EstimatorError::UnknownKind("swap".into()).is_caller_error());
        assert!(EstimatorError::CoinSelection {
            requested: 10,
            available: 0
        }
        .is_caller_error());
        assert!(EstimatorError::InvalidRequest("eof".into()).is_caller_error());
        assert!(!EstimatorError::Internal("bind".into()).is_caller_error());
        assert!(!EstimatorError::Config("bad".into()).is_caller_error());
    }

    #[test]
    fn display_includes_amounts() {
        let err = EstimatorError::CoinSelection {
            requested: 500,
            available: 400,
        };
        assert_eq!(
            err.to_string(),
            "Coin selection failed: requested 500, available 400"
        );
        assert_eq!(err.reason(), "coin_selection");
    }
}
