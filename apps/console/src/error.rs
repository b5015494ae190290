//! # API Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Valeo Console                          │
//! │                                                                         │
//! │  redeem session                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<CommandResponse<T>, ApiError>                            │  │
//! │  │         │                                                        │  │
//! │  │  Validation Error? ─── ValidationError ──────────┐              │  │
//! │  │         │                                        ▼              │  │
//! │  │  Balance too low? ──── CoreError::Insufficient ── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok":false,"error":{"code":"INSUFFICIENT_BALANCE",                    │
//! │                       "message":"You need 3800 more VWP ..."}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use valeo_core::{CoreError, ValidationError};

use crate::state::ConfigError;

/// Error returned from command handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "No pending referrals to convert"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message, shown as an error toast
    pub message: String,
}

/// Error codes for command replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Redemption exceeds the balance
    InsufficientBalance,

    /// Shell line could not be parsed
    BadCommand,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadCommand, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if let Some(missing) = err.shortfall() {
            return ApiError::new(
                ErrorCode::InsufficientBalance,
                format!(
                    "You need {} more VWP to redeem this reward",
                    missing.value()
                ),
            );
        }
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use valeo_core::Points;

    #[test]
    fn test_insufficient_balance_message() {
        let err: ApiError = CoreError::InsufficientBalance {
            required: Points::new(5000),
            available: Points::new(1200),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientBalance);
        assert_eq!(err.message, "You need 3800 more VWP to redeem this reward");
    }

    #[test]
    fn test_wrapped_validation_keeps_message() {
        let err: ApiError = CoreError::from(ValidationError::MustBePositive {
            field: "amount".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "amount must be positive");
    }

    #[test]
    fn test_validation_maps_to_validation_code() {
        let err: ApiError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("No pending referrals to convert");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "No pending referrals to convert");
    }
}
