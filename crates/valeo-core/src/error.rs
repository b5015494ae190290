//! # Error Types
//!
//! Domain-specific error types for valeo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  valeo-core errors (this file)                                         │
//! │  ├── CoreError        - Rejected store mutations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ApiError         - What the views see (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Toast                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Converting a referral that does not exist, or one that is already
//! converted, leaves the state unchanged and is reported through
//! [`crate::store::Outcome::Unchanged`], never through `CoreError`.

use thiserror::Error;

use crate::points::Points;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The reducer is total apart from [`CoreError::InsufficientBalance`];
/// validation in front of it raises [`CoreError::Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The user does not hold enough points for a redemption.
    ///
    /// ## User Workflow
    /// ```text
    /// Redeem "Premium Session" (5,000 VWP)
    ///      │
    ///      ▼
    /// Check balance: available=1,200
    ///      │
    ///      ▼
    /// InsufficientBalance { required: 5000, available: 1200 }
    ///      │
    ///      ▼
    /// UI shows: "You need 3800 more VWP to redeem this reward"
    /// ```
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Points, available: Points },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Points still missing for a rejected redemption.
    pub fn shortfall(&self) -> Option<Points> {
        match self {
            CoreError::InsufficientBalance {
                required,
                available,
            } => Some(required.saturating_sub(*available)),
            CoreError::Validation(_) => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a mutation is dispatched so the reducer only ever sees
/// well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. unknown tier name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
