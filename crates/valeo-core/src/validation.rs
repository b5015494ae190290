//! # Validation Module
//!
//! Input validation run by command handlers before they dispatch to the
//! store. The reducer itself assumes well-formed input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Views                                                         │
//! │  └── Buttons disabled when the balance is too low                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command handler (Rust)                                        │
//! │  ├── Parsing (tier names, reward kinds, numbers)                        │
//! │  └── THIS MODULE: lengths, positive amounts, sane upper bounds          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reducer                                                       │
//! │  └── Balance check on redemption (the one rule it enforces)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use valeo_core::points::Points;
//! use valeo_core::validation::{validate_description, validate_earn_amount};
//!
//! validate_description("description", "Yoga class").unwrap();
//! validate_earn_amount(Points::new(250)).unwrap();
//! assert!(validate_earn_amount(Points::zero()).is_err());
//! ```

use crate::error::ValidationError;
use crate::points::{Aed, Points};
use crate::{MAX_DESCRIPTION_LEN, MAX_EARN_POINTS, MAX_PURCHASE_DIRHAMS, MAX_USER_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a ledger description or challenge name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 120 characters
pub fn validate_description(field: &str, value: &str) -> ValidationResult<()> {
    validate_text(field, value, MAX_DESCRIPTION_LEN)
}

/// Validates a user display name.
///
/// ## Example
/// ```rust
/// use valeo_core::validation::validate_user_name;
///
/// assert!(validate_user_name("Sara").is_ok());
/// assert!(validate_user_name("   ").is_err());
/// ```
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_USER_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a points amount being credited.
///
/// ## Rules
/// - Must be positive
/// - At most 1,000,000 points per operation
pub fn validate_earn_amount(amount: Points) -> ValidationResult<()> {
    if amount.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount.value() > MAX_EARN_POINTS {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: MAX_EARN_POINTS as i64,
        });
    }

    Ok(())
}

/// Validates a points amount being redeemed. Zero is rejected; the balance
/// check is left to the reducer.
pub fn validate_redeem_amount(amount: Points) -> ValidationResult<()> {
    if amount.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Validates a purchase amount.
///
/// ## Rules
/// - Must be positive
/// - At most AED 100,000
pub fn validate_purchase_amount(amount: Aed) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount > Aed::from_dirhams(MAX_PURCHASE_DIRHAMS) {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: MAX_PURCHASE_DIRHAMS,
        });
    }

    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses an AED amount written as `"50"`, `"12.5"` or `"12.50"`.
///
/// ## Example
/// ```rust
/// use valeo_core::points::Aed;
/// use valeo_core::validation::parse_aed;
///
/// assert_eq!(parse_aed("12.5").unwrap(), Aed::from_fils(1250));
/// assert!(parse_aed("12.345").is_err());
/// ```
pub fn parse_aed(input: &str) -> ValidationResult<Aed> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    };

    let input = input.trim().trim_start_matches("AED").trim();
    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("expected a number like 50 or 12.50"));
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("at most two decimal places"));
    }

    let dirhams: i64 = whole
        .parse()
        .map_err(|_| invalid("amount is too large"))?;
    let fils: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid("bad fils"))? * 10,
        _ => frac.parse().map_err(|_| invalid("bad fils"))?,
    };

    dirhams
        .checked_mul(100)
        .and_then(|v| v.checked_add(fils))
        .map(Aed::from_fils)
        .ok_or_else(|| invalid("amount is too large"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_description() {
        assert!(validate_description("description", "30-Day Consistency").is_ok());
        assert!(matches!(
            validate_description("description", "  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_description("description", &"x".repeat(121)),
            Err(ValidationError::TooLong { max: 120, .. })
        ));
    }

    #[test]
    fn test_validate_user_name_counts_chars() {
        // 60 two-byte characters are within the limit
        assert!(validate_user_name(&"é".repeat(60)).is_ok());
        assert!(validate_user_name(&"é".repeat(61)).is_err());
    }

    #[test]
    fn test_validate_earn_amount() {
        assert!(validate_earn_amount(Points::new(1)).is_ok());
        assert!(validate_earn_amount(Points::new(1_000_000)).is_ok());
        assert!(validate_earn_amount(Points::zero()).is_err());
        assert!(matches!(
            validate_earn_amount(Points::new(1_000_001)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_redeem_amount() {
        assert!(validate_redeem_amount(Points::new(10)).is_ok());
        assert!(validate_redeem_amount(Points::zero()).is_err());
    }

    #[test]
    fn test_validate_purchase_amount() {
        assert!(validate_purchase_amount(Aed::from_dirhams(499)).is_ok());
        assert!(validate_purchase_amount(Aed::zero()).is_err());
        assert!(validate_purchase_amount(Aed::from_dirhams(-1)).is_err());
        assert!(validate_purchase_amount(Aed::from_dirhams(100_001)).is_err());
    }

    #[test]
    fn test_parse_aed() {
        assert_eq!(parse_aed("50").unwrap(), Aed::from_dirhams(50));
        assert_eq!(parse_aed("12.05").unwrap(), Aed::from_fils(1205));
        assert_eq!(parse_aed("AED 7.5").unwrap(), Aed::from_fils(750));
        assert!(parse_aed("").is_err());
        assert!(parse_aed("-5").is_err());
        assert!(parse_aed("1.234").is_err());
        assert!(parse_aed("abc").is_err());
    }
}
