//! # Points Module
//!
//! Provides the two value types every balance in the store flows through:
//! [`Points`] (Valeo Wellness Points, VWP) and [`Aed`] (UAE dirhams).
//!
//! ## Why Two Integer Types?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POINTS vs MONEY                                                        │
//! │                                                                         │
//! │  Points (u64)                   Aed (i64 fils)                          │
//! │  ────────────                   ──────────────                          │
//! │  • Never negative               • Signed (refunds, adjustments)         │
//! │  • Whole units only             • 1 AED = 100 fils                      │
//! │  • Balance, earned, redeemed    • Purchases, credit value, plan price   │
//! │                                                                         │
//! │  Conversions are explicit and rate-driven:                              │
//! │    AED 50.00 spent × 10 VWP/AED   = 500 VWP earned                      │
//! │    1,000 VWP ÷ 10 VWP/AED         = AED 100 of account credit           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A signed ledger delta only exists on [`crate::types::Transaction`]; the
//! balance itself cannot be expressed as a negative number.
//!
//! ## Usage
//! ```rust
//! use valeo_core::points::{Aed, Points};
//!
//! let balance = Points::new(1200);
//! assert_eq!(balance.checked_sub(Points::new(1000)), Some(Points::new(200)));
//! assert_eq!(balance.checked_sub(Points::new(5000)), None);
//!
//! let spent = Aed::from_dirhams(50);
//! assert_eq!(spent.to_points(10), Points::new(500));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Points Type
// =============================================================================

/// A non-negative quantity of Valeo Wellness Points.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: the "balance never goes negative" invariant is
///   carried by the type, subtraction is only offered in checked and
///   saturating forms
/// - **Single field tuple struct**: serializes as a plain JSON number
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Points(#[ts(type = "number")] u64);

impl Points {
    /// Creates a points value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Points(value)
    }

    /// Zero points.
    #[inline]
    pub const fn zero() -> Self {
        Points(0)
    }

    /// Returns the raw number of points.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts, returning `None` instead of going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use valeo_core::points::Points;
    ///
    /// assert_eq!(Points::new(5).checked_sub(Points::new(6)), None);
    /// ```
    #[inline]
    pub const fn checked_sub(&self, other: Points) -> Option<Points> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Points(v)),
            None => None,
        }
    }

    /// Subtracts, clamping at zero.
    #[inline]
    pub const fn saturating_sub(&self, other: Points) -> Points {
        Points(self.0.saturating_sub(other.0))
    }

    /// Signed ledger delta for a credit of this amount.
    #[inline]
    pub fn as_credit(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }

    /// Signed ledger delta for a debit of this amount.
    #[inline]
    pub fn as_debit(&self) -> i64 {
        -self.as_credit()
    }

    /// Value of these points as account credit at `points_per_aed`.
    ///
    /// ## Example
    /// ```rust
    /// use valeo_core::points::{Aed, Points};
    ///
    /// assert_eq!(Points::new(1000).to_aed(10), Aed::from_dirhams(100));
    /// assert_eq!(Points::new(1005).to_aed(10), Aed::from_fils(10050));
    /// ```
    pub fn to_aed(&self, points_per_aed: u64) -> Aed {
        if points_per_aed == 0 {
            return Aed::zero();
        }
        let fils = self.0 as i128 * 100 / points_per_aed as i128;
        Aed::from_fils(i64::try_from(fils).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} VWP", self.0)
    }
}

impl Add for Points {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Points(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Points {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Self {
        iter.fold(Points::zero(), |acc, p| acc + p)
    }
}

impl From<u64> for Points {
    fn from(value: u64) -> Self {
        Points(value)
    }
}

// =============================================================================
// Aed Type
// =============================================================================

/// A UAE dirham amount stored in fils (1 AED = 100 fils).
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Aed is Used                                    │
/// │                                                                         │
/// │  record_purchase(AED 50) ──► Stats.total_spent ──► Admin dashboard      │
/// │                          └─► × points_per_aed ──► Points credited       │
/// │                                                                         │
/// │  redeem(Credit, 1,000 VWP) ──► ÷ points_per_aed ──► "AED 100 credit"    │
/// │                                                                         │
/// │  Premium plan price ──► "AED 499 / month"                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Aed(#[ts(type = "number")] i64);

impl Aed {
    /// Creates an amount from fils (the smallest currency unit).
    #[inline]
    pub const fn from_fils(fils: i64) -> Self {
        Aed(fils)
    }

    /// Creates an amount from whole dirhams.
    #[inline]
    pub const fn from_dirhams(dirhams: i64) -> Self {
        Aed(dirhams * 100)
    }

    /// Creates an amount from dirhams and fils.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -AED 5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Aed(major * 100 - minor)
        } else {
            Aed(major * 100 + minor)
        }
    }

    /// Zero dirhams.
    #[inline]
    pub const fn zero() -> Self {
        Aed(0)
    }

    /// Returns the value in fils.
    #[inline]
    pub const fn fils(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dirham portion.
    #[inline]
    pub const fn dirhams(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fils portion (always 0-99).
    #[inline]
    pub const fn fils_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Points earned for spending this amount at `points_per_aed`.
    ///
    /// Partial points are floored; negative amounts earn nothing.
    ///
    /// ## Example
    /// ```rust
    /// use valeo_core::points::{Aed, Points};
    ///
    /// // AED 12.35 × 10 = 123.5 → 123
    /// assert_eq!(Aed::from_major_minor(12, 35).to_points(10), Points::new(123));
    /// ```
    pub fn to_points(&self, points_per_aed: u64) -> Points {
        if self.0 <= 0 {
            return Points::zero();
        }
        let points = self.0 as i128 * points_per_aed as i128 / 100;
        Points::new(u64::try_from(points).unwrap_or(u64::MAX))
    }
}

impl Aed {
    /// The bare number: `"100"`, `"12.50"`, `"-3"`.
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.fils_part() == 0 {
            format!("{}{}", sign, self.dirhams().abs())
        } else {
            format!("{}{}.{:02}", sign, self.dirhams().abs(), self.fils_part())
        }
    }
}

/// Shows whole amounts without decimals ("AED 499"), fractional ones with two
/// ("AED 12.50").
impl fmt::Display for Aed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount_string();
        match amount.strip_prefix('-') {
            Some(abs) => write!(f, "-AED {}", abs),
            None => write!(f, "AED {}", amount),
        }
    }
}

impl Add for Aed {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Aed(self.0 + other.0)
    }
}

impl AddAssign for Aed {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Aed {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Aed(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_checked_sub() {
        let balance = Points::new(1200);
        assert_eq!(balance.checked_sub(Points::new(1200)), Some(Points::zero()));
        assert_eq!(balance.checked_sub(Points::new(1201)), None);
    }

    #[test]
    fn test_points_deltas() {
        let p = Points::new(500);
        assert_eq!(p.as_credit(), 500);
        assert_eq!(p.as_debit(), -500);
        assert_eq!(Points::new(u64::MAX).as_credit(), i64::MAX);
    }

    #[test]
    fn test_points_sum_and_display() {
        let total: Points = [100, 200, 300].into_iter().map(Points::new).sum();
        assert_eq!(total, Points::new(600));
        assert_eq!(total.to_string(), "600 VWP");
    }

    #[test]
    fn test_points_to_aed() {
        assert_eq!(Points::new(1000).to_aed(10), Aed::from_dirhams(100));
        assert_eq!(Points::new(7).to_aed(10), Aed::from_fils(70));
        assert_eq!(Points::new(1000).to_aed(0), Aed::zero());
    }

    #[test]
    fn test_aed_display() {
        assert_eq!(Aed::from_dirhams(499).to_string(), "AED 499");
        assert_eq!(Aed::from_major_minor(12, 5).to_string(), "AED 12.05");
        assert_eq!(Aed::from_major_minor(-5, 50).to_string(), "-AED 5.50");
        assert_eq!(Aed::zero().to_string(), "AED 0");
        assert_eq!(Aed::from_major_minor(100, 50).amount_string(), "100.50");
        assert_eq!(Aed::from_fils(-50).amount_string(), "-0.50");
    }

    #[test]
    fn test_aed_to_points() {
        assert_eq!(Aed::from_dirhams(50).to_points(10), Points::new(500));
        assert_eq!(Aed::from_fils(5).to_points(10), Points::zero());
        assert_eq!(Aed::from_dirhams(-20).to_points(10), Points::zero());
    }

    #[test]
    fn test_aed_arithmetic() {
        let a = Aed::from_dirhams(10);
        let b = Aed::from_fils(250);
        assert_eq!((a + b).fils(), 1250);
        assert_eq!((a - b).fils(), 750);

        let mut total = Aed::zero();
        total += a;
        assert_eq!(total.dirhams(), 10);
    }
}
