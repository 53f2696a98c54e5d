//! # Money Module
//!
//! Provides the `Money` type for billing amounts.
//!
//! ## Amount Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form input "150.5" / "1.5e2"                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Money::parse ──► Some(Money(150.5))   (kept at full precision)         │
//! │       │                                                                 │
//! │       └──► "abc" ──► None   (shown as "$NaN" in list views)             │
//! │                                                                         │
//! │  Display: 150.5 ──► "$150.50"     -5 ──► "$-5.00"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bills store the number the caller typed. Rounding to cents happens only
//! when an amount is displayed.
//!
//! ## Usage
//! ```rust
//! use carebook_core::money::Money;
//!
//! let amount = Money::parse("150.5").unwrap();
//! assert_eq!(amount.amount(), 150.5);
//! assert_eq!(amount.to_string(), "$150.50");
//! ```

use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A billing amount in dollars.
///
/// Signed so that faithful mode can hold whatever number the caller typed;
/// strict mode rejects negatives before a `Money` reaches a record.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Money(f64);

impl Money {
    /// Wraps a stored amount.
    #[inline]
    pub fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns the amount in dollars.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Parses an amount as typed into a number field.
    ///
    /// ## Accepted Input
    /// - Optional surrounding whitespace
    /// - Optional leading `+` or `-`
    /// - Decimal digits with an optional fraction and exponent (`"150"`,
    ///   `".5"`, `"1.5e2"`)
    ///
    /// Anything else returns `None`, including `"inf"`, `"NaN"` and values
    /// too large to represent.
    ///
    /// ## Example
    /// ```rust
    /// use carebook_core::money::Money;
    ///
    /// assert_eq!(Money::parse(" 150.5 "), Some(Money::new(150.5)));
    /// assert_eq!(Money::parse("1e3"), Some(Money::new(1000.0)));
    /// assert_eq!(Money::parse("abc"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        let s = input.trim();

        // f64's parser also takes "inf" and "NaN".
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }

        s.parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders `$` then the amount to two decimal places, so a negative
/// amount reads `$-5.00`. Exact half-cent values round away from zero.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        let mut magnitude = self.0.abs();

        // `{:.2}` rounds exact ties to even; step one ulp up so they round up.
        if is_half_cent(magnitude) {
            magnitude = f64::from_bits(magnitude.to_bits() + 1);
        }

        write!(f, "${sign}{magnitude:.2}")
    }
}

/// True when `magnitude` is exactly `n.nn5`. Only multiples of 1/8 with an
/// odd numerator have a binary value ending that way.
fn is_half_cent(magnitude: f64) -> bool {
    (magnitude * 8.0).fract() == 0.0 && (magnitude * 4.0).fract() != 0.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn show(raw: &str) -> String {
        Money::parse(raw).unwrap().to_string()
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(150.5).to_string(), "$150.50");
        assert_eq!(Money::new(5.0).to_string(), "$5.00");
        assert_eq!(Money::new(0.0).to_string(), "$0.00");
        assert_eq!(Money::new(-0.0).to_string(), "$0.00");
    }

    #[test]
    fn test_display_negative_puts_sign_after_dollar() {
        assert_eq!(Money::new(-5.0).to_string(), "$-5.00");
        assert_eq!(Money::new(-5.5).to_string(), "$-5.50");
    }

    #[test]
    fn test_display_rounds_half_cents_away_from_zero() {
        assert_eq!(show("0.125"), "$0.13");
        assert_eq!(show("2.375"), "$2.38");
        assert_eq!(show("-0.125"), "$-0.13");
        assert_eq!(show("0.25"), "$0.25");
        // 1.005 is stored just below the tie.
        assert_eq!(show("1.005"), "$1.00");
        assert_eq!(show("19.999"), "$20.00");
    }

    #[test]
    fn test_parse_plain_and_fractional() {
        assert_eq!(Money::parse("150"), Some(Money::new(150.0)));
        assert_eq!(Money::parse("150.05"), Some(Money::new(150.05)));
        assert_eq!(Money::parse(".5"), Some(Money::new(0.5)));
        assert_eq!(Money::parse("5."), Some(Money::new(5.0)));
        assert_eq!(Money::parse("+7"), Some(Money::new(7.0)));
    }

    #[test]
    fn test_parse_keeps_full_precision() {
        assert_eq!(Money::parse("0.125").unwrap().amount(), 0.125);
        assert_eq!(Money::parse("19.999").unwrap().amount(), 19.999);
    }

    #[test]
    fn test_parse_exponent_form() {
        assert_eq!(Money::parse("1e3"), Some(Money::new(1000.0)));
        assert_eq!(Money::parse("1.5e2"), Some(Money::new(150.0)));
        assert_eq!(Money::parse("2E-2"), Some(Money::new(0.02)));
    }

    #[test]
    fn test_parse_large_magnitude() {
        let amount = Money::parse("100000000000000000").unwrap();
        assert_eq!(amount.amount(), 1e17);
        assert_eq!(amount.to_string(), "$100000000000000000.00");
    }

    #[test]
    fn test_parse_negative() {
        let amount = Money::parse("-12.30").unwrap();
        assert_eq!(amount.amount(), -12.3);
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for input in [
            "", "   ", "abc", ".", "-", "1.2.3", "12abc", "1,000", "- 5", "inf", "NaN",
            "Infinity", "1e400",
        ] {
            assert_eq!(Money::parse(input), None, "input {input:?}");
        }
    }
}
