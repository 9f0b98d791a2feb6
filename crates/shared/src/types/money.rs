//! Amounts in minor currency units.
//!
//! CRITICAL: Never use floating-point for money. Amounts are stored as integer
//! cents and only rendered through `rust_decimal` with an explicit scale.

use rust_decimal::Decimal;

/// An amount in cents.
pub type Cents = i64;

/// Formats cents as a dollar string with two decimals, e.g. `1234` -> `$12.34`.
#[must_use]
pub fn format_cents(cents: Cents) -> String {
    format!("${}", Decimal::new(cents, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "$0.00")]
    #[case(5, "$0.05")]
    #[case(50, "$0.50")]
    #[case(500, "$5.00")]
    #[case(1234, "$12.34")]
    #[case(1_000_000, "$10000.00")]
    fn test_format_cents(#[case] cents: Cents, #[case] expected: &str) {
        assert_eq!(format_cents(cents), expected);
    }
}
