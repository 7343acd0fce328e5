//! Money helpers
//!
//! Amounts are `f64` in the currency's major unit with two-decimal
//! semantics. Drift is absorbed by a fixed one-cent tolerance, and every
//! settlement amount is rounded to cents when it is created.

/// Tolerance below which a balance counts as settled (one cent)
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Round to two decimal places, half-up at the cent
///
/// # Example
/// ```
/// use khata_core::models::money::round_to_cents;
///
/// assert_eq!(round_to_cents(0.125), 0.13);
/// assert_eq!(round_to_cents(33.333333), 33.33);
/// assert_eq!(round_to_cents(10.0), 10.0);
/// ```
pub fn round_to_cents(amount: f64) -> f64 {
    // floor(x + 0.5) rounds ties toward +inf, same as half-up for the
    // positive amounts settlements carry
    (amount * 100.0 + 0.5).floor() / 100.0
}

/// True when `amount` is within tolerance of zero
pub fn is_negligible(amount: f64) -> bool {
    amount.abs() <= SETTLEMENT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(2.5), 2.5);
        assert_eq!(round_to_cents(33.333333), 33.33);
        assert_eq!(round_to_cents(66.666666), 66.67);
    }

    #[test]
    fn test_round_negative_ties_go_up() {
        assert_eq!(round_to_cents(-0.125), -0.12);
    }

    #[test]
    fn test_negligible_boundary() {
        assert!(is_negligible(0.0));
        assert!(is_negligible(0.004));
        assert!(is_negligible(-0.01));
        assert!(!is_negligible(0.011));
        assert!(!is_negligible(-0.02));
    }
}
