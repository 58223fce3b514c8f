//! Conversions between exchange rates and additive edge weights.
//!
//! A cycle of rates `r_1..r_k` is profitable when `∏ r_i > 1`. Taking
//! `w_i = -ln(r_i)` turns the product into a sum, and profit into
//! `∑ w_i < 0`, which is exactly what a negative-cycle search looks for.

/// Transforms a rate into its shortest-path weight, `-ln(rate)`.
///
/// Non-positive rates have no logarithm; they map to `+inf` so the edge can
/// never improve a distance.
pub fn rate_to_weight(rate: f64) -> f64 {
    if rate <= 0.0 {
        return f64::INFINITY;
    }
    -rate.ln()
}

/// Inverse of [`rate_to_weight`].
pub fn weight_to_rate(weight: f64) -> f64 {
    (-weight).exp()
}

#[cfg(test)]
mod log_rate_tests {
    use super::*;

    fn assert_approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{} is not approximately equal to {}", a, b);
    }

    #[test]
    fn unit_rate_has_zero_weight() {
        assert_eq!(rate_to_weight(1.0), 0.0);
    }

    #[test]
    fn profitable_rate_has_negative_weight() {
        assert!(rate_to_weight(2.0) < 0.0);
        assert!(rate_to_weight(0.5) > 0.0);
    }

    #[test]
    fn weights_add_where_rates_multiply() {
        // 2.0 * 3.0 * 4.0 = 24.0
        let sum = rate_to_weight(2.0) + rate_to_weight(3.0) + rate_to_weight(4.0);
        assert_approx_eq(weight_to_rate(sum), 24.0);
    }

    #[test]
    fn non_positive_rate_is_unusable() {
        assert_eq!(rate_to_weight(0.0), f64::INFINITY);
        assert_eq!(rate_to_weight(-1.5), f64::INFINITY);
    }
}
