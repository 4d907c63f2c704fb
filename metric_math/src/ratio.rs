//! Division with a sentinel instead of a panic or infinity

/// Ratio of two metric totals.
///
/// A zero denominator yields NaN rather than +/- infinity, so that a period
/// with no activity in the denominator metric propagates as "not a number"
/// through aggregation and display instead of producing a misleading value.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn divides_normally() {
        assert_relative_eq!(safe_ratio(10.0, 4.0), 2.5);
    }

    #[test]
    fn zero_denominator_is_nan() {
        assert!(safe_ratio(5.0, 0.0).is_nan());
        assert!(safe_ratio(0.0, 0.0).is_nan());
        assert!(safe_ratio(5.0, -0.0).is_nan());
    }

    #[test]
    fn nan_inputs_stay_nan() {
        assert!(safe_ratio(f64::NAN, 2.0).is_nan());
        assert!(safe_ratio(2.0, f64::NAN).is_nan());
    }
}
