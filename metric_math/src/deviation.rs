//! Deviation of an actual value from a predicted one
//!
//! Deviations are reported as signed percentages. When the prediction is
//! zero, or the division produces a non-finite value, there is no meaningful
//! percentage to report; that case is carried as an explicit variant rather
//! than collapsed to 0%, so downstream consumers cannot mistake "no signal"
//! for "exactly on target".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage deviation of an observed value from a prediction.
///
/// ```
/// use metric_math::Deviation;
///
/// let dev = Deviation::compute(1500.0, 1200.0);
/// assert_eq!(dev.rounded_percent(), Some(-20));
/// assert_eq!(dev.to_string(), "-20%");
///
/// assert!(Deviation::compute(0.0, 1200.0).is_undetermined());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Deviation {
    /// Signed percentage, e.g. -20.0 for an actual 20% below the prediction
    Percent(f64),
    /// The prediction was zero or the ratio was not finite
    Undetermined,
}

impl Deviation {
    /// Compare `actual` against `predicted` as a signed percentage.
    pub fn compute(predicted: f64, actual: f64) -> Self {
        if predicted == 0.0 {
            return Deviation::Undetermined;
        }
        let ratio = actual / predicted - 1.0;
        if !ratio.is_finite() {
            return Deviation::Undetermined;
        }
        Deviation::Percent(ratio * 100.0)
    }

    /// Percentage rounded to the nearest whole number, for display.
    pub fn rounded_percent(&self) -> Option<i64> {
        match self {
            Deviation::Percent(pct) => Some(pct.round() as i64),
            Deviation::Undetermined => None,
        }
    }

    /// Raw percentage, if determined.
    pub fn percent(&self) -> Option<f64> {
        match self {
            Deviation::Percent(pct) => Some(*pct),
            Deviation::Undetermined => None,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self, Deviation::Undetermined)
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rounded_percent() {
            Some(pct) => write!(f, "{}%", pct),
            None => write!(f, "n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_prediction_is_negative() {
        let dev = Deviation::compute(1500.0, 1200.0);
        let pct = dev.percent().unwrap();
        assert!((pct - -20.0).abs() < 1e-9);
        assert_eq!(dev.rounded_percent(), Some(-20));
    }

    #[test]
    fn above_prediction_is_positive() {
        let dev = Deviation::compute(200.0, 250.0);
        assert_eq!(dev.rounded_percent(), Some(25));
    }

    #[test]
    fn zero_prediction_is_undetermined() {
        let dev = Deviation::compute(0.0, 1200.0);
        assert!(dev.is_undetermined());
        assert_eq!(dev.rounded_percent(), None);
    }

    #[test]
    fn non_finite_inputs_are_undetermined() {
        assert!(Deviation::compute(f64::NAN, 10.0).is_undetermined());
        assert!(Deviation::compute(10.0, f64::INFINITY).is_undetermined());
        assert!(Deviation::compute(10.0, f64::NAN).is_undetermined());
    }

    #[test]
    fn display_formats_whole_percent() {
        assert_eq!(Deviation::compute(100.0, 93.0).to_string(), "-7%");
        assert_eq!(Deviation::compute(100.0, 112.0).to_string(), "12%");
        assert_eq!(Deviation::Undetermined.to_string(), "n/a");
    }

    #[test]
    fn rounds_to_nearest_whole_percent() {
        // 260/256 and 252/256 are exact in binary, giving +-1.5625%
        assert_eq!(Deviation::compute(256.0, 260.0).rounded_percent(), Some(2));
        assert_eq!(Deviation::compute(256.0, 252.0).rounded_percent(), Some(-2));
    }
}
