//! Least-squares trend fitting over explicit (x, y) samples
//!
//! Unlike a streaming indicator, analytics trends are fitted once over a
//! fixed window of period observations, with real x coordinates (day
//! ordinals) rather than sample indices, so that uneven spacing between
//! periods is reflected in the fit.

use crate::{MathError, Result};

/// A fitted first-degree trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    slope: f64,
    intercept: f64,
    r_squared: f64,
}

impl LinearTrend {
    /// Fit an ordinary least squares line through the given (x, y) samples.
    ///
    /// Needs at least two samples with distinct x values. R-squared is
    /// reported as 0.0 when the observed values are constant, since the
    /// coefficient of determination is undefined there.
    pub fn fit(samples: &[(f64, f64)]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 points to fit a trend, got {}",
                samples.len()
            )));
        }

        let n = samples.len() as f64;
        let x_mean = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = samples.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for &(x, y) in samples {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for &(x, y) in samples {
            let y_pred = slope * x + intercept;
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }
        let r_squared = if ss_total.abs() < 1e-10 {
            0.0
        } else {
            1.0 - (ss_residual / ss_total)
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    /// Predicted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Trend direction and strength per unit of x
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value of the fitted line at x = 0
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination of the fit
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }
}
