//! Short-range trend estimation over a window of recent periods
//!
//! The estimator looks at the most recent complete periods, fits a straight
//! line through all but the newest of them, and projects that line one
//! period forward. The newest complete period is held out as the comparison
//! actual, so the projection can be scored against a value the model never
//! saw.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use metric_math::{safe_ratio, Deviation, LinearTrend};

use crate::aggregate::AggregatedPoint;
use crate::error::{AnalyticsError, Result};
use crate::records::MetricField;

/// Number of training periods used when none is specified
pub const DEFAULT_TREND_WINDOW: usize = 12;

/// Minimum number of training periods for a meaningful line fit
pub const MIN_TRAINING_POINTS: usize = 3;

/// Role of a point inside a trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointRole {
    /// Training observation
    Actual,
    /// Held-out newest complete period
    ComparisonActual,
    /// Trend projection for the held-out period
    ComparisonPredicted,
}

impl PointRole {
    /// Legend label used on trend charts
    pub fn label(&self) -> &'static str {
        match self {
            PointRole::Actual => "ACTUAL",
            PointRole::ComparisonActual => "COMPARISON - ACTUAL",
            PointRole::ComparisonPredicted => "COMPARISON - PREDICTED",
        }
    }
}

/// An aggregated point tagged with its role in the trend window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPoint {
    pub point: AggregatedPoint,
    pub role: PointRole,
}

/// Result of a trend estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Window points in period order: training actuals, then the comparison
    /// actual, then the synthesized prediction for the same period
    pub window: Vec<WindowPoint>,
    /// Period both comparison values refer to
    pub comparison_period: NaiveDate,
    /// Observed value for the comparison period
    pub comparison_actual: f64,
    /// Trend projection for the comparison period
    pub comparison_predicted: f64,
}

impl TrendResult {
    /// Deviation of the observed comparison value from the projection
    pub fn deviation(&self) -> Deviation {
        Deviation::compute(self.comparison_predicted, self.comparison_actual)
    }
}

/// Estimate the recent trend of `fields` over aggregated period `points`.
///
/// The newest point is always dropped as an incomplete period still
/// accumulating data. Of the remaining points the newest becomes the
/// comparison actual and up to `window_size` before it are used to fit the
/// line. Projected totals are rounded to whole units, matching how the
/// metrics are counted; for a two-field request the projected ratio is
/// derived from the rounded totals.
///
/// Points are treated as one series in period order. Callers aggregating
/// several platforms together should filter to one platform first.
pub fn estimate_trend(
    points: &[AggregatedPoint],
    fields: &[MetricField],
    window_size: usize,
) -> Result<TrendResult> {
    if fields.is_empty() {
        return Err(AnalyticsError::InvalidParameter(
            "At least one metric field is required".to_string(),
        ));
    }
    if window_size < MIN_TRAINING_POINTS {
        return Err(AnalyticsError::InvalidParameter(format!(
            "Window size must be at least {}, got {}",
            MIN_TRAINING_POINTS, window_size
        )));
    }

    let mut ordered: Vec<AggregatedPoint> = points.to_vec();
    ordered.sort_by(|a, b| {
        (a.period_start, a.platform.as_str()).cmp(&(b.period_start, b.platform.as_str()))
    });

    // The newest period is still in progress; never score against it.
    let complete = &ordered[..ordered.len().saturating_sub(1)];
    if complete.len() < MIN_TRAINING_POINTS + 1 {
        return Err(AnalyticsError::InsufficientData(format!(
            "Need at least {} complete periods plus a comparison period, got {}",
            MIN_TRAINING_POINTS,
            complete.len()
        )));
    }

    let start = complete.len().saturating_sub(window_size + 1);
    let window = &complete[start..];
    let comparison = &window[window.len() - 1];
    let training = &window[..window.len() - 1];

    let comparison_period = comparison.period_start;
    let comparison_x = comparison_period.num_days_from_ce() as f64;

    // Fit one line per field and project it onto the comparison period.
    let mut projected: BTreeMap<MetricField, f64> = BTreeMap::new();
    for &field in fields {
        let samples = field_samples(training, field)?;
        let line = LinearTrend::fit(&samples)?;
        projected.insert(field, line.predict(comparison_x).round());
    }

    let projected_ratio = if fields.len() == 2 {
        let numerator = projected.get(&fields[0]).copied().unwrap_or_default();
        let denominator = projected.get(&fields[1]).copied().unwrap_or_default();
        Some(safe_ratio(numerator, denominator))
    } else {
        None
    };

    let comparison_actual = scalar_value(comparison, fields)?;
    let comparison_predicted = match projected_ratio {
        Some(ratio) => ratio,
        None => projected.get(&fields[0]).copied().unwrap_or_default(),
    };

    let predicted_point = AggregatedPoint {
        period_start: comparison_period,
        platform: comparison.platform.clone(),
        totals: projected,
        derived_ratio: projected_ratio,
    };

    let mut tagged: Vec<WindowPoint> = training
        .iter()
        .map(|point| WindowPoint {
            point: point.clone(),
            role: PointRole::Actual,
        })
        .collect();
    tagged.push(WindowPoint {
        point: comparison.clone(),
        role: PointRole::ComparisonActual,
    });
    tagged.push(WindowPoint {
        point: predicted_point,
        role: PointRole::ComparisonPredicted,
    });

    Ok(TrendResult {
        window: tagged,
        comparison_period,
        comparison_actual,
        comparison_predicted,
    })
}

/// (day ordinal, value) samples for fitting one field's trend line
fn field_samples(points: &[AggregatedPoint], field: MetricField) -> Result<Vec<(f64, f64)>> {
    points
        .iter()
        .map(|point| {
            let value = point.total(field).ok_or_else(|| {
                AnalyticsError::MalformedInput(format!(
                    "aggregated point {} is missing {}",
                    point.period_start,
                    field.column()
                ))
            })?;
            Ok((point.period_start.num_days_from_ce() as f64, value))
        })
        .collect()
}

/// The scalar a window point contributes to the comparison: the derived
/// ratio for a two-field request, the single field's total otherwise.
fn scalar_value(point: &AggregatedPoint, fields: &[MetricField]) -> Result<f64> {
    if fields.len() == 2 {
        point.derived_ratio.ok_or_else(|| {
            AnalyticsError::MalformedInput(format!(
                "aggregated point {} carries no derived ratio",
                point.period_start
            ))
        })
    } else {
        point.total(fields[0]).ok_or_else(|| {
            AnalyticsError::MalformedInput(format!(
                "aggregated point {} is missing {}",
                point.period_start,
                fields[0].column()
            ))
        })
    }
}
