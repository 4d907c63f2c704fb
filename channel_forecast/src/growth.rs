//! Long-horizon growth projection against observed history
//!
//! Fits a growth model to a weekly series, extends the series to a horizon
//! date on the same 7-day grid, and carries running cumulative totals for
//! both the observed and the predicted column. Periods beyond the observed
//! history have no actual value; they stay empty rather than being filled
//! with zeros, so cumulative actuals freeze at the boundary while the
//! predicted total keeps climbing.

use chrono::{Duration, NaiveDate};
use metric_math::{running_total, running_total_sparse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::AggregatedPoint;
use crate::error::{AnalyticsError, Result};
use crate::models::{FittedGrowthModel, GrowthModel};
use crate::records::{MetricField, SeriesPoint};

/// Minimum number of observed periods a model can be fitted on
pub const MIN_FORECAST_HISTORY: usize = 2;

/// One period of a growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// First day of the period
    pub period_start: NaiveDate,
    /// Observed value, present only for historical periods
    pub actual: Option<f64>,
    /// Model prediction for the period
    pub predicted: f64,
    /// Running total of observed values up to this period
    pub cumulative_actual: Option<f64>,
    /// Running total of predicted values up to this period
    pub cumulative_predicted: f64,
}

/// A growth projection over history plus future periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    rows: Vec<ForecastRow>,
}

/// In-sample fit quality of a growth projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitAccuracy {
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute percentage error over non-zero actuals
    pub mape: f64,
}

impl ForecastSeries {
    /// All rows in period order
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// First period with no observed value, if the projection extends
    /// beyond the history
    pub fn forecast_boundary(&self) -> Option<NaiveDate> {
        self.rows
            .iter()
            .find(|row| row.actual.is_none())
            .map(|row| row.period_start)
    }

    /// Sum of all observed values
    pub fn total_actual(&self) -> f64 {
        self.rows.iter().filter_map(|row| row.actual).sum()
    }

    /// Predicted cumulative total at the latest period starting on or
    /// before `date`
    pub fn predicted_total_by(&self, date: NaiveDate) -> Option<f64> {
        self.rows
            .iter()
            .take_while(|row| row.period_start <= date)
            .last()
            .map(|row| row.cumulative_predicted)
    }

    /// Fit quality over the historical periods, if there are any
    pub fn fit_accuracy(&self) -> Option<FitAccuracy> {
        let observed: Vec<(f64, f64)> = self
            .rows
            .iter()
            .filter_map(|row| row.actual.map(|actual| (row.predicted, actual)))
            .collect();
        if observed.is_empty() {
            return None;
        }

        let n = observed.len() as f64;
        let mae = observed.iter().map(|(p, a)| (p - a).abs()).sum::<f64>() / n;
        let rmse = (observed.iter().map(|(p, a)| (p - a).powi(2)).sum::<f64>() / n).sqrt();

        let nonzero: Vec<&(f64, f64)> = observed.iter().filter(|(_, a)| *a != 0.0).collect();
        let mape = if nonzero.is_empty() {
            f64::NAN
        } else {
            nonzero
                .iter()
                .map(|(p, a)| ((p - a) / a).abs())
                .sum::<f64>()
                / nonzero.len() as f64
                * 100.0
        };

        Some(FitAccuracy { mae, rmse, mape })
    }
}

/// Project `field` forward to `horizon_end` with the given growth model.
///
/// The input must be a single weekly series: one point per period start.
/// Future periods are generated in 7-day steps from the last observed
/// period up to and including `horizon_end`, which keeps a Monday-aligned
/// history on the Monday grid. A horizon inside the observed range simply
/// produces no future rows.
pub fn project_growth<M: GrowthModel>(
    points: &[AggregatedPoint],
    field: MetricField,
    horizon_end: NaiveDate,
    model: &M,
) -> Result<ForecastSeries> {
    let mut history: Vec<SeriesPoint> = points
        .iter()
        .map(|point| {
            let value = point.total(field).ok_or_else(|| {
                AnalyticsError::MalformedInput(format!(
                    "aggregated point {} is missing {}",
                    point.period_start,
                    field.column()
                ))
            })?;
            Ok(SeriesPoint {
                period_start: point.period_start,
                value,
            })
        })
        .collect::<Result<_>>()?;

    if history.len() < MIN_FORECAST_HISTORY {
        return Err(AnalyticsError::InsufficientData(format!(
            "Need at least {} observed periods to project growth, got {}",
            MIN_FORECAST_HISTORY,
            history.len()
        )));
    }

    history.sort_by_key(|p| p.period_start);
    for pair in history.windows(2) {
        if pair[0].period_start == pair[1].period_start {
            return Err(AnalyticsError::MalformedInput(format!(
                "duplicate period {}; aggregate to one point per period first",
                pair[0].period_start
            )));
        }
    }

    let fitted = model.fit(&history)?;

    let mut periods: Vec<NaiveDate> = history.iter().map(|p| p.period_start).collect();
    let last_observed = history[history.len() - 1].period_start;
    let mut next = last_observed + Duration::days(7);
    while next <= horizon_end {
        periods.push(next);
        next += Duration::days(7);
    }

    let predicted = fitted.predict(&periods);
    let by_period: BTreeMap<NaiveDate, f64> = history
        .iter()
        .map(|p| (p.period_start, p.value))
        .collect();
    let actuals: Vec<Option<f64>> = periods
        .iter()
        .map(|period| by_period.get(period).copied())
        .collect();

    let cumulative_actual = running_total_sparse(&actuals);
    let cumulative_predicted = running_total(&predicted);

    let mut rows = Vec::with_capacity(periods.len());
    for (i, period_start) in periods.into_iter().enumerate() {
        rows.push(ForecastRow {
            period_start,
            actual: actuals[i],
            predicted: predicted[i],
            cumulative_actual: cumulative_actual[i],
            cumulative_predicted: cumulative_predicted[i],
        });
    }

    Ok(ForecastSeries { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinearGrowth;
    use approx::assert_relative_eq;
    use chrono::Datelike;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn monday(offset_weeks: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + Duration::days(7 * offset_weeks)
    }

    fn point(week: i64, subs: f64) -> AggregatedPoint {
        let mut totals = BTreeMap::new();
        totals.insert(MetricField::NetSubscribers, subs);
        AggregatedPoint {
            period_start: monday(week),
            platform: "YOUTUBE".to_string(),
            totals,
            derived_ratio: None,
        }
    }

    fn linear_history(weeks: i64) -> Vec<AggregatedPoint> {
        (0..weeks).map(|w| point(w, 10.0 + 2.0 * w as f64)).collect()
    }

    #[test]
    fn future_grid_continues_weekly_mondays() {
        let history = linear_history(6);
        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(11), &LinearGrowth::new())
                .unwrap();

        assert_eq!(series.rows().len(), 12);
        for row in series.rows() {
            assert_eq!(row.period_start.weekday(), chrono::Weekday::Mon);
        }
        for pair in series.rows().windows(2) {
            assert_eq!(
                pair[1].period_start - pair[0].period_start,
                Duration::days(7)
            );
        }
    }

    #[test]
    fn future_rows_have_no_actuals() {
        let history = linear_history(6);
        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(9), &LinearGrowth::new())
                .unwrap();

        for row in &series.rows()[..6] {
            assert!(row.actual.is_some());
            assert!(row.cumulative_actual.is_some());
        }
        for row in &series.rows()[6..] {
            assert_eq!(row.actual, None);
            assert_eq!(row.cumulative_actual, None);
        }
        assert_eq!(series.forecast_boundary(), Some(monday(6)));
    }

    #[test]
    fn cumulative_actual_conserves_the_history_sum() {
        let history = linear_history(8);
        let expected: f64 = (0..8).map(|w| 10.0 + 2.0 * w as f64).sum();

        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(12), &LinearGrowth::new())
                .unwrap();

        let last_actual_row = series.rows()[7].clone();
        assert_eq!(last_actual_row.cumulative_actual, Some(expected));
        assert_relative_eq!(series.total_actual(), expected);
    }

    #[test]
    fn predicted_total_always_advances_for_positive_predictions() {
        let history = linear_history(8);
        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(20), &LinearGrowth::new())
                .unwrap();

        for pair in series.rows().windows(2) {
            assert!(pair[1].cumulative_predicted > pair[0].cumulative_predicted);
        }
    }

    #[test]
    fn horizon_inside_history_adds_no_future_rows() {
        let history = linear_history(6);
        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(3), &LinearGrowth::new())
                .unwrap();

        assert_eq!(series.rows().len(), 6);
        assert_eq!(series.forecast_boundary(), None);
    }

    #[test]
    fn predicted_total_by_uses_latest_period_at_or_before() {
        let history = linear_history(6);
        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(8), &LinearGrowth::new())
                .unwrap();

        let at_week_4 = series.predicted_total_by(monday(4)).unwrap();
        // A mid-week date resolves to the same period as its Monday
        let mid_week = series.predicted_total_by(monday(4) + Duration::days(3)).unwrap();
        assert_eq!(at_week_4, mid_week);

        // Before the first period there is nothing to report
        assert_eq!(series.predicted_total_by(monday(-1)), None);
    }

    #[test]
    fn rejects_short_history() {
        let history = linear_history(1);
        let err = project_growth(
            &history,
            MetricField::NetSubscribers,
            monday(5),
            &LinearGrowth::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData(_)));
    }

    #[test]
    fn rejects_duplicate_periods() {
        let mut history = linear_history(5);
        history.push(point(2, 99.0));

        let err = project_growth(
            &history,
            MetricField::NetSubscribers,
            monday(8),
            &LinearGrowth::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedInput(_)));
    }

    #[test]
    fn rejects_points_missing_the_field() {
        let history = linear_history(5);
        let err = project_growth(&history, MetricField::Views, monday(8), &LinearGrowth::new())
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedInput(_)));
    }

    #[test]
    fn perfect_linear_history_fits_cleanly() {
        let history = linear_history(8);
        let series =
            project_growth(&history, MetricField::NetSubscribers, monday(12), &LinearGrowth::new())
                .unwrap();

        let accuracy = series.fit_accuracy().unwrap();
        assert!(accuracy.mae < 1e-6);
        assert!(accuracy.rmse < 1e-6);
        assert!(accuracy.mape < 1e-6);
    }
}
