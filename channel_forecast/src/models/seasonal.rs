//! Additive trend-plus-seasonality growth model
//!
//! The default model for weekly channel metrics. A least-squares line over
//! day ordinals captures long-run growth; seasonal offsets are the mean
//! detrended value at each position of a repeating cycle. Series shorter
//! than two full cycles skip the seasonal component entirely rather than
//! learn offsets from a single noisy pass.

use chrono::{Datelike, NaiveDate};
use statrs::statistics::Statistics;

use metric_math::LinearTrend;

use crate::error::{AnalyticsError, Result};
use crate::models::{FittedGrowthModel, GrowthModel};
use crate::records::SeriesPoint;

/// Periods per seasonal cycle for weekly data
pub const WEEKLY_SEASON_LENGTH: usize = 52;

/// Additive seasonal growth model
#[derive(Debug, Clone)]
pub struct SeasonalTrend {
    /// Name of the model
    name: String,
    /// Periods per seasonal cycle
    season_length: usize,
}

/// Fitted additive seasonal growth model
#[derive(Debug, Clone)]
pub struct FittedSeasonalTrend {
    name: String,
    season_length: usize,
    /// Period the cycle positions are anchored to
    anchor: NaiveDate,
    line: LinearTrend,
    /// Mean detrended value per cycle position; all zeros when the history
    /// was too short to estimate them
    seasonal: Vec<f64>,
    /// Sample standard deviation of the in-sample residuals
    residual_spread: f64,
}

impl SeasonalTrend {
    /// Create a new seasonal trend model with the given cycle length
    pub fn new(season_length: usize) -> Result<Self> {
        if season_length < 2 {
            return Err(AnalyticsError::InvalidParameter(format!(
                "Season length must be at least 2, got {}",
                season_length
            )));
        }

        Ok(Self {
            name: format!("Seasonal Trend (cycle={})", season_length),
            season_length,
        })
    }

    /// Model with the yearly cycle used for weekly channel metrics
    pub fn weekly() -> Self {
        Self {
            name: format!("Seasonal Trend (cycle={})", WEEKLY_SEASON_LENGTH),
            season_length: WEEKLY_SEASON_LENGTH,
        }
    }
}

impl Default for SeasonalTrend {
    fn default() -> Self {
        Self::weekly()
    }
}

/// Cycle position of `period`, counted in whole weeks from the anchor
fn season_position(anchor: NaiveDate, period: NaiveDate, season_length: usize) -> usize {
    let weeks = (period - anchor).num_days().div_euclid(7);
    weeks.rem_euclid(season_length as i64) as usize
}

impl GrowthModel for SeasonalTrend {
    type Fitted = FittedSeasonalTrend;

    fn fit(&self, history: &[SeriesPoint]) -> Result<Self::Fitted> {
        if history.len() < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "Seasonal trend needs at least 2 observations, got {}",
                history.len()
            )));
        }

        let mut points = history.to_vec();
        points.sort_by_key(|p| p.period_start);

        let samples: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p.period_start.num_days_from_ce() as f64, p.value))
            .collect();
        let line = LinearTrend::fit(&samples)?;
        let anchor = points[0].period_start;

        // Seasonal offsets need at least two full cycles to average over.
        let seasonal = if points.len() >= self.season_length * 2 {
            let mut sums = vec![0.0; self.season_length];
            let mut counts = vec![0usize; self.season_length];
            for (point, &(x, y)) in points.iter().zip(&samples) {
                let pos = season_position(anchor, point.period_start, self.season_length);
                sums[pos] += y - line.predict(x);
                counts[pos] += 1;
            }
            sums.iter()
                .zip(&counts)
                .map(|(sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
                .collect()
        } else {
            vec![0.0; self.season_length]
        };

        let residuals: Vec<f64> = points
            .iter()
            .zip(&samples)
            .map(|(point, &(x, y))| {
                let pos = season_position(anchor, point.period_start, self.season_length);
                y - (line.predict(x) + seasonal[pos])
            })
            .collect();
        let residual_spread = (&residuals).std_dev();

        Ok(FittedSeasonalTrend {
            name: self.name.clone(),
            season_length: self.season_length,
            anchor,
            line,
            seasonal,
            residual_spread,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedSeasonalTrend {
    /// Sample standard deviation of the in-sample residuals
    pub fn residual_spread(&self) -> f64 {
        self.residual_spread
    }

    /// Half-width of the symmetric confidence band at `confidence_level`
    pub fn interval_half_width(&self, confidence_level: f64) -> Result<f64> {
        Ok(z_score(confidence_level)? * self.residual_spread)
    }

    /// Predictions with (value, lower, upper) confidence bounds
    pub fn predict_with_bounds(
        &self,
        periods: &[NaiveDate],
        confidence_level: f64,
    ) -> Result<Vec<(f64, f64, f64)>> {
        let margin = self.interval_half_width(confidence_level)?;
        Ok(self
            .predict(periods)
            .into_iter()
            .map(|value| (value, value - margin, value + margin))
            .collect())
    }
}

fn z_score(confidence_level: f64) -> Result<f64> {
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(AnalyticsError::InvalidParameter(
            "Confidence level must be between 0 and 1".to_string(),
        ));
    }
    Ok(match confidence_level {
        c if c >= 0.99 => 2.576,
        c if c >= 0.95 => 1.96,
        c if c >= 0.90 => 1.645,
        _ => 1.0,
    })
}

impl FittedGrowthModel for FittedSeasonalTrend {
    fn predict(&self, periods: &[NaiveDate]) -> Vec<f64> {
        periods
            .iter()
            .map(|&p| {
                let pos = season_position(self.anchor, p, self.season_length);
                self.line.predict(p.num_days_from_ce() as f64) + self.seasonal[pos]
            })
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
