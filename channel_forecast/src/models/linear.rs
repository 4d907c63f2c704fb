//! Plain least-squares growth model

use chrono::{Datelike, NaiveDate};

use metric_math::LinearTrend;

use crate::error::{AnalyticsError, Result};
use crate::models::{FittedGrowthModel, GrowthModel};
use crate::records::SeriesPoint;

/// Straight-line growth model without a seasonal component.
///
/// Useful as a baseline and for series too short to expose a seasonal
/// cycle.
#[derive(Debug, Clone)]
pub struct LinearGrowth {
    name: String,
}

impl Default for LinearGrowth {
    fn default() -> Self {
        Self::new()
    }
}

/// Fitted straight-line growth model
#[derive(Debug, Clone)]
pub struct FittedLinearGrowth {
    name: String,
    line: LinearTrend,
}

impl LinearGrowth {
    pub fn new() -> Self {
        Self {
            name: "Linear Growth".to_string(),
        }
    }
}

impl FittedLinearGrowth {
    /// Goodness of fit of the underlying line
    pub fn r_squared(&self) -> f64 {
        self.line.r_squared()
    }
}

impl GrowthModel for LinearGrowth {
    type Fitted = FittedLinearGrowth;

    fn fit(&self, history: &[SeriesPoint]) -> Result<Self::Fitted> {
        if history.len() < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "Linear growth needs at least 2 observations, got {}",
                history.len()
            )));
        }

        let samples: Vec<(f64, f64)> = history
            .iter()
            .map(|p| (p.period_start.num_days_from_ce() as f64, p.value))
            .collect();
        let line = LinearTrend::fit(&samples)?;

        Ok(FittedLinearGrowth {
            name: self.name.clone(),
            line,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedGrowthModel for FittedLinearGrowth {
    fn predict(&self, periods: &[NaiveDate]) -> Vec<f64> {
        periods
            .iter()
            .map(|p| self.line.predict(p.num_days_from_ce() as f64))
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
