//! Growth models for period series
//!
//! The projection pipeline treats models as a black box with a fit/predict
//! contract: fit once over the historical series, then ask the fitted model
//! for values at arbitrary period starts. Anything honouring that contract
//! can stand in for the default seasonal model.

use chrono::NaiveDate;
use std::fmt::Debug;

use crate::error::Result;
use crate::records::SeriesPoint;

/// A fitted model able to produce predictions for requested periods
pub trait FittedGrowthModel: Debug {
    /// Predicted value for each requested period start, in request order
    fn predict(&self, periods: &[NaiveDate]) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Growth model that can be fitted to a historical period series
pub trait GrowthModel: Debug {
    /// The type of fitted model produced
    type Fitted: FittedGrowthModel;

    /// Fit the model to the historical series
    fn fit(&self, history: &[SeriesPoint]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear;
pub mod seasonal;

pub use linear::{FittedLinearGrowth, LinearGrowth};
pub use seasonal::{FittedSeasonalTrend, SeasonalTrend, WEEKLY_SEASON_LENGTH};
