//! # Channel Forecast
//!
//! Aggregation, trend estimation and growth forecasting for channel
//! analytics. The pipeline takes immutable daily metric records and turns
//! them into period aggregates, short-range trend comparisons and
//! long-horizon growth projections.
//!
//! ## Pipeline stages
//!
//! - Aggregation: daily records roll up into weekly (Monday-start) or
//!   monthly (first-of-month) buckets per platform
//! - Trend estimation: a least-squares line over the recent complete
//!   periods, projected onto the newest of them for comparison
//! - Growth projection: a pluggable model fitted to the weekly series and
//!   extended to a horizon date, with cumulative actual and predicted
//!   totals
//!
//! ## Quick start
//!
//! ```
//! use channel_forecast::{aggregate, estimate_trend, Granularity, MetricField, MetricRecord};
//! use chrono::NaiveDate;
//! use std::collections::BTreeMap;
//!
//! // Fifteen weeks of Monday records, views rising by 10 a week
//! let records: Vec<MetricRecord> = (0..15)
//!     .map(|week| {
//!         let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
//!             + chrono::Duration::days(7 * week);
//!         let mut values = BTreeMap::new();
//!         values.insert(MetricField::Views, 100.0 + 10.0 * week as f64);
//!         MetricRecord::new(date, "YOUTUBE", values)
//!     })
//!     .collect();
//!
//! let weekly = aggregate(&records, Granularity::Week, &[MetricField::Views]).unwrap();
//! let trend = estimate_trend(&weekly, &[MetricField::Views], 12).unwrap();
//!
//! // The projection lands on the held-out newest complete week
//! assert_eq!(trend.comparison_predicted, 230.0);
//! assert_eq!(trend.comparison_actual, 230.0);
//! ```

pub mod aggregate;
pub mod error;
pub mod growth;
pub mod models;
pub mod records;
pub mod sample;
pub mod trend;

// Re-export commonly used types
pub use crate::aggregate::{aggregate, AggregatedPoint, Granularity};
pub use crate::error::{AnalyticsError, Result};
pub use crate::growth::{project_growth, FitAccuracy, ForecastRow, ForecastSeries};
pub use crate::models::{
    FittedGrowthModel, GrowthModel, LinearGrowth, SeasonalTrend, WEEKLY_SEASON_LENGTH,
};
pub use crate::records::{MetricField, MetricRecord, SeriesPoint};
pub use crate::trend::{
    estimate_trend, PointRole, TrendResult, WindowPoint, DEFAULT_TREND_WINDOW,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
