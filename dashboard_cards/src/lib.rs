//! # Dashboard Cards
//!
//! Presentation adapter for the channel analytics pipeline. Each module
//! turns pipeline outputs into a renderable payload: KPI metric cards with
//! trend deviations and sparklines, the subscriber growth projection with
//! milestone tracking, and the quadrant analysis scene. Payloads are plain
//! serializable data; nothing here draws.
//!
//! ## Usage Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use channel_forecast::{MetricField, MetricRecord};
//! use chrono::{Duration, NaiveDate};
//! use dashboard_cards::kpi::build_kpi_card;
//!
//! # fn main() -> Result<(), dashboard_cards::CardError> {
//! let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let records: Vec<MetricRecord> = (0..15)
//!     .map(|week| {
//!         let mut values = BTreeMap::new();
//!         values.insert(MetricField::Views, 100.0 + 10.0 * week as f64);
//!         MetricRecord::new(start + Duration::weeks(week), "YOUTUBE", values)
//!     })
//!     .collect();
//!
//! let card = build_kpi_card(&records, "Views", &[MetricField::Views], 12, 12)?;
//! println!("{}: {} ({})", card.title, card.total, card.deviation_summary);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod figure;
pub mod format;
pub mod growth;
pub mod kpi;
pub mod refresh;
pub mod scene;

pub use figure::{Annotation, HorizontalAnchor, SparkPoint, VerticalAnchor};
pub use growth::{build_growth_card, GrowthCard, GrowthTargets, Milestone, TargetDeviation};
pub use kpi::{build_kpi_card, KpiCard, Sparkline};
pub use refresh::{
    build_dashboard, CardState, DashboardConfig, DashboardSnapshot, KpiCardConfig,
};
pub use scene::{build_quadrant_scene, QuadrantRect, QuadrantScene, ScatterPoint, VideoHover};

/// Errors that can occur while assembling card payloads
#[derive(Error, Debug)]
pub enum CardError {
    /// Error from the forecast pipeline feeding a card
    #[error("Forecast error: {0}")]
    Forecast(#[from] channel_forecast::AnalyticsError),

    /// Error from the video insight layer
    #[error("Insight error: {0}")]
    Insight(#[from] video_insights::InsightError),
}

/// Result type for card assembly
pub type Result<T> = std::result::Result<T, CardError>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
