//! # Channel Pulse
//!
//! `channel_pulse` ties the channel analytics workspace together. Each
//! member crate owns one stage of the pipeline:
//!
//! - [`metric_math`]: safe ratios, running totals, deviations and the
//!   least-squares trend fit
//! - [`channel_forecast`]: metric records, weekly aggregation, trend
//!   estimation and the subscriber growth projection
//! - [`video_insights`]: per-video engagement metrics and quadrant
//!   classification
//! - [`dashboard_cards`]: KPI cards, the growth card and the quadrant
//!   scatter scene, assembled into one dashboard snapshot
//! - [`channel_warehouse`]: parameterized Postgres reads feeding the rest
//!
//! ## Example
//!
//! ```
//! use channel_forecast::sample::generate_daily_metrics_seeded;
//! use channel_pulse::{build_dashboard, DashboardConfig};
//! use chrono::NaiveDate;
//! use video_insights::sample::sample_videos;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let metrics = generate_daily_metrics_seeded(start, 280, "YOUTUBE", 600.0, 7);
//! let as_of = metrics.last().map(|r| r.date).unwrap();
//!
//! let snapshot = build_dashboard(&metrics, &sample_videos(), &DashboardConfig::new(as_of));
//! assert_eq!(snapshot.kpi_cards.len(), 8);
//! ```

pub use channel_forecast as forecast;
pub use channel_warehouse as warehouse;
pub use dashboard_cards as cards;
pub use metric_math as math;
pub use video_insights as insights;

pub use dashboard_cards::{build_dashboard, DashboardConfig, DashboardSnapshot};
pub use video_insights::Quadrant;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
