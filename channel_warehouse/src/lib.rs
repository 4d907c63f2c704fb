//! # Channel Warehouse
//!
//! Read-only access to the analytics warehouse behind the channel
//! dashboard. Two tables matter here: `pl.pl_fct_channel_metrics_daily`
//! holds one row per platform per day and `pl.pl_dim_video` holds one row
//! per published video. Queries are parameterized, and each fetched row is
//! converted into the pipeline's record types before anything downstream
//! sees it; a row missing a required column fails fast as a
//! [`WarehouseError::MalformedRow`] instead of flowing on half-filled.
//!
//! ## Usage Example
//!
//! ```no_run
//! use channel_warehouse::{connect, fetch_daily_metrics};
//! use chrono::NaiveDate;
//!
//! async fn refresh() -> channel_warehouse::Result<()> {
//!     let pool = connect("postgres://analytics@localhost/warehouse").await?;
//!     let as_of = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
//!     let metrics = fetch_daily_metrics(&pool, as_of).await?;
//!     println!("{} metric records", metrics.len());
//!     Ok(())
//! }
//! ```

use thiserror::Error;

pub mod db;

pub use db::{connect, fetch_daily_metrics, fetch_videos, MetricRow, VideoRow};

/// Errors that can occur when reading from the warehouse
#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for warehouse operations
pub type Result<T> = std::result::Result<T, WarehouseError>;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
