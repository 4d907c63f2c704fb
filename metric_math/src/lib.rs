//! # Metric Math
//!
//! Mathematical building blocks for channel analytics: least-squares trend
//! fitting, guarded deviation percentages, safe ratios and running totals.
//! Everything in this crate is pure and operates on plain numbers; period
//! handling and metric semantics live in the crates above it.

use thiserror::Error;

pub mod deviation;
pub mod ratio;
pub mod running;
pub mod trend;

pub use deviation::Deviation;
pub use ratio::safe_ratio;
pub use running::{running_total, running_total_sparse};
pub use trend::LinearTrend;

/// Errors that can occur in analytics math
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for metric math operations
pub type Result<T> = std::result::Result<T, MathError>;
