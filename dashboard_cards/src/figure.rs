//! Renderer-agnostic figure primitives shared by the card payloads

use chrono::NaiveDate;
use serde::Serialize;

/// Horizontal anchor of an annotation relative to its x position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAnchor {
    Left,
    Right,
}

/// Vertical anchor of an annotation relative to its y position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

/// A text label pinned to a point on a time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: NaiveDate,
    pub y: f64,
    pub text: String,
    pub xanchor: HorizontalAnchor,
    pub yanchor: VerticalAnchor,
}

/// One point of a time-series line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparkPoint {
    pub period_start: NaiveDate,
    pub value: f64,
}

impl SparkPoint {
    pub fn new(period_start: NaiveDate, value: f64) -> Self {
        Self {
            period_start,
            value,
        }
    }
}
