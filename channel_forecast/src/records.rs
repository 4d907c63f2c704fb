//! Daily metric records as they come out of the warehouse
//!
//! A record is one day of activity for one platform. Records are immutable
//! once loaded; every pipeline stage reads them and produces new values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AnalyticsError, Result};

/// Daily metric columns available on the channel fact table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    NetSubscribers,
    Views,
    Likes,
    Dislikes,
    Comments,
    Shares,
    WatchMinutes,
}

impl MetricField {
    /// All fields in warehouse column order
    pub const ALL: [MetricField; 7] = [
        MetricField::NetSubscribers,
        MetricField::Views,
        MetricField::Likes,
        MetricField::Dislikes,
        MetricField::Comments,
        MetricField::Shares,
        MetricField::WatchMinutes,
    ];

    /// Warehouse column name for this field
    pub fn column(&self) -> &'static str {
        match self {
            MetricField::NetSubscribers => "net_subscribers",
            MetricField::Views => "views_count",
            MetricField::Likes => "likes_count",
            MetricField::Dislikes => "dislikes_count",
            MetricField::Comments => "comments_count",
            MetricField::Shares => "shares_count",
            MetricField::WatchMinutes => "estimated_watch_minutes",
        }
    }

    /// Short human-readable title used on dashboard cards
    pub fn title(&self) -> &'static str {
        match self {
            MetricField::NetSubscribers => "Subscribers",
            MetricField::Views => "Views",
            MetricField::Likes => "Likes",
            MetricField::Dislikes => "Dislikes",
            MetricField::Comments => "Comments",
            MetricField::Shares => "Shares",
            MetricField::WatchMinutes => "Watch Time (min)",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// One day of metrics for one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Calendar day the metrics were observed on
    pub date: NaiveDate,
    /// Source platform, e.g. "YOUTUBE"
    pub platform: String,
    /// Metric values present on this record
    pub values: BTreeMap<MetricField, f64>,
}

impl MetricRecord {
    /// Create a new record
    pub fn new(
        date: NaiveDate,
        platform: impl Into<String>,
        values: BTreeMap<MetricField, f64>,
    ) -> Self {
        Self {
            date,
            platform: platform.into(),
            values,
        }
    }

    /// Value of `field`, if the record carries it
    pub fn value(&self, field: MetricField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    /// Check that the record can participate in an aggregation of `fields`.
    ///
    /// Aggregation fails fast on the first unusable record rather than
    /// silently producing partial totals.
    pub(crate) fn require(&self, fields: &[MetricField]) -> Result<()> {
        if self.platform.trim().is_empty() {
            return Err(AnalyticsError::MalformedInput(format!(
                "record for {} has an empty platform",
                self.date
            )));
        }
        for field in fields {
            if !self.values.contains_key(field) {
                return Err(AnalyticsError::MalformedInput(format!(
                    "record for {} ({}) is missing {}",
                    self.date,
                    self.platform,
                    field.column()
                )));
            }
        }
        Ok(())
    }
}

/// A single (period, value) observation handed to growth models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// First day of the period
    pub period_start: NaiveDate,
    /// Observed metric total for the period
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, platform: &str, views: f64) -> MetricRecord {
        let mut values = BTreeMap::new();
        values.insert(MetricField::Views, views);
        MetricRecord::new(date, platform, values)
    }

    #[test]
    fn value_lookup() {
        let rec = record(NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(), "YOUTUBE", 42.0);
        assert_eq!(rec.value(MetricField::Views), Some(42.0));
        assert_eq!(rec.value(MetricField::Likes), None);
    }

    #[test]
    fn require_rejects_missing_field() {
        let rec = record(NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(), "YOUTUBE", 42.0);
        assert!(rec.require(&[MetricField::Views]).is_ok());

        let err = rec.require(&[MetricField::Likes]).unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedInput(_)));
        assert!(err.to_string().contains("likes_count"));
    }

    #[test]
    fn require_rejects_blank_platform() {
        let rec = record(NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(), "  ", 42.0);
        let err = rec.require(&[MetricField::Views]).unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedInput(_)));
    }

    #[test]
    fn field_columns_are_distinct() {
        let mut columns: Vec<&str> = MetricField::ALL.iter().map(|f| f.column()).collect();
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), MetricField::ALL.len());
    }
}
