//! Rolling daily records up into weekly or monthly periods
//!
//! Buckets are keyed by (period start, platform). Weekly periods start on
//! Monday, monthly periods on the first of the month, and every daily record
//! maps into exactly one bucket, so period totals always conserve the sum of
//! the underlying dailies.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use metric_math::safe_ratio;

use crate::error::{AnalyticsError, Result};
use crate::records::{MetricField, MetricRecord};

/// Bucket width used when aggregating daily records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Week,
    Month,
}

impl Granularity {
    /// Floor `date` to the start of its period.
    ///
    /// Weeks start on Monday, months on the first. Flooring a date that is
    /// already a period start returns it unchanged.
    pub fn floor(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Week => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            Granularity::Month => date - Duration::days(date.day0() as i64),
        }
    }

    /// Start of the period immediately after the one beginning at `period_start`
    pub fn next(&self, period_start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Week => period_start + Duration::days(7),
            Granularity::Month => {
                let (year, month) = if period_start.month() == 12 {
                    (period_start.year() + 1, 1)
                } else {
                    (period_start.year(), period_start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap()
            }
        }
    }
}

/// Summed metrics for one (period, platform) bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    /// First day of the period
    pub period_start: NaiveDate,
    /// Source platform the bucket belongs to
    pub platform: String,
    /// Period totals per requested field
    pub totals: BTreeMap<MetricField, f64>,
    /// Ratio of the first requested field's total over the second's, when
    /// exactly two fields were requested. NaN marks a zero denominator.
    pub derived_ratio: Option<f64>,
}

impl AggregatedPoint {
    /// Period total for `field`, if it was part of the aggregation
    pub fn total(&self, field: MetricField) -> Option<f64> {
        self.totals.get(&field).copied()
    }
}

/// Roll daily `records` up into period buckets, summing each of `fields`.
///
/// Buckets are returned ordered by period start, then platform. When exactly
/// two fields are requested each bucket also carries the ratio of their
/// totals, which is how composite metrics such as average view duration are
/// derived from their parts.
pub fn aggregate(
    records: &[MetricRecord],
    granularity: Granularity,
    fields: &[MetricField],
) -> Result<Vec<AggregatedPoint>> {
    if fields.is_empty() {
        return Err(AnalyticsError::InvalidParameter(
            "At least one metric field is required".to_string(),
        ));
    }
    let mut distinct = fields.to_vec();
    distinct.sort();
    distinct.dedup();
    if distinct.len() != fields.len() {
        return Err(AnalyticsError::InvalidParameter(
            "Metric fields must be distinct".to_string(),
        ));
    }

    let mut buckets: BTreeMap<(NaiveDate, String), BTreeMap<MetricField, f64>> = BTreeMap::new();
    for record in records {
        record.require(fields)?;
        let key = (granularity.floor(record.date), record.platform.clone());
        let totals = buckets.entry(key).or_default();
        for &field in fields {
            *totals.entry(field).or_insert(0.0) += record.value(field).unwrap_or_default();
        }
    }

    Ok(buckets
        .into_iter()
        .map(|((period_start, platform), totals)| {
            let derived_ratio = if fields.len() == 2 {
                let numerator = totals.get(&fields[0]).copied().unwrap_or_default();
                let denominator = totals.get(&fields[1]).copied().unwrap_or_default();
                Some(safe_ratio(numerator, denominator))
            } else {
                None
            };
            AggregatedPoint {
                period_start,
                platform,
                totals,
                derived_ratio,
            }
        })
        .collect())
}
