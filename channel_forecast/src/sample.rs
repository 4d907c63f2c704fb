//! Sample data helpers for demos and tests
//!
//! Provides a synthetic daily-metric generator shaped like a channel that
//! publishes weekly (a pronounced Sunday spike, slow growth, noise) and a
//! CSV loader for fixture files exported from the warehouse.

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::records::{MetricField, MetricRecord};

/// Generate synthetic daily metric records
///
/// # Arguments
/// * `start` - First day to generate
/// * `days` - Number of consecutive days
/// * `platform` - Platform name stamped on every record
/// * `base_views` - Typical weekday view count
///
/// # Returns
/// * `Vec<MetricRecord>` - One record per day, in date order
pub fn generate_daily_metrics(
    start: NaiveDate,
    days: usize,
    platform: &str,
    base_views: f64,
) -> Vec<MetricRecord> {
    use rand::thread_rng;
    generate_with_rng(start, days, platform, base_views, &mut thread_rng())
}

/// Deterministic variant of [`generate_daily_metrics`] for reproducible
/// fixtures
pub fn generate_daily_metrics_seeded(
    start: NaiveDate,
    days: usize,
    platform: &str,
    base_views: f64,
    seed: u64,
) -> Vec<MetricRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(start, days, platform, base_views, &mut rng)
}

fn generate_with_rng<R: Rng>(
    start: NaiveDate,
    days: usize,
    platform: &str,
    base_views: f64,
    rng: &mut R,
) -> Vec<MetricRecord> {
    let mut records = Vec::with_capacity(days);

    for day in 0..days {
        let date = start + Duration::days(day as i64);

        // Sunday carries the weekly upload; the rest of the week trails off
        let weekday_factor = match date.weekday().num_days_from_monday() {
            6 => 2.5,
            5 => 1.3,
            0 => 1.1,
            _ => 0.8,
        };
        // Slow channel growth over time plus day-to-day noise
        let growth = 1.0 + 0.002 * day as f64;
        let noise = 0.8 + 0.4 * rng.gen::<f64>();

        let views = (base_views * weekday_factor * growth * noise).round();
        let likes = (views * (0.03 + 0.02 * rng.gen::<f64>())).round();
        let dislikes = (views * 0.003 * rng.gen::<f64>()).round();
        let comments = (views * (0.008 + 0.008 * rng.gen::<f64>())).round();
        let shares = (views * (0.004 + 0.004 * rng.gen::<f64>())).round();
        let watch_minutes = (views * (3.0 + 2.0 * rng.gen::<f64>())).round();
        let net_subscribers = (views / 120.0 * rng.gen::<f64>()).round() - 1.0;

        let mut values = BTreeMap::new();
        values.insert(MetricField::Views, views);
        values.insert(MetricField::Likes, likes);
        values.insert(MetricField::Dislikes, dislikes);
        values.insert(MetricField::Comments, comments);
        values.insert(MetricField::Shares, shares);
        values.insert(MetricField::WatchMinutes, watch_minutes);
        values.insert(MetricField::NetSubscribers, net_subscribers);

        records.push(MetricRecord::new(date, platform, values));
    }

    records
}

#[derive(Debug, Deserialize)]
struct RawMetricRow {
    metric_date: NaiveDate,
    platform: String,
    net_subscribers: Option<f64>,
    views_count: Option<f64>,
    likes_count: Option<f64>,
    dislikes_count: Option<f64>,
    comments_count: Option<f64>,
    shares_count: Option<f64>,
    estimated_watch_minutes: Option<f64>,
}

/// Load daily metric records from a CSV fixture
///
/// The expected header is:
/// metric_date,platform,net_subscribers,views_count,likes_count,dislikes_count,comments_count,shares_count,estimated_watch_minutes
///
/// Empty metric cells become absent values on the record; validation of
/// which fields are required happens at aggregation time.
pub fn load_metric_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MetricRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let row: RawMetricRow = row?;
        let mut values = BTreeMap::new();
        let columns = [
            (MetricField::NetSubscribers, row.net_subscribers),
            (MetricField::Views, row.views_count),
            (MetricField::Likes, row.likes_count),
            (MetricField::Dislikes, row.dislikes_count),
            (MetricField::Comments, row.comments_count),
            (MetricField::Shares, row.shares_count),
            (MetricField::WatchMinutes, row.estimated_watch_minutes),
        ];
        for (field, value) in columns {
            if let Some(value) = value {
                values.insert(field, value);
            }
        }
        records.push(MetricRecord::new(row.metric_date, row.platform, values));
    }

    records.sort_by(|a, b| (a.date, a.platform.as_str()).cmp(&(b.date, b.platform.as_str())));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn generates_one_record_per_day() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let records = generate_daily_metrics_seeded(start, 28, "YOUTUBE", 400.0, 7);

        assert_eq!(records.len(), 28);
        assert_eq!(records[0].date, start);
        assert_eq!(records[27].date, start + Duration::days(27));
        for record in &records {
            assert_eq!(record.platform, "YOUTUBE");
            for field in MetricField::ALL {
                assert!(record.value(field).is_some(), "missing {}", field);
            }
        }
    }

    #[test]
    fn sundays_spike_above_weekdays() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let records = generate_daily_metrics_seeded(start, 56, "YOUTUBE", 400.0, 11);

        let sum_for = |weekday: u32| -> f64 {
            records
                .iter()
                .filter(|r| r.date.weekday().num_days_from_monday() == weekday)
                .filter_map(|r| r.value(MetricField::Views))
                .sum()
        };

        assert!(sum_for(6) > sum_for(1));
    }

    #[test]
    fn loads_csv_with_gaps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "metric_date,platform,net_subscribers,views_count,likes_count,dislikes_count,comments_count,shares_count,estimated_watch_minutes"
        )
        .unwrap();
        writeln!(file, "2025-05-12,YOUTUBE,4,120,6,0,2,1,480").unwrap();
        writeln!(file, "2025-05-13,YOUTUBE,,80,3,,1,,320").unwrap();
        file.flush().unwrap();

        let records = load_metric_csv(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value(MetricField::Views), Some(120.0));
        assert_eq!(records[0].value(MetricField::NetSubscribers), Some(4.0));
        assert_eq!(records[1].value(MetricField::NetSubscribers), None);
        assert_eq!(records[1].value(MetricField::Dislikes), None);
        assert_eq!(records[1].value(MetricField::WatchMinutes), Some(320.0));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_metric_csv("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, crate::error::AnalyticsError::DataLoad(_)));
    }
}
