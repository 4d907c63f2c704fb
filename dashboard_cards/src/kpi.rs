//! KPI metric cards
//!
//! Each card summarizes one warehouse metric (or a two-metric ratio): the
//! all-time total as the headline number, a one-line comparison of the last
//! complete week against its trend projection, and a monthly sparkline of
//! recent complete months.

use chrono::{Duration, NaiveDate};

use channel_forecast::{
    aggregate, estimate_trend, AggregatedPoint, Granularity, MetricField, MetricRecord,
};
use metric_math::{safe_ratio, Deviation};
use serde::Serialize;

use crate::figure::{Annotation, HorizontalAnchor, SparkPoint, VerticalAnchor};
use crate::format::{format_count, format_ratio, week_commencing_label};
use crate::Result;

/// How far the trailing annotation is pulled back so it stays inside the
/// plot area
const TRAILING_ANNOTATION_OFFSET_DAYS: i64 = 25;

/// Monthly mini chart under the headline number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    /// One value per complete month, oldest first
    pub points: Vec<SparkPoint>,
    /// Value labels for the first and last month
    pub annotations: Vec<Annotation>,
    /// Axis caption, e.g. "Last 12 Months"
    pub caption: String,
}

/// Payload for one KPI card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: String,
    /// Formatted all-time total: grouped count, or two-decimal ratio for a
    /// two-field metric
    pub total: String,
    /// e.g. "WC 12 May 2025: -20% vs forecast"
    pub deviation_summary: String,
    pub deviation: Deviation,
    /// Week the deviation compares
    pub comparison_period: NaiveDate,
    pub sparkline: Sparkline,
}

/// Build the card payload for one metric.
///
/// The deviation line compares the last complete week's actual against the
/// trend projection fitted on the `window_size` weeks before it. The
/// headline total covers every record, including the still-open current
/// periods the trend fit excludes.
pub fn build_kpi_card(
    records: &[MetricRecord],
    title: &str,
    fields: &[MetricField],
    months: usize,
    window_size: usize,
) -> Result<KpiCard> {
    let weekly = aggregate(records, Granularity::Week, fields)?;
    let trend = estimate_trend(&weekly, fields, window_size)?;

    let total = match fields {
        [field] => {
            let sum: f64 = weekly.iter().filter_map(|p| p.total(*field)).sum();
            format_count(sum)
        }
        [numerator, denominator] => {
            let top: f64 = weekly.iter().filter_map(|p| p.total(*numerator)).sum();
            let bottom: f64 = weekly.iter().filter_map(|p| p.total(*denominator)).sum();
            format_ratio(safe_ratio(top, bottom))
        }
        _ => {
            // aggregate() has already rejected empty or >2 field requests
            // that cannot produce a scalar headline
            let sum: f64 = fields
                .first()
                .map(|field| weekly.iter().filter_map(|p| p.total(*field)).sum())
                .unwrap_or(f64::NAN);
            format_count(sum)
        }
    };

    let deviation = trend.deviation();
    let deviation_summary = format!(
        "{}: {} vs forecast",
        week_commencing_label(trend.comparison_period),
        deviation
    );

    let monthly = aggregate(records, Granularity::Month, fields)?;
    let sparkline = monthly_sparkline(&monthly, fields, months);

    Ok(KpiCard {
        title: title.to_string(),
        total,
        deviation_summary,
        deviation,
        comparison_period: trend.comparison_period,
        sparkline,
    })
}

/// Last `months` complete months of the series, newest month dropped as
/// still accumulating
fn monthly_sparkline(monthly: &[AggregatedPoint], fields: &[MetricField], months: usize) -> Sparkline {
    let complete = &monthly[..monthly.len().saturating_sub(1)];
    let start = complete.len().saturating_sub(months);
    let recent = &complete[start..];

    let points: Vec<SparkPoint> = recent
        .iter()
        .map(|point| SparkPoint::new(point.period_start, point_value(point, fields)))
        .collect();

    let mut annotations = Vec::new();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        annotations.push(Annotation {
            x: first.period_start,
            y: first.value.round(),
            text: annotation_text(first.value),
            xanchor: HorizontalAnchor::Left,
            yanchor: VerticalAnchor::Top,
        });
        annotations.push(Annotation {
            x: last.period_start - Duration::days(TRAILING_ANNOTATION_OFFSET_DAYS),
            y: last.value.round(),
            text: annotation_text(last.value),
            xanchor: HorizontalAnchor::Left,
            yanchor: VerticalAnchor::Top,
        });
    }

    Sparkline {
        points,
        annotations,
        caption: format!("Last {} Months", months),
    }
}

/// Scalar chart value of one aggregated point: the summed field, or the
/// derived ratio for a two-field request
fn point_value(point: &AggregatedPoint, fields: &[MetricField]) -> f64 {
    if fields.len() == 2 {
        point.derived_ratio.unwrap_or(f64::NAN)
    } else {
        fields
            .first()
            .and_then(|field| point.total(*field))
            .unwrap_or(f64::NAN)
    }
}

fn annotation_text(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value.round() as i64)
    } else {
        "n/a".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn monday(week: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + Duration::weeks(week)
    }

    /// One record per Monday, so weekly aggregates equal the raw values
    fn weekly_views(values: &[f64]) -> Vec<MetricRecord> {
        values
            .iter()
            .enumerate()
            .map(|(week, &views)| {
                let mut fields = BTreeMap::new();
                fields.insert(MetricField::Views, views);
                MetricRecord::new(monday(week as i64), "YOUTUBE", fields)
            })
            .collect()
    }

    #[test]
    fn card_matches_linear_views_series() {
        // 15 weeks climbing by 2: the window trains on weeks 1..=12 and
        // predicts week 13 exactly, so the deviation is 0%.
        let values: Vec<f64> = (0..15).map(|w| 10.0 + 2.0 * w as f64).collect();
        let records = weekly_views(&values);

        let card = build_kpi_card(&records, "Views", &[MetricField::Views], 12, 12).unwrap();

        assert_eq!(card.title, "Views");
        assert_eq!(card.total, "360");
        assert_eq!(card.deviation, Deviation::Percent(0.0));
        assert_eq!(
            card.deviation_summary,
            format!("WC {}: 0% vs forecast", monday(13).format("%d %b %Y"))
        );
        assert_eq!(card.comparison_period, monday(13));
    }

    #[test]
    fn sparkline_drops_the_open_month_and_annotates_both_ends() {
        let values: Vec<f64> = (0..15).map(|w| 10.0 + 2.0 * w as f64).collect();
        let records = weekly_views(&values);

        let card = build_kpi_card(&records, "Views", &[MetricField::Views], 12, 12).unwrap();
        let spark = &card.sparkline;

        // Mondays span Jan..Apr 2025; April is still open and is dropped.
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mar = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(spark.points.len(), 3);
        assert_eq!(spark.points[0].period_start, jan);
        assert_eq!(spark.points[0].value, 52.0); // 10 + 12 + 14 + 16
        assert_eq!(spark.points[2].period_start, mar);
        assert_eq!(spark.points[2].value, 150.0); // 26 + 28 + 30 + 32 + 34

        assert_eq!(spark.annotations.len(), 2);
        assert_eq!(spark.annotations[0].x, jan);
        assert_eq!(spark.annotations[0].text, "52");
        assert_eq!(spark.annotations[1].x, mar - Duration::days(25));
        assert_eq!(spark.annotations[1].text, "150");
        assert_eq!(spark.caption, "Last 12 Months");
    }

    #[test]
    fn two_field_card_formats_the_ratio_of_sums() {
        let records: Vec<MetricRecord> = (0..15)
            .map(|week| {
                let mut fields = BTreeMap::new();
                fields.insert(MetricField::WatchMinutes, 450.0);
                fields.insert(MetricField::Views, 100.0);
                MetricRecord::new(monday(week), "YOUTUBE", fields)
            })
            .collect();

        let card = build_kpi_card(
            &records,
            "Avg. View Duration (min)",
            &[MetricField::WatchMinutes, MetricField::Views],
            12,
            12,
        )
        .unwrap();

        assert_eq!(card.total, "4.50");
        // Constant series: the fitted line reproduces the ratio exactly.
        assert_eq!(card.deviation, Deviation::Percent(0.0));
        assert!(card.deviation_summary.ends_with("0% vs forecast"));
    }

    #[test]
    fn short_history_propagates_insufficient_data() {
        let records = weekly_views(&[10.0, 12.0, 14.0]);
        let result = build_kpi_card(&records, "Views", &[MetricField::Views], 12, 12);
        assert!(result.is_err());
    }
}
