//! Subscriber growth card
//!
//! Projects weekly net subscriber change out to a horizon date and compares
//! the predicted cumulative totals against configured milestone targets.
//! The figure payload carries the actual cumulative line, the predicted
//! segment covering only the future periods, and the boundary between them.

use chrono::{Duration, NaiveDate};

use channel_forecast::{
    aggregate, project_growth, ForecastSeries, Granularity, MetricField, MetricRecord,
    SeasonalTrend,
};
use metric_math::Deviation;
use serde::Serialize;

use crate::figure::{Annotation, HorizontalAnchor, SparkPoint, VerticalAnchor};
use crate::format::month_label;
use crate::Result;

/// Offset, in rows from the end, where the trailing annotation is anchored
/// so it stays inside the plot area
const TRAILING_ANNOTATION_ROWS: usize = 7;

/// A subscriber total the channel aims to reach by a date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
    pub target_date: NaiveDate,
    pub target_total: f64,
}

impl Milestone {
    pub fn new(target_date: NaiveDate, target_total: f64) -> Self {
        Self {
            target_date,
            target_total,
        }
    }
}

/// Milestone set the growth card reports against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthTargets {
    pub milestones: Vec<Milestone>,
}

impl GrowthTargets {
    pub fn new(milestones: Vec<Milestone>) -> Self {
        Self { milestones }
    }
}

impl Default for GrowthTargets {
    /// The channel's standing goals: 1,500 subscribers by May 2026 and
    /// 2,000 by November 2026
    fn default() -> Self {
        Self::new(vec![
            Milestone::new(date(2026, 5, 3), 1500.0),
            Milestone::new(date(2026, 11, 1), 2000.0),
        ])
    }
}

/// Predicted cumulative total measured against one milestone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetDeviation {
    pub milestone: Milestone,
    /// Predicted-vs-target deviation; undetermined when the projection does
    /// not reach the milestone date
    pub deviation: Deviation,
}

/// Figure shape for the growth chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthFigure {
    /// Cumulative actual line over the historical periods
    pub actual: Vec<SparkPoint>,
    /// Cumulative predicted line over the future periods only
    pub predicted_tail: Vec<SparkPoint>,
    /// Period where the projection takes over from observations
    pub forecast_boundary: Option<NaiveDate>,
    /// Value labels for the start of the line and the projected end
    pub annotations: Vec<Annotation>,
}

/// Payload for the subscriber growth card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthCard {
    /// Sum of observed net subscriber change, rounded to whole subscribers
    pub current_total: i64,
    pub target_deviations: Vec<TargetDeviation>,
    /// Deviation summaries joined for the card's sub-line, e.g. "13% -4%"
    pub summary: String,
    pub figure: GrowthFigure,
}

/// Build the growth card from raw daily metric records.
///
/// `figure_start` trims the chart to recent history without affecting the
/// model fit or the totals, which always use the full series.
pub fn build_growth_card(
    records: &[MetricRecord],
    targets: &GrowthTargets,
    horizon_end: NaiveDate,
    figure_start: NaiveDate,
) -> Result<GrowthCard> {
    let weekly = aggregate(records, Granularity::Week, &[MetricField::NetSubscribers])?;
    let series = project_growth(
        &weekly,
        MetricField::NetSubscribers,
        horizon_end,
        &SeasonalTrend::weekly(),
    )?;

    let current_total = series.total_actual().round() as i64;

    // A milestone is only measurable while the projection's weekly grid
    // still covers its date; past the last projected week there is no
    // prediction to compare against.
    let covered_until = series
        .rows()
        .last()
        .map(|row| row.period_start + Duration::days(7));

    let target_deviations: Vec<TargetDeviation> = targets
        .milestones
        .iter()
        .map(|&milestone| {
            let reachable = covered_until
                .map(|end| milestone.target_date < end)
                .unwrap_or(false);
            let deviation = match series.predicted_total_by(milestone.target_date) {
                Some(predicted) if reachable => {
                    Deviation::compute(milestone.target_total, predicted)
                }
                _ => Deviation::Undetermined,
            };
            TargetDeviation {
                milestone,
                deviation,
            }
        })
        .collect();

    let summary = target_deviations
        .iter()
        .map(|target| target.deviation.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let figure = growth_figure(&series, figure_start);

    Ok(GrowthCard {
        current_total,
        target_deviations,
        summary,
        figure,
    })
}

fn growth_figure(series: &ForecastSeries, figure_start: NaiveDate) -> GrowthFigure {
    let visible: Vec<_> = series
        .rows()
        .iter()
        .filter(|row| row.period_start >= figure_start)
        .collect();

    let actual: Vec<SparkPoint> = visible
        .iter()
        .filter_map(|row| {
            row.cumulative_actual
                .map(|total| SparkPoint::new(row.period_start, total))
        })
        .collect();

    let predicted_tail: Vec<SparkPoint> = visible
        .iter()
        .filter(|row| row.actual.is_none())
        .map(|row| SparkPoint::new(row.period_start, row.cumulative_predicted))
        .collect();

    let forecast_boundary = visible
        .iter()
        .find(|row| row.actual.is_none())
        .map(|row| row.period_start);

    let mut annotations = Vec::new();
    if let Some(first) = actual.first() {
        annotations.push(Annotation {
            x: first.period_start,
            y: first.value,
            text: format!(
                "{} ({})",
                first.value.round() as i64,
                month_label(first.period_start)
            ),
            xanchor: HorizontalAnchor::Left,
            yanchor: VerticalAnchor::Top,
        });
    }
    if let Some(last) = visible.last() {
        let anchor_index = visible.len().saturating_sub(TRAILING_ANNOTATION_ROWS);
        annotations.push(Annotation {
            x: visible[anchor_index].period_start,
            y: last.cumulative_predicted,
            text: format!(
                "{} ({})",
                last.cumulative_predicted.round() as i64,
                month_label(last.period_start)
            ),
            xanchor: HorizontalAnchor::Right,
            yanchor: VerticalAnchor::Bottom,
        });
    }

    GrowthFigure {
        actual,
        predicted_tail,
        forecast_boundary,
        annotations,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Fixed calendar constants, valid by construction
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn monday(week: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + Duration::weeks(week)
    }

    /// Constant +10 net subscribers per week, one record per Monday
    fn steady_records(weeks: i64) -> Vec<MetricRecord> {
        (0..weeks)
            .map(|week| {
                let mut fields = BTreeMap::new();
                fields.insert(MetricField::NetSubscribers, 10.0);
                MetricRecord::new(monday(week), "YOUTUBE", fields)
            })
            .collect()
    }

    #[test]
    fn milestones_measure_predicted_against_target() {
        // 20 weeks of +10: trend is flat at 10/week, so the cumulative
        // prediction reaches 280 after 8 future weeks.
        let records = steady_records(20);
        let horizon = monday(27);
        let targets = GrowthTargets::new(vec![
            Milestone::new(horizon, 350.0),
            Milestone::new(monday(40), 500.0), // beyond the horizon
        ]);

        let card = build_growth_card(&records, &targets, horizon, monday(0)).unwrap();

        assert_eq!(card.current_total, 200);
        assert_eq!(
            card.target_deviations[0].deviation,
            Deviation::Percent((280.0 / 350.0 - 1.0) * 100.0)
        );
        assert!(card.target_deviations[1].deviation.is_undetermined());
        assert_eq!(card.summary, "-20% n/a");
    }

    #[test]
    fn figure_splits_actual_and_predicted_at_the_boundary() {
        let records = steady_records(20);
        let horizon = monday(27);
        let card =
            build_growth_card(&records, &GrowthTargets::default(), horizon, monday(4)).unwrap();
        let figure = &card.figure;

        // Visible range starts at week 4: 16 historical rows, 8 future.
        assert_eq!(figure.actual.len(), 16);
        assert_eq!(figure.predicted_tail.len(), 8);
        assert_eq!(figure.forecast_boundary, Some(monday(20)));

        // The actual line keeps the full-series running total.
        assert_eq!(figure.actual[0].value, 50.0);
        assert_eq!(figure.predicted_tail[7].period_start, horizon);
        assert_eq!(figure.predicted_tail[7].value, 280.0);
    }

    #[test]
    fn annotations_label_line_start_and_projected_end() {
        let records = steady_records(20);
        let horizon = monday(27);
        let card =
            build_growth_card(&records, &GrowthTargets::default(), horizon, monday(4)).unwrap();
        let annotations = &card.figure.annotations;

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].x, monday(4));
        assert_eq!(annotations[0].text, "50 (Feb 2025)");

        // 24 visible rows: the trailing label anchors 7 rows from the end.
        assert_eq!(annotations[1].x, monday(21));
        assert_eq!(annotations[1].text, "280 (Jul 2025)");
        assert_eq!(annotations[1].xanchor, HorizontalAnchor::Right);
    }

    #[test]
    fn default_targets_cover_both_standing_goals() {
        let targets = GrowthTargets::default();
        assert_eq!(targets.milestones.len(), 2);
        assert_eq!(targets.milestones[0].target_total, 1500.0);
        assert_eq!(
            targets.milestones[1].target_date,
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
    }

    #[test]
    fn single_week_of_history_is_rejected() {
        let records = steady_records(1);
        let result = build_growth_card(
            &records,
            &GrowthTargets::default(),
            monday(10),
            monday(0),
        );
        assert!(result.is_err());
    }
}
