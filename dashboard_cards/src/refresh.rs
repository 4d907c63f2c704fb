//! Dashboard refresh
//!
//! One refresh recomputes every card from scratch: aggregate, fit, compare,
//! classify. Cards are isolated from each other, so a series too short for
//! one metric leaves that card unavailable while the rest render normally.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use channel_forecast::{MetricField, MetricRecord, DEFAULT_TREND_WINDOW};
use video_insights::{filter_by_type, Cutoffs, Quadrant, VideoRecord, LIVESTREAM_TYPES};

use crate::growth::{build_growth_card, GrowthCard, GrowthTargets};
use crate::kpi::{build_kpi_card, KpiCard};
use crate::scene::{build_quadrant_scene, QuadrantScene};

/// Default number of complete months on a KPI sparkline
pub const DEFAULT_SPARKLINE_MONTHS: usize = 12;

/// A card that either computed cleanly or explains why it could not
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardState<T> {
    Ready(T),
    Unavailable { reason: String },
}

impl<T> CardState<T> {
    /// Collapse a card computation into its renderable state
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(card) => CardState::Ready(card),
            Err(error) => CardState::Unavailable {
                reason: error.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CardState::Ready(_))
    }

    pub fn card(&self) -> Option<&T> {
        match self {
            CardState::Ready(card) => Some(card),
            CardState::Unavailable { .. } => None,
        }
    }
}

/// Title and metric selection for one KPI card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCardConfig {
    pub title: String,
    pub fields: Vec<MetricField>,
}

impl KpiCardConfig {
    pub fn new(title: &str, fields: Vec<MetricField>) -> Self {
        Self {
            title: title.to_string(),
            fields,
        }
    }
}

/// Everything one dashboard refresh needs beyond the warehouse rows.
///
/// There is no `Default`: the reference date is always injected so a
/// refresh is reproducible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    /// Reference date bounding the metric records considered
    pub as_of: NaiveDate,
    pub kpi_cards: Vec<KpiCardConfig>,
    pub sparkline_months: usize,
    pub trend_window: usize,
    pub growth_targets: GrowthTargets,
    /// Last period the subscriber projection extends to
    pub growth_horizon: NaiveDate,
    /// First period shown on the growth figure
    pub growth_figure_start: NaiveDate,
    /// Content types plotted on the quadrant scene
    pub video_types: Vec<String>,
    /// Explicit quadrant cutoffs; `None` derives them from the data
    pub cutoffs: Option<Cutoffs>,
    pub selected_quadrant: Option<Quadrant>,
}

impl DashboardConfig {
    /// The standard card set: one card per daily metric plus the
    /// watch-minutes-per-view ratio card.
    pub fn new(as_of: NaiveDate) -> Self {
        let kpi_cards = vec![
            KpiCardConfig::new("Subscribers", vec![MetricField::NetSubscribers]),
            KpiCardConfig::new("Comments", vec![MetricField::Comments]),
            KpiCardConfig::new("Views", vec![MetricField::Views]),
            KpiCardConfig::new("Shares", vec![MetricField::Shares]),
            KpiCardConfig::new("Likes", vec![MetricField::Likes]),
            KpiCardConfig::new("Dislikes", vec![MetricField::Dislikes]),
            KpiCardConfig::new("Watch Time (min)", vec![MetricField::WatchMinutes]),
            KpiCardConfig::new(
                "Avg. View Duration (min)",
                vec![MetricField::WatchMinutes, MetricField::Views],
            ),
        ];

        Self {
            as_of,
            kpi_cards,
            sparkline_months: DEFAULT_SPARKLINE_MONTHS,
            trend_window: DEFAULT_TREND_WINDOW,
            growth_targets: GrowthTargets::default(),
            growth_horizon: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap_or_default(),
            growth_figure_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            video_types: LIVESTREAM_TYPES.iter().map(|t| t.to_string()).collect(),
            cutoffs: None,
            selected_quadrant: None,
        }
    }
}

/// One complete dashboard render payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_for: NaiveDate,
    pub kpi_cards: Vec<CardState<KpiCard>>,
    pub growth: CardState<GrowthCard>,
    pub quadrants: QuadrantScene,
}

/// Recompute every card from the warehouse rows.
///
/// Records dated after `config.as_of` are excluded up front; the open
/// current periods are then handled by each card's own trimming rules.
pub fn build_dashboard(
    metrics: &[MetricRecord],
    videos: &[VideoRecord],
    config: &DashboardConfig,
) -> DashboardSnapshot {
    let bounded: Vec<MetricRecord> = metrics
        .iter()
        .filter(|record| record.date <= config.as_of)
        .cloned()
        .collect();
    debug!(
        "Refreshing dashboard with {} records as of {}",
        bounded.len(),
        config.as_of
    );

    let kpi_cards: Vec<CardState<KpiCard>> = config
        .kpi_cards
        .iter()
        .map(|card| {
            let state = CardState::from_result(build_kpi_card(
                &bounded,
                &card.title,
                &card.fields,
                config.sparkline_months,
                config.trend_window,
            ));
            if let CardState::Unavailable { reason } = &state {
                warn!("KPI card '{}' unavailable: {}", card.title, reason);
            }
            state
        })
        .collect();

    let growth = CardState::from_result(build_growth_card(
        &bounded,
        &config.growth_targets,
        config.growth_horizon,
        config.growth_figure_start,
    ));
    if let CardState::Unavailable { reason } = &growth {
        warn!("Growth card unavailable: {}", reason);
    }

    let types: Vec<&str> = config.video_types.iter().map(String::as_str).collect();
    let plotted = filter_by_type(videos, &types);
    let quadrants = build_quadrant_scene(&plotted, config.cutoffs, config.selected_quadrant);
    let classified: usize = quadrants.counts.values().sum();
    debug!(
        "Quadrant scene built from {} videos, {} classified",
        plotted.len(),
        classified
    );

    DashboardSnapshot {
        generated_for: config.as_of,
        kpi_cards,
        growth,
        quadrants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use channel_forecast::sample::generate_daily_metrics_seeded;
    use pretty_assertions::assert_eq;
    use video_insights::sample::sample_videos;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn full_history() -> Vec<MetricRecord> {
        // 40 weeks of synthetic dailies, enough for every card
        generate_daily_metrics_seeded(start(), 280, "YOUTUBE", 600.0, 11)
    }

    #[test]
    fn every_card_renders_with_enough_history() {
        let records = full_history();
        let as_of = records.last().map(|r| r.date).unwrap_or_default();
        let config = DashboardConfig::new(as_of);

        let snapshot = build_dashboard(&records, &sample_videos(), &config);

        assert_eq!(snapshot.generated_for, as_of);
        assert_eq!(snapshot.kpi_cards.len(), 8);
        assert!(snapshot.kpi_cards.iter().all(CardState::is_ready));
        assert!(snapshot.growth.is_ready());
        assert!(!snapshot.quadrants.points.is_empty());
    }

    #[test]
    fn short_history_leaves_cards_unavailable_but_isolated() {
        // Two weeks of data cannot feed a 12-week trend window.
        let records = generate_daily_metrics_seeded(start(), 14, "YOUTUBE", 600.0, 11);
        let as_of = records.last().map(|r| r.date).unwrap_or_default();
        let config = DashboardConfig::new(as_of);

        let snapshot = build_dashboard(&records, &sample_videos(), &config);

        assert!(snapshot.kpi_cards.iter().all(|card| !card.is_ready()));
        for card in &snapshot.kpi_cards {
            match card {
                CardState::Unavailable { reason } => {
                    assert!(reason.contains("Insufficient data"), "reason: {}", reason)
                }
                CardState::Ready(_) => unreachable!("asserted not ready"),
            }
        }
        // The growth model needs only two weekly points, and the quadrant
        // scene never depends on the metric history.
        assert!(snapshot.growth.is_ready());
        assert!(!snapshot.quadrants.points.is_empty());
    }

    #[test]
    fn records_after_as_of_are_ignored() {
        // No videos here: the unwatched sample video carries NaN
        // coordinates, which never compare equal.
        let records = full_history();
        let cutoff = start() + chrono::Duration::days(209); // 30 weeks in
        let config = DashboardConfig::new(cutoff);

        let snapshot = build_dashboard(&records, &[], &config);
        let trimmed_snapshot = build_dashboard(
            &records
                .iter()
                .filter(|r| r.date <= cutoff)
                .cloned()
                .collect::<Vec<_>>(),
            &[],
            &config,
        );

        assert_eq!(snapshot, trimmed_snapshot);
    }

    #[test]
    fn scene_only_plots_configured_video_types() {
        let records = full_history();
        let as_of = records.last().map(|r| r.date).unwrap_or_default();
        let config = DashboardConfig::new(as_of);

        let snapshot = build_dashboard(&records, &sample_videos(), &config);

        let stream_count = sample_videos()
            .iter()
            .filter(|v| LIVESTREAM_TYPES.contains(&v.video_type.as_str()))
            .count();
        assert_eq!(snapshot.quadrants.points.len(), stream_count);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let records = full_history();
        let as_of = records.last().map(|r| r.date).unwrap_or_default();
        let config = DashboardConfig::new(as_of);

        let snapshot = build_dashboard(&records, &sample_videos(), &config);
        let payload = serde_json::to_string(&snapshot).unwrap();

        assert!(payload.contains("\"generated_for\""));
        assert!(payload.contains("\"state\":\"ready\""));
    }
}
