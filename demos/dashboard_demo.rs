//! End-to-end tour of the analytics pipeline on synthetic data.
//!
//! Run with: cargo run --example dashboard_demo

use chrono::NaiveDate;

use channel_pulse::forecast::sample::generate_daily_metrics_seeded;
use channel_pulse::forecast::{
    aggregate, estimate_trend, project_growth, Granularity, MetricField, SeasonalTrend,
    DEFAULT_TREND_WINDOW,
};
use channel_pulse::insights::sample::sample_videos;
use channel_pulse::insights::{classify, filter_by_type, Cutoffs, LIVESTREAM_TYPES};
use channel_pulse::{build_dashboard, DashboardConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Channel Pulse Pipeline");
    println!("======================\n");

    let start = NaiveDate::from_ymd_opt(2025, 1, 6).ok_or("invalid start date")?;
    let records = generate_daily_metrics_seeded(start, 280, "YOUTUBE", 600.0, 7);
    let as_of = records.last().map(|r| r.date).ok_or("empty history")?;

    println!("=== Weekly Aggregation ===");
    let weekly = aggregate(&records, Granularity::Week, &[MetricField::Views])?;
    println!(
        "{} daily records roll up into {} weeks",
        records.len(),
        weekly.len()
    );
    if let Some(last) = weekly.last() {
        println!(
            "latest week {}: {:.0} views",
            last.period_start,
            last.total(MetricField::Views).unwrap_or(0.0)
        );
    }

    println!("\n=== Views Trend ===");
    let trend = estimate_trend(&weekly, &[MetricField::Views], DEFAULT_TREND_WINDOW)?;
    println!(
        "week of {}: actual {:.0} vs predicted {:.0} ({} vs forecast)",
        trend.comparison_period,
        trend.comparison_actual,
        trend.comparison_predicted,
        trend.deviation()
    );

    println!("\n=== Subscriber Growth ===");
    let weekly_subs = aggregate(&records, Granularity::Week, &[MetricField::NetSubscribers])?;
    let horizon = NaiveDate::from_ymd_opt(2026, 11, 1).ok_or("invalid horizon")?;
    let series = project_growth(
        &weekly_subs,
        MetricField::NetSubscribers,
        horizon,
        &SeasonalTrend::weekly(),
    )?;
    println!("observed so far: {:.0}", series.total_actual());
    if let Some(projected) = series.predicted_total_by(horizon) {
        println!("projected by {}: {:.0}", horizon, projected);
    }

    println!("\n=== Video Quadrants ===");
    let videos = sample_videos();
    let streams = filter_by_type(&videos, &LIVESTREAM_TYPES);
    let cutoffs = Cutoffs::default_for(&streams);
    let breakdown = classify(&streams, cutoffs);
    println!(
        "cutoffs {:.1} min / {:.1}%, {} of {} classified",
        cutoffs.duration_mins,
        cutoffs.engagement_pct,
        breakdown.classified(),
        streams.len()
    );
    for (quadrant, count) in breakdown.counts() {
        println!("  {:?}: {}", quadrant, count);
    }

    println!("\n=== Dashboard Snapshot ===");
    let snapshot = build_dashboard(&records, &videos, &DashboardConfig::new(as_of));
    let ready = snapshot
        .kpi_cards
        .iter()
        .filter(|card| card.is_ready())
        .count();
    println!(
        "{} of {} KPI cards ready, growth card {}",
        ready,
        snapshot.kpi_cards.len(),
        if snapshot.growth.is_ready() {
            "ready"
        } else {
            "unavailable"
        }
    );
    println!(
        "snapshot: {} bytes of JSON",
        serde_json::to_string(&snapshot)?.len()
    );

    Ok(())
}
