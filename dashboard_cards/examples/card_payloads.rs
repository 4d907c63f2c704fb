//! Builds a full dashboard snapshot from synthetic data and prints the
//! card payloads.
//!
//! Run with: cargo run --example card_payloads

use chrono::NaiveDate;

use channel_forecast::sample::generate_daily_metrics_seeded;
use dashboard_cards::refresh::{build_dashboard, CardState, DashboardConfig};
use video_insights::sample::sample_videos;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Dashboard Card Payloads");
    println!("=======================\n");

    let start = NaiveDate::from_ymd_opt(2025, 1, 6).ok_or("invalid start date")?;
    let records = generate_daily_metrics_seeded(start, 280, "YOUTUBE", 600.0, 7);
    let as_of = records.last().map(|r| r.date).ok_or("empty history")?;

    let config = DashboardConfig::new(as_of);
    let snapshot = build_dashboard(&records, &sample_videos(), &config);

    println!("KPI cards (as of {}):", snapshot.generated_for);
    for card in &snapshot.kpi_cards {
        match card {
            CardState::Ready(kpi) => println!(
                "  {:<26} {:>12}   {}",
                kpi.title, kpi.total, kpi.deviation_summary
            ),
            CardState::Unavailable { reason } => println!("  unavailable: {}", reason),
        }
    }

    match &snapshot.growth {
        CardState::Ready(growth) => {
            println!("\nSubscriber growth: {} current", growth.current_total);
            println!("  vs targets: {}", growth.summary);
            if let Some(boundary) = growth.figure.forecast_boundary {
                println!("  projection starts {}", boundary);
            }
        }
        CardState::Unavailable { reason } => println!("\nGrowth card unavailable: {}", reason),
    }

    println!("\nQuadrant counts (cutoffs {:.1} min / {:.1}%):",
        snapshot.quadrants.cutoffs.duration_mins,
        snapshot.quadrants.cutoffs.engagement_pct
    );
    for (quadrant, count) in &snapshot.quadrants.counts {
        println!("  {:?}: {}", quadrant, count);
    }

    let payload = serde_json::to_string(&snapshot)?;
    println!("\nSerialized payload: {} bytes", payload.len());

    Ok(())
}
