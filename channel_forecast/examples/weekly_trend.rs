use chrono::NaiveDate;

use channel_forecast::sample::generate_daily_metrics;
use channel_forecast::{aggregate, estimate_trend, Granularity, MetricField, DEFAULT_TREND_WINDOW};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Channel Forecast: Weekly Trend Example");
    println!("======================================\n");

    // Half a year of synthetic daily metrics
    let start = NaiveDate::from_ymd_opt(2025, 1, 6).ok_or("bad start date")?;
    let records = generate_daily_metrics(start, 180, "YOUTUBE", 420.0);
    println!("Generated {} daily records\n", records.len());

    // Roll them up into Monday-start weeks
    let weekly = aggregate(&records, Granularity::Week, &[MetricField::Views])?;
    println!("{} weekly buckets:", weekly.len());
    for point in weekly.iter().rev().take(4).rev() {
        println!(
            "  WC {}: {:>8.0} views",
            point.period_start.format("%d %b %Y"),
            point.total(MetricField::Views).unwrap_or_default()
        );
    }

    // Fit the trend window and compare the newest complete week against it
    let trend = estimate_trend(&weekly, &[MetricField::Views], DEFAULT_TREND_WINDOW)?;
    println!("\nTrend comparison for WC {}:", trend.comparison_period.format("%d %b %Y"));
    println!("  observed:  {:.0}", trend.comparison_actual);
    println!("  projected: {:.0}", trend.comparison_predicted);
    println!("  deviation: {} vs forecast", trend.deviation());

    Ok(())
}
