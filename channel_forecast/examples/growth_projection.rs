use chrono::{Duration, NaiveDate};

use channel_forecast::sample::generate_daily_metrics;
use channel_forecast::{
    aggregate, project_growth, GrowthModel, Granularity, LinearGrowth, MetricField, SeasonalTrend,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Channel Forecast: Growth Projection Example");
    println!("===========================================\n");

    let start = NaiveDate::from_ymd_opt(2024, 9, 2).ok_or("bad start date")?;
    let records = generate_daily_metrics(start, 280, "YOUTUBE", 380.0);
    let weekly = aggregate(&records, Granularity::Week, &[MetricField::NetSubscribers])?;
    println!("Fitted over {} observed weeks\n", weekly.len());

    let last_observed = weekly
        .last()
        .map(|p| p.period_start)
        .ok_or("no weekly data")?;
    let horizon = last_observed + Duration::days(7 * 26);

    // Default seasonal model
    let seasonal = SeasonalTrend::weekly();
    let series = project_growth(&weekly, MetricField::NetSubscribers, horizon, &seasonal)?;

    println!("Model: {}", seasonal.name());
    println!("Current subscribers gained: {:.0}", series.total_actual());
    if let Some(boundary) = series.forecast_boundary() {
        println!("Forecast begins WC {}", boundary.format("%d %b %Y"));
    }
    if let Some(total) = series.predicted_total_by(horizon) {
        println!("Projected total by {}: {:.0}", horizon.format("%d %b %Y"), total);
    }
    if let Some(accuracy) = series.fit_accuracy() {
        println!(
            "In-sample fit: mae {:.1}, rmse {:.1}, mape {:.1}%",
            accuracy.mae, accuracy.rmse, accuracy.mape
        );
    }

    // Baseline comparison with the plain line model
    let plain = project_growth(&weekly, MetricField::NetSubscribers, horizon, &LinearGrowth::new())?;
    if let (Some(seasonal_total), Some(plain_total)) = (
        series.predicted_total_by(horizon),
        plain.predicted_total_by(horizon),
    ) {
        println!(
            "\nSeasonal vs plain-line horizon total: {:.0} vs {:.0}",
            seasonal_total, plain_total
        );
    }

    Ok(())
}
