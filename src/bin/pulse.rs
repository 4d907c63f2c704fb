use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use channel_pulse::forecast::sample::generate_daily_metrics_seeded;
use channel_pulse::insights::sample::sample_videos;
use channel_pulse::insights::Cutoffs;
use channel_pulse::{build_dashboard, warehouse, DashboardConfig, DashboardSnapshot, Quadrant};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Channel analytics dashboard refresher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the dashboard snapshot from the warehouse
    Refresh {
        /// Reference date bounding the metrics; defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Write the snapshot JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fixed view-duration cutoff in minutes instead of the derived one
        #[arg(long, requires = "engagement_cutoff")]
        duration_cutoff: Option<f64>,
        /// Fixed engagement cutoff in percent instead of the derived one
        #[arg(long, requires = "duration_cutoff")]
        engagement_cutoff: Option<f64>,
        /// Highlight one quadrant in the scatter scene
        #[arg(long, value_enum)]
        select: Option<QuadrantArg>,
    },
    /// Build the snapshot from generated sample data, no database needed
    Demo {
        /// Days of synthetic history to generate
        #[arg(long, default_value_t = 280)]
        days: usize,
        /// Write the snapshot JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum QuadrantArg {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl From<QuadrantArg> for Quadrant {
    fn from(arg: QuadrantArg) -> Self {
        match arg {
            QuadrantArg::TopRight => Quadrant::TopRight,
            QuadrantArg::TopLeft => Quadrant::TopLeft,
            QuadrantArg::BottomLeft => Quadrant::BottomLeft,
            QuadrantArg::BottomRight => Quadrant::BottomRight,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "channel_pulse=info,dashboard_cards=info,channel_warehouse=info".into()
            }),
        )
        .init();

    match cli.command {
        Commands::Refresh {
            as_of,
            out,
            duration_cutoff,
            engagement_cutoff,
            select,
        } => {
            let database_url = std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set to the analytics warehouse")?;
            let pool = warehouse::connect(&database_url)
                .await
                .context("failed to connect to Postgres")?;

            let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
            let mut config = DashboardConfig::new(as_of);
            config.cutoffs = fixed_cutoffs(duration_cutoff, engagement_cutoff)?;
            config.selected_quadrant = select.map(Quadrant::from);

            let metrics = warehouse::fetch_daily_metrics(&pool, as_of).await?;
            let videos = warehouse::fetch_videos(&pool, &config.video_types).await?;
            info!(
                "Loaded {} metric records and {} videos as of {}",
                metrics.len(),
                videos.len(),
                as_of
            );

            let snapshot = build_dashboard(&metrics, &videos, &config);
            emit(&snapshot, out.as_deref())?;
        }
        Commands::Demo { days, out } => {
            let start = NaiveDate::from_ymd_opt(2025, 1, 6).context("invalid demo start date")?;
            let metrics = generate_daily_metrics_seeded(start, days, "YOUTUBE", 600.0, 7);
            let as_of = metrics
                .last()
                .map(|record| record.date)
                .context("demo requires at least one day of history")?;
            let config = DashboardConfig::new(as_of);

            let snapshot = build_dashboard(&metrics, &sample_videos(), &config);
            emit(&snapshot, out.as_deref())?;
        }
    }

    Ok(())
}

fn fixed_cutoffs(
    duration: Option<f64>,
    engagement: Option<f64>,
) -> anyhow::Result<Option<Cutoffs>> {
    match (duration, engagement) {
        (Some(duration), Some(engagement)) => Ok(Some(Cutoffs::new(duration, engagement)?)),
        _ => Ok(None),
    }
}

fn emit(snapshot: &DashboardSnapshot, out: Option<&Path>) -> anyhow::Result<()> {
    let payload = serde_json::to_string_pretty(snapshot)?;
    match out {
        Some(path) => {
            std::fs::write(path, payload)?;
            println!("Snapshot written to {}.", path.display());
        }
        None => println!("{payload}"),
    }
    Ok(())
}
