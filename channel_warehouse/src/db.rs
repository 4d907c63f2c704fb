//! Warehouse queries and row conversion.
//!
//! The upstream ingestion job writes every column as nullable, so rows land
//! here as bundles of `Option` columns and conversion decides which ones a
//! usable record cannot do without.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use channel_forecast::{MetricField, MetricRecord};
use video_insights::VideoRecord;

use crate::{Result, WarehouseError};

/// Opens a connection pool against the warehouse.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Raw nullable columns of one `pl.pl_fct_channel_metrics_daily` row.
#[derive(Debug, Clone, Default)]
pub struct MetricRow {
    pub metric_date: Option<NaiveDate>,
    pub platform: Option<String>,
    pub net_subscribers: Option<i64>,
    pub views_count: Option<i64>,
    pub likes_count: Option<i64>,
    pub dislikes_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub shares_count: Option<i64>,
    pub estimated_watch_minutes: Option<f64>,
}

impl MetricRow {
    /// Converts the row into a [`MetricRecord`].
    ///
    /// The date and platform are required; a null in either makes the row
    /// malformed. Metric columns are carried over when present and left
    /// absent when null, so sparse days stay sparse.
    pub fn into_record(self) -> Result<MetricRecord> {
        let date = required(self.metric_date, "metrics", "metric_date")?;
        let platform = required(self.platform, "metrics", "platform")?;

        let mut values = BTreeMap::new();
        let counts = [
            (MetricField::NetSubscribers, self.net_subscribers),
            (MetricField::Views, self.views_count),
            (MetricField::Likes, self.likes_count),
            (MetricField::Dislikes, self.dislikes_count),
            (MetricField::Comments, self.comments_count),
            (MetricField::Shares, self.shares_count),
        ];
        for (field, count) in counts {
            if let Some(count) = count {
                values.insert(field, count as f64);
            }
        }
        if let Some(minutes) = self.estimated_watch_minutes {
            values.insert(MetricField::WatchMinutes, minutes);
        }

        Ok(MetricRecord::new(date, platform, values))
    }
}

/// Raw nullable columns of one `pl.pl_dim_video` row.
#[derive(Debug, Clone, Default)]
pub struct VideoRow {
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub video_speaker: Option<String>,
    pub video_type: Option<String>,
    pub video_published_at: Option<NaiveDateTime>,
    pub video_duration_sec: Option<i64>,
    pub video_views: Option<i64>,
    pub video_likes: Option<i64>,
    pub video_comments: Option<i64>,
    pub video_estimated_minutes_watched: Option<f64>,
}

impl VideoRow {
    /// Converts the row into a [`VideoRecord`].
    ///
    /// Every column except the watch minutes is required. A video that has
    /// never been watched stores null minutes; that becomes NaN so the
    /// video still plots as missing data rather than as a zero.
    pub fn into_record(self) -> Result<VideoRecord> {
        let video_id = required(self.video_id, "video", "video_id")?;
        let title = required(self.video_title, "video", "video_title")?;
        let speaker = required(self.video_speaker, "video", "video_speaker")?;
        let video_type = required(self.video_type, "video", "video_type")?;
        let published = required(self.video_published_at, "video", "video_published_at")?;
        let duration = required(self.video_duration_sec, "video", "video_duration_sec")?;
        let views = required(self.video_views, "video", "video_views")?;
        let likes = required(self.video_likes, "video", "video_likes")?;
        let comments = required(self.video_comments, "video", "video_comments")?;

        Ok(VideoRecord {
            video_id,
            title,
            speaker,
            video_type,
            published_at: published.and_utc(),
            duration_sec: duration_seconds(duration)?,
            views: counter(views, "video_views")?,
            likes: counter(likes, "video_likes")?,
            comments: counter(comments, "video_comments")?,
            watch_minutes: self.video_estimated_minutes_watched.unwrap_or(f64::NAN),
        })
    }
}

fn required<T>(value: Option<T>, table: &str, column: &str) -> Result<T> {
    value.ok_or_else(|| WarehouseError::MalformedRow(format!("{table} row missing {column}")))
}

fn counter(value: i64, column: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| WarehouseError::MalformedRow(format!("video row has negative {column}")))
}

fn duration_seconds(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        WarehouseError::MalformedRow("video row has out-of-range video_duration_sec".to_string())
    })
}

/// Fetches daily channel metrics up to and including a reporting date.
///
/// # Arguments
///
/// * `pool` - Warehouse connection pool
/// * `as_of` - Latest metric date to include
///
/// # Returns
///
/// One [`MetricRecord`] per platform per day, sorted by date then platform.
pub async fn fetch_daily_metrics(pool: &PgPool, as_of: NaiveDate) -> Result<Vec<MetricRecord>> {
    let rows = sqlx::query(
        r#"
        select
            metric_date
            , platform
            , (subscribers_gained - subscribers_lost) as net_subscribers
            , views_count
            , likes_count
            , dislikes_count
            , comments_count
            , shares_count
            , estimated_watch_minutes
        from pl.pl_fct_channel_metrics_daily
        where metric_date <= $1
        "#,
    )
    .bind(as_of)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let raw = MetricRow {
            metric_date: row.try_get("metric_date")?,
            platform: row.try_get("platform")?,
            net_subscribers: row.try_get("net_subscribers")?,
            views_count: row.try_get("views_count")?,
            likes_count: row.try_get("likes_count")?,
            dislikes_count: row.try_get("dislikes_count")?,
            comments_count: row.try_get("comments_count")?,
            shares_count: row.try_get("shares_count")?,
            estimated_watch_minutes: row.try_get("estimated_watch_minutes")?,
        };
        records.push(raw.into_record()?);
    }

    records.sort_by(|a, b| (a.date, a.platform.as_str()).cmp(&(b.date, b.platform.as_str())));
    debug!("Fetched {} daily metric rows up to {}", records.len(), as_of);
    Ok(records)
}

/// Fetches the video dimension for the given content formats.
///
/// # Arguments
///
/// * `pool` - Warehouse connection pool
/// * `video_types` - Content formats to include, e.g. the livestream types
///
/// # Returns
///
/// One [`VideoRecord`] per video, sorted by publish time then id.
pub async fn fetch_videos(pool: &PgPool, video_types: &[String]) -> Result<Vec<VideoRecord>> {
    let types: Vec<String> = video_types.to_vec();
    let rows = sqlx::query(
        r#"
        select
            video_id
            , video_title
            , video_speaker
            , video_type
            , video_published_at
            , video_duration_sec
            , video_views
            , video_likes
            , video_comments
            , video_estimated_minutes_watched
        from pl.pl_dim_video
        where video_type = any($1)
        "#,
    )
    .bind(types)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let raw = VideoRow {
            video_id: row.try_get("video_id")?,
            video_title: row.try_get("video_title")?,
            video_speaker: row.try_get("video_speaker")?,
            video_type: row.try_get("video_type")?,
            video_published_at: row.try_get("video_published_at")?,
            video_duration_sec: row.try_get("video_duration_sec")?,
            video_views: row.try_get("video_views")?,
            video_likes: row.try_get("video_likes")?,
            video_comments: row.try_get("video_comments")?,
            video_estimated_minutes_watched: row.try_get("video_estimated_minutes_watched")?,
        };
        records.push(raw.into_record()?);
    }

    records.sort_by(|a, b| {
        (a.published_at, a.video_id.as_str()).cmp(&(b.published_at, b.video_id.as_str()))
    });
    debug!(
        "Fetched {} video rows across {} video types",
        records.len(),
        video_types.len()
    );
    Ok(records)
}
