//! # Video Insights
//!
//! Per-video engagement metrics and quadrant classification for a channel's
//! content library. Each video carries its lifetime counters straight from
//! the warehouse dimension table; the derived metrics and the quadrant
//! placement are recomputed on demand so nothing here holds mutable state.
//!
//! ## Usage Example
//!
//! ```
//! use video_insights::quadrant::{classify, Cutoffs, Quadrant};
//! use video_insights::{filter_by_type, sample::sample_videos, LIVESTREAM_TYPES};
//!
//! let videos = filter_by_type(&sample_videos(), &LIVESTREAM_TYPES);
//! let cutoffs = Cutoffs::new(6.0, 4.0).unwrap();
//!
//! let breakdown = classify(&videos, cutoffs);
//! let strong = breakdown.videos(Quadrant::TopRight);
//! println!("{} top performers", strong.len());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use metric_math::safe_ratio;

pub mod quadrant;
pub mod sample;

pub use quadrant::{classify, Cutoffs, CutoffBounds, Quadrant, QuadrantBreakdown, QuadrantProfile};

/// Errors that can occur when working with video insights
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Invalid cutoff: {0}")]
    InvalidCutoff(String),
}

/// Result type for video insight operations
pub type Result<T> = std::result::Result<T, InsightError>;

/// Video types that count as livestreamed services
pub const LIVESTREAM_TYPES: [&str; 2] = ["Livestream", "Luton Livestream"];

/// One video from the channel dimension table, with lifetime counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub speaker: String,
    /// Content format, e.g. "Livestream" or "Short"
    pub video_type: String,
    pub published_at: DateTime<Utc>,
    pub duration_sec: u32,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub watch_minutes: f64,
}

impl VideoRecord {
    /// Minutes watched per view, rounded to one decimal.
    ///
    /// NaN when the video has no views.
    pub fn avg_view_duration_mins(&self) -> f64 {
        round1(safe_ratio(self.watch_minutes, self.views as f64))
    }

    /// Share of the video the average view covers, as a percentage.
    ///
    /// NaN when the video has no views or no length.
    pub fn avg_pct_watched(&self) -> f64 {
        safe_ratio(
            self.watch_minutes * 60.0,
            self.views as f64 * self.duration_sec as f64,
        ) * 100.0
    }

    /// Likes and comments per hundred views, rounded to one decimal.
    ///
    /// NaN when the video has no views.
    pub fn engagement_score(&self) -> f64 {
        round1(safe_ratio((self.likes + self.comments) as f64, self.views as f64) * 100.0)
    }
}

/// Keep only videos whose type is in `types`
pub fn filter_by_type(videos: &[VideoRecord], types: &[&str]) -> Vec<VideoRecord> {
    videos
        .iter()
        .filter(|v| types.contains(&v.video_type.as_str()))
        .cloned()
        .collect()
}

/// Round to one decimal place; NaN passes through
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn video(views: u64, likes: u64, comments: u64, watch_minutes: f64) -> VideoRecord {
        VideoRecord {
            video_id: "vid-1".to_string(),
            title: "Sunday Service".to_string(),
            speaker: "J. Okafor".to_string(),
            video_type: "Livestream".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 5, 11, 10, 0, 0).unwrap(),
            duration_sec: 3600,
            views,
            likes,
            comments,
            watch_minutes,
        }
    }

    #[test]
    fn view_duration_is_minutes_per_view() {
        let v = video(200, 10, 5, 1234.0);
        // 1234 / 200 = 6.17, rounded to one decimal
        assert_eq!(v.avg_view_duration_mins(), 6.2);
    }

    #[test]
    fn pct_watched_uses_video_length() {
        let v = video(100, 0, 0, 3000.0);
        // 3000 min * 60 / (100 views * 3600 sec) = 50%
        assert_eq!(v.avg_pct_watched(), 50.0);
    }

    #[test]
    fn engagement_counts_likes_and_comments_per_hundred_views() {
        let v = video(400, 30, 6, 0.0);
        // (30 + 6) / 400 * 100 = 9.0
        assert_eq!(v.engagement_score(), 9.0);
    }

    #[test]
    fn zero_views_makes_ratios_nan() {
        let v = video(0, 5, 2, 100.0);
        assert!(v.avg_view_duration_mins().is_nan());
        assert!(v.avg_pct_watched().is_nan());
        assert!(v.engagement_score().is_nan());
    }

    #[test]
    fn zero_length_video_has_nan_pct_watched() {
        let mut v = video(50, 0, 0, 10.0);
        v.duration_sec = 0;
        assert!(v.avg_pct_watched().is_nan());
    }

    #[test]
    fn type_filter_keeps_only_listed_types() {
        let mut live = video(10, 0, 0, 5.0);
        live.video_type = "Livestream".to_string();
        let mut luton = video(10, 0, 0, 5.0);
        luton.video_type = "Luton Livestream".to_string();
        let mut short = video(10, 0, 0, 5.0);
        short.video_type = "Short".to_string();

        let kept = filter_by_type(&[live, luton, short], &LIVESTREAM_TYPES);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|v| v.video_type.contains("Livestream")));
    }

    #[test]
    fn rounding_is_to_one_decimal() {
        assert_eq!(round1(6.17), 6.2);
        assert_eq!(round1(6.12), 6.1);
        assert!(round1(f64::NAN).is_nan());
    }
}
