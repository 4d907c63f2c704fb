//! Quadrant classification of videos by retention and engagement
//!
//! Videos are placed on a plane of average view duration (x) against
//! engagement score (y) and split into four quadrants by a pair of cutoff
//! values. The boundary rules are deliberate: the right-hand quadrants own
//! their cutoff edges (`>=`), the left-hand quadrants use strict
//! comparisons, so a video sitting exactly on the engagement cutoff with a
//! short duration belongs to no quadrant at all. NaN metrics (for example a
//! video with zero views) fail every comparison and are likewise left
//! unclassified.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{InsightError, Result, VideoRecord};

/// The four quadrants of the duration/engagement plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

/// Dashboard copy describing one quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuadrantProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

impl Quadrant {
    /// All quadrants in presentation order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopRight,
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Description and recommended action for this quadrant
    pub fn profile(&self) -> QuadrantProfile {
        match self {
            Quadrant::TopRight => QuadrantProfile {
                title: "Top Performers",
                description: "Content that retains viewers and drives strong interaction.",
                action: "Identify what made these successful and replicate the format, \
                         structure and packaging.",
            },
            Quadrant::TopLeft => QuadrantProfile {
                title: "High Interaction",
                description: "Viewers interact actively but don\u{2019}t watch for long.",
                action: "Review pacing, structure, and introductions to improve retention \
                         without reducing engagement.",
            },
            Quadrant::BottomLeft => QuadrantProfile {
                title: "Low Performers",
                description: "Content underperforms on both retention and interaction.",
                action: "Audit title/thumbnail relevance, content clarity, and topic fit; \
                         consider testing new formats.",
            },
            Quadrant::BottomRight => QuadrantProfile {
                title: "Strong Retention",
                description: "Videos hold attention but generate limited interaction.",
                action: "Improve calls to action, thumbnail/title clarity, or prompt \
                         discussion to lift engagement.",
            },
        }
    }

    /// Whether a video at (duration, engagement) falls in this quadrant.
    ///
    /// Any comparison against NaN is false, so NaN coordinates match no
    /// quadrant.
    pub fn matches(&self, duration: f64, engagement: f64, cutoffs: Cutoffs) -> bool {
        let Cutoffs {
            duration_mins: dc,
            engagement_pct: ec,
        } = cutoffs;
        match self {
            Quadrant::TopRight => duration >= dc && engagement >= ec,
            Quadrant::TopLeft => duration < dc && engagement > ec,
            Quadrant::BottomLeft => duration < dc && engagement < ec,
            Quadrant::BottomRight => duration >= dc && engagement < ec,
        }
    }
}

/// Cutoff pair splitting the plane into quadrants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoffs {
    /// Vertical boundary on average view duration, in minutes
    pub duration_mins: f64,
    /// Horizontal boundary on engagement score, in percent
    pub engagement_pct: f64,
}

impl Cutoffs {
    /// Create a validated cutoff pair
    pub fn new(duration_mins: f64, engagement_pct: f64) -> Result<Self> {
        for (name, value) in [
            ("duration cutoff", duration_mins),
            ("engagement cutoff", engagement_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InsightError::InvalidCutoff(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            duration_mins,
            engagement_pct,
        })
    }

    /// Default cutoffs: half of the maximum observed value on each axis,
    /// rounded to the nearest whole number. Zero for an empty library.
    pub fn default_for(videos: &[VideoRecord]) -> Self {
        Self {
            duration_mins: (observed_max(videos, |v| v.avg_view_duration_mins()) / 2.0).round(),
            engagement_pct: (observed_max(videos, |v| v.engagement_score()) / 2.0).round(),
        }
    }
}

/// Upper bounds for cutoff inputs, derived from the observed data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffBounds {
    /// Largest accepted duration cutoff, in minutes
    pub duration_max: f64,
    /// Largest accepted engagement cutoff, in percent
    pub engagement_max: f64,
}

impl CutoffBounds {
    /// Bounds of `[0, rounded max + 1]` on each axis
    pub fn for_videos(videos: &[VideoRecord]) -> Self {
        Self {
            duration_max: observed_max(videos, |v| v.avg_view_duration_mins()).round() + 1.0,
            engagement_max: observed_max(videos, |v| v.engagement_score()).round() + 1.0,
        }
    }
}

/// Largest finite value of `metric` over the library, zero when there is none
fn observed_max(videos: &[VideoRecord], metric: impl Fn(&VideoRecord) -> f64) -> f64 {
    let max = videos.iter().map(metric).fold(f64::NAN, f64::max);
    if max.is_finite() {
        max
    } else {
        0.0
    }
}

/// Videos grouped by the quadrant they fall in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantBreakdown {
    cutoffs: Cutoffs,
    buckets: BTreeMap<Quadrant, Vec<VideoRecord>>,
}

impl QuadrantBreakdown {
    /// Cutoffs the classification was computed with
    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    /// Videos in `quadrant`, in input order
    pub fn videos(&self, quadrant: Quadrant) -> &[VideoRecord] {
        self.buckets
            .get(&quadrant)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of videos per quadrant
    pub fn counts(&self) -> BTreeMap<Quadrant, usize> {
        self.buckets
            .iter()
            .map(|(&quadrant, videos)| (quadrant, videos.len()))
            .collect()
    }

    /// Total number of classified videos
    pub fn classified(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Place each video in its quadrant.
///
/// Videos whose metrics fail every quadrant test (NaN coordinates, or the
/// strict left-hand boundaries) are absent from the result; the caller can
/// compare [`QuadrantBreakdown::classified`] against the input length to
/// find them.
pub fn classify(videos: &[VideoRecord], cutoffs: Cutoffs) -> QuadrantBreakdown {
    let mut buckets: BTreeMap<Quadrant, Vec<VideoRecord>> = BTreeMap::new();
    for quadrant in Quadrant::ALL {
        buckets.insert(quadrant, Vec::new());
    }

    for video in videos {
        let duration = video.avg_view_duration_mins();
        let engagement = video.engagement_score();
        for quadrant in Quadrant::ALL {
            if quadrant.matches(duration, engagement, cutoffs) {
                if let Some(bucket) = buckets.get_mut(&quadrant) {
                    bucket.push(video.clone());
                }
                break;
            }
        }
    }

    QuadrantBreakdown { cutoffs, buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Video whose derived metrics land exactly on (duration, engagement)
    fn video_at(duration_mins: f64, engagement_pct: f64) -> VideoRecord {
        // 1000 views; watch minutes and likes back-solved from the targets
        let views = 1000_u64;
        VideoRecord {
            video_id: format!("vid-{}-{}", duration_mins, engagement_pct),
            title: "Sunday Service".to_string(),
            speaker: "J. Okafor".to_string(),
            video_type: "Livestream".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 5, 11, 10, 0, 0).unwrap(),
            duration_sec: 3600,
            views,
            likes: (engagement_pct * 10.0).round() as u64,
            comments: 0,
            watch_minutes: duration_mins * views as f64,
        }
    }

    fn no_view_video() -> VideoRecord {
        let mut v = video_at(0.0, 0.0);
        v.views = 0;
        v.watch_minutes = 50.0;
        v
    }

    fn cutoffs() -> Cutoffs {
        Cutoffs::new(9.0, 9.0).unwrap()
    }

    #[rstest]
    #[case(9.0, 9.0, Some(Quadrant::TopRight))] // both edges belong to the right
    #[case(12.0, 14.0, Some(Quadrant::TopRight))]
    #[case(3.0, 14.0, Some(Quadrant::TopLeft))]
    #[case(3.0, 3.0, Some(Quadrant::BottomLeft))]
    #[case(12.0, 3.0, Some(Quadrant::BottomRight))]
    #[case(9.0, 3.0, Some(Quadrant::BottomRight))] // duration edge, low engagement
    #[case(3.0, 9.0, None)] // engagement edge on the left: unclassified
    fn boundary_rules(
        #[case] duration: f64,
        #[case] engagement: f64,
        #[case] expected: Option<Quadrant>,
    ) {
        let video = video_at(duration, engagement);
        let breakdown = classify(&[video], cutoffs());

        match expected {
            Some(quadrant) => {
                assert_eq!(breakdown.videos(quadrant).len(), 1);
                assert_eq!(breakdown.classified(), 1);
            }
            None => assert_eq!(breakdown.classified(), 0),
        }
    }

    #[test]
    fn nan_metrics_are_left_unclassified() {
        let breakdown = classify(&[no_view_video()], cutoffs());
        assert_eq!(breakdown.classified(), 0);
    }

    #[test]
    fn every_classified_video_lands_in_exactly_one_quadrant() {
        let videos: Vec<VideoRecord> = [
            (1.0, 2.0),
            (9.0, 9.0),
            (10.0, 2.0),
            (2.0, 12.0),
            (14.5, 11.0),
            (8.9, 9.0),
        ]
        .iter()
        .map(|&(d, e)| video_at(d, e))
        .collect();

        let breakdown = classify(&videos, cutoffs());

        // One video sits on the left engagement edge and stays out
        assert_eq!(breakdown.classified(), videos.len() - 1);
        let counts = breakdown.counts();
        assert_eq!(counts[&Quadrant::TopRight], 2);
        assert_eq!(counts[&Quadrant::TopLeft], 1);
        assert_eq!(counts[&Quadrant::BottomLeft], 1);
        assert_eq!(counts[&Quadrant::BottomRight], 1);
    }

    #[test]
    fn default_cutoffs_are_half_the_observed_max() {
        let videos = vec![video_at(12.0, 7.0), video_at(4.0, 16.0)];
        let defaults = Cutoffs::default_for(&videos);

        assert_eq!(defaults.duration_mins, 6.0);
        assert_eq!(defaults.engagement_pct, 8.0);
    }

    #[test]
    fn bounds_are_rounded_max_plus_one() {
        let videos = vec![video_at(12.4, 7.0), video_at(4.0, 15.8)];
        let bounds = CutoffBounds::for_videos(&videos);

        assert_eq!(bounds.duration_max, 13.0);
        assert_eq!(bounds.engagement_max, 17.0);
    }

    #[test]
    fn empty_library_gets_zero_defaults() {
        let defaults = Cutoffs::default_for(&[]);
        assert_eq!(defaults.duration_mins, 0.0);
        assert_eq!(defaults.engagement_pct, 0.0);

        let bounds = CutoffBounds::for_videos(&[]);
        assert_eq!(bounds.duration_max, 1.0);
        assert_eq!(bounds.engagement_max, 1.0);
    }

    #[test]
    fn all_nan_library_gets_zero_defaults() {
        let defaults = Cutoffs::default_for(&[no_view_video()]);
        assert_eq!(defaults.duration_mins, 0.0);
        assert_eq!(defaults.engagement_pct, 0.0);
    }

    #[test]
    fn rejects_negative_or_non_finite_cutoffs() {
        assert!(Cutoffs::new(-1.0, 5.0).is_err());
        assert!(Cutoffs::new(5.0, f64::NAN).is_err());
        assert!(Cutoffs::new(5.0, f64::INFINITY).is_err());
        assert!(Cutoffs::new(0.0, 0.0).is_ok());
    }
}
