//! Quadrant analysis scene
//!
//! Scene payload for the video performance scatter: every video plotted at
//! (average view duration, engagement score), the cutoff guide lines, and
//! the four quadrant rectangles with their highlight colors. Selecting a
//! quadrant only flips highlight state and the summary panel; the
//! classification itself is never recomputed by a selection change.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use video_insights::{
    classify, CutoffBounds, Cutoffs, Quadrant, QuadrantProfile, VideoRecord,
};

/// Scene heading shown above the scatter
pub const SCENE_TITLE: &str = "Quadrant Analysis of Video Performance";
/// Axis captions
pub const X_AXIS_TITLE: &str = "Avg. View Duration (mins)";
pub const Y_AXIS_TITLE: &str = "Engagement Score";

/// Per-video hover details for a scatter point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoHover {
    pub speaker: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub likes: u64,
    pub comments: u64,
    pub views: u64,
}

/// One video on the duration/engagement plane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Average view duration in minutes; NaN for unwatched videos
    pub x: f64,
    /// Engagement score; NaN for unwatched videos
    pub y: f64,
    pub hover: VideoHover,
}

/// One quadrant's rectangle, label anchor, and fill colors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantRect {
    pub quadrant: Quadrant,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub fill_default: &'static str,
    pub fill_highlight: &'static str,
    pub line_highlight: &'static str,
    /// Label centered horizontally in the rectangle
    pub annotation_x: f64,
    /// Label sits just under the top edge of its half
    pub annotation_y: f64,
    pub label: &'static str,
    pub highlighted: bool,
}

/// Renderable quadrant analysis payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantScene {
    pub title: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub points: Vec<ScatterPoint>,
    /// Cutoff guide lines (vline at duration, hline at engagement)
    pub cutoffs: Cutoffs,
    /// Axis extents and the upper limits for the cutoff inputs
    pub bounds: CutoffBounds,
    pub rects: Vec<QuadrantRect>,
    pub counts: BTreeMap<Quadrant, usize>,
    pub selected: Option<Quadrant>,
    /// Description panel for the selected quadrant
    pub summary: Option<QuadrantProfile>,
}

impl QuadrantScene {
    /// Change which quadrant is highlighted.
    ///
    /// Highlight-only: points, counts, and rectangles keep the
    /// classification computed when the scene was built.
    pub fn select(&mut self, quadrant: Option<Quadrant>) {
        self.selected = quadrant;
        self.summary = quadrant.map(|q| q.profile());
        for rect in &mut self.rects {
            rect.highlighted = Some(rect.quadrant) == quadrant;
        }
    }
}

/// Build the scene for a set of videos.
///
/// `cutoffs` of `None` falls back to half of the observed maximum on each
/// axis. The caller filters the library to the content types it wants
/// plotted before calling.
pub fn build_quadrant_scene(
    videos: &[VideoRecord],
    cutoffs: Option<Cutoffs>,
    selected: Option<Quadrant>,
) -> QuadrantScene {
    let cutoffs = cutoffs.unwrap_or_else(|| Cutoffs::default_for(videos));
    let bounds = CutoffBounds::for_videos(videos);

    let points: Vec<ScatterPoint> = videos
        .iter()
        .map(|video| ScatterPoint {
            x: video.avg_view_duration_mins(),
            y: video.engagement_score(),
            hover: VideoHover {
                speaker: video.speaker.clone(),
                title: video.title.clone(),
                published_at: video.published_at,
                likes: video.likes,
                comments: video.comments,
                views: video.views,
            },
        })
        .collect();

    let counts = classify(videos, cutoffs).counts();

    let rects = Quadrant::ALL
        .iter()
        .map(|&quadrant| quadrant_rect(quadrant, cutoffs, bounds, selected))
        .collect();

    let mut scene = QuadrantScene {
        title: SCENE_TITLE,
        x_axis_title: X_AXIS_TITLE,
        y_axis_title: Y_AXIS_TITLE,
        points,
        cutoffs,
        bounds,
        rects,
        counts,
        selected: None,
        summary: None,
    };
    scene.select(selected);
    scene
}

fn quadrant_rect(
    quadrant: Quadrant,
    cutoffs: Cutoffs,
    bounds: CutoffBounds,
    selected: Option<Quadrant>,
) -> QuadrantRect {
    let dc = cutoffs.duration_mins;
    let ec = cutoffs.engagement_pct;
    let x_end = bounds.duration_max;
    let y_end = bounds.engagement_max;

    let (x0, x1, y0, y1) = match quadrant {
        Quadrant::TopRight => (dc, x_end, ec, y_end),
        Quadrant::TopLeft => (0.0, dc, ec, y_end),
        Quadrant::BottomLeft => (0.0, dc, 0.0, ec),
        Quadrant::BottomRight => (dc, x_end, 0.0, ec),
    };

    let (fill_default, fill_highlight, line_highlight) = match quadrant {
        Quadrant::TopRight => ("#A9DFBF", "#58D68D", "#27AE60"),
        Quadrant::TopLeft => ("#F5B7B1", "#F1948A", "#C0392B"),
        Quadrant::BottomLeft => ("#F2F3F4", "#BDC3C7", "#95A5A6"),
        Quadrant::BottomRight => ("#FCF3CF", "#F7DC6F", "#F1C40F"),
    };

    // Top labels hang below the plot ceiling, bottom labels below the
    // engagement cutoff line.
    let annotation_y = match quadrant {
        Quadrant::TopRight | Quadrant::TopLeft => y_end - 0.5,
        Quadrant::BottomLeft | Quadrant::BottomRight => ec - 0.5,
    };

    QuadrantRect {
        quadrant,
        x0,
        x1,
        y0,
        y1,
        fill_default,
        fill_highlight,
        line_highlight,
        annotation_x: (x0 + x1) / 2.0,
        annotation_y,
        label: quadrant.profile().title,
        highlighted: Some(quadrant) == selected,
    }
}
