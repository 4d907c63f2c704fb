//! Hand-built video fixtures for demos and doc examples

use chrono::{TimeZone, Utc};

use crate::VideoRecord;

/// A small content library with videos in every quadrant, a non-stream
/// upload, and one video that never got a view.
pub fn sample_videos() -> Vec<VideoRecord> {
    vec![
        video(
            "yt-101",
            "Sunday Service: Walking in Faith",
            "T. Adeyemi",
            "Livestream",
            (2025, 3, 2),
            5400,
            2400,
            310,
            64,
            21_600.0,
        ),
        video(
            "yt-102",
            "Midweek Bible Study: Romans 8",
            "T. Adeyemi",
            "Livestream",
            (2025, 3, 5),
            4200,
            900,
            58,
            31,
            2_250.0,
        ),
        video(
            "yt-103",
            "Youth Night Highlights",
            "S. Mensah",
            "Livestream",
            (2025, 3, 9),
            3600,
            1500,
            21,
            9,
            3_000.0,
        ),
        video(
            "yt-104",
            "Sunday Service: The Prodigal",
            "J. Okafor",
            "Luton Livestream",
            (2025, 3, 16),
            5700,
            1800,
            40,
            14,
            16_200.0,
        ),
        video(
            "yt-105",
            "Worship Night Live",
            "S. Mensah",
            "Luton Livestream",
            (2025, 3, 21),
            6300,
            2100,
            260,
            75,
            19_950.0,
        ),
        video(
            "yt-106",
            "Easter Service Announcement",
            "J. Okafor",
            "Short",
            (2025, 3, 24),
            45,
            5200,
            410,
            22,
            2_600.0,
        ),
        video(
            "yt-107",
            "Testimony: A New Beginning",
            "R. Nwosu",
            "Interview",
            (2025, 3, 26),
            780,
            620,
            88,
            19,
            4_030.0,
        ),
        video(
            "yt-108",
            "Sunday Service: Unseen Battles",
            "T. Adeyemi",
            "Livestream",
            (2025, 3, 30),
            5400,
            0,
            0,
            0,
            0.0,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn video(
    video_id: &str,
    title: &str,
    speaker: &str,
    video_type: &str,
    (year, month, day): (i32, u32, u32),
    duration_sec: u32,
    views: u64,
    likes: u64,
    comments: u64,
    watch_minutes: f64,
) -> VideoRecord {
    VideoRecord {
        video_id: video_id.to_string(),
        title: title.to_string(),
        speaker: speaker.to_string(),
        video_type: video_type.to_string(),
        published_at: Utc
            .with_ymd_and_hms(year, month, day, 10, 30, 0)
            .unwrap(),
        duration_sec,
        views,
        likes,
        comments,
        watch_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter_by_type, LIVESTREAM_TYPES};

    #[test]
    fn sample_mixes_stream_and_other_types() {
        let videos = sample_videos();
        let streams = filter_by_type(&videos, &LIVESTREAM_TYPES);

        assert!(streams.len() < videos.len());
        assert!(streams.len() >= 4);
    }

    #[test]
    fn sample_includes_an_unwatched_video() {
        let videos = sample_videos();
        assert!(videos.iter().any(|v| v.views == 0));
    }

    #[test]
    fn sample_ids_are_unique() {
        let videos = sample_videos();
        let mut ids: Vec<&str> = videos.iter().map(|v| v.video_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), videos.len());
    }
}
