use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::params::{
    AudioBitrate, AudioCodec, CrfValue, Preset, Resolution, VideoBitrate, VideoCodec,
};

/// Server-reported status of a transcode job.
///
/// Transitions are monotonic: `uploaded -> processing -> processed`. The
/// server is the sole authority; the client never writes these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VideoStatus {
    Uploaded,
    Processing,
    Processed,
}

impl VideoStatus {
    /// `processed` is the terminal state: no further progress, artifact ready.
    pub fn is_terminal(self) -> bool {
        matches!(self, VideoStatus::Processed)
    }
}

/// A transcode job as reported by the service.
///
/// The echo fields repeat the parameters the job was submitted with; older
/// server versions omit them, so everything beyond the identity core is
/// defaulted when absent. Timestamps are naive because the backend emits
/// bare `isoformat()` strings without an offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub stored_filename: Option<String>,
    pub status: VideoStatus,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    #[serde(default)]
    pub video_codec: Option<VideoCodec>,
    #[serde(default)]
    pub audio_codec: Option<AudioCodec>,
    #[serde(default)]
    pub video_bitrate: Option<VideoBitrate>,
    #[serde(default)]
    pub audio_bitrate: Option<AudioBitrate>,
    #[serde(default)]
    pub crf_value: Option<CrfValue>,
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(default)]
    pub total_chunks: u32,
    #[serde(default)]
    pub processed_chunks: u32,
    #[serde(default)]
    pub download_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Video {
    /// Chunk progress as a fraction in `[0, 1]`, or `None` before the server
    /// has decided on a chunk count.
    pub fn progress(&self) -> Option<f64> {
        if self.total_chunks == 0 {
            return None;
        }
        Some(f64::from(self.processed_chunks.min(self.total_chunks)) / f64::from(self.total_chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_server_record() {
        // Shape emitted by early server versions: identity core only.
        let json = r#"{
            "id": 1,
            "filename": "clip.mp4",
            "status": "uploaded",
            "created_at": "2026-08-30T10:15:00.123456",
            "updated_at": "2026-08-30T10:15:00.123456"
        }"#;
        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.id, 1);
        assert_eq!(video.status, VideoStatus::Uploaded);
        assert_eq!(video.total_chunks, 0);
        assert!(video.download_url.is_none());
        assert!(video.progress().is_none());
    }

    #[test]
    fn deserializes_full_record_with_progress() {
        let json = r#"{
            "id": 7,
            "filename": "talk.mkv",
            "stored_filename": "7_talk.mkv",
            "status": "processing",
            "size": 104857600,
            "resolution": "HD_720",
            "video_codec": "VP9",
            "audio_codec": "OPUS",
            "video_bitrate": "STANDARD",
            "audio_bitrate": "STANDARD",
            "crf_value": "HIGH",
            "preset": "SLOW",
            "total_chunks": 10,
            "processed_chunks": 4,
            "download_url": null,
            "created_at": "2026-08-30T10:15:00",
            "updated_at": "2026-08-30T10:16:30"
        }"#;
        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.status, VideoStatus::Processing);
        assert_eq!(video.progress(), Some(0.4));
        assert!(!video.status.is_terminal());
    }

    #[test]
    fn status_wire_tokens_are_lowercase() {
        assert_eq!(serde_json::to_value(VideoStatus::Processed).unwrap(), "processed");
        assert_eq!(VideoStatus::Uploaded.to_string(), "uploaded");
    }
}
