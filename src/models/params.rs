use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Target output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum Resolution {
    #[serde(rename = "UHD_4K")]
    #[strum(serialize = "UHD_4K")]
    Uhd4k,
    #[serde(rename = "QHD_2K")]
    #[strum(serialize = "QHD_2K")]
    Qhd2k,
    #[serde(rename = "FHD_1080")]
    #[strum(serialize = "FHD_1080")]
    Fhd1080,
    #[serde(rename = "HD_720")]
    #[strum(serialize = "HD_720")]
    Hd720,
    #[serde(rename = "SD_480")]
    #[strum(serialize = "SD_480")]
    Sd480,
    #[serde(rename = "MOBILE_360")]
    #[strum(serialize = "MOBILE_360")]
    Mobile360,
}

/// Video bitrate preset (ULTRA = 8M down to MOBILE = 500k).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum VideoBitrate {
    Ultra,
    High,
    Standard,
    Low,
    Mobile,
}

/// Audio bitrate preset (HIGH = 192k, STANDARD = 128k, LOW = 64k).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum AudioBitrate {
    High,
    Standard,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum AudioCodec {
    #[serde(rename = "AAC")]
    #[strum(serialize = "AAC")]
    Aac,
    #[serde(rename = "MP3")]
    #[strum(serialize = "MP3")]
    Mp3,
    #[serde(rename = "OPUS")]
    #[strum(serialize = "OPUS")]
    Opus,
    #[serde(rename = "VORBIS")]
    #[strum(serialize = "VORBIS")]
    Vorbis,
    #[serde(rename = "FLAC")]
    #[strum(serialize = "FLAC")]
    Flac,
    #[serde(rename = "PCM_S16LE")]
    #[strum(serialize = "PCM_S16LE")]
    PcmS16le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum VideoCodec {
    #[serde(rename = "H264")]
    #[strum(serialize = "H264")]
    H264,
    #[serde(rename = "H265")]
    #[strum(serialize = "H265")]
    H265,
    #[serde(rename = "VP8")]
    #[strum(serialize = "VP8")]
    Vp8,
    #[serde(rename = "VP9")]
    #[strum(serialize = "VP9")]
    Vp9,
    #[serde(rename = "AV1")]
    #[strum(serialize = "AV1")]
    Av1,
    #[serde(rename = "MPEG4")]
    #[strum(serialize = "MPEG4")]
    Mpeg4,
}

/// Constant-rate-factor quality preset (VERY_HIGH = CRF 18 down to VERY_LOW = CRF 40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrfValue {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

/// Encoder speed preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Preset {
    Ultrafast,
    Fast,
    Medium,
    Slow,
    Veryslow,
}

/// Validated transcode configuration submitted alongside a video upload.
///
/// Serialized flat with camelCase keys, which is the wire format the upload
/// endpoint expects in the `params` multipart field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingParams {
    /// Target chunk size in MB for server-side splitting.
    pub chunk_size: u32,
    /// Upper bound on worker nodes the server may fan out to.
    pub max_nodes: u32,
    pub resolution: Resolution,
    pub audio_codec: AudioCodec,
    pub audio_bitrate: AudioBitrate,
    pub video_codec: VideoCodec,
    pub video_bitrate: VideoBitrate,
    pub crf_value: CrfValue,
    pub preset: Preset,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            chunk_size: 4,
            max_nodes: 5,
            resolution: Resolution::Fhd1080,
            audio_codec: AudioCodec::Mp3,
            audio_bitrate: AudioBitrate::Low,
            video_codec: VideoCodec::H264,
            video_bitrate: VideoBitrate::Low,
            crf_value: CrfValue::Medium,
            preset: Preset::Ultrafast,
        }
    }
}
