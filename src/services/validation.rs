use std::str::FromStr;

use crate::models::params::{
    AudioBitrate, AudioCodec, CrfValue, Preset, ProcessingParams, Resolution, VideoBitrate,
    VideoCodec,
};

/// Unvalidated transcode parameters as they arrive from user input: raw
/// option tokens and unchecked integers.
#[derive(Debug, Clone)]
pub struct RawParams {
    pub chunk_size: i64,
    pub max_nodes: i64,
    pub resolution: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub video_codec: String,
    pub video_bitrate: String,
    pub crf_value: String,
    pub preset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: {value:?} is not a recognized option")]
    InvalidOption { field: &'static str, value: String },

    #[error("{field}: must be a positive integer")]
    InvalidRange { field: &'static str },
}

/// Validate raw parameters into a [`ProcessingParams`].
///
/// Pure: every option token must belong to its closed set and both integer
/// fields must be >= 1. The first offending field is reported; nothing is
/// coerced or defaulted here.
pub fn validate(raw: &RawParams) -> Result<ProcessingParams, ValidationError> {
    let chunk_size = positive(raw.chunk_size, "chunkSize")?;
    let max_nodes = positive(raw.max_nodes, "maxNodes")?;

    Ok(ProcessingParams {
        chunk_size,
        max_nodes,
        resolution: option::<Resolution>(&raw.resolution, "resolution")?,
        audio_codec: option::<AudioCodec>(&raw.audio_codec, "audioCodec")?,
        audio_bitrate: option::<AudioBitrate>(&raw.audio_bitrate, "audioBitrate")?,
        video_codec: option::<VideoCodec>(&raw.video_codec, "videoCodec")?,
        video_bitrate: option::<VideoBitrate>(&raw.video_bitrate, "videoBitrate")?,
        crf_value: option::<CrfValue>(&raw.crf_value, "crfValue")?,
        preset: option::<Preset>(&raw.preset, "preset")?,
    })
}

fn positive(value: i64, field: &'static str) -> Result<u32, ValidationError> {
    if value < 1 {
        return Err(ValidationError::InvalidRange { field });
    }
    u32::try_from(value).map_err(|_| ValidationError::InvalidRange { field })
}

fn option<T: FromStr>(value: &str, field: &'static str) -> Result<T, ValidationError> {
    value.parse().map_err(|_| ValidationError::InvalidOption {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawParams {
        RawParams {
            chunk_size: 4,
            max_nodes: 5,
            resolution: "FHD_1080".to_string(),
            audio_codec: "MP3".to_string(),
            audio_bitrate: "LOW".to_string(),
            video_codec: "H264".to_string(),
            video_bitrate: "LOW".to_string(),
            crf_value: "MEDIUM".to_string(),
            preset: "ULTRAFAST".to_string(),
        }
    }

    #[test]
    fn accepts_form_defaults() {
        let params = validate(&sample_raw()).unwrap();
        assert_eq!(params, ProcessingParams::default());
    }

    #[test]
    fn rejects_unknown_resolution_token() {
        let mut raw = sample_raw();
        raw.resolution = "8K".to_string();
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidOption {
                field: "resolution",
                value: "8K".to_string()
            })
        );
    }

    #[test]
    fn rejects_each_enum_field_independently() {
        let cases: [(&str, fn(&mut RawParams)); 7] = [
            ("resolution", |r| r.resolution = "bogus".into()),
            ("audioCodec", |r| r.audio_codec = "bogus".into()),
            ("audioBitrate", |r| r.audio_bitrate = "bogus".into()),
            ("videoCodec", |r| r.video_codec = "bogus".into()),
            ("videoBitrate", |r| r.video_bitrate = "bogus".into()),
            ("crfValue", |r| r.crf_value = "bogus".into()),
            ("preset", |r| r.preset = "bogus".into()),
        ];
        for (field, poison) in cases {
            let mut raw = sample_raw();
            poison(&mut raw);
            match validate(&raw) {
                Err(ValidationError::InvalidOption { field: got, .. }) => assert_eq!(got, field),
                other => panic!("{field}: expected InvalidOption, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_positive_integers() {
        let mut raw = sample_raw();
        raw.chunk_size = 0;
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidRange { field: "chunkSize" })
        );

        let mut raw = sample_raw();
        raw.max_nodes = -3;
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidRange { field: "maxNodes" })
        );
    }

    #[test]
    fn tokens_are_case_sensitive() {
        let mut raw = sample_raw();
        raw.preset = "ultrafast".to_string();
        assert!(matches!(
            validate(&raw),
            Err(ValidationError::InvalidOption { field: "preset", .. })
        ));
    }
}
