use serde::Deserialize;
use std::path::PathBuf;

/// Client configuration, loaded from `TRANSCODE_`-prefixed environment
/// variables. The base URL and per-operation paths live here so no call site
/// carries an embedded deployment assumption.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:5000").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the multipart upload endpoint.
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Path of the job listing endpoint.
    #[serde(default = "default_videos_path")]
    pub videos_path: String,

    /// Polling period for job-state reconciliation, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Directory completed artifacts are saved into.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_upload_path() -> String {
    "/api/upload".to_string()
}

fn default_videos_path() -> String {
    "/api/videos".to_string()
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed("TRANSCODE_").from_env()
    }

    /// Absolute URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    /// Absolute URL of the job listing endpoint.
    pub fn videos_url(&self) -> String {
        join_url(&self.base_url, &self.videos_path)
    }

    /// Resolve a server-provided reference that may be relative to the base.
    pub fn resolve(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else {
            join_url(&self.base_url, reference)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_path: default_upload_path(),
            videos_path: default_videos_path(),
            poll_interval_ms: default_poll_interval_ms(),
            download_dir: default_download_dir(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_doubled_slashes() {
        let config = ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.upload_url(), "http://localhost:5000/api/upload");
        assert_eq!(config.videos_url(), "http://localhost:5000/api/videos");
    }

    #[test]
    fn resolve_keeps_absolute_references() {
        let config = ClientConfig::default();
        assert_eq!(
            config.resolve("https://cdn.example.com/out/clip.mp4"),
            "https://cdn.example.com/out/clip.mp4"
        );
        assert_eq!(
            config.resolve("/api/videos/7/download"),
            "http://localhost:5000/api/videos/7/download"
        );
    }
}
