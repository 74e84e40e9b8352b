use std::future::Future;
use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::models::params::ProcessingParams;
use crate::models::video::Video;

/// HTTP client for the transcoding service.
///
/// All endpoint knowledge comes from [`ClientConfig`]; nothing here hardcodes
/// a deployment. Calls carry no client-side timeout: upload and download can
/// legitimately run for minutes, and the polling loop handles slow fetches by
/// waiting them out rather than racing them.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file selected (missing or empty)")]
    NoFileSelected,

    #[error("failed to read video file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize parameters: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("job list request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job list response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the authoritative job list. The reconciler is generic over this
/// seam so its timing and cancellation behavior can be tested without a
/// server.
pub trait JobSource {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Video>, FetchError>> + Send;
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Submit a video plus its validated parameters as one multipart request.
    ///
    /// Fails with [`UploadError::NoFileSelected`] before any network traffic
    /// when the path does not exist or the file is empty. The response body
    /// is ignored; callers refresh the job list to observe the new job.
    pub async fn submit(&self, file: &Path, params: &ProcessingParams) -> Result<(), UploadError> {
        let metadata = tokio::fs::metadata(file)
            .await
            .map_err(|_| UploadError::NoFileSelected)?;
        if !metadata.is_file() || metadata.len() == 0 {
            return Err(UploadError::NoFileSelected);
        }

        let filename = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());
        let bytes = tokio::fs::read(file).await?;

        let form = Form::new()
            .part("video", Part::bytes(bytes).file_name(filename.clone()))
            .text("params", serde_json::to_string(params)?);

        tracing::info!(
            file = %filename,
            size = metadata.len(),
            "Submitting transcode job"
        );

        self.http
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        tracing::info!(file = %filename, "Upload accepted");
        Ok(())
    }

    /// Fetch the full job list in one request. Never touches any cached
    /// snapshot; that is the reconciler's job.
    pub async fn list_videos(&self) -> Result<Vec<Video>, FetchError> {
        let response = self
            .http
            .get(self.config.videos_url())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let videos = serde_json::from_str(&body)?;
        Ok(videos)
    }

    /// Fetch a completed artifact's bytes. `reference` may be absolute or
    /// relative to the configured base URL.
    pub async fn fetch_artifact(&self, reference: &str) -> Result<Vec<u8>, reqwest::Error> {
        let url = self.config.resolve(reference);
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

impl JobSource for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<Video>, FetchError> {
        self.list_videos().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unroutable_client() -> ApiClient {
        // A base URL nothing listens on; any network attempt would error with
        // a connect failure rather than NoFileSelected.
        ApiClient::new(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..ClientConfig::default()
        })
    }

    #[tokio::test]
    async fn submit_without_file_never_hits_network() {
        let client = unroutable_client();
        let err = client
            .submit(Path::new("/no/such/video.mp4"), &ProcessingParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));
    }

    #[tokio::test]
    async fn submit_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp4");
        tokio::fs::write(&path, b"").await.unwrap();

        let client = unroutable_client();
        let err = client
            .submit(&path, &ProcessingParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));
    }
}
