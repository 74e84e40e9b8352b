use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::video::Video;
use crate::services::api::ApiClient;

/// Outcome of an artifact download request.
#[derive(Debug, PartialEq, Eq)]
pub enum Artifact {
    /// Saved under the job's original filename.
    Saved(PathBuf),
    /// The job carries no download reference yet; nothing was fetched.
    NotReady,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("artifact request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to write artifact to disk: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to persist artifact: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Fetch a completed job's artifact and save it under the job's original
/// filename in `dest_dir`.
///
/// A job without a download reference is a no-op, not an error; callers are
/// expected to check before offering the action. Bytes are staged through a
/// temp file in the destination directory so a failed transfer never leaves a
/// half-written artifact behind.
pub async fn download_artifact(
    client: &ApiClient,
    video: &Video,
    dest_dir: &Path,
) -> Result<Artifact, DownloadError> {
    let Some(reference) = video.download_url.as_deref() else {
        tracing::debug!(id = video.id, "Job has no artifact yet, skipping download");
        return Ok(Artifact::NotReady);
    };

    tracing::info!(id = video.id, file = %video.filename, "Downloading artifact");
    let bytes = client.fetch_artifact(reference).await?;

    let path = save_bytes(&bytes, dest_dir, &video.filename)?;
    tracing::info!(id = video.id, path = %path.display(), "Artifact saved");
    Ok(Artifact::Saved(path))
}

/// Stage `bytes` through a temp file in `dest_dir`, then persist as `filename`.
/// The temp file is removed automatically if anything fails before persist.
fn save_bytes(bytes: &[u8], dest_dir: &Path, filename: &str) -> Result<PathBuf, DownloadError> {
    let target = dest_dir.join(filename);
    let mut staged = tempfile::NamedTempFile::new_in(dest_dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    staged.persist(&target)?;
    Ok(target)
}
