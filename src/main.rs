use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use humansize::{format_size, DECIMAL};
use tracing_subscriber::EnvFilter;

use transcode_client::config::ClientConfig;
use transcode_client::models::video::Video;
use transcode_client::services::api::ApiClient;
use transcode_client::services::artifact::{self, Artifact};
use transcode_client::services::sync::{JobWatcher, SyncState};
use transcode_client::services::validation::{self, RawParams};

#[derive(Parser)]
#[command(name = "transcode", about = "Client for the distributed video transcoding service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a video with transcode parameters
    Upload {
        /// Path to the video file
        file: PathBuf,
        /// Chunk size in MB for server-side splitting
        #[arg(long, default_value_t = 4)]
        chunk_size: i64,
        /// Maximum worker nodes
        #[arg(long, default_value_t = 5)]
        max_nodes: i64,
        /// Target resolution (UHD_4K, QHD_2K, FHD_1080, HD_720, SD_480, MOBILE_360)
        #[arg(long, default_value = "FHD_1080")]
        resolution: String,
        /// Video codec (H264, H265, VP8, VP9, AV1, MPEG4)
        #[arg(long, default_value = "H264")]
        video_codec: String,
        /// Audio codec (AAC, MP3, OPUS, VORBIS, FLAC, PCM_S16LE)
        #[arg(long, default_value = "MP3")]
        audio_codec: String,
        /// Video bitrate preset (ULTRA, HIGH, STANDARD, LOW, MOBILE)
        #[arg(long, default_value = "LOW")]
        video_bitrate: String,
        /// Audio bitrate preset (HIGH, STANDARD, LOW)
        #[arg(long, default_value = "LOW")]
        audio_bitrate: String,
        /// CRF quality preset (VERY_HIGH, HIGH, MEDIUM, LOW, VERY_LOW)
        #[arg(long, default_value = "MEDIUM")]
        crf: String,
        /// Encoder speed preset (ULTRAFAST, FAST, MEDIUM, SLOW, VERYSLOW)
        #[arg(long, default_value = "ULTRAFAST")]
        preset: String,
    },
    /// List all jobs known to the service
    List,
    /// Poll the service until every job is processed (Ctrl-C to stop)
    Watch,
    /// Download a processed job's artifact
    Download {
        /// Job id
        id: i64,
        /// Destination directory (defaults to the configured download dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Command::Upload {
            file,
            chunk_size,
            max_nodes,
            resolution,
            video_codec,
            audio_codec,
            video_bitrate,
            audio_bitrate,
            crf,
            preset,
        } => {
            let raw = RawParams {
                chunk_size,
                max_nodes,
                resolution,
                audio_codec,
                audio_bitrate,
                video_codec,
                video_bitrate,
                crf_value: crf,
                preset,
            };
            let params = validation::validate(&raw)?;
            let client = ApiClient::new(config);
            client.submit(&file, &params).await?;
            println!("Upload accepted: {}", file.display());
        }
        Command::List => {
            let client = ApiClient::new(config);
            let videos = client.list_videos().await?;
            print_videos(&videos);
        }
        Command::Watch => {
            let interval = Duration::from_millis(config.poll_interval_ms);
            let client = ApiClient::new(config);
            let watcher = JobWatcher::new(client, interval);
            let mut state_rx = watcher.subscribe();
            let cancel = watcher.cancel_token();
            let handle = tokio::spawn(watcher.run());

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        cancel.cancel();
                        break;
                    }
                    changed = state_rx.changed() => {
                        // The sender drops when the watcher finishes.
                        if changed.is_err() {
                            break;
                        }
                        let state = state_rx.borrow_and_update().clone();
                        match state {
                            SyncState::Idle | SyncState::Loading => {}
                            SyncState::Ready(videos) => print_videos(&videos),
                            SyncState::Failed(cause) => {
                                handle.await.ok();
                                bail!("Failed to load job list: {cause}");
                            }
                        }
                    }
                }
            }
            handle.await.ok();
        }
        Command::Download { id, out } => {
            let dest_dir = out.unwrap_or_else(|| config.download_dir.clone());
            let client = ApiClient::new(config);
            let videos = client.list_videos().await?;
            let Some(video) = videos.iter().find(|v| v.id == id) else {
                bail!("No job with id {id}");
            };
            match artifact::download_artifact(&client, video, &dest_dir).await? {
                Artifact::Saved(path) => println!("Saved {}", path.display()),
                Artifact::NotReady => println!("Job {id} has no downloadable artifact yet"),
            }
        }
    }

    Ok(())
}

fn print_videos(videos: &[Video]) {
    if videos.is_empty() {
        println!("No jobs yet.");
        return;
    }
    println!("{:>5}  {:<32} {:<12} {:>10} {:>9}", "id", "filename", "status", "size", "chunks");
    for video in videos {
        let chunks = if video.total_chunks > 0 {
            format!("{}/{}", video.processed_chunks, video.total_chunks)
        } else {
            "-".to_string()
        };
        println!(
            "{:>5}  {:<32} {:<12} {:>10} {:>9}",
            video.id,
            video.filename,
            video.status.to_string(),
            format_size(video.size, DECIMAL),
            chunks,
        );
    }
}
