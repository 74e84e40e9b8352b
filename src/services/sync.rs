//! Job-state reconciliation.
//!
//! A [`JobWatcher`] owns the client's view of the server's job list: it runs
//! one initial fetch, then a fixed-period polling loop that replaces the
//! cached snapshot only when some job's status actually changed. The snapshot
//! is published through a watch channel so observers always see a whole
//! sequence, never a torn mix of old and new jobs. The loop stops on its own
//! once every known job is terminal, and can be cancelled from outside at any
//! point, including while a fetch is in flight.

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::models::video::Video;
use crate::services::api::JobSource;

/// Session-level synchronization state.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncState {
    /// The watcher has not started yet.
    Idle,
    /// The initial fetch is in flight.
    Loading,
    /// Last known job snapshot. Replaced wholesale, never edited in place.
    Ready(Vec<Video>),
    /// The initial fetch failed; the polling loop never started.
    Failed(String),
}

/// Polls a [`JobSource`] and maintains the job snapshot.
pub struct JobWatcher<S> {
    source: S,
    poll_interval: Duration,
    state_tx: watch::Sender<SyncState>,
    cancel: CancellationToken,
}

impl<S: JobSource> JobWatcher<S> {
    pub fn new(source: S, poll_interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(SyncState::Idle);
        Self {
            source,
            poll_interval,
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to state transitions. Receivers obtained before `run` starts
    /// observe every transition from `Idle` on.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state_tx.subscribe()
    }

    /// Token that stops the loop. Cancelling while a fetch is in flight
    /// discards its result without mutating state.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drive the state machine to completion: `Idle -> Loading`, then either
    /// `Failed` (terminal) or `Ready` followed by the polling loop.
    pub async fn run(self) {
        self.state_tx.send_replace(SyncState::Loading);

        let initial = tokio::select! {
            _ = self.cancel.cancelled() => return,
            result = self.source.fetch_all() => result,
        };

        let mut snapshot = match initial {
            Ok(videos) => videos,
            Err(e) => {
                warn!(error = %e, "Initial job list fetch failed");
                self.state_tx.send_replace(SyncState::Failed(e.to_string()));
                return;
            }
        };

        info!(jobs = snapshot.len(), "Job list loaded");
        self.state_tx.send_replace(SyncState::Ready(snapshot.clone()));

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            // Nothing to reconcile until the server knows about at least one job.
            if snapshot.is_empty() {
                continue;
            }

            // Stop only once every job is terminal, so a fresh upload that
            // arrives after older jobs finish still gets polled.
            if snapshot.iter().all(|v| v.status.is_terminal()) {
                info!("All jobs processed, stopping poll loop");
                return;
            }

            let fetched = tokio::select! {
                _ = self.cancel.cancelled() => return,
                result = self.source.fetch_all() => result,
            };

            match fetched {
                // A failed cycle keeps the last good snapshot; the next
                // scheduled cycle is the retry.
                Err(e) => debug!(error = %e, "Poll cycle failed, keeping last snapshot"),
                Ok(videos) => {
                    if statuses_changed(&snapshot, &videos) {
                        debug!(jobs = videos.len(), "Job statuses changed, replacing snapshot");
                        snapshot = videos;
                        self.state_tx.send_replace(SyncState::Ready(snapshot.clone()));
                    }
                }
            }
        }
    }
}

/// True when any fetched job's status differs from the snapshot, matching by
/// id. A fetched job the snapshot has never seen counts as changed.
pub fn statuses_changed(snapshot: &[Video], fetched: &[Video]) -> bool {
    fetched.iter().any(|new| {
        match snapshot.iter().find(|old| old.id == new.id) {
            Some(old) => old.status != new.status,
            None => true,
        }
    })
}
