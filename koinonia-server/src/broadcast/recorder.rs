//! Live-broadcast recording.
//!
//! Each live broadcast gets at most one ffmpeg process copying its stream
//! to disk. A monitor task watches the process and publishes the recording
//! as the broadcast's VOD source when it ends cleanly.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use koinonia_config::BroadcastConfig;
use parking_lot::Mutex;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::store::MediaRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecorderStatus {
    Recording,
    /// Stopped by an operator; the partial file is kept.
    Stopped,
    /// ffmpeg exited zero on its own (stream ended).
    Completed,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("broadcast is already being recorded")]
    AlreadyRecording,

    #[error("no recording in progress for this broadcast")]
    NotRecording,

    #[error("failed to start ffmpeg: {0}")]
    Spawn(#[from] std::io::Error),
}

struct RecordingEntry {
    status: RecorderStatus,
    output_path: PathBuf,
    stop_tx: Option<oneshot::Sender<()>>,
    done_rx: Option<oneshot::Receiver<RecorderStatus>>,
}

/// Snapshot returned by the status endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordingSnapshot {
    pub media_id: Uuid,
    pub status: RecorderStatus,
    pub output_file: String,
}

pub struct BroadcastRecorder {
    config: BroadcastConfig,
    media: Arc<dyn MediaRepository>,
    recordings: DashMap<Uuid, Arc<Mutex<RecordingEntry>>>,
}

impl BroadcastRecorder {
    pub fn new(
        config: BroadcastConfig,
        media: Arc<dyn MediaRepository>,
    ) -> Self {
        Self {
            config,
            media,
            recordings: DashMap::new(),
        }
    }

    /// Start recording `stream_url` for the given broadcast. At most one
    /// recorder runs per broadcast id.
    pub async fn start(
        self: &Arc<Self>,
        media_id: Uuid,
        stream_url: &str,
    ) -> Result<RecordingSnapshot, RecorderError> {
        let filename = format!(
            "{media_id}-{}.mp4",
            Utc::now().format("%Y%m%d%H%M%S")
        );
        let output_path = self.config.recording_dir.join(&filename);

        let (stop_tx, stop_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let entry = Arc::new(Mutex::new(RecordingEntry {
            status: RecorderStatus::Recording,
            output_path: output_path.clone(),
            stop_tx: Some(stop_tx),
            done_rx: Some(done_rx),
        }));

        // Reserve the slot before spawning anything so two concurrent
        // starts cannot both pass the in-progress check and leave an
        // orphaned child behind.
        match self.recordings.entry(media_id) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().lock().status == RecorderStatus::Recording
                {
                    return Err(RecorderError::AlreadyRecording);
                }
                occupied.insert(Arc::clone(&entry));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::clone(&entry));
            }
        }

        let mut cmd =
            build_recording_command(&self.config.ffmpeg_path, stream_url);
        cmd.arg(&output_path);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                self.recordings.remove(&media_id);
                return Err(err.into());
            }
        };
        info!(%media_id, output = %output_path.display(), "recording started");

        let recorder = Arc::clone(self);
        tokio::spawn(async move {
            recorder
                .monitor(media_id, filename, entry, child, stop_rx, done_tx)
                .await;
        });

        Ok(RecordingSnapshot {
            media_id,
            status: RecorderStatus::Recording,
            output_file: output_path.display().to_string(),
        })
    }

    /// Stop an in-progress recording. Returns once the child has exited
    /// and the recording has been attached to the broadcast, so callers
    /// observe the final state immediately.
    pub async fn stop(
        &self,
        media_id: Uuid,
    ) -> Result<RecordingSnapshot, RecorderError> {
        let entry = self
            .recordings
            .get(&media_id)
            .ok_or(RecorderError::NotRecording)?
            .clone();

        let done_rx = {
            let mut guard = entry.lock();
            if guard.status != RecorderStatus::Recording {
                return Err(RecorderError::NotRecording);
            }
            let stop_tx = guard
                .stop_tx
                .take()
                .ok_or(RecorderError::NotRecording)?;
            let _ = stop_tx.send(());
            guard.done_rx.take()
        };

        if let Some(done_rx) = done_rx {
            let _ = done_rx.await;
        }

        let guard = entry.lock();
        Ok(RecordingSnapshot {
            media_id,
            status: guard.status,
            output_file: guard.output_path.display().to_string(),
        })
    }

    pub fn status(&self, media_id: Uuid) -> Option<RecordingSnapshot> {
        let entry = self.recordings.get(&media_id)?.clone();
        let guard = entry.lock();
        Some(RecordingSnapshot {
            media_id,
            status: guard.status,
            output_file: guard.output_path.display().to_string(),
        })
    }

    async fn monitor(
        &self,
        media_id: Uuid,
        filename: String,
        entry: Arc<Mutex<RecordingEntry>>,
        mut child: tokio::process::Child,
        stop_rx: oneshot::Receiver<()>,
        done_tx: oneshot::Sender<RecorderStatus>,
    ) {
        let final_status = tokio::select! {
            exit = child.wait() => match exit {
                Ok(status) if status.success() => RecorderStatus::Completed,
                Ok(status) => {
                    warn!(%media_id, code = ?status.code(),
                        "ffmpeg exited with failure");
                    RecorderStatus::Failed
                }
                Err(err) => {
                    error!(%media_id, error = %err,
                        "failed to wait on ffmpeg");
                    RecorderStatus::Failed
                }
            },
            _ = stop_rx => {
                if let Err(err) = child.kill().await {
                    warn!(%media_id, error = %err,
                        "failed to kill ffmpeg on stop");
                }
                let _ = child.wait().await;
                RecorderStatus::Stopped
            }
        };

        entry.lock().status = final_status;
        info!(%media_id, status = ?final_status, "recording finished");

        // A kept recording becomes the broadcast's on-demand source.
        if matches!(
            final_status,
            RecorderStatus::Completed | RecorderStatus::Stopped
        ) {
            let video_url = format!("/recordings/{filename}");
            if let Err(err) = self
                .media
                .set_live(media_id, false, Some(video_url))
                .await
            {
                error!(%media_id, error = %err,
                    "failed to attach recording to broadcast");
            }
        }

        let _ = done_tx.send(final_status);
    }
}

impl std::fmt::Debug for BroadcastRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastRecorder")
            .field("active", &self.recordings.len())
            .finish_non_exhaustive()
    }
}

/// Stream copy, no re-encode; the broadcast encoder already chose codecs.
fn build_recording_command(ffmpeg_path: &str, stream_url: &str) -> Command {
    let mut cmd = Command::new(ffmpeg_path);
    cmd.arg("-hide_banner");
    cmd.arg("-y");
    cmd.arg("-i").arg(stream_url);
    cmd.arg("-c").arg("copy");
    cmd.arg("-movflags").arg("+faststart");
    cmd
}
