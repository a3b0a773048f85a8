//! Now-playing selection and playback reconciliation.
//!
//! Clients share a single "now playing" slot across sermons and podcasts:
//! at most one media item is active, and selecting a new item implicitly
//! stops whatever was playing. This crate models that slot as a pure state
//! machine so every client (and the test suite) agrees on the semantics:
//!
//! - lazy source loading: the source is (re)loaded only when the selected
//!   id changes or a reload was explicitly requested
//! - play reconciliation: a rejected play attempt is retried exactly once
//!   after a fixed delay; a second rejection leaves the slot paused
//! - session position memory: re-selecting an item resumes from its
//!   last-known position; memory does not survive the session
//! - a 1-second tick drives the progress display while playing
//!
//! The machine performs no I/O. It hands the embedding client
//! [`PlayerCommand`]s describing what to do against the real media element.

use std::collections::HashMap;
use std::time::Duration;

use koinonia_model::MediaRecord;
use uuid::Uuid;

/// Delay before the single retry after a rejected play attempt.
pub const PLAY_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Interval at which hosts are expected to call [`NowPlaying::tick`].
pub const PROGRESS_TICK: Duration = Duration::from_secs(1);

/// Observable state of the playback slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing selected.
    Idle,
    /// A source load is outstanding.
    Loading,
    Playing,
    Paused,
    /// Playback ran to the end of the item.
    Ended,
}

/// What the embedding client must do next against its media element.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Point the media element at `url` and begin loading.
    LoadSource { url: String },
    /// Call play on the media element.
    AttemptPlay,
    /// Wait `delay`, then report back via [`NowPlaying::retry_due`].
    RetryPlayAfter { delay: Duration },
}

/// Session-only map from media id to last-known elapsed seconds.
#[derive(Debug, Default)]
pub struct PositionMemory {
    positions: HashMap<Uuid, f32>,
}

impl PositionMemory {
    pub fn remember(&mut self, media_id: Uuid, position: f32) {
        if position > 0.0 {
            self.positions.insert(media_id, position);
        }
    }

    pub fn recall(&self, media_id: Uuid) -> Option<f32> {
        self.positions.get(&media_id).copied()
    }

    pub fn forget(&mut self, media_id: Uuid) {
        self.positions.remove(&media_id);
    }
}

/// The single shared playback slot.
#[derive(Debug, Default)]
pub struct NowPlaying {
    current: Option<MediaRecord>,
    state: SlotState,
    /// Elapsed seconds within the current item.
    position: f32,
    /// Duration reported by the media element once loaded.
    duration: Option<f32>,
    reload_requested: bool,
    retry_used: bool,
    memory: PositionMemory,
}

impl Default for SlotState {
    fn default() -> Self {
        SlotState::Idle
    }
}

impl NowPlaying {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn current(&self) -> Option<&MediaRecord> {
        self.current.as_ref()
    }

    /// The single shared playing flag.
    pub fn is_playing(&self) -> bool {
        self.state == SlotState::Playing
    }

    /// Elapsed and total seconds for the progress display.
    pub fn progress(&self) -> Option<(f32, Option<f32>)> {
        self.current.as_ref().map(|_| (self.position, self.duration))
    }

    /// Select a media item. Selecting a new id stops the previous item and
    /// loads the new source; re-selecting the current id only re-attempts
    /// play (unless a reload was requested).
    pub fn select(&mut self, record: MediaRecord) -> Option<PlayerCommand> {
        let same_item =
            self.current.as_ref().is_some_and(|c| c.id == record.id);

        if same_item && !self.reload_requested {
            return match self.state {
                SlotState::Paused | SlotState::Ended => {
                    if self.state == SlotState::Ended {
                        self.position = 0.0;
                    }
                    Some(PlayerCommand::AttemptPlay)
                }
                _ => None,
            };
        }

        // A record with no playable source cannot occupy the slot;
        // whatever is active stays untouched.
        let url = source_url(&record)?;

        // Implicitly stop the previous item; its position is remembered
        // for the rest of the session.
        if let Some(previous) = self.current.take() {
            self.memory.remember(previous.id, self.position);
        }
        self.position = self.memory.recall(record.id).unwrap_or(0.0);
        self.duration = None;
        self.reload_requested = false;
        self.retry_used = false;
        self.state = SlotState::Loading;
        self.current = Some(record);

        Some(PlayerCommand::LoadSource { url })
    }

    /// Force the source to be reloaded on the next select of the current
    /// item (e.g. after a live stream URL changed).
    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    /// The media element finished loading; duration is known if the
    /// element reported one. Playback is attempted immediately.
    pub fn source_loaded(
        &mut self,
        duration: Option<f32>,
    ) -> Option<PlayerCommand> {
        if self.state != SlotState::Loading {
            return None;
        }
        self.duration = duration;
        if let Some(total) = duration {
            self.position = self.position.clamp(0.0, total);
        }
        Some(PlayerCommand::AttemptPlay)
    }

    /// The media element accepted the play call.
    pub fn play_started(&mut self) {
        if self.current.is_some() {
            self.state = SlotState::Playing;
        }
    }

    /// The play call was rejected (autoplay policy, transient element
    /// state). The first rejection schedules exactly one retry; a second
    /// leaves the slot paused for the user to resume manually.
    pub fn play_rejected(&mut self) -> Option<PlayerCommand> {
        if self.current.is_none() {
            return None;
        }
        if self.retry_used {
            self.state = SlotState::Paused;
            return None;
        }
        self.retry_used = true;
        Some(PlayerCommand::RetryPlayAfter {
            delay: PLAY_RETRY_DELAY,
        })
    }

    /// The retry delay elapsed; attempt play again.
    pub fn retry_due(&mut self) -> Option<PlayerCommand> {
        self.current.as_ref().map(|_| PlayerCommand::AttemptPlay)
    }

    pub fn pause(&mut self) {
        if self.state == SlotState::Playing {
            self.state = SlotState::Paused;
        }
    }

    /// Resume a paused or ended item.
    pub fn resume(&mut self) -> Option<PlayerCommand> {
        match self.state {
            SlotState::Paused | SlotState::Ended => {
                if self.state == SlotState::Ended {
                    self.position = 0.0;
                }
                Some(PlayerCommand::AttemptPlay)
            }
            _ => None,
        }
    }

    /// Scrub to an absolute position, clamped into `[0, duration]` when
    /// the duration is known.
    pub fn seek(&mut self, seconds: f32) -> f32 {
        let upper = self.duration.unwrap_or(f32::MAX);
        self.position = seconds.clamp(0.0, upper);
        if self.state == SlotState::Ended && self.position < upper {
            self.state = SlotState::Paused;
        }
        self.position
    }

    /// Seek relative to the current position (skip back/forward buttons).
    pub fn skip(&mut self, delta: f32) -> f32 {
        self.seek(self.position + delta)
    }

    /// One progress-poll step. Advances elapsed time while playing,
    /// saturating at the duration and ending playback there.
    pub fn tick(&mut self) {
        if self.state != SlotState::Playing {
            return;
        }
        self.position += PROGRESS_TICK.as_secs_f32();
        if let Some(total) = self.duration
            && self.position >= total
        {
            self.position = total;
            self.state = SlotState::Ended;
            if let Some(current) = &self.current {
                // Finished items start over next time.
                self.memory.forget(current.id);
            }
        }
    }

    /// Close the slot (mini-player dismissed or navigation away). The
    /// position is remembered for the rest of the session.
    pub fn clear(&mut self) {
        if let Some(record) = self.current.take() {
            if self.state != SlotState::Ended {
                self.memory.remember(record.id, self.position);
            }
        }
        self.state = SlotState::Idle;
        self.position = 0.0;
        self.duration = None;
        self.reload_requested = false;
        self.retry_used = false;
    }

    /// Session memory, exposed for hosts that want to seed it from the
    /// server's persisted progress.
    pub fn memory_mut(&mut self) -> &mut PositionMemory {
        &mut self.memory
    }
}

/// Pick the playable source for a record: audio when present (podcasts),
/// otherwise video, otherwise the live stream URL.
fn source_url(record: &MediaRecord) -> Option<String> {
    record
        .audio_url
        .clone()
        .or_else(|| record.video_url.clone())
        .or_else(|| record.stream_url.clone())
}
