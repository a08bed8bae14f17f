//! Audio-related small types and handles.
//!
//! Commands consumed by the audio thread, the shared playback-info struct
//! it publishes, and the handle alias used to pass it around.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Load the track at `index` and start it, optionally paused.
    Play { index: usize, start_paused: bool },
    /// Toggle pause/resume of the loaded sink.
    TogglePause,
    /// Seek the loaded track to an absolute position.
    SeekTo(Duration),
    /// Set the sink volume in `[0, 1]`; applies to future sinks too.
    SetVolume(f32),
    /// When set, the sink replays the current track itself when it drains
    /// instead of reporting an ended event.
    SetLoopCurrent(bool),
    /// Stop playback and unload the sink.
    Stop,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the event loop.
///
/// `ended_count` and `error_count` are monotonic generation counters: the
/// event loop compares them against its last-seen values to turn shared
/// state into discrete ended/error events.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Index of the loaded track (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the loaded track.
    pub elapsed: Duration,
    /// Decoded duration, when the decoder reports one.
    pub duration: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Bumped every time a track plays to its end without the loop flag.
    pub ended_count: u64,
    /// Bumped every time a load/command failure is recorded.
    pub error_count: u64,
    /// Message for the most recent failure.
    pub last_error: Option<String>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
            ended_count: 0,
            error_count: 0,
            last_error: None,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Clamp a position to the known track duration, when there is one.
pub(crate) fn clamp_to_duration(target: Duration, total: Option<Duration>) -> Duration {
    match total {
        Some(total) => target.min(total),
        None => target,
    }
}
