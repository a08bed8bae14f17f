//! Playback controller types: `Player`, `RepeatMode` and `PlaybackStatus`.
//!
//! `Player` holds the loaded playlist plus all transport state. Every
//! operation is a pure state transition; the runtime event loop mirrors the
//! resulting state into audio-thread commands and the MPRIS service.

use std::time::Duration;

use rand::Rng;

use crate::playlist::Track;

/// Pressing "previous" after this much elapsed time restarts the current
/// track instead of moving to the previous one.
pub const PREV_RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Volume restored when unmuting from a zero volume.
pub const UNMUTE_DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    /// No repeat indicator; auto-advance still wraps the playlist.
    Off,
    /// Wrap around at the end of the playlist.
    All,
    /// Repeat the current track when it ends.
    One,
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Off
    }
}

/// Coarse status as exposed over MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The playback controller model.
pub struct Player {
    pub tracks: Vec<Track>,
    /// Index of the active track. Only meaningful when `tracks` is non-empty.
    pub current: usize,
    /// Play intent. Never true while the active track has no source.
    pub playing: bool,
    pub elapsed: Duration,
    /// `None` until the sink reports the decoded duration.
    pub duration: Option<Duration>,

    pub volume: f32,
    pub muted: bool,

    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// Cosmetic per-session flag, never persisted.
    pub liked: bool,

    /// Most recent non-fatal playback error, shown beneath the controls.
    pub last_error: Option<String>,
}

impl Player {
    /// Create a new `Player` over the loaded `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: 0,
            playing: false,
            elapsed: Duration::ZERO,
            duration: None,
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::default(),
            liked: false,
            last_error: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Whether the active track can be played at all.
    pub fn has_source(&self) -> bool {
        self.current_track().map(Track::has_source).unwrap_or(false)
    }

    /// The volume to hand to the audio sink (mute maps to zero).
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Flip the play intent. A track without a source refuses to start and
    /// records an inline error instead; trying again clears the old error.
    /// Returns whether the intent actually changed.
    pub fn toggle_play_pause(&mut self) -> bool {
        if !self.has_tracks() {
            return false;
        }
        if !self.has_source() {
            self.playing = false;
            let title = &self.tracks[self.current].title;
            self.last_error = Some(format!("no audio source for \"{title}\""));
            return false;
        }
        self.last_error = None;
        self.playing = !self.playing;
        true
    }

    /// Advance to the next track using the thread-local RNG for shuffle.
    pub fn next(&mut self) {
        self.next_with(&mut rand::thread_rng());
    }

    /// Advance to the next track. With shuffle on and more than one track,
    /// picks a uniformly random index different from the current one; with
    /// a single track the index pick degenerates to a no-op. Play intent is
    /// left unchanged.
    pub fn next_with(&mut self, rng: &mut impl Rng) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        if self.shuffle {
            if len > 1 {
                // Only the immediate repeat is excluded; earlier picks may
                // come around again (known limitation).
                let mut target = rng.gen_range(0..len - 1);
                if target >= self.current {
                    target += 1;
                }
                self.current = target;
            }
        } else {
            self.current = (self.current + 1) % len;
        }
        self.begin_track();
    }

    /// Go back. Past the restart threshold this re-seeks the current track
    /// to zero; earlier than that it steps to the previous track.
    pub fn previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        if self.elapsed > PREV_RESTART_THRESHOLD {
            self.elapsed = Duration::ZERO;
            return;
        }
        self.current = (self.current + len - 1) % len;
        self.begin_track();
    }

    /// End-of-track event. Repeat-one keeps the index and restarts (the sink
    /// loops natively; this mirror is the controller's view of that); every
    /// other mode delegates to `next()`, shuffle included.
    pub fn on_track_ended(&mut self) {
        if !self.has_tracks() {
            return;
        }
        if self.repeat == RepeatMode::One {
            self.elapsed = Duration::ZERO;
            self.playing = true;
            return;
        }
        self.next();
    }

    /// Absolute seek, clamped to the known duration. Updates `elapsed`
    /// optimistically, before the sink confirms.
    pub fn seek_to(&mut self, pos: Duration) {
        if !self.has_tracks() {
            return;
        }
        self.elapsed = match self.duration {
            Some(total) => pos.min(total),
            None => pos,
        };
    }

    /// Relative seek in seconds; saturates at zero, clamps at the duration.
    pub fn scrub(&mut self, delta_secs: i64) {
        if !self.has_tracks() {
            return;
        }
        let target = if delta_secs < 0 {
            self.elapsed
                .saturating_sub(Duration::from_secs(delta_secs.unsigned_abs()))
        } else {
            self.elapsed + Duration::from_secs(delta_secs as u64)
        };
        self.seek_to(target);
    }

    /// Set the volume, clamped to `[0, 1]`. Zero volume means muted.
    pub fn set_volume(&mut self, v: f32) {
        self.volume = v.clamp(0.0, 1.0);
        self.muted = self.volume == 0.0;
    }

    /// Flip mute. Unmuting from a zero volume restores a usable default.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            if self.volume == 0.0 {
                self.volume = UNMUTE_DEFAULT_VOLUME;
            }
        } else {
            self.muted = true;
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Cycle `repeat` through `Off -> All -> One`.
    pub fn cycle_repeat(&mut self) {
        self.repeat = match self.repeat {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        };
    }

    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
    }

    /// Mirror the sink's reported position into the controller.
    pub fn on_time_update(&mut self, elapsed: Duration) {
        self.elapsed = match self.duration {
            Some(total) => elapsed.min(total),
            None => elapsed,
        };
    }

    /// Mirror the sink's reported duration; re-clamps `elapsed`.
    pub fn on_duration(&mut self, duration: Option<Duration>) {
        self.duration = duration;
        if let Some(total) = self.duration {
            self.elapsed = self.elapsed.min(total);
        }
    }

    /// A sink command failed or the track could not be loaded. Recorded and
    /// surfaced inline; playback intent is forced off so the user can retry.
    pub fn on_error(&mut self, message: String) {
        self.last_error = Some(message);
        self.playing = false;
    }

    /// Reset per-track progress when the active track changes.
    fn begin_track(&mut self) {
        self.elapsed = Duration::ZERO;
        self.duration = None;
    }
}
