use std::path::PathBuf;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One entry of the loaded playlist. Immutable after load.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Artwork location, surfaced as text in the track box.
    pub image: Option<String>,
    /// Audio file path. `None` disables playback for this track.
    pub source: Option<PathBuf>,
}

impl Track {
    /// Whether this track can be handed to the audio thread at all.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn display(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}
