use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::model::{Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};

/// Result of a successful playlist fetch. An empty playlist is a valid,
/// user-visible state and is kept distinct from a load failure.
#[derive(Debug, PartialEq)]
pub enum PlaylistOutcome {
    Loaded(Vec<Track>),
    Empty,
}

#[derive(Debug)]
pub enum PlaylistError {
    /// The playlist file could not be read.
    Read(PathBuf, std::io::Error),
    /// The playlist file is not a valid JSON array of track records.
    Parse(PathBuf, serde_json::Error),
}

impl fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistError::Read(path, e) => {
                write!(f, "failed to read playlist {}: {e}", path.display())
            }
            PlaylistError::Parse(path, e) => {
                write!(f, "failed to parse playlist {}: {e}", path.display())
            }
        }
    }
}

impl std::error::Error for PlaylistError {}

/// Raw on-disk track record. All fields are optional; unknown fields
/// (e.g. `id`) are ignored.
#[derive(Debug, Deserialize)]
struct RawTrack {
    title: Option<String>,
    artist: Option<String>,
    image: Option<String>,
    mp3: Option<String>,
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Resolve a track source relative to the playlist file's directory.
/// Absolute paths pass through unchanged.
fn resolve_source(playlist_path: &Path, mp3: &str) -> PathBuf {
    let p = Path::new(mp3);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match playlist_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(p),
        _ => p.to_path_buf(),
    }
}

fn track_from_raw(playlist_path: &Path, raw: RawTrack) -> Track {
    Track {
        title: non_blank(raw.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        artist: non_blank(raw.artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        image: non_blank(raw.image),
        source: non_blank(raw.mp3).map(|s| resolve_source(playlist_path, &s)),
    }
}

/// Load the playlist file at `path`. Performed exactly once at startup;
/// a failure is terminal for the session.
pub fn load_playlist(path: &Path) -> Result<PlaylistOutcome, PlaylistError> {
    let data = fs::read_to_string(path)
        .map_err(|e| PlaylistError::Read(path.to_path_buf(), e))?;

    let raw: Vec<RawTrack> = serde_json::from_str(&data)
        .map_err(|e| PlaylistError::Parse(path.to_path_buf(), e))?;

    if raw.is_empty() {
        return Ok(PlaylistOutcome::Empty);
    }

    let tracks = raw
        .into_iter()
        .map(|r| track_from_raw(path, r))
        .collect();
    Ok(PlaylistOutcome::Loaded(tracks))
}
