//! Playlist loading: exposes the track model and the JSON loader.
//!
//! The playlist is fetched exactly once at startup; the outcome is either a
//! non-empty track list, an explicitly empty playlist, or a load error.

mod load;
mod model;

pub use load::*;
pub use model::*;

#[cfg(test)]
mod tests;
