//! Application module: exposes the playback controller used by the TUI
//! and runtime.
//!
//! The `Player` model lives in `app::model` and owns the current track
//! index, play intent, shuffle/repeat mode and volume state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
