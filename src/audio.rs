//! Audio sink subsystem.
//!
//! A dedicated thread owns the rodio output stream and the active sink.
//! It consumes `AudioCmd`s from an mpsc channel and publishes playback
//! progress, duration and ended/error notifications through a shared
//! `PlaybackHandle`.

mod player;
mod sink;
mod thread;
mod types;

pub use player::*;
pub use types::*;

#[cfg(test)]
mod tests;
