use crate::app::{PlaybackStatus, Player};
use crate::audio::PlaybackHandle;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, player: &Player, playback: &PlaybackHandle) {
    let (loaded_index, duration) = playback
        .lock()
        .ok()
        .map(|info| (info.index, info.duration))
        .unwrap_or((None, None));

    let track = loaded_index.and_then(|i| player.tracks.get(i));
    mpris.set_track_metadata(loaded_index, track, duration);

    let status = if loaded_index.is_none() {
        PlaybackStatus::Stopped
    } else if player.playing {
        PlaybackStatus::Playing
    } else {
        PlaybackStatus::Paused
    };
    mpris.set_playback(status);
}
