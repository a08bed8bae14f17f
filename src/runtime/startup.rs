use crate::app::{Player, RepeatMode};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;

pub fn apply_playback_defaults(
    player: &mut Player,
    audio_player: &AudioPlayer,
    settings: &config::Settings,
) {
    // Playback defaults
    player.shuffle = settings.playback.shuffle;
    player.repeat = match settings.playback.repeat {
        config::RepeatSetting::Off => RepeatMode::Off,
        config::RepeatSetting::All => RepeatMode::All,
        config::RepeatSetting::One => RepeatMode::One,
    };
    player.set_volume(settings.playback.volume);

    // Initialize the audio thread to match.
    let _ = audio_player.send(AudioCmd::SetVolume(player.effective_volume()));
    let _ = audio_player.send(AudioCmd::SetLoopCurrent(player.repeat == RepeatMode::One));

    // Preload the first track paused so duration and progress are available
    // before the first play press. Sourceless tracks are left alone.
    if player.has_source() {
        let _ = audio_player.send(AudioCmd::Play {
            index: player.current,
            start_paused: true,
        });
    }
}
