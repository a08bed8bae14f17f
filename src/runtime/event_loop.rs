use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{PlaybackStatus, Player, RepeatMode};
use crate::audio::{AudioCmd, AudioPlayer, PlaybackHandle, PlaybackInfo};
use crate::config;
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-seen ended generation from the audio thread.
    pub last_ended_count: u64,
    /// Last-seen error generation from the audio thread.
    pub last_error_count: u64,
    /// Last-known loaded index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback status as emitted to MPRIS.
    pub last_mpris_status: PlaybackStatus,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            last_ended_count: 0,
            last_error_count: 0,
            last_mpris_index: None,
            last_mpris_status: PlaybackStatus::Stopped,
        }
    }
}

/// Main terminal event loop: mirrors audio-thread state into the controller,
/// draws the UI, and handles MPRIS commands and keyboard input. Returns
/// `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player,
    audio_player: &AudioPlayer,
    playback: &PlaybackHandle,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Mirror sink events into the controller: time updates, duration,
        // and the discrete ended/error notifications.
        let snapshot: Option<PlaybackInfo> = playback.lock().ok().map(|info| info.clone());
        let mut loaded_index: Option<usize> = None;
        if let Some(info) = snapshot {
            loaded_index = info.index;

            if info.error_count > state.last_error_count {
                state.last_error_count = info.error_count;
                player.on_error(
                    info.last_error
                        .clone()
                        .unwrap_or_else(|| "playback error".to_string()),
                );
            }

            if info.ended_count > state.last_ended_count {
                state.last_ended_count = info.ended_count;
                // End of track: the controller decides what follows (repeat
                // one is already handled natively by the sink's loop flag).
                player.on_track_ended();
                let _ = audio_player.send(AudioCmd::Play {
                    index: player.current,
                    start_paused: !player.playing,
                });
            } else if info.index == Some(player.current) {
                player.on_duration(info.duration);
                player.on_time_update(info.elapsed);
                player.playing = info.playing;
            }
        }

        // Keep MPRIS in sync even when changes come from media keys or
        // auto-advance.
        let status = if loaded_index.is_none() {
            PlaybackStatus::Stopped
        } else if player.playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        };
        if loaded_index != state.last_mpris_index || status != state.last_mpris_status {
            update_mpris(mpris, player, playback);
            state.last_mpris_index = loaded_index;
            state.last_mpris_status = status;
        }

        terminal.draw(|f| ui::draw(f, player, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, player, audio_player, playback, mpris)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(
                    key,
                    settings,
                    player,
                    audio_player,
                    playback,
                    mpris,
                    control_tx,
                )? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Blocking full-screen loop for playlist load Error/Empty states. No
/// transport exists here; only quitting works.
pub fn run_blocking(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    title: &str,
    message: &str,
    is_error: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw_blocking(f, title, message, is_error))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
    }
}

/// Flip play/pause and hand the resulting intent to the audio thread.
fn do_play_pause(player: &mut Player, audio_player: &AudioPlayer, playback: &PlaybackHandle) {
    let had_error = player.last_error.is_some();
    if !player.toggle_play_pause() {
        return;
    }

    let loaded = playback.lock().ok().and_then(|info| info.index);
    if player.playing {
        if loaded == Some(player.current) && !had_error {
            let _ = audio_player.send(AudioCmd::TogglePause);
        } else {
            // Not loaded yet, or retrying after a failed load.
            let _ = audio_player.send(AudioCmd::Play {
                index: player.current,
                start_paused: false,
            });
        }
    } else {
        let _ = audio_player.send(AudioCmd::TogglePause);
    }
}

fn do_next(player: &mut Player, audio_player: &AudioPlayer) {
    if !player.has_tracks() {
        return;
    }
    player.next();
    let _ = audio_player.send(AudioCmd::Play {
        index: player.current,
        start_paused: !player.playing,
    });
}

fn do_previous(player: &mut Player, audio_player: &AudioPlayer) {
    if !player.has_tracks() {
        return;
    }
    let before = player.current;
    player.previous();
    if player.current == before {
        // Restart of the current track, either because the elapsed time was
        // past the threshold or because the playlist has a single entry.
        let _ = audio_player.send(AudioCmd::SeekTo(Duration::ZERO));
    } else {
        let _ = audio_player.send(AudioCmd::Play {
            index: player.current,
            start_paused: !player.playing,
        });
    }
}

fn do_scrub(player: &mut Player, audio_player: &AudioPlayer, delta_secs: i64) {
    if !player.has_source() {
        return;
    }
    player.scrub(delta_secs);
    let _ = audio_player.send(AudioCmd::SeekTo(player.elapsed));
}

fn do_volume_step(player: &mut Player, audio_player: &AudioPlayer, step: f32) {
    player.set_volume(player.volume + step);
    let _ = audio_player.send(AudioCmd::SetVolume(player.effective_volume()));
}

fn do_toggle_mute(player: &mut Player, audio_player: &AudioPlayer) {
    player.toggle_mute();
    let _ = audio_player.send(AudioCmd::SetVolume(player.effective_volume()));
}

fn do_cycle_repeat(player: &mut Player, audio_player: &AudioPlayer) {
    player.cycle_repeat();
    let _ = audio_player.send(AudioCmd::SetLoopCurrent(player.repeat == RepeatMode::One));
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    player: &mut Player,
    audio_player: &AudioPlayer,
    playback: &PlaybackHandle,
    mpris: &MprisHandle,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => {
            if !player.playing {
                do_play_pause(player, audio_player, playback);
                update_mpris(mpris, player, playback);
            }
        }
        ControlCmd::Pause => {
            if player.playing {
                do_play_pause(player, audio_player, playback);
                update_mpris(mpris, player, playback);
            }
        }
        ControlCmd::PlayPause => {
            do_play_pause(player, audio_player, playback);
            update_mpris(mpris, player, playback);
        }
        ControlCmd::Stop => {
            let _ = audio_player.send(AudioCmd::Stop);
            player.playing = false;
            player.elapsed = Duration::ZERO;
            update_mpris(mpris, player, playback);
        }
        ControlCmd::Next => {
            do_next(player, audio_player);
            update_mpris(mpris, player, playback);
        }
        ControlCmd::Prev => {
            do_previous(player, audio_player);
            update_mpris(mpris, player, playback);
        }
    }

    Ok(false)
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut Player,
    audio_player: &AudioPlayer,
    playback: &PlaybackHandle,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
    let step = settings.controls.volume_step;

    match key.code {
        KeyCode::Char('q') => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            // Behave like MPRIS PlayPause.
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            do_scrub(player, audio_player, scrub);
        }
        KeyCode::Char('H') => {
            do_scrub(player, audio_player, -scrub);
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
            do_volume_step(player, audio_player, step);
        }
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('-') => {
            do_volume_step(player, audio_player, -step);
        }
        KeyCode::Char('m') => {
            do_toggle_mute(player, audio_player);
        }
        KeyCode::Char('s') => {
            player.toggle_shuffle();
        }
        KeyCode::Char('r') => {
            do_cycle_repeat(player, audio_player);
        }
        KeyCode::Char('f') => {
            player.toggle_like();
        }
        _ => {}
    }

    // Metadata (e.g. duration) may have changed along with the status.
    update_mpris(mpris, player, playback);

    Ok(false)
}
