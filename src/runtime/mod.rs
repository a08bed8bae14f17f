use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Player;
use crate::audio::AudioPlayer;
use crate::mpris::ControlCmd;
use crate::playlist::{self, PlaylistOutcome};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    // CLI argument wins over the configured playlist path.
    let playlist_path = env::args()
        .nth(1)
        .unwrap_or_else(|| settings.playlist.path.clone());
    let playlist_path = PathBuf::from(playlist_path);

    // The playlist is fetched exactly once; a failure is terminal for the
    // session and ends up on the blocking screen.
    let loaded = playlist::load_playlist(&playlist_path);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = match loaded {
        Err(e) => event_loop::run_blocking(&mut terminal, "playlist error", &e.to_string(), true),
        Ok(PlaylistOutcome::Empty) => event_loop::run_blocking(
            &mut terminal,
            "empty playlist",
            &format!("{} contains no tracks", playlist_path.display()),
            false,
        ),
        Ok(PlaylistOutcome::Loaded(tracks)) => {
            let audio_player = AudioPlayer::new(tracks.clone());
            let mut player = Player::new(tracks);
            let playback = audio_player.playback_handle();

            let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
            let mpris = crate::mpris::spawn_mpris(control_tx.clone());

            startup::apply_playback_defaults(&mut player, &audio_player, &settings);
            mpris_sync::update_mpris(&mpris, &player, &playback);

            let mut state = event_loop::EventLoopState::new();
            event_loop::run(
                &mut terminal,
                &settings,
                &mut player,
                &audio_player,
                &playback,
                &mpris,
                &control_tx,
                &control_rx,
                &mut state,
            )
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
