//! UI rendering helpers for the terminal user interface.
//!
//! Rendering is a pure function of the `Player` state: nothing here mutates
//! the controller. `draw` renders the normal player screen; `draw_blocking`
//! renders the full-screen playlist Error/Empty states.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{Player, RepeatMode};
use crate::config::{ControlsSettings, TimeField, UiSettings};

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the progress time text (elapsed/total/remaining) per `UiSettings`.
fn progress_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.time_separator))
    }
}

/// Render the controls help text. Transport entries that cannot work in the
/// current state (a single track, a track without a source) are marked.
fn controls_text(player: &Player, controls: &ControlsSettings) -> String {
    let single = player.tracks.len() <= 1;
    let no_source = !player.has_source();

    let mut entries: Vec<String> = Vec::new();
    entries.push(if no_source {
        "[space/p] play/pause (no source)".to_string()
    } else {
        "[space/p] play/pause".to_string()
    });
    entries.push(if single {
        "[h/l] prev/next (single track)".to_string()
    } else {
        "[h/l] prev/next".to_string()
    });
    entries.push(if no_source {
        format!("[H/L] scrub -/+{}s (no source)", controls.scrub_seconds)
    } else {
        format!("[H/L] scrub -/+{}s", controls.scrub_seconds)
    });
    entries.push("[j/k] volume".to_string());
    entries.push("[m] mute".to_string());
    entries.push("[s] shuffle".to_string());
    entries.push("[r] repeat".to_string());
    entries.push("[f] like".to_string());
    entries.push("[q] quit".to_string());

    entries.join(" | ")
}

fn repeat_text(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "Repeat: off",
        RepeatMode::All => "Repeat: all",
        RepeatMode::One => "Repeat: one",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the player screen from `player` state and settings.
pub fn draw(
    frame: &mut Frame,
    player: &Player,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Track box: title, artist, artwork label
    {
        let (title, artist, art) = match player.current_track() {
            Some(track) => (
                track.title.clone(),
                track.artist.clone(),
                track
                    .image
                    .clone()
                    .unwrap_or_else(|| "(no artwork)".to_string()),
            ),
            None => ("-".to_string(), "-".to_string(), "(no artwork)".to_string()),
        };

        let lines = vec![
            Line::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(artist, Style::default().add_modifier(Modifier::DIM)),
            Line::styled(
                format!("art: {art}"),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ];
        let track_box = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        " track {}/{} ",
                        player.current + 1,
                        player.tracks.len()
                    ))
                    .padding(Padding {
                        left: 1,
                        right: 1,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(track_box, chunks[1]);
    }

    // Progress gauge (only meaningful with a playable source)
    if player.has_source() {
        let ratio = match player.duration {
            Some(total) if !total.is_zero() => {
                (player.elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        let label = progress_time_text(player.elapsed, player.duration, ui_settings)
            .unwrap_or_else(|| format_mmss(player.elapsed));
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" progress "))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, chunks[2]);
    } else {
        let placeholder = Paragraph::new("no audio source")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL).title(" progress "));
        frame.render_widget(placeholder, chunks[2]);
    }

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(if player.playing {
            "Playing".to_string()
        } else {
            "Paused".to_string()
        });

        if player.shuffle {
            parts.push("Shuffle: ON".to_string());
        } else {
            parts.push("Shuffle: OFF".to_string());
        }

        parts.push(repeat_text(player.repeat).to_string());

        if player.muted {
            parts.push("Vol: muted".to_string());
        } else {
            parts.push(format!("Vol: {:.0}%", player.volume * 100.0));
        }

        if player.liked {
            parts.push("Liked".to_string());
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[3]);

    // Controls footer
    let footer = Paragraph::new(controls_text(player, controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    // Inline, non-blocking error line beneath the controls
    if let Some(err) = &player.last_error {
        let error_line = Paragraph::new(err.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error_line, chunks[6]);
    }
}

/// Render a full-screen blocking message (playlist load Error or Empty).
/// Only quitting works from here.
pub fn draw_blocking(frame: &mut Frame, title: &str, message: &str, is_error: bool) {
    let area = centered_rect_sized(60, 7, frame.area());

    let style = if is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let body = format!("{message}\n\n[q] quit");
    let paragraph = Paragraph::new(body)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "))
                .title_alignment(Alignment::Center)
                .padding(Padding {
                    left: 1,
                    right: 1,
                    top: 1,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
