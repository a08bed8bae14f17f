use super::*;
use crate::playlist::Track;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn t(title: &str) -> Track {
    Track {
        title: title.into(),
        artist: "Artist".into(),
        image: None,
        source: Some(std::path::PathBuf::from(format!("{title}.mp3"))),
    }
}

fn sourceless(title: &str) -> Track {
    Track {
        title: title.into(),
        artist: "Artist".into(),
        image: None,
        source: None,
    }
}

fn player(n: usize) -> Player {
    Player::new((0..n).map(|i| t(&format!("track-{i}"))).collect())
}

#[test]
fn next_applied_len_times_returns_to_start() {
    for len in 1..=5 {
        let mut p = player(len);
        p.current = 0;
        for _ in 0..len {
            p.next();
        }
        assert_eq!(p.current, 0, "len = {len}");
    }
}

#[test]
fn next_wraps_and_resets_elapsed() {
    let mut p = Player::new(vec![t("A"), t("B")]);
    p.elapsed = Duration::from_secs(42);
    p.duration = Some(Duration::from_secs(180));

    p.next();
    assert_eq!(p.current, 1);
    assert_eq!(p.elapsed, Duration::ZERO);
    assert_eq!(p.duration, None);

    p.next();
    assert_eq!(p.current, 0);
}

#[test]
fn next_does_not_change_play_intent() {
    let mut p = player(3);
    assert!(!p.playing);
    p.next();
    assert!(!p.playing);

    p.playing = true;
    p.next();
    assert!(p.playing);
}

#[test]
fn shuffle_next_never_repeats_current_index() {
    let mut p = player(4);
    p.shuffle = true;
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let before = p.current;
        p.next_with(&mut rng);
        assert_ne!(p.current, before);
    }
}

#[test]
fn shuffle_next_with_single_track_keeps_index() {
    let mut p = player(1);
    p.shuffle = true;
    p.elapsed = Duration::from_secs(9);
    let mut rng = StdRng::seed_from_u64(1);
    p.next_with(&mut rng);
    assert_eq!(p.current, 0);
    assert_eq!(p.elapsed, Duration::ZERO);
}

#[test]
fn previous_early_decrements_modulo_length() {
    let mut p = player(3);
    p.current = 0;
    p.elapsed = Duration::from_secs(3); // at the threshold, not past it
    p.previous();
    assert_eq!(p.current, 2);
    assert_eq!(p.elapsed, Duration::ZERO);
}

#[test]
fn previous_late_restarts_current_track() {
    let mut p = player(3);
    p.current = 1;
    p.elapsed = Duration::from_secs(4);
    p.duration = Some(Duration::from_secs(100));
    p.previous();
    assert_eq!(p.current, 1);
    assert_eq!(p.elapsed, Duration::ZERO);
    // Same track: the known duration survives the restart.
    assert_eq!(p.duration, Some(Duration::from_secs(100)));
}

#[test]
fn repeat_one_track_end_restarts_in_place() {
    let mut p = player(3);
    p.current = 1;
    p.playing = true;
    p.repeat = RepeatMode::One;
    p.elapsed = Duration::from_secs(200);

    p.on_track_ended();
    assert_eq!(p.current, 1);
    assert_eq!(p.elapsed, Duration::ZERO);
    assert!(p.playing);
}

#[test]
fn track_end_without_repeat_one_advances() {
    let mut p = player(2);
    p.playing = true;

    p.repeat = RepeatMode::Off;
    p.on_track_ended();
    assert_eq!(p.current, 1);

    p.repeat = RepeatMode::All;
    p.on_track_ended();
    assert_eq!(p.current, 0);
    assert!(p.playing);
}

#[test]
fn seek_clamps_to_duration() {
    let mut p = player(1);
    p.duration = Some(Duration::from_secs(60));
    p.seek_to(Duration::from_secs(90));
    assert_eq!(p.elapsed, Duration::from_secs(60));
}

#[test]
fn seek_without_known_duration_is_unclamped() {
    let mut p = player(1);
    p.seek_to(Duration::from_secs(90));
    assert_eq!(p.elapsed, Duration::from_secs(90));
}

#[test]
fn scrub_saturates_at_zero_and_clamps_at_duration() {
    let mut p = player(1);
    p.duration = Some(Duration::from_secs(60));
    p.elapsed = Duration::from_secs(5);

    p.scrub(-30);
    assert_eq!(p.elapsed, Duration::ZERO);

    p.scrub(500);
    assert_eq!(p.elapsed, Duration::from_secs(60));
}

#[test]
fn set_volume_zero_implies_muted() {
    let mut p = player(1);
    p.set_volume(0.0);
    assert!(p.muted);
    assert_eq!(p.volume, 0.0);
    assert_eq!(p.effective_volume(), 0.0);
}

#[test]
fn set_volume_clamps_to_unit_range() {
    let mut p = player(1);
    p.set_volume(1.7);
    assert_eq!(p.volume, 1.0);
    assert!(!p.muted);
    p.set_volume(-0.3);
    assert_eq!(p.volume, 0.0);
    assert!(p.muted);
}

#[test]
fn unmuting_from_zero_volume_restores_default() {
    let mut p = player(1);
    p.set_volume(0.0);
    p.toggle_mute();
    assert!(!p.muted);
    assert_eq!(p.volume, UNMUTE_DEFAULT_VOLUME);
    assert_eq!(p.effective_volume(), UNMUTE_DEFAULT_VOLUME);
}

#[test]
fn toggle_mute_preserves_nonzero_volume() {
    let mut p = player(1);
    p.set_volume(0.8);
    p.toggle_mute();
    assert!(p.muted);
    assert_eq!(p.volume, 0.8);
    assert_eq!(p.effective_volume(), 0.0);
    p.toggle_mute();
    assert!(!p.muted);
    assert_eq!(p.volume, 0.8);
}

#[test]
fn play_without_source_records_error_and_stays_paused() {
    let mut p = Player::new(vec![sourceless("silent")]);
    p.toggle_play_pause();
    assert!(!p.playing);
    assert!(p.last_error.as_deref().unwrap().contains("silent"));
}

#[test]
fn retrying_play_clears_previous_error() {
    let mut p = Player::new(vec![sourceless("silent"), t("loud")]);
    p.toggle_play_pause();
    assert!(p.last_error.is_some());

    p.next();
    p.toggle_play_pause();
    assert!(p.playing);
    assert!(p.last_error.is_none());
}

#[test]
fn cycle_repeat_order() {
    let mut p = player(1);
    assert_eq!(p.repeat, RepeatMode::Off);
    p.cycle_repeat();
    assert_eq!(p.repeat, RepeatMode::All);
    p.cycle_repeat();
    assert_eq!(p.repeat, RepeatMode::One);
    p.cycle_repeat();
    assert_eq!(p.repeat, RepeatMode::Off);
}

#[test]
fn empty_playlist_makes_every_operation_a_noop() {
    let mut p = Player::new(Vec::new());
    p.toggle_play_pause();
    p.next();
    p.previous();
    p.on_track_ended();
    p.seek_to(Duration::from_secs(10));
    p.scrub(5);
    assert!(!p.playing);
    assert_eq!(p.current, 0);
    assert_eq!(p.elapsed, Duration::ZERO);
    assert!(p.last_error.is_none());
}

#[test]
fn on_error_forces_playing_off() {
    let mut p = player(2);
    p.playing = true;
    p.on_error("decode failed".to_string());
    assert!(!p.playing);
    assert_eq!(p.last_error.as_deref(), Some("decode failed"));
}

#[test]
fn time_update_is_clamped_once_duration_known() {
    let mut p = player(1);
    p.on_duration(Some(Duration::from_secs(30)));
    p.on_time_update(Duration::from_secs(45));
    assert_eq!(p.elapsed, Duration::from_secs(30));
}

#[test]
fn toggle_like_is_cosmetic() {
    let mut p = player(2);
    p.toggle_like();
    assert!(p.liked);
    // Not reset by track changes; it is a pure session toggle.
    p.next();
    assert!(p.liked);
    p.toggle_like();
    assert!(!p.liked);
}
