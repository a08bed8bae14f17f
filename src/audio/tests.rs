use std::time::Duration;

use super::types::{PlaybackInfo, clamp_to_duration};

#[test]
fn clamp_to_duration_caps_at_known_total() {
    let total = Some(Duration::from_secs(60));
    assert_eq!(
        clamp_to_duration(Duration::from_secs(90), total),
        Duration::from_secs(60)
    );
    assert_eq!(
        clamp_to_duration(Duration::from_secs(30), total),
        Duration::from_secs(30)
    );
}

#[test]
fn clamp_to_duration_passes_through_when_unknown() {
    assert_eq!(
        clamp_to_duration(Duration::from_secs(90), None),
        Duration::from_secs(90)
    );
}

#[test]
fn playback_info_starts_unloaded() {
    let info = PlaybackInfo::default();
    assert_eq!(info.index, None);
    assert_eq!(info.elapsed, Duration::ZERO);
    assert_eq!(info.duration, None);
    assert!(!info.playing);
    assert_eq!(info.ended_count, 0);
    assert_eq!(info.error_count, 0);
    assert!(info.last_error.is_none());
}
