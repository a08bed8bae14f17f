use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_playlist(dir: &std::path::Path, body: &str) -> PathBuf {
    let path = dir.join("playlist.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn load_full_records() {
    let dir = tempdir().unwrap();
    let path = write_playlist(
        dir.path(),
        r#"[
            {"title": "A", "artist": "X", "image": "a.png", "mp3": "a.mp3"},
            {"title": "B", "artist": "Y", "mp3": "b.mp3"}
        ]"#,
    );

    let outcome = load_playlist(&path).unwrap();
    let PlaylistOutcome::Loaded(tracks) = outcome else {
        panic!("expected Loaded");
    };
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[0].artist, "X");
    assert_eq!(tracks[0].image.as_deref(), Some("a.png"));
    assert_eq!(tracks[0].source, Some(dir.path().join("a.mp3")));
    assert_eq!(tracks[1].image, None);
}

#[test]
fn missing_fields_get_placeholders() {
    let dir = tempdir().unwrap();
    let path = write_playlist(dir.path(), r#"[{"mp3": "only-audio.mp3"}]"#);

    let PlaylistOutcome::Loaded(tracks) = load_playlist(&path).unwrap() else {
        panic!("expected Loaded");
    };
    assert_eq!(tracks[0].title, UNKNOWN_TITLE);
    assert_eq!(tracks[0].artist, UNKNOWN_ARTIST);
    assert!(tracks[0].has_source());
}

#[test]
fn missing_mp3_disables_playback() {
    let dir = tempdir().unwrap();
    let path = write_playlist(dir.path(), r#"[{"title": "No Audio"}]"#);

    let PlaylistOutcome::Loaded(tracks) = load_playlist(&path).unwrap() else {
        panic!("expected Loaded");
    };
    assert!(!tracks[0].has_source());
}

#[test]
fn blank_strings_count_as_missing() {
    let dir = tempdir().unwrap();
    let path = write_playlist(
        dir.path(),
        r#"[{"title": "   ", "artist": "", "image": " ", "mp3": ""}]"#,
    );

    let PlaylistOutcome::Loaded(tracks) = load_playlist(&path).unwrap() else {
        panic!("expected Loaded");
    };
    assert_eq!(tracks[0].title, UNKNOWN_TITLE);
    assert_eq!(tracks[0].artist, UNKNOWN_ARTIST);
    assert_eq!(tracks[0].image, None);
    assert_eq!(tracks[0].source, None);
}

#[test]
fn absolute_sources_pass_through() {
    let dir = tempdir().unwrap();
    let path = write_playlist(dir.path(), r#"[{"mp3": "/music/z.mp3"}]"#);

    let PlaylistOutcome::Loaded(tracks) = load_playlist(&path).unwrap() else {
        panic!("expected Loaded");
    };
    assert_eq!(tracks[0].source, Some(PathBuf::from("/music/z.mp3")));
}

#[test]
fn unknown_fields_are_ignored() {
    let dir = tempdir().unwrap();
    let path = write_playlist(
        dir.path(),
        r#"[{"id": 7, "title": "T", "mp3": "t.mp3", "bpm": 120}]"#,
    );

    let PlaylistOutcome::Loaded(tracks) = load_playlist(&path).unwrap() else {
        panic!("expected Loaded");
    };
    assert_eq!(tracks[0].title, "T");
}

#[test]
fn empty_array_is_empty_not_error() {
    let dir = tempdir().unwrap();
    let path = write_playlist(dir.path(), "[]");
    assert_eq!(load_playlist(&path).unwrap(), PlaylistOutcome::Empty);
}

#[test]
fn invalid_json_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = write_playlist(dir.path(), "{ not json");
    match load_playlist(&path) {
        Err(PlaylistError::Parse(p, _)) => assert_eq!(p, path),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");
    match load_playlist(&path) {
        Err(PlaylistError::Read(p, _)) => assert_eq!(p, path),
        other => panic!("expected Read error, got {other:?}"),
    }
}

#[test]
fn track_display_joins_artist_and_title() {
    let t = Track {
        title: "Song".into(),
        artist: "Band".into(),
        image: None,
        source: None,
    };
    assert_eq!(t.display(), "Band - Song");
}
