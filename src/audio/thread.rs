use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::playlist::Track;

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle, clamp_to_duration};

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                // No output device: playback stays disabled for the session,
                // but the rest of the app keeps running.
                if let Ok(mut info) = playback_info.lock() {
                    info.last_error = Some(format!("no audio output device: {e}"));
                    info.error_count += 1;
                    info.playing = false;
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut index: Option<usize> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;

        // Track start time and accumulated elapsed while paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;
        let mut total: Option<Duration> = None;

        let mut volume: f32 = 1.0;
        let mut loop_current = false;

        #[allow(clippy::too_many_arguments)]
        fn do_play(
            i: usize,
            start_paused: bool,
            stream: &rodio::OutputStream,
            tracks: &[Track],
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            total: &mut Option<Duration>,
            volume: f32,
            playback_info: &PlaybackHandle,
        ) {
            let track = &tracks[i];

            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *started_at = None;
            *accumulated = Duration::ZERO;
            *total = None;
            *index = Some(i);
            *paused = true;

            let Some(src) = track.source.as_ref() else {
                if let Ok(mut info) = playback_info.lock() {
                    info.index = Some(i);
                    info.elapsed = Duration::ZERO;
                    info.duration = None;
                    info.playing = false;
                    info.last_error = Some(format!("no audio source for \"{}\"", track.title));
                    info.error_count += 1;
                }
                return;
            };

            match create_sink_at(stream, src, Duration::ZERO) {
                Ok((new_sink, duration)) => {
                    new_sink.set_volume(volume);
                    if !start_paused {
                        new_sink.play();
                        *started_at = Some(Instant::now());
                    }
                    *sink = Some(new_sink);
                    *paused = start_paused;
                    *total = duration;

                    if let Ok(mut info) = playback_info.lock() {
                        info.index = Some(i);
                        info.elapsed = Duration::ZERO;
                        info.duration = duration;
                        info.playing = !start_paused;
                        info.last_error = None;
                    }
                }
                Err(msg) => {
                    if let Ok(mut info) = playback_info.lock() {
                        info.index = Some(i);
                        info.elapsed = Duration::ZERO;
                        info.duration = None;
                        info.playing = false;
                        info.last_error = Some(msg);
                        info.error_count += 1;
                    }
                }
            }
        }

        fn do_stop(
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            total: &mut Option<Duration>,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *index = None;
            *paused = true;
            *started_at = None;
            *accumulated = Duration::ZERO;
            *total = None;
            if let Ok(mut info) = playback_info.lock() {
                info.index = None;
                info.elapsed = Duration::ZERO;
                info.duration = None;
                info.playing = false;
            }
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            let start = sink.volume();
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(start * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play {
                        index: i,
                        start_paused,
                    } => {
                        if i < tracks.len() {
                            do_play(
                                i,
                                start_paused,
                                &stream,
                                &tracks,
                                &mut sink,
                                &mut index,
                                &mut paused,
                                &mut started_at,
                                &mut accumulated,
                                &mut total,
                                volume,
                                &playback_info,
                            );
                        }
                    }

                    AudioCmd::TogglePause => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                started_at = Some(Instant::now());
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = true;
                                }
                            } else {
                                s.pause();
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                            paused = !paused;
                        }
                    }

                    AudioCmd::SeekTo(target) => {
                        // Scrubbing: rebuild the current sink and skip into
                        // the file via `Source::skip_duration`.
                        let Some(i) = index else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }
                        let Some(src) = tracks[i].source.clone() else {
                            continue;
                        };

                        let target = clamp_to_duration(target, total);

                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        match create_sink_at(&stream, &src, target) {
                            Ok((new_sink, duration)) => {
                                new_sink.set_volume(volume);
                                if paused {
                                    started_at = None;
                                } else {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                }
                                sink = Some(new_sink);
                                accumulated = target;
                                total = duration;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = target;
                                    info.duration = duration;
                                }
                            }
                            Err(msg) => {
                                sink = None;
                                paused = true;
                                started_at = None;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                    info.last_error = Some(msg);
                                    info.error_count += 1;
                                }
                            }
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    AudioCmd::SetLoopCurrent(b) => {
                        loop_current = b;
                    }

                    AudioCmd::Stop => {
                        do_stop(
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &mut started_at,
                            &mut accumulated,
                            &mut total,
                            &playback_info,
                        );
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            if !paused {
                                fade_out_sink(s, fade_out_ms);
                            }
                            s.stop();
                        }
                        // Update shared state so UI/MPRIS don't keep showing
                        // Playing after shutdown.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: publish elapsed time and detect the end
                    // of the current track.
                    let elapsed = clamp_to_duration(
                        accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed()),
                        total,
                    );
                    if sink.is_some() {
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = elapsed;
                        }
                    }

                    let drained = sink.as_ref().map(|s| !paused && s.empty()).unwrap_or(false);
                    if drained {
                        if loop_current {
                            // Native repeat-one: replay in place.
                            if let Some(i) = index {
                                do_play(
                                    i,
                                    false,
                                    &stream,
                                    &tracks,
                                    &mut sink,
                                    &mut index,
                                    &mut paused,
                                    &mut started_at,
                                    &mut accumulated,
                                    &mut total,
                                    volume,
                                    &playback_info,
                                );
                            }
                        } else {
                            // Report the ended event and wait for the next
                            // Play command from the controller.
                            sink = None;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            if let Ok(mut info) = playback_info.lock() {
                                info.ended_count += 1;
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
