use std::path::Path;
use std::time::Duration;

use super::clock::{PlaybackClock, clamp_seek};
use super::player::fade_millis;
use super::sink::probe_duration;
use super::types::{LoadId, MediaEvent};

#[test]
fn clamp_seek_bounds_to_known_duration() {
    let d = Some(Duration::from_secs(130));
    assert_eq!(clamp_seek(Duration::from_secs(10), d), Duration::from_secs(10));
    assert_eq!(clamp_seek(Duration::from_secs(500), d), Duration::from_secs(130));
    assert_eq!(clamp_seek(Duration::from_secs(500), None), Duration::from_secs(500));
}

#[test]
fn clock_reset_sets_position_and_stops() {
    let mut c = PlaybackClock::default();
    c.start();
    assert!(c.is_running());
    c.reset(Duration::from_secs(42));
    assert!(!c.is_running());
    assert_eq!(c.elapsed(), Duration::from_secs(42));
}

#[test]
fn clock_accumulates_across_pause() {
    let mut c = PlaybackClock::default();
    c.reset(Duration::from_secs(5));
    c.start();
    c.pause();
    let after_pause = c.elapsed();
    assert!(after_pause >= Duration::from_secs(5));
    // Paused clocks do not move.
    assert_eq!(c.elapsed(), after_pause);
    // Starting twice keeps the first start instant.
    c.start();
    c.start();
    assert!(c.elapsed() >= after_pause);
}

#[test]
fn load_ids_increase() {
    let a = LoadId::default();
    assert!(a.next() > a);
    assert_eq!(a.next().next(), LoadId(2));
}

#[test]
fn every_event_reports_its_load() {
    let l = LoadId(7);
    let events = [
        MediaEvent::MetadataReady { load: l, duration: None },
        MediaEvent::Playing { load: l },
        MediaEvent::Paused { load: l },
        MediaEvent::Position { load: l, elapsed: Duration::ZERO },
        MediaEvent::Rejected { load: l, reason: "x".into() },
        MediaEvent::Ended { load: l },
    ];
    for ev in events {
        assert_eq!(ev.load(), l);
    }
}

#[test]
fn probe_duration_is_none_for_unreadable_files() {
    assert_eq!(probe_duration(Path::new("/definitely/not/here.mp3")), None);

    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("junk.mp3");
    std::fs::write(&p, b"not a real mp3").unwrap();
    assert_eq!(probe_duration(&p), None);
}

#[test]
fn fade_millis_saturates_instead_of_wrapping() {
    assert_eq!(fade_millis(Duration::from_millis(300)), 300);
    assert_eq!(fade_millis(Duration::from_micros(1_999)), 1);
    assert_eq!(fade_millis(Duration::MAX), u64::MAX);
}
