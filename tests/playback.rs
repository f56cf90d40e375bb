#![allow(missing_docs)]
//! Stepping semantics of the playback engine's pure core.

use power_gauge::playback::{Player, SelectionShared};
use power_gauge::tracks::{TRACKS, TrackId};

fn shared_on(index: u16) -> SelectionShared {
    let shared = SelectionShared::new();
    shared.set_current(TrackId::from_word(index).expect("valid index"));
    shared
}

#[test]
fn every_track_loops_back_to_frame_zero() {
    for (index, track) in TRACKS.iter().enumerate() {
        let shared = shared_on(index as u16);
        let mut player = Player::new();

        let first = player
            .begin_frame(&shared)
            .expect("frame 0 is a real frame");
        player.finish_frame();
        for _ in 1..track.frame_count() {
            assert!(player.begin_frame(&shared).is_some(), "track {}", track.name());
            player.finish_frame();
        }

        // All real frames consumed; the next fetch hits the sentinel and
        // requests the restart that loops the track...
        assert_eq!(player.begin_frame(&shared), None, "track {}", track.name());
        assert!(shared.restart_pending());

        // ...and the iteration after that renders frame 0 again.
        assert_eq!(player.begin_frame(&shared), Some(first));
        assert_eq!(player.cursor(), 0);
        assert!(!shared.restart_pending());
    }
}

#[test]
fn cycle_track_loop_closure() {
    // `cycle` has 50 real frames: fetch 51 hits the sentinel, fetch 52
    // renders the same frame as fetch 1.
    let shared = shared_on(1);
    let cycle = &TRACKS[1];
    let mut player = Player::new();

    let first = player.begin_frame(&shared).expect("frame 0");
    player.finish_frame();
    for _ in 1..50 {
        player.begin_frame(&shared).expect("real frame");
        player.finish_frame();
    }
    assert_eq!(cycle.frame_count(), 50);
    assert_eq!(player.begin_frame(&shared), None);
    assert_eq!(player.begin_frame(&shared), Some(first));
}

#[test]
fn cylon_wraps_from_its_last_real_frame() {
    let shared = shared_on(2);
    let cylon = &TRACKS[2];
    let last_index = cylon.frame_count() - 1; // 89
    let mut player = Player::new();

    for _ in 0..last_index {
        player.begin_frame(&shared).expect("real frame");
        player.finish_frame();
    }

    // Render the last real frame and advance onto the sentinel.
    assert_eq!(player.begin_frame(&shared), Some(cylon.frame(last_index)));
    player.finish_frame();

    // The sentinel fetch sets the restart flag without advancing...
    assert_eq!(player.begin_frame(&shared), None);
    assert!(shared.restart_pending());

    // ...and the next iteration starts the track over.
    assert_eq!(player.begin_frame(&shared), Some(cylon.frame(0)));
    assert_eq!(player.cursor(), 0);
}

#[test]
fn a_requested_restart_rewinds_and_is_consumed() {
    let shared = shared_on(0);
    let mut player = Player::new();

    for _ in 0..7 {
        player.begin_frame(&shared).expect("real frame");
        player.finish_frame();
    }
    assert_eq!(player.cursor(), 7);

    shared.request_restart();
    let value = player.begin_frame(&shared).expect("frame 0");
    assert_eq!(value, TRACKS[0].frame(0));
    assert_eq!(player.cursor(), 0);
    assert!(!shared.restart_pending(), "the engine consumed the request");
}

#[test]
fn a_press_on_the_last_track_wraps_to_the_first() {
    let shared = shared_on(TrackId::COUNT as u16 - 1);

    // What the button task does on a confirmed press, minus persistence.
    let id = shared.select_next();
    shared.request_restart();

    assert_eq!(id, TrackId::FIRST);
    assert_eq!(shared.current(), TrackId::FIRST);
    assert!(shared.restart_pending());
}

#[test]
fn a_track_change_mid_frame_takes_effect_on_the_next_iteration() {
    let shared = shared_on(0);
    let mut player = Player::new();

    for _ in 0..20 {
        player.begin_frame(&shared).expect("real frame");
        player.finish_frame();
    }

    // A confirmed press arrives while the engine is mid-cycle.
    let id = shared.select_next();
    shared.request_restart();
    assert_eq!(id.index(), 1);

    // The next iteration rewinds and renders the new track's frame 0.
    let value = player.begin_frame(&shared).expect("frame 0 of cycle");
    assert_eq!(value, TRACKS[1].frame(0));
    assert_eq!(player.cursor(), 0);
}
