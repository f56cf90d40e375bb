#![allow(missing_docs)]
//! Properties of the built-in track tables and the selector type.

use power_gauge::tracks::{FRAME_SENTINEL, GAUGE_MASK, TRACKS, TrackId};

#[test]
fn every_track_ends_with_the_sentinel() {
    for track in &TRACKS {
        assert_eq!(
            track.frames().last().copied(),
            Some(FRAME_SENTINEL),
            "track {}",
            track.name()
        );
    }
}

#[test]
fn the_sentinel_appears_nowhere_else() {
    for track in &TRACKS {
        let real_frames = &track.frames()[..track.frame_count()];
        assert!(
            real_frames.iter().all(|&frame| frame != FRAME_SENTINEL),
            "track {}",
            track.name()
        );
    }
}

#[test]
fn real_frames_fit_the_gauge() {
    for track in &TRACKS {
        for (cursor, &frame) in track.frames()[..track.frame_count()].iter().enumerate() {
            assert!(
                frame <= GAUGE_MASK,
                "track {} frame {} is {:#x}",
                track.name(),
                cursor,
                frame
            );
        }
    }
}

#[test]
fn track_lengths_match_the_authored_data() {
    let lengths: Vec<usize> = TRACKS.iter().map(|track| track.frame_count()).collect();
    assert_eq!(lengths, [100, 50, 90, 55, 55]);
}

#[test]
fn reading_past_the_end_yields_the_sentinel() {
    for track in &TRACKS {
        assert_eq!(track.frame(track.frames().len()), FRAME_SENTINEL);
        assert_eq!(track.frame(usize::MAX), FRAME_SENTINEL);
    }
}

#[test]
fn from_word_accepts_only_valid_indexes() {
    for word in 0..TrackId::COUNT as u16 {
        let id = TrackId::from_word(word).expect("valid index");
        assert_eq!(id.index(), word as usize);
    }
    assert_eq!(TrackId::from_word(TrackId::COUNT as u16), None);
    assert_eq!(TrackId::from_word(0xFFFF), None);
}

#[test]
fn next_wraps_past_the_last_track() {
    let mut id = TrackId::FIRST;
    for expected in 1..TrackId::COUNT {
        id = id.next();
        assert_eq!(id.index(), expected);
    }
    assert_eq!(id.next(), TrackId::FIRST);
}
