// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `TapTracker` fed with realistic raw event streams.
//!
//! Each test replays the sequence of raw events a browser emits for one
//! physical interaction and checks how many taps come out of it.

use understory_gesture::classify::{PointerCoords, RawEvent};
use understory_gesture::tap::{GraceAction, TapTracker};

/// Replay `events`, releasing the group lock whenever `release_after` names the index.
fn taps(tracker: &mut TapTracker, events: &[RawEvent<'_>], release_after: &[usize]) -> usize {
    let mut count = 0;
    for (i, ev) in events.iter().enumerate() {
        if tracker.handle_event(ev).is_tap() {
            count += 1;
        }
        if release_after.contains(&i) {
            tracker.release_group();
        }
    }
    count
}

#[test]
fn touch_screen_with_pointer_and_compat_mouse_yields_one_tap() {
    let at = PointerCoords::at(40.0, 40.0);
    let touches = [at];
    let events = [
        RawEvent::direct("pointerdown", at),
        RawEvent::touches("touchstart", &touches),
        RawEvent::direct("pointerup", at),
        RawEvent::touches("touchend", &touches),
        RawEvent::direct("mousedown", at),
        RawEvent::direct("mouseup", at),
    ];
    let mut tracker = TapTracker::new();
    assert_eq!(taps(&mut tracker, &events, &[]), 1);
}

#[test]
fn two_taps_from_different_families_need_the_lock_released() {
    let at = PointerCoords::at(5.0, 5.0);
    let touches = [at];
    let events = [
        RawEvent::direct("mousedown", at),
        RawEvent::direct("mouseup", at),
        RawEvent::touches("touchstart", &touches),
        RawEvent::touches("touchend", &touches),
    ];

    let mut locked = TapTracker::new();
    assert_eq!(taps(&mut locked, &events, &[]), 1);

    let mut released = TapTracker::new();
    assert_eq!(taps(&mut released, &events, &[1]), 2);
}

#[test]
fn touch_drag_then_tap() {
    let touches_down = [PointerCoords::at(0.0, 0.0)];
    let touches_far = [PointerCoords::at(0.0, 30.0)];
    let touches_near = [PointerCoords::at(2.0, 1.0)];
    let events = [
        RawEvent::touches("touchstart", &touches_down),
        RawEvent::touches("touchmove", &touches_far),
        RawEvent::touches("touchend", &touches_far),
        RawEvent::touches("touchstart", &touches_down),
        RawEvent::touches("touchend", &touches_near),
    ];
    let mut tracker = TapTracker::new();
    assert_eq!(taps(&mut tracker, &events, &[]), 1);
}

#[test]
fn touchend_with_empty_list_cannot_tap_but_still_resolves() {
    let mut tracker = TapTracker::new();
    let touches = [PointerCoords::at(1.0, 1.0)];
    tracker.handle_event(&RawEvent::touches("touchstart", &touches));
    let t = tracker.handle_event(&RawEvent::touches("touchend", &[]));
    assert!(!t.is_tap());
    assert_eq!(t.grace, GraceAction::Restart);
    assert!(!tracker.is_tracking());
}

#[test]
fn unknown_event_names_are_ignored() {
    let mut tracker = TapTracker::new();
    let t = tracker.handle_event(&RawEvent::direct("dblclick", PointerCoords::at(0.0, 0.0)));
    assert!(!t.is_tap());
    assert_eq!(t.grace, GraceAction::Keep);
    assert_eq!(tracker.locked_group(), None);
}
