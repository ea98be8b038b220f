// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognizer: tell a deliberate tap from a drag across parallel event streams.
//!
//! ## Usage
//!
//! 1) Feed every classified event into [`TapTracker::handle`] (or a [`RawEvent`]
//!    into [`TapTracker::handle_event`]) in delivery order.
//! 2) Apply the returned [`GraceAction`] to your single grace timer.
//! 3) When that timer fires (after [`GRACE_WINDOW`]), call [`TapTracker::release_group`].
//! 4) A transition carrying `tap: Some(..)` is a confirmed tap at the END coordinates.
//!
//! The tracker locks onto the device family of the first accepted START. START
//! and END events from any other family are ignored until the lock is released,
//! so a device that reports one press as both touch and mouse events yields one
//! tap, not two. The lock outlives the gesture by the grace window to absorb the
//! trailing synthetic stream.
//!
//! ## Transition table
//!
//! | phase  | group        | effect                                                        |
//! |--------|--------------|---------------------------------------------------------------|
//! | START  | none locked  | lock group, record start point, cancel grace timer            |
//! | START  | same         | record start point only if none yet, cancel grace timer       |
//! | END    | same         | tap if start point within slop; clear start; restart timer     |
//! | CANCEL | any          | clear start; restart grace timer                              |
//! | START/END | other     | ignored                                                       |
//! | MOVE   | any          | ignored                                                       |
//!
//! A repeated same-family START does not move the start point; the first START
//! after a clear wins.
//!
//! ## Minimal example
//!
//! ```
//! use understory_gesture::classify::{PointerCoords, RawEvent};
//! use understory_gesture::tap::{GraceAction, TapTracker};
//!
//! let mut tracker = TapTracker::new();
//!
//! let at = PointerCoords::at(100.0, 100.0);
//! let down = tracker.handle_event(&RawEvent::direct("pointerdown", at));
//! assert_eq!(down.grace, GraceAction::Cancel);
//! assert!(down.tap.is_none());
//!
//! let up = tracker.handle_event(&RawEvent::direct("pointerup", PointerCoords::at(105.0, 103.0)));
//! assert_eq!(up.tap, Some(PointerCoords::at(105.0, 103.0)));
//! assert_eq!(up.grace, GraceAction::Restart);
//! ```

use core::time::Duration;

use kurbo::Point;

use crate::classify::{Classified, GestureGroup, GesturePhase, PointerCoords, RawEvent};

/// Maximum displacement per axis, in page pixels, for a gesture to count as a tap.
pub const TAP_SLOP: f64 = 10.0;

/// How long the family lock outlives a resolved gesture.
pub const GRACE_WINDOW: Duration = Duration::from_millis(500);

/// What the caller must do with its grace timer after a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GraceAction {
    /// Leave any pending timer alone.
    Keep,
    /// Cancel any pending timer.
    Cancel,
    /// Cancel any pending timer and arm a new one for [`GRACE_WINDOW`].
    Restart,
}

/// Outcome of feeding one event to the tracker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TapTransition {
    /// Coordinates of the END event when the gesture was confirmed as a tap.
    pub tap: Option<PointerCoords>,
    /// Required grace timer action.
    pub grace: GraceAction,
}

impl TapTransition {
    /// Transition for an event that had no effect.
    pub const IGNORED: Self = Self {
        tap: None,
        grace: GraceAction::Keep,
    };

    /// Returns `true` if this transition confirmed a tap.
    pub fn is_tap(&self) -> bool {
        self.tap.is_some()
    }
}

/// The gesture currently being tracked.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ActiveGesture {
    /// Device family locked for the current gesture (and its grace window).
    pub group: Option<GestureGroup>,
    /// Page position captured by the first START.
    pub start: Option<Point>,
}

/// Tap-versus-drag state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct TapTracker {
    gesture: ActiveGesture,
    slop: f64,
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TapTracker {
    /// Create an idle tracker using [`TAP_SLOP`].
    pub const fn new() -> Self {
        Self {
            gesture: ActiveGesture {
                group: None,
                start: None,
            },
            slop: TAP_SLOP,
        }
    }

    /// Use a different per-axis slop, in page pixels.
    pub const fn with_slop(mut self, slop: f64) -> Self {
        self.slop = slop;
        self
    }

    /// Per-axis slop in page pixels.
    pub fn slop(&self) -> f64 {
        self.slop
    }

    /// Current gesture state.
    pub fn gesture(&self) -> ActiveGesture {
        self.gesture
    }

    /// Device family currently locked, if any.
    pub fn locked_group(&self) -> Option<GestureGroup> {
        self.gesture.group
    }

    /// Returns `true` while a start point is recorded.
    pub fn is_tracking(&self) -> bool {
        self.gesture.start.is_some()
    }

    /// Classify, normalize and handle a raw event.
    ///
    /// Unknown event names are ignored.
    pub fn handle_event(&mut self, event: &RawEvent<'_>) -> TapTransition {
        match event.classify() {
            Some(classified) => self.handle(classified, event.coords()),
            None => TapTransition::IGNORED,
        }
    }

    /// Handle a classified event with its normalized coordinates.
    ///
    /// `coords` may be `None` when the platform delivered no contact point; a
    /// START without coordinates still locks the family but records no start point.
    pub fn handle(
        &mut self,
        classified: Classified,
        coords: Option<PointerCoords>,
    ) -> TapTransition {
        let Classified { phase, group } = classified;
        match phase {
            GesturePhase::Start => {
                if self.gesture.group.is_none() {
                    self.gesture.group = Some(group);
                }
                if self.gesture.group != Some(group) {
                    return TapTransition::IGNORED;
                }
                if self.gesture.start.is_none() {
                    self.gesture.start = coords.map(|c| c.page);
                }
                TapTransition {
                    tap: None,
                    grace: GraceAction::Cancel,
                }
            }
            GesturePhase::End => {
                if self.gesture.group != Some(group) {
                    return TapTransition::IGNORED;
                }
                let tap = match (self.gesture.start, coords) {
                    (Some(start), Some(end)) if self.within_slop(start, end.page) => Some(end),
                    _ => None,
                };
                self.gesture.start = None;
                TapTransition {
                    tap,
                    grace: GraceAction::Restart,
                }
            }
            GesturePhase::Cancel => {
                self.gesture.start = None;
                TapTransition {
                    tap: None,
                    grace: GraceAction::Restart,
                }
            }
            GesturePhase::Move => TapTransition::IGNORED,
        }
    }

    /// Release the family lock. Call when the grace timer fires.
    pub fn release_group(&mut self) {
        self.gesture.group = None;
    }

    /// Drop all gesture state.
    pub fn reset(&mut self) {
        self.gesture = ActiveGesture::default();
    }

    fn within_slop(&self, start: Point, end: Point) -> bool {
        let d = end - start;
        d.x.abs() < self.slop && d.y.abs() < self.slop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(phase: GesturePhase, group: GestureGroup) -> Classified {
        Classified { phase, group }
    }

    const START_MOUSE: Classified = Classified {
        phase: GesturePhase::Start,
        group: GestureGroup::Mouse,
    };
    const END_MOUSE: Classified = Classified {
        phase: GesturePhase::End,
        group: GestureGroup::Mouse,
    };

    #[test]
    fn new_tracker_is_idle() {
        let tracker = TapTracker::new();
        assert_eq!(tracker.gesture(), ActiveGesture::default());
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.slop(), TAP_SLOP);
    }

    #[test]
    fn first_start_locks_group_and_records_point() {
        let mut tracker = TapTracker::new();
        let t = tracker.handle(START_MOUSE, Some(PointerCoords::at(3.0, 4.0)));
        assert_eq!(t.grace, GraceAction::Cancel);
        assert_eq!(tracker.locked_group(), Some(GestureGroup::Mouse));
        assert_eq!(tracker.gesture().start, Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn small_displacement_is_a_tap() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(100.0, 100.0)));
        let t = tracker.handle(END_MOUSE, Some(PointerCoords::at(105.0, 103.0)));
        assert_eq!(t.tap, Some(PointerCoords::at(105.0, 103.0)));
        assert_eq!(t.grace, GraceAction::Restart);
        assert!(!tracker.is_tracking());
        // Lock survives until the grace timer fires.
        assert_eq!(tracker.locked_group(), Some(GestureGroup::Mouse));
    }

    #[test]
    fn displacement_at_slop_is_a_drag() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(100.0, 100.0)));
        let t = tracker.handle(END_MOUSE, Some(PointerCoords::at(100.0, 110.0)));
        assert_eq!(t.tap, None);
        assert_eq!(t.grace, GraceAction::Restart);
    }

    #[test]
    fn negative_displacement_uses_absolute_value() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(100.0, 100.0)));
        let t = tracker.handle(END_MOUSE, Some(PointerCoords::at(85.0, 100.0)));
        assert!(!t.is_tap());
    }

    #[test]
    fn slop_is_checked_in_page_coordinates() {
        let mut tracker = TapTracker::new();
        let start = PointerCoords {
            page: Point::new(0.0, 500.0),
            client: Point::new(0.0, 0.0),
        };
        // Page scrolled between down and up; client position is unchanged.
        let end = PointerCoords {
            page: Point::new(0.0, 540.0),
            client: Point::new(0.0, 0.0),
        };
        tracker.handle(START_MOUSE, Some(start));
        assert!(!tracker.handle(END_MOUSE, Some(end)).is_tap());
    }

    #[test]
    fn custom_slop() {
        let mut tracker = TapTracker::new().with_slop(20.0);
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        assert!(
            tracker
                .handle(END_MOUSE, Some(PointerCoords::at(15.0, 0.0)))
                .is_tap()
        );
    }

    #[test]
    fn end_without_start_is_a_no_op_tap_wise() {
        let mut tracker = TapTracker::new();
        // No group locked yet, so END is ignored entirely.
        let t = tracker.handle(END_MOUSE, Some(PointerCoords::at(1.0, 1.0)));
        assert_eq!(t, TapTransition::IGNORED);
        assert_eq!(tracker.gesture(), ActiveGesture::default());
    }

    #[test]
    fn end_after_resolution_does_not_tap_again() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        assert!(
            tracker
                .handle(END_MOUSE, Some(PointerCoords::at(0.0, 0.0)))
                .is_tap()
        );
        let again = tracker.handle(END_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        assert!(!again.is_tap());
        assert_eq!(again.grace, GraceAction::Restart);
    }

    #[test]
    fn other_family_is_ignored_while_locked() {
        let mut tracker = TapTracker::new();
        tracker.handle(
            ev(GesturePhase::Start, GestureGroup::Touch),
            Some(PointerCoords::at(50.0, 50.0)),
        );
        let t = tracker.handle(
            ev(GesturePhase::End, GestureGroup::Mouse),
            Some(PointerCoords::at(50.0, 50.0)),
        );
        assert_eq!(t, TapTransition::IGNORED);
        let t = tracker.handle(
            ev(GesturePhase::Start, GestureGroup::Mouse),
            Some(PointerCoords::at(70.0, 70.0)),
        );
        assert_eq!(t, TapTransition::IGNORED);
        assert_eq!(tracker.gesture().start, Some(Point::new(50.0, 50.0)));
        assert_eq!(tracker.locked_group(), Some(GestureGroup::Touch));
    }

    #[test]
    fn repeated_start_keeps_first_point() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        let t = tracker.handle(START_MOUSE, Some(PointerCoords::at(300.0, 300.0)));
        // No displacement check on START, only a timer cancel.
        assert_eq!(t.tap, None);
        assert_eq!(t.grace, GraceAction::Cancel);
        assert_eq!(tracker.gesture().start, Some(Point::new(0.0, 0.0)));
        // END near the repeated START is measured against the first one.
        assert!(
            !tracker
                .handle(END_MOUSE, Some(PointerCoords::at(300.0, 300.0)))
                .is_tap()
        );
    }

    #[test]
    fn cancel_resolves_without_tap_for_any_family() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        let t = tracker.handle(ev(GesturePhase::Cancel, GestureGroup::Touch), None);
        assert_eq!(t.tap, None);
        assert_eq!(t.grace, GraceAction::Restart);
        assert!(!tracker.is_tracking());
        assert!(
            !tracker
                .handle(END_MOUSE, Some(PointerCoords::at(0.0, 0.0)))
                .is_tap()
        );
    }

    #[test]
    fn move_is_ignored() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        let t = tracker.handle(
            ev(GesturePhase::Move, GestureGroup::Mouse),
            Some(PointerCoords::at(90.0, 90.0)),
        );
        assert_eq!(t, TapTransition::IGNORED);
        assert_eq!(tracker.gesture().start, Some(Point::ZERO));
    }

    #[test]
    fn release_group_admits_other_family() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        tracker.handle(END_MOUSE, Some(PointerCoords::at(0.0, 0.0)));

        let touch_start = ev(GesturePhase::Start, GestureGroup::Touch);
        assert_eq!(
            tracker.handle(touch_start, Some(PointerCoords::at(0.0, 0.0))),
            TapTransition::IGNORED
        );

        tracker.release_group();
        let t = tracker.handle(touch_start, Some(PointerCoords::at(0.0, 0.0)));
        assert_eq!(t.grace, GraceAction::Cancel);
        assert_eq!(tracker.locked_group(), Some(GestureGroup::Touch));
    }

    #[test]
    fn start_without_coords_locks_but_cannot_tap() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, None);
        assert_eq!(tracker.locked_group(), Some(GestureGroup::Mouse));
        assert!(
            !tracker
                .handle(END_MOUSE, Some(PointerCoords::at(0.0, 0.0)))
                .is_tap()
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = TapTracker::new();
        tracker.handle(START_MOUSE, Some(PointerCoords::at(0.0, 0.0)));
        tracker.reset();
        assert_eq!(tracker.gesture(), ActiveGesture::default());
    }
}
