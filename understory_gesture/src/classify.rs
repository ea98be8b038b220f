// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event classifier: map raw platform event names onto a semantic `(phase, group)` pair.
//!
//! Browsers (and many toolkits that mimic them) report one physical interaction
//! through several parallel event streams: a touch screen may fire `touchstart`,
//! `pointerdown` and a synthetic `mousedown` for the same finger. Each stream
//! belongs to a different [`GestureGroup`], which lets the tap recognizer in
//! [`tap`](crate::tap) lock onto one family and ignore the rest.
//!
//! ## Minimal example
//!
//! ```
//! use understory_gesture::classify::{classify, GestureGroup, GesturePhase};
//!
//! let c = classify("touchend").unwrap();
//! assert_eq!(c.phase, GesturePhase::End);
//! assert_eq!(c.group, GestureGroup::Touch);
//!
//! // Mouse and touch starts belong to different families.
//! assert_ne!(classify("mousedown").unwrap().group, classify("touchstart").unwrap().group);
//! ```

use kurbo::Point;

/// Phase of a raw event within one gesture.
///
/// The discriminants are the stable phase codes used by the raw event table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GesturePhase {
    /// Device down.
    Start = 0,
    /// Device moved while down. Reserved; the tap recognizer ignores it.
    Move = 1,
    /// Device up.
    End = 2,
    /// Platform cancelled the interaction.
    Cancel = 3,
}

impl GesturePhase {
    /// Numeric phase code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Phase for a numeric code, if the code is meaningful.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Start),
            1 => Some(Self::Move),
            2 => Some(Self::End),
            3 => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Device family an event stream belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureGroup {
    /// Legacy `mouse*` events.
    Mouse,
    /// `touch*` events.
    Touch,
    /// Unified `pointer*` events.
    Pointer,
}

/// Result of classifying a raw event name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Classified {
    /// Phase within the gesture.
    pub phase: GesturePhase,
    /// Device family.
    pub group: GestureGroup,
}

/// Every raw event name the classifier understands.
pub const EVENT_TABLE: &[(&str, GesturePhase, GestureGroup)] = &[
    ("mousedown", GesturePhase::Start, GestureGroup::Mouse),
    ("mousemove", GesturePhase::Move, GestureGroup::Mouse),
    ("mouseup", GesturePhase::End, GestureGroup::Mouse),
    ("touchstart", GesturePhase::Start, GestureGroup::Touch),
    ("touchmove", GesturePhase::Move, GestureGroup::Touch),
    ("touchend", GesturePhase::End, GestureGroup::Touch),
    ("touchcancel", GesturePhase::Cancel, GestureGroup::Touch),
    ("pointerdown", GesturePhase::Start, GestureGroup::Pointer),
    ("pointermove", GesturePhase::Move, GestureGroup::Pointer),
    ("pointerup", GesturePhase::End, GestureGroup::Pointer),
    ("pointercancel", GesturePhase::Cancel, GestureGroup::Pointer),
];

/// Classify a raw event name.
///
/// Returns `None` for names outside [`EVENT_TABLE`]. Hosts only subscribe to
/// [`event_types_to_watch`], so `None` normally never reaches the recognizer.
pub fn classify(raw_type: &str) -> Option<Classified> {
    EVENT_TABLE
        .iter()
        .find(|(name, _, _)| *name == raw_type)
        .map(|&(_, phase, group)| Classified { phase, group })
}

/// Raw event names a host should subscribe to on the container.
pub fn event_types_to_watch() -> impl Iterator<Item = &'static str> + Clone {
    EVENT_TABLE.iter().map(|(name, _, _)| *name)
}

/// Coordinates of one contact point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerCoords {
    /// Document-relative position. Used for tap slop checks.
    pub page: Point,
    /// Viewport-relative position. Used to place the ripple.
    pub client: Point,
}

impl PointerCoords {
    /// Coordinates with identical page and client positions (no scroll offset).
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            page: Point::new(x, y),
            client: Point::new(x, y),
        }
    }
}

/// Coordinate payload of a raw event, in the shape the platform delivered it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EventPoints<'a> {
    /// Mouse and pointer events expose coordinates directly.
    Direct(PointerCoords),
    /// Touch events nest coordinates in a touch list.
    ///
    /// Hosts should pass the changed-touches list so `touchend` still carries
    /// the lifted contact.
    Touches(&'a [PointerCoords]),
}

/// Normalize an event's coordinates, taking the first touch point for touch events.
///
/// Returns `None` for an empty touch list.
pub fn format(points: &EventPoints<'_>) -> Option<PointerCoords> {
    match points {
        EventPoints::Direct(coords) => Some(*coords),
        EventPoints::Touches(touches) => touches.first().copied(),
    }
}

/// A raw event as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawEvent<'a> {
    /// Platform event name, e.g. `"pointerdown"`.
    pub event_type: &'a str,
    /// Coordinate payload.
    pub points: EventPoints<'a>,
}

impl<'a> RawEvent<'a> {
    /// Event with directly exposed coordinates.
    pub const fn direct(event_type: &'a str, coords: PointerCoords) -> Self {
        Self {
            event_type,
            points: EventPoints::Direct(coords),
        }
    }

    /// Touch-family event with a touch list.
    pub const fn touches(event_type: &'a str, touches: &'a [PointerCoords]) -> Self {
        Self {
            event_type,
            points: EventPoints::Touches(touches),
        }
    }

    /// Classification of this event's name.
    pub fn classify(&self) -> Option<Classified> {
        classify(self.event_type)
    }

    /// Normalized coordinates of this event.
    pub fn coords(&self) -> Option<PointerCoords> {
        format(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_round_trips_through_classify() {
        for &(name, phase, group) in EVENT_TABLE {
            assert_eq!(
                classify(name),
                Some(Classified { phase, group }),
                "{name} should classify from the table"
            );
        }
    }

    #[test]
    fn unknown_names_are_unclassified() {
        assert_eq!(classify("click"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("TOUCHSTART"), None);
    }

    #[test]
    fn start_events_of_each_family_have_distinct_groups() {
        let mouse = classify("mousedown").unwrap().group;
        let touch = classify("touchstart").unwrap().group;
        let pointer = classify("pointerdown").unwrap().group;
        assert_ne!(mouse, touch);
        assert_ne!(touch, pointer);
        assert_ne!(mouse, pointer);
    }

    #[test]
    fn phase_codes_are_stable() {
        assert_eq!(GesturePhase::Start.code(), 0);
        assert_eq!(GesturePhase::Move.code(), 1);
        assert_eq!(GesturePhase::End.code(), 2);
        assert_eq!(GesturePhase::Cancel.code(), 3);
        for code in 0..4 {
            assert_eq!(GesturePhase::from_code(code).unwrap().code(), code);
        }
        assert_eq!(GesturePhase::from_code(4), None);
    }

    #[test]
    fn watch_list_matches_table() {
        assert_eq!(event_types_to_watch().count(), EVENT_TABLE.len());
        assert!(event_types_to_watch().any(|name| name == "touchcancel"));
        assert!(event_types_to_watch().all(|name| classify(name).is_some()));
    }

    #[test]
    fn format_picks_first_touch() {
        let touches = [PointerCoords::at(1.0, 2.0), PointerCoords::at(30.0, 40.0)];
        let ev = RawEvent::touches("touchend", &touches);
        assert_eq!(ev.coords(), Some(PointerCoords::at(1.0, 2.0)));
    }

    #[test]
    fn format_of_empty_touch_list_is_none() {
        let ev = RawEvent::touches("touchstart", &[]);
        assert_eq!(ev.coords(), None);
    }

    #[test]
    fn format_passes_direct_coordinates_through() {
        let coords = PointerCoords {
            page: Point::new(10.0, 520.0),
            client: Point::new(10.0, 20.0),
        };
        let ev = RawEvent::direct("pointerup", coords);
        assert_eq!(ev.coords(), Some(coords));
        assert_eq!(
            ev.classify(),
            Some(Classified {
                phase: GesturePhase::End,
                group: GestureGroup::Pointer,
            })
        );
    }
}
