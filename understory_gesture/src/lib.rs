// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: multi-device event classification and tap recognition.
//!
//! Pointer hardware rarely speaks with one voice. A touch screen in a browser
//! reports a single press as `touchstart`/`touchend`, as `pointerdown`/`pointerup`,
//! and often as synthetic `mousedown`/`mouseup` as well. Widgets that react to
//! "a tap" need to collapse those parallel streams into one logical gesture and
//! to reject presses that turned into drags.
//!
//! - [`classify`]: map raw event names to a `(phase, group)` pair and normalize
//!   their coordinates.
//! - [`tap`]: a small state machine that locks onto one device family, measures
//!   displacement between START and END, and tells the caller when to arm or
//!   cancel its grace timer.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_gesture::classify::{PointerCoords, RawEvent};
//! use understory_gesture::tap::TapTracker;
//!
//! let mut tracker = TapTracker::new();
//! let at = PointerCoords::at(50.0, 50.0);
//!
//! tracker.handle_event(&RawEvent::direct("touchstart", at));
//! // The same press also arrives as a mouse event: ignored.
//! assert!(!tracker.handle_event(&RawEvent::direct("mouseup", at)).is_tap());
//! // The touch release confirms the tap.
//! let touches = [at];
//! assert!(tracker.handle_event(&RawEvent::touches("touchend", &touches)).is_tap());
//! ```
//!
//! The crate owns no timers and no clock: hosts apply the returned
//! [`GraceAction`](tap::GraceAction) to a timer of their own and call
//! [`TapTracker::release_group`](tap::TapTracker::release_group) when it fires.
//!
//! This crate is `no_std`.

#![no_std]

pub mod classify;
pub mod tap;

pub use classify::{Classified, GestureGroup, GesturePhase, PointerCoords, RawEvent};
pub use tap::{GraceAction, TapTracker, TapTransition};
