// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Ripple: tap-triggered radial ripple feedback for UI containers.
//!
//! A ripple is an expanding, fading circle drawn over a container when the user
//! taps it. This crate holds the parts with real logic and leaves the platform
//! behind a small boundary:
//!
//! - [`origin`]: resolve a CSS-like `"x y"` anchor (`"center"`, `"50% 0"`, `"auto"`)
//!   against the container size.
//! - [`config`]: effect parameters, validated when built.
//! - [`wave`]: the time law for radius/opacity and the frame loop that drives it.
//! - [`schedule`]: cancellable frame and timer handles, at most one pending each.
//! - [`surface`] and [`host`]: what the embedder provides.
//! - [`Ripple`]: wires `understory_gesture`'s tap recognizer to the wave.
//! - [`queue`] and [`headless`]: a deterministic, platform-free host.
//!
//! ## Flow
//!
//! ```text
//! raw event ─▶ classify ─▶ TapTracker ─▶ (tap) ─▶ WaveLoop::trigger ─▶ frame ─▶ frame ─▶ …
//!                              │                                      ▲
//!                              └─ grace timer ─▶ release group lock   └─ cancelled by re-trigger / teardown
//! ```
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_gesture::classify::{PointerCoords, RawEvent};
//! use understory_ripple::headless::HeadlessHost;
//! use understory_ripple::surface::RecordingSurface;
//! use understory_ripple::{Ripple, RippleConfig};
//!
//! let config = RippleConfig::builder().color_str("#2196f3").build().unwrap();
//! let mut ripple = Ripple::new(config);
//! let mut host = HeadlessHost::new(RecordingSurface::new(), Rect::new(10.0, 10.0, 210.0, 60.0));
//!
//! let touches = [PointerCoords::at(60.0, 30.0)];
//! ripple.handle_event(&mut host, &RawEvent::touches("touchstart", &touches));
//! // The synthetic mouse stream for the same press is ignored.
//! ripple.handle_event(&mut host, &RawEvent::direct("mousedown", touches[0]));
//! assert!(ripple.handle_event(&mut host, &RawEvent::touches("touchend", &touches)));
//! assert!(!ripple.handle_event(&mut host, &RawEvent::direct("mouseup", touches[0])));
//!
//! // The wave is centered on the tap, in container coordinates.
//! let (circle, _) = host.surface.last_fill().unwrap();
//! assert_eq!((circle.center.x, circle.center.y), (50.0, 20.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod headless;
pub mod host;
pub mod origin;
pub mod queue;
mod ripple;
pub mod schedule;
pub mod surface;
pub mod wave;

pub use config::{ConfigError, RadiusSpec, RippleConfig};
pub use host::RippleHost;
pub use ripple::Ripple;
pub use surface::RippleSurface;
