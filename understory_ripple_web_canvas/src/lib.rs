// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for Understory Ripple, drawing with Canvas 2D.
//!
//! When targeting `wasm32`, [`WebRipple::attach`] turns any `HtmlElement` into a
//! ripple container:
//!
//! - an absolutely positioned `<canvas class="water-wave-canvas">` is appended,
//!   covering the container and ignoring pointer input;
//! - a statically positioned container is switched to `position: relative`, and
//!   gets the `water-wave-target` class;
//! - one listener is registered for every event name the ripple watches;
//! - frames come from `requestAnimationFrame`, the gesture grace window from
//!   `setTimeout`.
//!
//! Dropping the [`WebRipple`] (or calling [`WebRipple::detach`]) cancels any
//! pending callbacks, removes the listeners and the canvas, and takes the
//! class back off the container.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn install(
//!     button: &web_sys::HtmlElement,
//! ) -> Result<understory_ripple_web_canvas::WebRipple, wasm_bindgen::JsValue> {
//!     let config = understory_ripple::RippleConfig::builder()
//!         .color_str("#ffffff")
//!         .build()
//!         .map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))?;
//!     understory_ripple_web_canvas::WebRipple::attach(button, config)
//! }
//! ```
//!
//! Notes:
//! - Coordinates are read from `changedTouches[0]` for touch events and from
//!   the event itself for mouse and pointer events.
//! - The container's `disabled` attribute is consulted on every tap unless the
//!   configuration overrides it.

#![no_std]

extern crate alloc;

/// Class added to the container while a ripple is attached.
pub const TARGET_CLASS: &str = "water-wave-target";

/// Class of the overlay canvas.
pub const CANVAS_CLASS: &str = "water-wave-canvas";

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, WebRipple};
