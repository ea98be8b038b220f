// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary between the ripple core and the platform that embeds it.

use kurbo::Rect;

use crate::schedule::{FrameScheduler, TimerScheduler};
use crate::surface::RippleSurface;

/// Everything the ripple needs from its container.
///
/// Geometry and the pixel ratio are queried when a tap is confirmed, never
/// cached between ripples. The host must deliver every subscribed event in
/// order (see [`Ripple::event_types`](crate::Ripple::event_types)) and route
/// frame and timer callbacks to [`Ripple::on_frame`](crate::Ripple::on_frame)
/// and [`Ripple::on_timer`](crate::Ripple::on_timer).
pub trait RippleHost: FrameScheduler + TimerScheduler {
    /// Surface type the wave draws into.
    type Surface: RippleSurface + ?Sized;

    /// Monotonic time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Container bounding box in viewport (client) coordinates.
    fn bounds(&self) -> Rect;

    /// Device pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// The container's own disabled state, used when the configuration has no override.
    fn container_disabled(&self) -> bool;

    /// Drawing surface covering the container.
    fn surface(&mut self) -> &mut Self::Surface;
}
