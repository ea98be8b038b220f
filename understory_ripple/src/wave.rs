// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wave animation: a circle that grows and fades over a fixed duration.
//!
//! [`WaveAnimation`] is the pure time law. Radius and opacity depend only on the
//! time elapsed since the wave started, so a late or skipped frame never leaves
//! the wave in an inconsistent state:
//!
//! - `radius = elapsed / duration * max_radius`
//! - `opacity = min(alpha, 1 - elapsed / duration)`
//!
//! [`WaveLoop`] drives one wave through the host's frame callbacks. Each step
//! cancels the pending frame before clearing, drawing and requesting the next,
//! so at most one frame callback is ever outstanding. If the host refuses a
//! frame, the wave ends there and the surface is cleared.
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_ripple::config::{RadiusSpec, RippleConfig};
//! use understory_ripple::wave::{RippleRequest, WaveAnimation};
//!
//! let config = RippleConfig::builder()
//!     .radius(RadiusSpec::Fixed(100.0))
//!     .build()
//!     .unwrap();
//! let request = RippleRequest {
//!     point: Point::new(10.0, 20.0),
//!     size: Size::new(200.0, 100.0),
//! };
//! let wave = WaveAnimation::new(request, &config, 1_000);
//!
//! let frame = wave.frame_at(1_250).unwrap();
//! assert_eq!(frame.radius, 50.0);
//! assert_eq!(frame.opacity, 0.3);
//! assert!(wave.frame_at(1_500).is_none());
//! ```

use kurbo::{Circle, Point, Rect, Size};
use peniko::Color;

use crate::config::RippleConfig;
use crate::host::RippleHost;
use crate::origin::anchor_point;
use crate::schedule::{FrameId, FrameTask};
use crate::surface::RippleSurface;

/// What a confirmed tap hands to the wave.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RippleRequest {
    /// Tap position relative to the container, in logical pixels.
    pub point: Point,
    /// Container size in logical pixels.
    pub size: Size,
}

/// Visual state of one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaveFrame {
    /// Circle center in container coordinates.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Fill opacity.
    pub opacity: f64,
}

impl WaveFrame {
    /// The frame as a circle.
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

/// One wave, fully determined by its start time.
#[derive(Copy, Clone, Debug)]
pub struct WaveAnimation {
    start_ms: u64,
    duration_ms: f64,
    max_radius: f64,
    alpha: f64,
    /// Resolved origin; NaN axes follow `trigger`.
    origin: Point,
    trigger: Point,
    size: Size,
    color: Color,
}

impl WaveAnimation {
    /// Prepare a wave for `request` starting at `start_ms`.
    pub fn new(request: RippleRequest, config: &RippleConfig, start_ms: u64) -> Self {
        let (ox, oy) = config.origin().resolve(request.size);
        Self {
            start_ms,
            duration_ms: config.duration_ms(),
            max_radius: config.radius().max_radius(request.size),
            alpha: config.alpha(),
            origin: Point::new(ox, oy),
            trigger: request.point,
            size: request.size,
            color: config.color(),
        }
    }

    /// Start time in milliseconds.
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Radius reached at the end of the animation.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Circle center: the resolved origin, with NaN axes taken from the tap point.
    pub fn center(&self) -> Point {
        anchor_point(self.origin, self.trigger)
    }

    /// Logical rectangle covering the container.
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Fill color before opacity.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Milliseconds since start, clamped at zero.
    pub fn elapsed_ms(&self, now_ms: u64) -> f64 {
        now_ms.saturating_sub(self.start_ms) as f64
    }

    /// Returns `true` once the duration has elapsed.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }

    /// Frame for `now_ms`, or `None` once the duration has elapsed.
    pub fn frame_at(&self, now_ms: u64) -> Option<WaveFrame> {
        let elapsed = self.elapsed_ms(now_ms);
        if elapsed >= self.duration_ms {
            return None;
        }
        let t = elapsed / self.duration_ms;
        Some(WaveFrame {
            center: self.center(),
            radius: t * self.max_radius,
            opacity: self.alpha.min(1.0 - t),
        })
    }

    /// Fill color for `frame`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Color channels are f32; opacity is within [0, 1]."
    )]
    pub fn frame_color(&self, frame: &WaveFrame) -> Color {
        self.color.multiply_alpha(frame.opacity as f32)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Raster backing stores truncate fractional device extents, like canvas width/height."
)]
fn device_extent(logical: f64, scale: f64) -> u32 {
    (logical * scale) as u32
}

/// Sanitize a host pixel ratio; anything unusable falls back to 1.
fn pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Drives at most one [`WaveAnimation`] through host frame callbacks.
#[derive(Clone, Debug, Default)]
pub struct WaveLoop {
    animation: Option<WaveAnimation>,
    frame: FrameTask,
}

impl WaveLoop {
    /// Idle loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// The wave in flight, if any.
    pub fn animation(&self) -> Option<&WaveAnimation> {
        self.animation.as_ref()
    }

    /// Returns `true` while a wave is in flight.
    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    /// Pending frame handle, if any.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.frame.pending()
    }

    /// Start a wave for `request`, replacing any wave in flight.
    ///
    /// Does nothing and returns `false` when the ripple is disabled. Otherwise
    /// resizes the surface to the container in device pixels, applies the pixel
    /// ratio as a scale, and draws the first frame immediately.
    pub fn trigger<H: RippleHost + ?Sized>(
        &mut self,
        host: &mut H,
        request: RippleRequest,
        config: &RippleConfig,
    ) -> bool {
        if config.is_disabled(|| host.container_disabled()) {
            log::debug!("ripple disabled; ignoring tap");
            return false;
        }
        self.cancel(host);

        let dpr = pixel_ratio(host.device_pixel_ratio());
        let surface = host.surface();
        surface.resize(
            device_extent(request.size.width, dpr),
            device_extent(request.size.height, dpr),
        );
        surface.set_scale(dpr);

        let wave = WaveAnimation::new(request, config, host.now_ms());
        log::debug!(
            "ripple started at ({:.1}, {:.1}), max radius {:.1}",
            wave.center().x,
            wave.center().y,
            wave.max_radius()
        );
        self.animation = Some(wave);
        self.step(host);
        true
    }

    /// Advance on a delivered frame callback.
    ///
    /// Returns `false` for a handle that is no longer pending.
    pub fn on_frame<H: RippleHost + ?Sized>(&mut self, host: &mut H, id: FrameId) -> bool {
        if !self.frame.fire(id) {
            log::trace!("ignoring stale frame {id:?}");
            return false;
        }
        self.step(host);
        true
    }

    /// Stop the wave and withdraw any pending frame. The surface is left as is.
    pub fn cancel<H: RippleHost + ?Sized>(&mut self, host: &mut H) {
        self.frame.cancel_frame(host);
        self.animation = None;
    }

    fn step<H: RippleHost + ?Sized>(&mut self, host: &mut H) {
        self.frame.cancel_frame(host);
        let Some(wave) = self.animation else {
            return;
        };
        let now = host.now_ms();
        let surface = host.surface();
        surface.clear_rect(wave.bounds());
        match wave.frame_at(now) {
            Some(frame) => {
                log::trace!(
                    "ripple frame: radius {:.2}, opacity {:.3}",
                    frame.radius,
                    frame.opacity
                );
                surface.fill_circle(frame.circle(), wave.frame_color(&frame));
                if !self.frame.request_frame(host) {
                    log::warn!("frame request refused; ending ripple early");
                    host.surface().clear_rect(wave.bounds());
                    self.animation = None;
                }
            }
            None => {
                log::debug!("ripple finished");
                self.animation = None;
            }
        }
    }
}
