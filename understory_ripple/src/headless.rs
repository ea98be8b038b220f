// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`RippleHost`] with no platform behind it.
//!
//! [`HeadlessHost`] pairs a [`TaskQueue`] with any [`RippleSurface`] and fixed
//! container geometry. The embedder pumps it: [`HeadlessHost::run_frame`] plays
//! one display refresh, [`HeadlessHost::advance`] moves the clock and fires due
//! timers.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_gesture::classify::{PointerCoords, RawEvent};
//! use understory_ripple::headless::HeadlessHost;
//! use understory_ripple::surface::RecordingSurface;
//! use understory_ripple::Ripple;
//!
//! let mut host = HeadlessHost::new(RecordingSurface::new(), Rect::new(0.0, 0.0, 100.0, 40.0));
//! let mut ripple = Ripple::default();
//!
//! let at = PointerCoords::at(20.0, 20.0);
//! ripple.handle_event(&mut host, &RawEvent::direct("mousedown", at));
//! assert!(ripple.handle_event(&mut host, &RawEvent::direct("mouseup", at)));
//!
//! // Play the wave to completion at ~60 fps.
//! while ripple.is_animating() {
//!     host.advance(&mut ripple, Duration::from_millis(16));
//!     host.run_frame(&mut ripple);
//! }
//! assert!(host.surface.fill_count() > 20);
//! ```

use core::time::Duration;

use kurbo::Rect;

use crate::Ripple;
use crate::host::RippleHost;
use crate::queue::TaskQueue;
use crate::schedule::{FrameId, FrameScheduler, TimerId, TimerScheduler};
use crate::surface::RippleSurface;

/// Platform-free host driven by the embedder.
#[derive(Clone, Debug)]
pub struct HeadlessHost<S> {
    /// Frame and timer queue; its clock is the host clock.
    pub queue: TaskQueue,
    /// Drawing surface.
    pub surface: S,
    /// Container bounds in client coordinates.
    pub bounds: Rect,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Container disabled flag.
    pub disabled: bool,
}

impl<S: RippleSurface> HeadlessHost<S> {
    /// Host at time zero with a pixel ratio of 1.
    pub fn new(surface: S, bounds: Rect) -> Self {
        Self {
            queue: TaskQueue::new(),
            surface,
            bounds,
            device_pixel_ratio: 1.0,
            disabled: false,
        }
    }

    /// Play one display refresh. Returns the number of frame callbacks delivered.
    pub fn run_frame(&mut self, ripple: &mut Ripple) -> usize {
        let frames = self.queue.take_frames();
        let delivered = frames.len();
        for id in frames {
            ripple.on_frame(self, id);
        }
        delivered
    }

    /// Move the clock forward and fire due timers. Returns the number fired.
    pub fn advance(&mut self, ripple: &mut Ripple, by: Duration) -> usize {
        let due = self.queue.advance_by(by);
        let fired = due.len();
        for id in due {
            ripple.on_timer(self, id);
        }
        fired
    }
}

impl<S> FrameScheduler for HeadlessHost<S> {
    fn request_frame(&mut self) -> Option<FrameId> {
        self.queue.request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.queue.cancel_frame(id);
    }
}

impl<S> TimerScheduler for HeadlessHost<S> {
    fn set_timer(&mut self, delay: Duration) -> Option<TimerId> {
        self.queue.set_timer(delay)
    }

    fn cancel_timer(&mut self, id: TimerId) {
        self.queue.cancel_timer(id);
    }
}

impl<S: RippleSurface> RippleHost for HeadlessHost<S> {
    type Surface = S;

    fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn container_disabled(&self) -> bool {
        self.disabled
    }

    fn surface(&mut self) -> &mut S {
        &mut self.surface
    }
}
