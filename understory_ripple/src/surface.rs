// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster drawing surface the wave paints into.
//!
//! A surface is sized in device pixels and carries a uniform scale so that
//! drawing calls are expressed in logical (CSS) pixels. The host owns the
//! surface's attachment to the screen; the ripple owns clearing and drawing.
//!
//! [`RecordingSurface`] is a reference implementation that records every call.
//! It is handy for tests, debugging and for replaying a ripple into a backend
//! that is not available on the current platform.

use alloc::vec::Vec;

use kurbo::{Circle, Rect};
use peniko::Color;

/// Drawing target for the wave.
pub trait RippleSurface {
    /// Reallocate the backing store to `width` by `height` device pixels.
    ///
    /// Resizing clears the contents and resets the transform to identity.
    fn resize(&mut self, width: u32, height: u32);

    /// Set a uniform scale from logical to device pixels.
    fn set_scale(&mut self, scale: f64);

    /// Clear `rect` (logical pixels) to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Fill `circle` (logical pixels) with `color`, alpha included.
    fn fill_circle(&mut self, circle: Circle, color: Color);
}

/// One recorded surface call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// [`RippleSurface::resize`].
    Resize {
        /// Device pixel width.
        width: u32,
        /// Device pixel height.
        height: u32,
    },
    /// [`RippleSurface::set_scale`].
    Scale(f64),
    /// [`RippleSurface::clear_rect`].
    Clear(Rect),
    /// [`RippleSurface::fill_circle`].
    FillCircle {
        /// Circle in logical pixels.
        circle: Circle,
        /// Fill color with the frame opacity applied.
        color: Color,
    },
}

/// Surface that records calls instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Calls in order.
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resize calls.
    pub fn resize_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Resize { .. }))
            .count()
    }

    /// Number of circles filled.
    pub fn fill_count(&self) -> usize {
        self.fills().count()
    }

    /// Every filled circle with its color, in order.
    pub fn fills(&self) -> impl Iterator<Item = (Circle, Color)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            SurfaceOp::FillCircle { circle, color } => Some((circle, color)),
            _ => None,
        })
    }

    /// The most recently filled circle.
    pub fn last_fill(&self) -> Option<(Circle, Color)> {
        self.fills().last()
    }

    /// The most recent call.
    pub fn last_op(&self) -> Option<&SurfaceOp> {
        self.ops.last()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Replay the recording into another surface.
    pub fn replay<S: RippleSurface + ?Sized>(&self, target: &mut S) {
        for op in &self.ops {
            match *op {
                SurfaceOp::Resize { width, height } => target.resize(width, height),
                SurfaceOp::Scale(scale) => target.set_scale(scale),
                SurfaceOp::Clear(rect) => target.clear_rect(rect),
                SurfaceOp::FillCircle { circle, color } => target.fill_circle(circle, color),
            }
        }
    }
}

impl RippleSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.ops.push(SurfaceOp::Resize { width, height });
    }

    fn set_scale(&mut self, scale: f64) {
        self.ops.push(SurfaceOp::Scale(scale));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::Clear(rect));
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.ops.push(SurfaceOp::FillCircle { circle, color });
    }
}
