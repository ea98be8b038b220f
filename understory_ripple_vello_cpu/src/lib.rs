// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed raster surface for Understory Ripple.
//!
//! [`VelloCpuSurface`] implements [`RippleSurface`] on top of the sparse-strips
//! [`vello_cpu::RenderContext`], so ripples can be rasterized without a GPU or
//! a browser: in headless hosts, in image exports, and in pixel tests.
//!
//! The backing store is sized in device pixels. The scale set through
//! [`RippleSurface::set_scale`] is applied to every fill, so the ripple keeps
//! drawing in logical pixels at any pixel ratio.
//!
//! ```
//! use kurbo::{Circle, Point, Rect};
//! use peniko::Color;
//! use understory_ripple::RippleSurface;
//! use understory_ripple_vello_cpu::VelloCpuSurface;
//!
//! let mut surface = VelloCpuSurface::new(1, 1);
//! surface.resize(32, 32);
//! surface.set_scale(2.0);
//! surface.clear_rect(Rect::new(0.0, 0.0, 16.0, 16.0));
//! surface.fill_circle(Circle::new(Point::new(8.0, 8.0), 4.0), Color::WHITE);
//!
//! let pixels = surface.render();
//! assert_eq!(pixels.len(), 32 * 32);
//! assert_eq!(surface.pixel(&pixels, 16, 16), Some([255, 255, 255, 255]));
//! assert_eq!(surface.pixel(&pixels, 0, 0), Some([0, 0, 0, 0]));
//! ```
//!
//! Notes:
//! - `vello_cpu` records draws and rasterizes on [`VelloCpuSurface::render`].
//!   [`RippleSurface::clear_rect`] drops every recorded draw; the ripple only
//!   ever clears the whole container, so partial clears are not modelled.

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Circle, Rect};
use peniko::Color;
use understory_ripple::RippleSurface;
use vello_cpu::kurbo::{Affine as CpuAffine, Circle as CpuCircle, Shape};
use vello_cpu::{Pixmap, RenderContext};

/// Flattening tolerance for circle outlines, in device pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Ripple surface that rasterizes with `vello_cpu`.
pub struct VelloCpuSurface {
    ctx: RenderContext,
    scale: f64,
}

impl fmt::Debug for VelloCpuSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuSurface")
            .field("width", &self.ctx.width())
            .field("height", &self.ctx.height())
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl VelloCpuSurface {
    /// Create a surface of `width` by `height` device pixels.
    ///
    /// Zero extents are bumped to one pixel.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            ctx: RenderContext::new(width.max(1), height.max(1)),
            scale: 1.0,
        }
    }

    /// Width in device pixels.
    pub fn width(&self) -> u16 {
        self.ctx.width()
    }

    /// Height in device pixels.
    pub fn height(&self) -> u16 {
        self.ctx.height()
    }

    /// Current logical-to-device scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Underlying render context.
    pub fn context(&mut self) -> &mut RenderContext {
        &mut self.ctx
    }

    /// Rasterize into a fresh pixmap.
    pub fn render_to_pixmap(&mut self) -> Pixmap {
        let mut pixmap = Pixmap::new(self.width(), self.height());
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }

    /// Rasterize and return unpremultiplied RGBA pixels, row-major.
    pub fn render(&mut self) -> Vec<[u8; 4]> {
        self.render_to_pixmap()
            .take_unpremultiplied()
            .into_iter()
            .map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }

    /// Look up the pixel at `(x, y)` in the output of [`render`](Self::render).
    pub fn pixel(&self, pixels: &[[u8; 4]], x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = usize::from(y) * usize::from(self.width()) + usize::from(x);
        pixels.get(idx).copied()
    }

    fn affine_to_cpu(scale: f64) -> CpuAffine {
        CpuAffine::new(kurbo::Affine::scale(scale).as_coeffs())
    }
}

fn clamp_extent(extent: u32) -> u16 {
    u16::try_from(extent).unwrap_or(u16::MAX).max(1)
}

impl RippleSurface for VelloCpuSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.ctx = RenderContext::new(clamp_extent(width), clamp_extent(height));
        self.scale = 1.0;
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn clear_rect(&mut self, _rect: Rect) {
        self.ctx.reset();
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        let cpu_circle = CpuCircle::new((circle.center.x, circle.center.y), circle.radius);
        self.ctx.set_transform(Self::affine_to_cpu(self.scale));
        self.ctx.set_paint(color);
        self.ctx
            .fill_path(&cpu_circle.to_path(CIRCLE_TOLERANCE / self.scale.max(f64::EPSILON)));
    }
}
