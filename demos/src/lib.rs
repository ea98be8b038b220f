// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the ripple demos.

use std::error::Error;
use std::path::Path;

use kurbo::Rect;
use peniko::Color;
use understory_gesture::classify::{PointerCoords, RawEvent};
use understory_ripple::headless::HeadlessHost;
use understory_ripple::surface::RippleSurface;
use understory_ripple::{ConfigError, RadiusSpec, Ripple, RippleConfig};

/// Send a `pointerdown`/`pointerup` pair at `(x, y)`. Returns whether a wave started.
pub fn tap<S: RippleSurface>(
    ripple: &mut Ripple,
    host: &mut HeadlessHost<S>,
    x: f64,
    y: f64,
) -> bool {
    let at = PointerCoords::at(x, y);
    ripple.handle_event(host, &RawEvent::direct("pointerdown", at));
    ripple.handle_event(host, &RawEvent::direct("pointerup", at))
}

/// A 240x80 button placed at (20, 20) in the viewport.
pub fn button_bounds() -> Rect {
    Rect::new(20.0, 20.0, 260.0, 100.0)
}

/// Configuration for the raster demo: an opaque purple wave reaching the far
/// corner of the button.
pub fn raster_config() -> Result<RippleConfig, ConfigError> {
    let bounds = button_bounds();
    RippleConfig::builder()
        .color(Color::from_rgb8(0x66, 0x33, 0x99))
        .alpha(0.8)
        .origin("center")
        .radius(RadiusSpec::Fixed(bounds.width().hypot(bounds.height()) / 2.0))
        .build()
}

/// Encode unpremultiplied RGBA `pixels` as an 8-bit PNG at `path`.
pub fn write_png(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[[u8; 4]],
) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    writer.write_image_data(&data)?;
    Ok(())
}

/// Render `pixels` as coarse ASCII art, one character per `step` pixels.
pub fn ascii(width: u16, pixels: &[[u8; 4]], step: usize) -> String {
    const RAMP: &[u8] = b" .:-=+*#";
    let width = usize::from(width).max(1);
    let mut out = String::new();
    for (y, row) in pixels.chunks(width).enumerate() {
        if y % step != 0 {
            continue;
        }
        for px in row.iter().step_by(step) {
            let level = usize::from(px[3]) * (RAMP.len() - 1) / 255;
            out.push(char::from(RAMP[level]));
        }
        out.push('\n');
    }
    out
}
