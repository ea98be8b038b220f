// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple rasterized with Vello CPU.
//!
//! Tap a headless button, stop the wave halfway, and write the frame to
//! `ripple_raster.png`. A coarse ASCII preview is printed as well.
//!
//! Run:
//! - `cargo run -p understory_demos --example ripple_raster`

use std::time::Duration;

use understory_demos::{ascii, button_bounds, raster_config, tap, write_png};
use understory_ripple::Ripple;
use understory_ripple::headless::HeadlessHost;
use understory_ripple_vello_cpu::VelloCpuSurface;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ripple = Ripple::new(raster_config()?);
    let mut host = HeadlessHost::new(VelloCpuSurface::new(1, 1), button_bounds());

    if !tap(&mut ripple, &mut host, 40.0, 40.0) {
        return Err("tap was not recognized".into());
    }
    host.advance(&mut ripple, Duration::from_millis(250));
    host.run_frame(&mut ripple);

    let (width, height) = (host.surface.width(), host.surface.height());
    let pixels = host.surface.render();
    print!("{}", ascii(width, &pixels, 4));

    write_png("ripple_raster.png", u32::from(width), u32::from(height), &pixels)?;
    eprintln!("Wrote ripple_raster.png");
    Ok(())
}
