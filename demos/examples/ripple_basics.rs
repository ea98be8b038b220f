// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple basics.
//!
//! Tap a headless button and print what the ripple draws on each frame,
//! using a surface that only records draw calls.
//!
//! Run:
//! - `cargo run -p understory_demos --example ripple_basics`

use std::time::Duration;

use understory_demos::{button_bounds, tap};
use understory_ripple::headless::HeadlessHost;
use understory_ripple::surface::RecordingSurface;
use understory_ripple::{Ripple, RippleConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RippleConfig::builder()
        .color_str("#2196f3")
        .origin("auto")
        .duration(Duration::from_millis(400))
        .build()?;
    let mut ripple = Ripple::new(config);
    let mut host = HeadlessHost::new(RecordingSurface::new(), button_bounds());
    host.device_pixel_ratio = 2.0;

    // Viewport (80, 50) is container (60, 30).
    if !tap(&mut ripple, &mut host, 80.0, 50.0) {
        return Err("tap was not recognized".into());
    }

    let mut frame = 0;
    while ripple.is_animating() {
        if let Some((circle, color)) = host.surface.last_fill() {
            println!(
                "t={:>3}ms  center=({:.0}, {:.0})  radius={:>6.2}  alpha={:.3}",
                host.queue.now_ms(),
                circle.center.x,
                circle.center.y,
                circle.radius,
                color.components[3],
            );
        }
        host.surface.clear();
        host.advance(&mut ripple, Duration::from_millis(50));
        host.run_frame(&mut ripple);
        frame += 1;
    }
    println!("wave finished after {frame} frames");

    // The gesture lock is held until the grace window runs out.
    println!("group lock: {:?}", ripple.tracker().locked_group());
    host.advance(&mut ripple, Duration::from_millis(500));
    println!("group lock after grace: {:?}", ripple.tracker().locked_group());
    Ok(())
}
