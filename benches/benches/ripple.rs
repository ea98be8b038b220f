// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use std::time::Duration;
use understory_gesture::classify::{PointerCoords, RawEvent};
use understory_ripple::headless::HeadlessHost;
use understory_ripple::origin::OriginSpec;
use understory_ripple::surface::RecordingSurface;
use understory_ripple::{Ripple, RippleConfig};

fn bench_origin(c: &mut Criterion) {
    let size = Size::new(320.0, 48.0);
    let specs = ["auto", "center", "50% 0", "right bottom", "12.5px 75%"];

    c.bench_function("ripple/origin_parse_resolve", |b| {
        b.iter(|| {
            for spec in specs {
                black_box(OriginSpec::parse(black_box(spec)).resolve(size));
            }
        });
    });
}

fn bench_full_wave(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 320.0, 48.0);
    let at = PointerCoords::at(100.0, 20.0);

    // Tap, then play every 16ms frame until the wave ends.
    c.bench_function("ripple/tap_and_play_60fps", |b| {
        b.iter_batched(
            || {
                (
                    Ripple::new(RippleConfig::default()),
                    HeadlessHost::new(RecordingSurface::new(), bounds),
                )
            },
            |(mut ripple, mut host)| {
                ripple.handle_event(&mut host, &RawEvent::direct("pointerdown", at));
                ripple.handle_event(&mut host, &RawEvent::direct("pointerup", at));
                while ripple.is_animating() {
                    host.surface.clear();
                    host.advance(&mut ripple, Duration::from_millis(16));
                    host.run_frame(&mut ripple);
                }
                black_box(host.queue.requested_frames())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_origin, bench_full_wave);
criterion_main!(benches);
