// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_gesture::classify::{PointerCoords, RawEvent, classify};
use understory_gesture::tap::TapTracker;

fn bench_classify(c: &mut Criterion) {
    let names = [
        "mousedown",
        "touchmove",
        "pointerup",
        "pointercancel",
        "dblclick",
    ];
    c.bench_function("gesture/classify", |b| {
        b.iter(|| {
            for name in names {
                black_box(classify(black_box(name)));
            }
        });
    });
}

fn bench_tap_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/tap_stream");

    // One press as delivered on a touch screen: pointer, touch and compat mouse
    // families, with a few moves in between.
    for moves in [0usize, 8, 64] {
        let at = PointerCoords::at(40.0, 40.0);
        let touches = [at];
        let mut events = vec![
            RawEvent::direct("pointerdown", at),
            RawEvent::touches("touchstart", &touches),
        ];
        events.extend((0..moves).map(|_| RawEvent::direct("pointermove", at)));
        events.extend([
            RawEvent::direct("pointerup", at),
            RawEvent::touches("touchend", &touches),
            RawEvent::direct("mousedown", at),
            RawEvent::direct("mouseup", at),
        ]);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(moves), &events, |b, events| {
            b.iter(|| {
                let mut tracker = TapTracker::new();
                let mut taps = 0;
                for ev in events {
                    if tracker.handle_event(ev).is_tap() {
                        taps += 1;
                    }
                }
                black_box(taps)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_tap_stream);
criterion_main!(benches);
