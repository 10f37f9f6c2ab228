// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use liana_gestures::{
    EventFeed, GestureKind, GestureRouter, GestureState, InputEvent, PointerEvent, PointerId,
};
use std::cell::Cell;
use std::rc::Rc;

const THRESHOLD: f64 = 10.0;

fn press(id: u64, x: f64, y: f64) -> PointerEvent<u32> {
    PointerEvent::press(PointerId::new(id), 1, Point::new(x, y))
}

fn moved(id: u64, x: f64, y: f64) -> PointerEvent<u32> {
    PointerEvent::moved(PointerId::new(id), 1, Point::new(x, y))
}

fn release(id: u64, x: f64, y: f64) -> PointerEvent<u32> {
    PointerEvent::release(PointerId::new(id), 1, Point::new(x, y))
}

fn bench_tap_cycle(c: &mut Criterion) {
    c.bench_function("state/tap_cycle", |b| {
        b.iter_batched(
            GestureState::<u32>::new,
            |mut state| {
                state.press(press(1, 0.0, 0.0));
                black_box(state.release(release(1, 0.0, 0.0)));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_pre_event_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("state/pre_event_accumulation");

    // Sub-threshold wiggling grows the record's history until a crossing
    // move or a release consumes it.
    for len in [16_usize, 256] {
        let events: Vec<PointerEvent<u32>> = (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    moved(1, 3.0, 0.0)
                } else {
                    moved(1, 0.0, 3.0)
                }
            })
            .collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &events, |b, events| {
            b.iter_batched(
                || {
                    let mut state = GestureState::new();
                    state.press(press(1, 0.0, 0.0));
                    state
                },
                |mut state| {
                    for event in events {
                        black_box(state.update(*event, THRESHOLD));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_drag_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("state/drag_stream");

    // Steady-state cost of classifying moves while a drag is running.
    for len in [64_usize, 256, 1_024] {
        let events: Vec<PointerEvent<u32>> =
            (0..len).map(|i| moved(1, 20.0 + i as f64, 0.0)).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &events, |b, events| {
            b.iter_batched(
                || {
                    let mut state = GestureState::new();
                    state.press(press(1, 0.0, 0.0));
                    state.update(moved(1, 20.0, 0.0), THRESHOLD);
                    state
                },
                |mut state| {
                    for event in events {
                        black_box(state.update(*event, THRESHOLD));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_multitouch_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("state/multitouch_update");

    // Every multitouch move reports the latest event of every active
    // pointer, so per-move cost grows with the composition size.
    for pointers in [2_u64, 4, 8] {
        group.throughput(Throughput::Elements(pointers));

        group.bench_with_input(
            BenchmarkId::from_parameter(pointers),
            &pointers,
            |b, &pointers| {
                b.iter_batched(
                    || {
                        let mut state = GestureState::new();
                        for id in 0..pointers {
                            state.press(press(id, id as f64 * 10.0, 0.0));
                        }
                        state
                    },
                    |mut state| {
                        black_box(state.update(moved(0, 5.0, 5.0), THRESHOLD));
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_multitouch_recompose(c: &mut Criterion) {
    // One pointer leaving and pressing again: end the composition, reseed
    // the survivors, and announce the new one.
    c.bench_function("state/multitouch_recompose", |b| {
        b.iter_batched(
            || {
                let mut state = GestureState::new();
                for id in 0..3 {
                    state.press(press(id, id as f64 * 10.0, 0.0));
                }
                state
            },
            |mut state| {
                black_box(state.release(release(2, 20.0, 0.0)));
                black_box(state.press(press(2, 20.0, 0.0)));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_router_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("router/round_trip");

    // Full pipeline: feed delivery, routing by pointer id, classification,
    // dispatch to one subscriber. One drag of `len` moves per iteration.
    for len in [16_usize, 128] {
        let mut script: Vec<InputEvent<u32>> = vec![press(1, 0.0, 0.0).into()];
        script.extend((0..len).map(|i| InputEvent::from(moved(1, 20.0 + i as f64, 0.0))));
        script.push(release(1, 0.0, 0.0).into());
        group.throughput(Throughput::Elements(script.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &script, |b, script| {
            b.iter_batched(
                || {
                    let feed = EventFeed::new();
                    let router = GestureRouter::new(feed.clone());
                    let hits = Rc::new(Cell::new(0_u64));
                    let sink = Rc::clone(&hits);
                    router
                        .register(1)
                        .subscribe(GestureKind::Drag, move |_| sink.set(sink.get() + 1));
                    (feed, router, hits)
                },
                |(feed, _router, hits)| {
                    for event in script {
                        feed.push(*event);
                    }
                    black_box(hits.get());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tap_cycle,
    bench_pre_event_accumulation,
    bench_drag_stream,
    bench_multitouch_update,
    bench_multitouch_recompose,
    bench_router_round_trip
);
criterion_main!(benches);
