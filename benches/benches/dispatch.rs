// Copyright 2026 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use liana_dispatch::Dispatcher;
use std::cell::Cell;
use std::rc::Rc;

fn subscribed(kinds: &[u8], handlers_per_kind: usize) -> (Dispatcher<u8, u64>, Rc<Cell<u64>>) {
    let dispatcher = Dispatcher::new();
    let hits = Rc::new(Cell::new(0_u64));
    for &kind in kinds {
        for _ in 0..handlers_per_kind {
            let sink = Rc::clone(&hits);
            dispatcher.subscribe(kind, move |event: &u64| sink.set(sink.get() + *event));
        }
    }
    (dispatcher, hits)
}

fn bench_publish_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/fanout");

    // Cost of one publish as the subscriber count on the kind grows. Each
    // delivery moves the handler out and back, so fan-out is the hot loop.
    for handlers in [1_usize, 8, 64] {
        group.throughput(Throughput::Elements(handlers as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(handlers),
            &handlers,
            |b, &handlers| {
                let (dispatcher, hits) = subscribed(&[0], handlers);
                b.iter(|| {
                    dispatcher.publish(0, &1);
                    black_box(hits.get());
                });
            },
        );
    }

    group.finish();
}

fn bench_publish_selectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/selectivity");

    // 64 handlers spread across `kinds` kinds; publishing one kind runs only
    // its own slice, but matching still scans the whole table.
    for kinds in [1_u8, 4, 16] {
        let all: Vec<u8> = (0..kinds).collect();
        let per_kind = 64 / kinds as usize;

        group.bench_with_input(BenchmarkId::from_parameter(kinds), &all, |b, all| {
            let (dispatcher, hits) = subscribed(all, per_kind);
            b.iter(|| {
                dispatcher.publish(0, &1);
                black_box(hits.get());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_publish_fanout, bench_publish_selectivity);
criterion_main!(benches);
