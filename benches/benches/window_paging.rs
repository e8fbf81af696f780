// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use swipefeed_window::{Direction, FeedWindow, SceneProvider};

/// Hands out heap-allocated handles so recycling has a realistic cost.
struct Heap;

impl SceneProvider for Heap {
    type Handle = Box<[u8; 256]>;
    type Error = ();

    fn instantiate(&mut self, index: usize) -> Result<Self::Handle, ()> {
        Ok(Box::new([index as u8; 256]))
    }

    fn destroy(&mut self, handle: Self::Handle) {
        black_box(handle);
    }
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("window/advance");

    // Paging one step should cost one destroy and one instantiate, independent of feed length.
    for len in [16usize, 1_024, 65_536] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("next_then_previous", len), &len, |b, &len| {
            let mut provider = Heap;
            let mut window = FeedWindow::new(len);
            window.load_around(&mut provider, len / 2);
            b.iter(|| {
                let _ = black_box(window.advance(&mut provider, Direction::Next));
                let _ = black_box(window.advance(&mut provider, Direction::Previous));
            });
        });
    }

    group.finish();
}

fn bench_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("window/load_around");

    // Jumps far away rebuild all three slots; near jumps keep two.
    for distance in [1usize, 2, 100] {
        group.bench_with_input(BenchmarkId::new("jump", distance), &distance, |b, &distance| {
            let mut provider = Heap;
            let mut window = FeedWindow::new(1_000);
            window.load_around(&mut provider, 500);
            let mut forward = true;
            b.iter(|| {
                let target = if forward { 500 + distance } else { 500 };
                window.load_around(&mut provider, black_box(target));
                forward = !forward;
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_jump);
criterion_main!(benches);
