// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::DVec3;
use kurbo::Point;
use swipefeed::{
    Bounds3, ContentError, ContentLibrary, FeedConfig, FeedController, InputEvent, NoUiSurfaces,
    PointerId, PointerSample,
};

const DT: f64 = 1.0 / 60.0;

struct Endless;

impl ContentLibrary for Endless {
    type Id = u32;
    type Handle = u32;

    fn ordered_ids(&self) -> Vec<u32> {
        (0..10_000).collect()
    }

    fn instantiate(&mut self, id: &u32) -> Result<u32, ContentError> {
        Ok(*id)
    }

    fn destroy(&mut self, handle: u32) {
        black_box(handle);
    }

    fn bounds(&self, handle: &u32) -> Result<Bounds3, ContentError> {
        let size = 1.0 + f64::from(handle % 32);
        Ok(Bounds3::from_center_size(DVec3::ZERO, DVec3::splat(size)))
    }

    fn anchor(&self, _handle: &u32) -> DVec3 {
        DVec3::ZERO
    }
}

fn feed() -> FeedController<Endless> {
    let mut feed = FeedController::new(Endless, (), NoUiSurfaces, FeedConfig::default());
    feed.set_active(true);
    feed
}

fn bench_idle_tick(c: &mut Criterion) {
    let mut feed = feed();
    c.bench_function("controller/idle_tick", |b| {
        b.iter(|| black_box(feed.tick(DT)));
    });
}

fn bench_swipe(c: &mut Criterion) {
    let mut feed = feed();
    let finger = PointerId(1);
    c.bench_function("controller/swipe_commit_settle", |b| {
        b.iter(|| {
            let at = |y| PointerSample::new(finger, Point::new(200.0, y), 0.0);
            feed.handle_input(InputEvent::PointerDown(at(700.0)));
            feed.tick(DT);
            feed.handle_input(InputEvent::PointerUp(at(300.0)));
            feed.tick(DT);
            while feed.scroll_state().is_snapping {
                feed.tick(DT);
            }
            black_box(feed.current_index());
        });
    });
}

criterion_group!(benches, bench_idle_tick, bench_swipe);
criterion_main!(benches);
