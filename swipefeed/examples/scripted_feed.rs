// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs a feed through a scripted session and logs what happens.
//!
//! ```text
//! RUST_LOG=swipefeed=debug,swipefeed_window=debug cargo run -p swipefeed --example scripted_feed
//! ```

use glam::DVec3;
use kurbo::Point;
use swipefeed::{
    Bounds3, Capabilities, ContentError, ContentLibrary, FeedConfig, FeedController, FeedObserver,
    InputEvent, NoUiSurfaces, PointerId, PointerSample,
};
use tracing_subscriber::EnvFilter;

const DT: f64 = 1.0 / 60.0;

/// Boxes of growing size; every third one fails to load once.
#[derive(Debug, Default)]
struct Boxes {
    failed_once: Vec<usize>,
}

impl ContentLibrary for Boxes {
    type Id = usize;
    type Handle = usize;

    fn ordered_ids(&self) -> Vec<usize> {
        (0..6).collect()
    }

    fn instantiate(&mut self, id: &usize) -> Result<usize, ContentError> {
        if id % 3 == 2 && !self.failed_once.contains(id) {
            self.failed_once.push(*id);
            return Err(ContentError::Unavailable(format!("box {id} still streaming")));
        }
        Ok(*id)
    }

    fn destroy(&mut self, _handle: usize) {}

    fn bounds(&self, handle: &usize) -> Result<Bounds3, ContentError> {
        let size = 4.0 + 4.0 * *handle as f64;
        Ok(Bounds3::from_center_size(DVec3::ZERO, DVec3::splat(size)))
    }

    fn anchor(&self, _handle: &usize) -> DVec3 {
        DVec3::ZERO
    }

    fn capabilities(&self, id: &usize) -> Capabilities {
        if id % 2 == 0 {
            Capabilities::PLAYABLE
        } else {
            Capabilities::INTERACTIVE
        }
    }
}

struct Printer;

impl FeedObserver<usize> for Printer {
    fn on_reveal(&mut self, index: usize) {
        println!("reveal {index}");
    }

    fn on_hide(&mut self) {
        println!("hide");
    }

    fn on_current_settled(&mut self, index: usize, _id: &usize, capabilities: Capabilities) {
        println!("settled on {index} with {capabilities:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut feed = FeedController::new(
        Boxes::default(),
        Printer,
        NoUiSurfaces,
        FeedConfig::default(),
    );
    feed.set_active(true);

    let finger = PointerId(1);
    let mut time = 0.0;
    for _ in 0..4 {
        feed.handle_input(InputEvent::PointerDown(PointerSample::new(
            finger,
            Point::new(200.0, 700.0),
            time,
        )));
        for step in 1..=10 {
            time += DT;
            let y = 700.0 - 40.0 * f64::from(step);
            feed.handle_input(InputEvent::PointerMove(PointerSample::new(
                finger,
                Point::new(200.0, y),
                time,
            )));
            feed.tick(DT);
        }
        feed.handle_input(InputEvent::PointerUp(PointerSample::new(
            finger,
            Point::new(200.0, 300.0),
            time,
        )));
        for _ in 0..90 {
            time += DT;
            let report = feed.tick(DT);
            if let Some(index) = report.committed_index {
                println!("paged to {index}");
            }
        }
        let pose = feed.camera_pose();
        println!(
            "camera eye {:.2?} distance {:.2}",
            pose.eye,
            feed.camera_state().current_distance
        );
    }
}
