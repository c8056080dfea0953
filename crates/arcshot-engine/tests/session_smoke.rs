//! End-to-end smoke tests: a spawned session driving a shared surface,
//! checked from the outside the way a UI collaborator would.

use std::f32::consts::FRAC_PI_4;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use arcshot_core::geometry::Rect;
use arcshot_core::notice::Notice;
use arcshot_core::surface::AnimationSurface;
use arcshot_core::test_helpers::RecordingSurface;
use arcshot_engine::{EngineConfig, SessionEvent, spawn_session};

/// Recording surface the test can still read after the session task has
/// taken ownership of its half.
#[derive(Clone, Default)]
struct SharedSurface(Arc<Mutex<RecordingSurface>>);

impl AnimationSurface for SharedSurface {
    fn ball_moved(&mut self, ball: Rect) {
        self.0.lock().unwrap().ball_moved(ball);
    }

    fn floor_moved(&mut self, floor: Rect) {
        self.0.lock().unwrap().floor_moved(floor);
    }

    fn notice_posted(&mut self, notice: &Notice) {
        self.0.lock().unwrap().notice_posted(notice);
    }
}

fn fast_config() -> EngineConfig {
    EngineConfig {
        frame_interval_ms: 1,
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn surface_and_events_agree_on_every_frame() {
    let surface = SharedSurface::default();
    let mut handle = spawn_session(fast_config(), surface.clone());
    handle.resize(800, 600);
    handle.start(20.0, FRAC_PI_4);

    let mut last_event_ball = None;
    loop {
        match handle.next_event().await.unwrap() {
            SessionEvent::Frame { ball, .. } => last_event_ball = Some(ball),
            SessionEvent::Finished { .. } => break,
            _ => {},
        }
    }
    handle.stop();
    let _ = handle.task.await;

    let recorded = surface.0.lock().unwrap();
    // Initial placement plus one render per frame.
    assert_eq!(recorded.ball_positions.len(), 59);
    assert_eq!(recorded.last_ball(), last_event_ball);
    assert_eq!(recorded.last_floor(), Some(Rect::new(0, 590, 800, 600)));
}

#[tokio::test]
async fn resize_mid_flight_reaches_the_surface() {
    let surface = SharedSurface::default();
    let mut handle = spawn_session(fast_config(), surface.clone());
    handle.resize(800, 600);
    handle.start(20.0, FRAC_PI_4);

    // Let a few frames land first.
    let mut seen = 0;
    while seen < 3 {
        if matches!(
            handle.next_event().await.unwrap(),
            SessionEvent::Frame { .. }
        ) {
            seen += 1;
        }
    }

    handle.resize(1024, 768);
    loop {
        if matches!(
            handle.next_event().await.unwrap(),
            SessionEvent::Aborted { .. }
        ) {
            break;
        }
    }
    handle.stop();
    let _ = handle.task.await;

    let recorded = surface.0.lock().unwrap();
    assert_eq!(
        recorded.notices,
        vec!["Animation aborted due to resize".to_string()]
    );
    assert_eq!(recorded.last_floor(), Some(Rect::new(0, 758, 1024, 768)));
    // Ball ends at rest on the new floor, not mid-flight.
    assert_eq!(recorded.last_ball(), Some(Rect::new(10, 707, 60, 757)));
}

#[tokio::test]
async fn frames_are_paced_by_the_wall_clock() {
    // speed 2 at 45°: flight ≈ 0.289s → 6 frames at 20ms each.
    let config = EngineConfig {
        frame_interval_ms: 20,
        ..EngineConfig::default()
    };
    let mut handle = spawn_session(config, SharedSurface::default());
    handle.resize(800, 600);

    let started = Instant::now();
    handle.start(2.0, FRAC_PI_4);
    loop {
        if matches!(
            handle.next_event().await.unwrap(),
            SessionEvent::Finished { .. }
        ) {
            break;
        }
    }
    let elapsed = started.elapsed();
    handle.stop();
    let _ = handle.task.await;

    assert!(
        elapsed.as_millis() >= 80,
        "6 frames at 20ms should take ~100ms, took {elapsed:?}"
    );
    assert!(elapsed.as_secs() < 2, "flight should not crawl: {elapsed:?}");
}
