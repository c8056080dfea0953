use tracing_subscriber::EnvFilter;

use arcshot_core::geometry::Rect;
use arcshot_core::notice::Notice;
use arcshot_core::surface::AnimationSurface;
use arcshot_engine::{EngineConfig, SessionEvent, spawn_session};

/// Surface that logs every callback instead of drawing. Stands in for the
/// GUI collaborator.
struct TracingSurface;

impl AnimationSurface for TracingSurface {
    fn ball_moved(&mut self, ball: Rect) {
        tracing::debug!(
            left = ball.left,
            top = ball.top,
            right = ball.right,
            bottom = ball.bottom,
            "ball moved"
        );
    }

    fn floor_moved(&mut self, floor: Rect) {
        tracing::debug!(top = floor.top, width = floor.width(), "floor moved");
    }

    fn notice_posted(&mut self, notice: &Notice) {
        tracing::info!(text = %notice.text, "notice");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let speed = std::env::args()
        .find_map(|a| a.strip_prefix("--speed=").map(String::from))
        .and_then(|v| v.parse::<f32>().ok())
        .unwrap_or(20.0);

    let angle_degrees = std::env::args()
        .find_map(|a| a.strip_prefix("--angle=").map(String::from))
        .and_then(|v| v.parse::<f32>().ok())
        .unwrap_or(45.0);

    let config = EngineConfig::load();
    config.validate();

    tracing::info!(speed, angle_degrees, "arcshot sim starting");

    let mut handle = spawn_session(config, TracingSurface);
    handle.resize(1280, 720);
    handle.start(speed, angle_degrees.to_radians());

    while let Some(event) = handle.next_event().await {
        match event {
            SessionEvent::Started { episode } => {
                tracing::info!(episode, "flight started");
            },
            SessionEvent::Frame { index, ball, .. } => {
                tracing::info!(frame = index, x = ball.left, y = ball.top, "frame");
            },
            SessionEvent::Finished { episode } => {
                tracing::info!(episode, "flight complete");
                break;
            },
            SessionEvent::Rejected { reason } => {
                tracing::error!(%reason, "launch rejected");
                break;
            },
            SessionEvent::Aborted { episode, .. } => {
                tracing::info!(episode, "flight aborted");
                break;
            },
            SessionEvent::Stopped => break,
        }
    }

    handle.stop();
    let _ = handle.task.await;
}
