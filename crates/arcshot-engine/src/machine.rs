use std::time::Instant;

use serde::{Deserialize, Serialize};

use arcshot_core::geometry::{self, Rect};
use arcshot_core::kinematics::{Kinematics, LaunchParams};
use arcshot_core::notice::{Notice, NoticeBoard};
use arcshot_core::schedule::FrameSchedule;
use arcshot_core::surface::AnimationSurface;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Notice text posted when a resize cuts a flight short.
pub const RESIZE_ABORT_NOTICE: &str = "Animation aborted due to resize";

/// Observable animation status, used by the UI to gate its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationStatus {
    Idle,
    Running,
}

/// Static geometry of the scene: floor band plus the ball's current rect.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SceneLayout {
    floor: Rect,
    ball: Rect,
}

/// Everything one running episode owns. Dropped wholesale on completion
/// or abort, so no transient field can leak into the next episode.
#[derive(Debug, Clone, Copy)]
struct Flight {
    kinematics: Kinematics,
    schedule: FrameSchedule,
    /// Ball rect captured at launch. Every frame is computed relative to
    /// this, never to the previous frame, so rounding never accumulates.
    start: Rect,
    episode: u64,
}

/// Tagged scene state. There are no None-until-initialized fields: either
/// the viewport has never been seen, or the full layout exists.
#[derive(Debug, Clone, Copy)]
enum Scene {
    Uninitialized,
    Idle { layout: SceneLayout },
    Running { layout: SceneLayout, flight: Flight },
}

/// Result of one cooperative tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A frame was rendered; the ball moved to `ball`.
    Frame { episode: u64, index: u32, ball: Rect },
    /// The schedule is exhausted; the machine returned to Idle with the
    /// ball left at its final position.
    Finished { episode: u64 },
    /// Nothing to animate. A tick that lands after an abort ends up here.
    Idle,
}

/// The animation state machine. Owns the scene, the episode counter, the
/// notice board, and the rendering surface.
pub struct AnimationMachine<S> {
    config: EngineConfig,
    scene: Scene,
    episodes_started: u64,
    notices: NoticeBoard,
    surface: S,
}

impl<S: AnimationSurface> AnimationMachine<S> {
    pub fn new(config: EngineConfig, surface: S) -> Self {
        Self {
            config,
            scene: Scene::Uninitialized,
            episodes_started: 0,
            notices: NoticeBoard::new(),
            surface,
        }
    }

    /// Begin a new episode. Validates parameters first; a running episode
    /// is cancelled before any new state is initialized, so exactly one
    /// schedule is ever alive. A degenerate flight (zero vertical
    /// velocity) completes immediately with zero frames rendered.
    pub fn start(&mut self, params: LaunchParams) -> Result<u64, EngineError> {
        params.validate()?;

        if self.is_running() {
            tracing::debug!("start requested mid-flight, cancelling previous episode");
            self.abort(None);
        }

        let Scene::Idle { layout } = self.scene else {
            return Err(EngineError::SurfaceNotReady);
        };

        let kinematics = Kinematics::derive(params);
        self.episodes_started += 1;
        let episode = self.episodes_started;

        if kinematics.is_degenerate() {
            tracing::debug!(episode, "zero-duration flight, completing immediately");
            return Ok(episode);
        }

        let schedule =
            FrameSchedule::build(kinematics.flight_time, self.config.frames_per_flight_second);
        tracing::info!(
            episode,
            flight_time = kinematics.flight_time,
            total_frames = schedule.total_frames,
            "animation started"
        );
        self.scene = Scene::Running {
            layout,
            flight: Flight {
                kinematics,
                schedule,
                start: layout.ball,
                episode,
            },
        };
        Ok(episode)
    }

    /// Render one frame, or finish the episode when the schedule runs out.
    pub fn step(&mut self) -> StepOutcome {
        let Scene::Running { layout, flight } = &mut self.scene else {
            return StepOutcome::Idle;
        };

        match flight.schedule.next() {
            Some(frame) => {
                let (dx, dy) = flight.kinematics.displacement_at(frame.sim_time);
                let ball = flight
                    .start
                    .displaced_by(dx * self.config.unit_to_pixel, dy * self.config.unit_to_pixel);
                layout.ball = ball;
                let episode = flight.episode;
                let index = frame.index;
                self.surface.ball_moved(ball);
                StepOutcome::Frame {
                    episode,
                    index,
                    ball,
                }
            },
            None => {
                let episode = flight.episode;
                let layout = *layout;
                // Ball stays where the final frame left it.
                self.scene = Scene::Idle { layout };
                tracing::info!(episode, "animation complete");
                StepOutcome::Finished { episode }
            },
        }
    }

    /// Cancel the running episode and put the ball back at rest. A no-op
    /// when nothing is running. A reason posts a transient notice.
    pub fn abort(&mut self, reason: Option<&str>) {
        let Scene::Running { layout, flight } = self.scene else {
            return;
        };
        let episode = flight.episode;
        let mut layout = layout;
        layout.ball = self.resting_ball(layout.floor);
        self.scene = Scene::Idle { layout };
        self.surface.ball_moved(layout.ball);
        tracing::info!(episode, reason = reason.unwrap_or("requested"), "animation aborted");

        if let Some(text) = reason {
            let notice = self
                .notices
                .post(text, self.config.notice_ttl(), Instant::now());
            self.surface.notice_posted(&notice);
        }
    }

    /// Bring the ball back to its default resting position. Cancels a
    /// running episode first; idempotent when idle.
    pub fn reset_ball(&mut self) {
        if self.is_running() {
            // Abort already repositions.
            self.abort(None);
            return;
        }
        if let Scene::Idle { layout } = &mut self.scene {
            layout.ball = geometry::resting_ball_rect(
                layout.floor.top,
                self.config.ball_diameter,
                self.config.ball_edge_offset,
            );
            let ball = layout.ball;
            self.surface.ball_moved(ball);
        }
    }

    /// React to a viewport size change. The first call initializes the
    /// scene. Afterwards the floor follows the new viewport and the ball
    /// keeps its x while snapping onto the new floor. A running episode is
    /// force-aborted: its captured starting rect is meaningless under the
    /// new geometry.
    pub fn resize(&mut self, width: i32, height: i32) {
        let floor = geometry::floor_rect(width, height, self.config.floor_band);
        match &mut self.scene {
            Scene::Uninitialized => {
                let ball = geometry::resting_ball_rect(
                    floor.top,
                    self.config.ball_diameter,
                    self.config.ball_edge_offset,
                );
                self.scene = Scene::Idle {
                    layout: SceneLayout { floor, ball },
                };
                self.surface.floor_moved(floor);
                self.surface.ball_moved(ball);
                tracing::debug!(width, height, "scene initialized");
            },
            Scene::Idle { layout } => {
                layout.floor = floor;
                layout.ball = layout.ball.with_vertical_span(
                    floor.top - self.config.ball_diameter - 1,
                    floor.top - 1,
                );
                let (floor, ball) = (layout.floor, layout.ball);
                self.surface.floor_moved(floor);
                self.surface.ball_moved(ball);
            },
            Scene::Running { layout, .. } => {
                layout.floor = floor;
                self.surface.floor_moved(floor);
                self.abort(Some(RESIZE_ABORT_NOTICE));
            },
        }
    }

    pub fn status(&self) -> AnimationStatus {
        match self.scene {
            Scene::Running { .. } => AnimationStatus::Running,
            _ => AnimationStatus::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    /// Episode id of the in-flight animation, if any.
    pub fn running_episode(&self) -> Option<u64> {
        match &self.scene {
            Scene::Running { flight, .. } => Some(flight.episode),
            _ => None,
        }
    }

    pub fn ball(&self) -> Option<Rect> {
        match &self.scene {
            Scene::Uninitialized => None,
            Scene::Idle { layout } | Scene::Running { layout, .. } => Some(layout.ball),
        }
    }

    pub fn floor(&self) -> Option<Rect> {
        match &self.scene {
            Scene::Uninitialized => None,
            Scene::Idle { layout } | Scene::Running { layout, .. } => Some(layout.floor),
        }
    }

    /// Notices still within their display window.
    pub fn active_notices(&mut self, now: Instant) -> &[Notice] {
        self.notices.active(now)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn resting_ball(&self, floor: Rect) -> Rect {
        geometry::resting_ball_rect(
            floor.top,
            self.config.ball_diameter,
            self.config.ball_edge_offset,
        )
    }
}
