use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use arcshot_core::geometry::Rect;
use arcshot_core::kinematics::LaunchParams;
use arcshot_core::surface::AnimationSurface;

use crate::config::EngineConfig;
use crate::machine::{AnimationMachine, AnimationStatus, RESIZE_ABORT_NOTICE, StepOutcome};

/// Commands sent from the UI collaborator to the animation tick loop.
#[derive(Debug)]
pub enum SessionCommand {
    Start { speed: f32, angle: f32 },
    ResetBall,
    Abort { reason: Option<String> },
    Resize { width: i32, height: i32 },
    Stop,
}

/// Lifecycle events broadcast from the tick loop back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { episode: u64 },
    /// A frame was rendered; redraw the ball at `ball`.
    Frame { episode: u64, index: u32, ball: Rect },
    Finished { episode: u64 },
    Aborted { episode: u64, reason: Option<String> },
    /// A start was rejected by parameter validation.
    Rejected { reason: String },
    /// The session loop has exited.
    Stopped,
}

/// Handle to a spawned animation session. Commands are fire-and-forget;
/// a send after the loop exits is silently dropped, matching the
/// safe-to-call-anytime contract of the engine surface.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    pub events: mpsc::UnboundedReceiver<SessionEvent>,
    status: watch::Receiver<AnimationStatus>,
    pub task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn start(&self, speed: f32, angle: f32) {
        let _ = self.commands.send(SessionCommand::Start { speed, angle });
    }

    pub fn reset_ball(&self) {
        let _ = self.commands.send(SessionCommand::ResetBall);
    }

    pub fn abort(&self, reason: Option<String>) {
        let _ = self.commands.send(SessionCommand::Abort { reason });
    }

    pub fn resize(&self, width: i32, height: i32) {
        let _ = self.commands.send(SessionCommand::Resize { width, height });
    }

    pub fn stop(&self) {
        let _ = self.commands.send(SessionCommand::Stop);
    }

    /// Read-only status for the UI to gate its controls.
    pub fn is_running(&self) -> bool {
        *self.status.borrow() == AnimationStatus::Running
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }
}

/// Spawn the animation tick loop as a tokio task and return its handle.
pub fn spawn_session<S>(config: EngineConfig, surface: S) -> SessionHandle
where
    S: AnimationSurface + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(AnimationStatus::Idle);

    let machine = AnimationMachine::new(config.clone(), surface);
    let task = tokio::spawn(async move {
        run_session_loop(machine, config, cmd_rx, event_tx, status_tx).await;
    });

    SessionHandle {
        commands: cmd_tx,
        events: event_rx,
        status: status_rx,
        task,
    }
}

/// The cooperative tick loop. One loop owns one machine, so two schedules
/// can never race, and a tick that fires after an abort sees an idle
/// machine and does nothing.
async fn run_session_loop<S: AnimationSurface>(
    mut machine: AnimationMachine<S>,
    config: EngineConfig,
    mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    status_tx: watch::Sender<AnimationStatus>,
) {
    let tick_interval = config.frame_interval();
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match machine.step() {
                    StepOutcome::Frame { episode, index, ball } => {
                        let _ = event_tx.send(SessionEvent::Frame { episode, index, ball });
                    },
                    StepOutcome::Finished { episode } => {
                        let _ = status_tx.send(AnimationStatus::Idle);
                        let _ = event_tx.send(SessionEvent::Finished { episode });
                    },
                    StepOutcome::Idle => {},
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(SessionCommand::Start { speed, angle }) => {
                        let cancelled = machine.running_episode();
                        match machine.start(LaunchParams::new(speed, angle)) {
                            Ok(episode) => {
                                if let Some(old) = cancelled {
                                    let _ = event_tx.send(SessionEvent::Aborted {
                                        episode: old,
                                        reason: None,
                                    });
                                }
                                let _ = event_tx.send(SessionEvent::Started { episode });
                                if machine.is_running() {
                                    let _ = status_tx.send(AnimationStatus::Running);
                                    // Fresh episode, fresh cadence.
                                    interval = tokio::time::interval(tick_interval);
                                    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                                } else {
                                    // Degenerate zero-frame flight.
                                    let _ = status_tx.send(AnimationStatus::Idle);
                                    let _ = event_tx.send(SessionEvent::Finished { episode });
                                }
                            },
                            Err(e) => {
                                tracing::warn!(error = %e, "launch rejected");
                                let _ = event_tx.send(SessionEvent::Rejected {
                                    reason: e.to_string(),
                                });
                            },
                        }
                    },
                    Some(SessionCommand::ResetBall) => {
                        let cancelled = machine.running_episode();
                        machine.reset_ball();
                        let _ = status_tx.send(AnimationStatus::Idle);
                        if let Some(episode) = cancelled {
                            let _ = event_tx.send(SessionEvent::Aborted { episode, reason: None });
                        }
                    },
                    Some(SessionCommand::Abort { reason }) => {
                        if let Some(episode) = machine.running_episode() {
                            machine.abort(reason.as_deref());
                            let _ = status_tx.send(AnimationStatus::Idle);
                            let _ = event_tx.send(SessionEvent::Aborted { episode, reason });
                        }
                    },
                    Some(SessionCommand::Resize { width, height }) => {
                        let cancelled = machine.running_episode();
                        machine.resize(width, height);
                        if let Some(episode) = cancelled {
                            let _ = status_tx.send(AnimationStatus::Idle);
                            let _ = event_tx.send(SessionEvent::Aborted {
                                episode,
                                reason: Some(RESIZE_ABORT_NOTICE.to_string()),
                            });
                        }
                    },
                    Some(SessionCommand::Stop) | None => break,
                }
            }
        }
    }

    tracing::debug!("session loop exiting");
    let _ = event_tx.send(SessionEvent::Stopped);
}
