pub mod config;
pub mod error;
pub mod machine;
pub mod session;

pub use config::EngineConfig;
pub use error::EngineError;
pub use machine::{AnimationMachine, AnimationStatus, StepOutcome};
pub use session::{SessionCommand, SessionEvent, SessionHandle, spawn_session};
