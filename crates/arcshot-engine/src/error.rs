use arcshot_core::kinematics::LaunchError;

/// Errors an animation request can fail with. All of them are local and
/// recoverable; the machine stays in whatever state it was in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    /// Launch parameters were rejected before any state mutation.
    InvalidLaunch(LaunchError),
    /// No viewport size has been seen yet, so there is no geometry to
    /// animate against.
    SurfaceNotReady,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLaunch(e) => write!(f, "invalid launch parameters: {e}"),
            Self::SurfaceNotReady => {
                write!(f, "surface has no geometry yet; resize must happen first")
            },
        }
    }
}

impl std::error::Error for EngineError {}

impl From<LaunchError> for EngineError {
    fn from(e: LaunchError) -> Self {
        Self::InvalidLaunch(e)
    }
}
