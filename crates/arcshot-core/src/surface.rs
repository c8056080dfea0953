use crate::geometry::Rect;
use crate::notice::Notice;

/// Rendering seam between the animation engine and whatever draws it.
///
/// The engine computes geometry; a surface turns it into pixels. Keeping
/// this as a trait lets the kinematics and scheduling layers run in tests
/// with no rendering at all.
pub trait AnimationSurface {
    /// The ball's rectangle changed and should be redrawn.
    fn ball_moved(&mut self, ball: Rect);

    /// The floor's rectangle changed, typically on resize.
    fn floor_moved(&mut self, floor: Rect);

    /// A transient message was posted for the viewer.
    fn notice_posted(&mut self, notice: &Notice);
}

/// Surface that discards everything. For headless runs of the engine.
#[derive(Debug, Default)]
pub struct NullSurface;

impl AnimationSurface for NullSurface {
    fn ball_moved(&mut self, _ball: Rect) {}
    fn floor_moved(&mut self, _floor: Rect) {}
    fn notice_posted(&mut self, _notice: &Notice) {}
}
