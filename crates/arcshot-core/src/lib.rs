pub mod geometry;
pub mod kinematics;
pub mod notice;
pub mod schedule;
pub mod surface;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::geometry::Rect;
    use crate::notice::Notice;
    use crate::surface::AnimationSurface;

    /// Surface that records every callback for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ball_positions: Vec<Rect>,
        pub floor_positions: Vec<Rect>,
        pub notices: Vec<String>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        /// The most recently rendered ball rectangle.
        pub fn last_ball(&self) -> Option<Rect> {
            self.ball_positions.last().copied()
        }

        /// The most recently rendered floor rectangle.
        pub fn last_floor(&self) -> Option<Rect> {
            self.floor_positions.last().copied()
        }
    }

    impl AnimationSurface for RecordingSurface {
        fn ball_moved(&mut self, ball: Rect) {
            self.ball_positions.push(ball);
        }

        fn floor_moved(&mut self, floor: Rect) {
            self.floor_positions.push(floor);
        }

        fn notice_posted(&mut self, notice: &Notice) {
            self.notices.push(notice.text.clone());
        }
    }
}
