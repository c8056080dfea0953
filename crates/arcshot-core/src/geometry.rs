use serde::{Deserialize, Serialize};

/// Ball diameter in pixels.
pub const BALL_DIAMETER: i32 = 50;
/// Resting offset of the ball from the left viewport edge.
pub const BALL_EDGE_OFFSET: i32 = 10;
/// Height of the floor band at the bottom of the viewport.
pub const FLOOR_BAND: i32 = 10;
/// Physical displacement units to screen pixels.
pub const UNIT_TO_PIXEL: f32 = 5.0;

/// Axis-aligned rectangle in screen pixels. Screen Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Offset by a physical displacement already scaled to pixels.
    /// `dy_up` is physical (up-positive); the screen axis is flipped here.
    pub fn displaced_by(&self, dx: f32, dy_up: f32) -> Self {
        Self {
            left: (self.left as f32 + dx).round() as i32,
            top: (self.top as f32 - dy_up).round() as i32,
            right: (self.right as f32 + dx).round() as i32,
            bottom: (self.bottom as f32 - dy_up).round() as i32,
        }
    }

    /// Keep the horizontal span, replace the vertical one. Used when a
    /// resize moves the floor but the ball's x must survive.
    pub fn with_vertical_span(&self, top: i32, bottom: i32) -> Self {
        Self {
            left: self.left,
            top,
            right: self.right,
            bottom,
        }
    }
}

/// Floor band spanning the bottom of the viewport.
pub fn floor_rect(viewport_width: i32, viewport_height: i32, band: i32) -> Rect {
    Rect::new(0, viewport_height - band, viewport_width, viewport_height)
}

/// Ball at its default resting spot: offset from the left edge, raised one
/// pixel so it sits on top of the floor instead of digging into it.
pub fn resting_ball_rect(floor_top: i32, diameter: i32, edge_offset: i32) -> Rect {
    Rect::new(
        edge_offset,
        floor_top - diameter - 1,
        edge_offset + diameter,
        floor_top - 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_occupies_bottom_band() {
        let floor = floor_rect(800, 600, FLOOR_BAND);
        assert_eq!(floor, Rect::new(0, 590, 800, 600));
        assert_eq!(floor.height(), FLOOR_BAND);
    }

    #[test]
    fn resting_ball_sits_one_pixel_above_floor() {
        let ball = resting_ball_rect(590, BALL_DIAMETER, BALL_EDGE_OFFSET);
        assert_eq!(ball.bottom, 589);
        assert_eq!(ball.top, 539);
        assert_eq!(ball.left, BALL_EDGE_OFFSET);
        assert_eq!(ball.width(), BALL_DIAMETER);
        assert_eq!(ball.height(), BALL_DIAMETER);
    }

    #[test]
    fn displacement_negates_vertical_axis() {
        let start = Rect::new(10, 100, 60, 150);
        // Moving up physically moves the rect toward smaller screen y.
        let moved = start.displaced_by(20.0, 30.0);
        assert_eq!(moved, Rect::new(30, 70, 80, 120));
    }

    #[test]
    fn displacement_rounds_to_nearest_pixel() {
        let start = Rect::new(0, 0, 50, 50);
        let moved = start.displaced_by(1.6, -2.4);
        assert_eq!(moved.left, 2);
        assert_eq!(moved.top, 2);
    }

    #[test]
    fn vertical_span_swap_preserves_x() {
        let ball = Rect::new(120, 40, 170, 90);
        let snapped = ball.with_vertical_span(539, 589);
        assert_eq!(snapped.left, 120);
        assert_eq!(snapped.right, 170);
        assert_eq!(snapped.top, 539);
        assert_eq!(snapped.bottom, 589);
    }
}
