use serde::{Deserialize, Serialize};

/// Gravitational acceleration in units/s².
pub const GRAVITY: f32 = 9.8;
/// Straight up. Angles beyond this would launch backwards.
pub const MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// User-chosen initial speed and launch angle. Immutable once a flight starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Initial speed in units/sec.
    pub speed: f32,
    /// Launch angle in radians, 0 = horizontal, π/2 = straight up.
    pub angle: f32,
}

impl LaunchParams {
    pub fn new(speed: f32, angle: f32) -> Self {
        Self { speed, angle }
    }

    /// Reject parameters outside the physical domain before any state mutation.
    pub fn validate(&self) -> Result<(), LaunchError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(LaunchError::NegativeSpeed(self.speed));
        }
        if !self.angle.is_finite() || self.angle < 0.0 || self.angle > MAX_ANGLE {
            return Err(LaunchError::AngleOutOfRange(self.angle));
        }
        Ok(())
    }
}

/// Invalid launch parameters. Reported to the caller, never fatal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchError {
    NegativeSpeed(f32),
    AngleOutOfRange(f32),
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeSpeed(s) => write!(f, "speed must be non-negative, got {s}"),
            Self::AngleOutOfRange(a) => {
                write!(f, "angle must be within [0, π/2] radians, got {a}")
            },
        }
    }
}

impl std::error::Error for LaunchError {}

/// Velocity components and flight duration derived from launch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub horizontal_velocity: f32,
    pub vertical_velocity: f32,
    /// Time for the projectile to return to ground level. Zero for a
    /// degenerate launch (speed 0 or angle 0).
    pub flight_time: f32,
}

impl Kinematics {
    /// Derive velocity components and flight time from validated parameters.
    pub fn derive(params: LaunchParams) -> Self {
        let horizontal_velocity = params.speed * params.angle.cos();
        let vertical_velocity = params.speed * params.angle.sin();
        let flight_time = vertical_velocity / (GRAVITY / 2.0);
        Self {
            horizontal_velocity,
            vertical_velocity,
            flight_time,
        }
    }

    /// Physical displacement (x, y) from the launch point at time `t`.
    /// Positive y is up; screen conversion happens at the geometry layer.
    pub fn displacement_at(&self, t: f32) -> (f32, f32) {
        let x = self.horizontal_velocity * t;
        let y = self.vertical_velocity * t - 0.5 * GRAVITY * t * t;
        (x, y)
    }

    /// A flight with no vertical velocity never leaves the ground.
    pub fn is_degenerate(&self) -> bool {
        self.flight_time <= 0.0
    }
}
