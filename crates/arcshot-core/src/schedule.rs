use serde::{Deserialize, Serialize};

/// Frames rendered per second of simulated flight time.
pub const FRAMES_PER_FLIGHT_SECOND: f32 = 20.0;
/// Wall-clock delay between frames (~30 fps).
pub const FRAME_INTERVAL_MS: u64 = 33;

/// Discretization of one flight into frames. The schedule only steps
/// simulated time; wall-clock pacing belongs to whoever drives it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSchedule {
    pub total_frames: u32,
    pub time_step: f32,
    pub current_frame: u32,
    /// Simulated time of the next frame to render. Starts one step ahead
    /// of launch; the t=0 frame is never rendered.
    pub sim_time: f32,
}

/// One frame yielded by the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    pub index: u32,
    pub sim_time: f32,
}

impl FrameSchedule {
    /// Build a schedule for the given flight duration. A zero-duration
    /// flight yields zero frames and is born exhausted; the time-step
    /// division is skipped entirely in that case.
    pub fn build(flight_time: f32, frames_per_flight_second: f32) -> Self {
        let total_frames = (flight_time * frames_per_flight_second).round() as u32;
        if total_frames == 0 {
            return Self {
                total_frames: 0,
                time_step: 0.0,
                current_frame: 0,
                sim_time: 0.0,
            };
        }
        let time_step = flight_time / total_frames as f32;
        Self {
            total_frames,
            time_step,
            current_frame: 0,
            sim_time: time_step,
        }
    }

    /// Yield the next frame, or `None` once every frame has been rendered.
    pub fn next(&mut self) -> Option<FrameStep> {
        if self.current_frame == self.total_frames {
            return None;
        }
        let step = FrameStep {
            index: self.current_frame,
            sim_time: self.sim_time,
        };
        self.current_frame += 1;
        self.sim_time += self.time_step;
        Some(step)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_frame == self.total_frames
    }

    pub fn remaining(&self) -> u32 {
        self.total_frames - self.current_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_for_reference_flight() {
        // speed 20 at 45°: flight ≈ 2.886s, 20 frames per flight second
        let schedule = FrameSchedule::build(2.8861, FRAMES_PER_FLIGHT_SECOND);
        assert_eq!(schedule.total_frames, 58);
    }

    #[test]
    fn zero_flight_is_born_exhausted() {
        let mut schedule = FrameSchedule::build(0.0, FRAMES_PER_FLIGHT_SECOND);
        assert_eq!(schedule.total_frames, 0);
        assert!(schedule.is_exhausted());
        assert!(schedule.next().is_none());
    }

    #[test]
    fn first_frame_is_one_step_ahead_of_launch() {
        let mut schedule = FrameSchedule::build(2.0, FRAMES_PER_FLIGHT_SECOND);
        let first = schedule.next().unwrap();
        assert_eq!(first.index, 0);
        assert!((first.sim_time - schedule.time_step).abs() < 1e-6);
        assert!(first.sim_time > 0.0, "t=0 frame must never be rendered");
    }

    #[test]
    fn yields_exactly_total_frames_steps() {
        let mut schedule = FrameSchedule::build(1.5, FRAMES_PER_FLIGHT_SECOND);
        let total = schedule.total_frames;
        let mut count = 0;
        while schedule.next().is_some() {
            count += 1;
        }
        assert_eq!(count, total);
        assert!(schedule.next().is_none(), "exhausted schedule stays exhausted");
    }

    #[test]
    fn last_frame_lands_on_flight_end() {
        let flight_time = 2.886;
        let mut schedule = FrameSchedule::build(flight_time, FRAMES_PER_FLIGHT_SECOND);
        let mut last = None;
        while let Some(step) = schedule.next() {
            last = Some(step);
        }
        let last = last.unwrap();
        assert!(
            (last.sim_time - flight_time).abs() < 1e-3,
            "final frame should sample the landing instant, got {}",
            last.sim_time
        );
    }

    #[test]
    fn remaining_counts_down() {
        let mut schedule = FrameSchedule::build(1.0, FRAMES_PER_FLIGHT_SECOND);
        let total = schedule.total_frames;
        schedule.next();
        schedule.next();
        assert_eq!(schedule.remaining(), total - 2);
    }
}
