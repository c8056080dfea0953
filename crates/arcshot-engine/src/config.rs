use std::time::Duration;

use serde::Deserialize;

use arcshot_core::{geometry, notice, schedule};

/// Engine tuning knobs, loaded from `arcshot.toml`. Defaults reproduce the
/// classic layout: 50px ball, 10px floor band, ~30 fps cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock delay between animation frames in milliseconds.
    pub frame_interval_ms: u64,
    /// How many frames one second of simulated flight is split into.
    pub frames_per_flight_second: f32,
    /// Physical displacement units to screen pixels.
    pub unit_to_pixel: f32,
    pub ball_diameter: i32,
    /// Resting offset of the ball from the left viewport edge.
    pub ball_edge_offset: i32,
    /// Height of the floor band at the bottom of the viewport.
    pub floor_band: i32,
    /// Lifetime of transient notices in seconds.
    pub notice_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: schedule::FRAME_INTERVAL_MS,
            frames_per_flight_second: schedule::FRAMES_PER_FLIGHT_SECOND,
            unit_to_pixel: geometry::UNIT_TO_PIXEL,
            ball_diameter: geometry::BALL_DIAMETER,
            ball_edge_offset: geometry::BALL_EDGE_OFFSET,
            floor_band: geometry::FLOOR_BAND,
            notice_ttl_secs: notice::NOTICE_TTL.as_secs(),
        }
    }
}

impl EngineConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    /// Load config from the `ARCSHOT_CONFIG` path or `arcshot.toml`,
    /// falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("ARCSHOT_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            tracing::info!(path, "loaded engine config");
            return config;
        }
        match std::fs::read_to_string("arcshot.toml") {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    tracing::info!("loaded engine config from arcshot.toml");
                    config
                },
                Err(e) => {
                    tracing::warn!("failed to parse arcshot.toml: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    /// Log warnings for values that make the engine behave strangely.
    pub fn validate(&self) {
        if self.frame_interval_ms == 0 {
            tracing::warn!("frame_interval_ms is 0; the tick loop will spin without pacing");
        }
        if self.frames_per_flight_second <= 0.0 {
            tracing::warn!(
                "frames_per_flight_second must be positive; every flight will complete instantly"
            );
        }
        if self.ball_diameter <= 0 {
            tracing::warn!(diameter = self.ball_diameter, "ball_diameter is not positive");
        }
        if self.floor_band <= 0 {
            tracing::warn!(band = self.floor_band, "floor_band is not positive");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_interval_ms, 33);
        assert_eq!(config.frames_per_flight_second, 20.0);
        assert_eq!(config.unit_to_pixel, 5.0);
        assert_eq!(config.ball_diameter, 50);
        assert_eq!(config.ball_edge_offset, 10);
        assert_eq!(config.floor_band, 10);
        assert_eq!(config.notice_ttl_secs, 2);
    }

    #[test]
    fn partial_toml_overrides_keep_defaults() {
        let toml_str = r#"
            frame_interval_ms = 16
            unit_to_pixel = 8.0
        "#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.unit_to_pixel, 8.0);
        assert_eq!(config.ball_diameter, 50);
        assert_eq!(config.frames_per_flight_second, 20.0);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.notice_ttl(), Duration::from_secs(2));
    }
}
