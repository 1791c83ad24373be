//! Configuration errors
//!
//! Gameplay never fails: smash outcomes and collisions are plain enum values.
//! The only rejectable input is an out-of-range session configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("timed mode needs a positive duration, got {0} seconds")]
    InvalidDuration(u32),

    #[error("hittable mode needs a positive hit budget, got {0}")]
    InvalidHitBudget(u32),

    #[error("{name} must be at least 1 fast tick")]
    ZeroInterval { name: &'static str },

    #[error("spawn interval {interval} is below its floor {floor}")]
    IntervalBelowFloor { interval: u32, floor: u32 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("initial speed {speed} exceeds the cap {cap}")]
    SpeedAboveCap { speed: f32, cap: f32 },

    #[error("speed step range {min}..={max} is inverted or negative")]
    InvalidSpeedStep { min: f32, max: f32 },

    #[error("{name} must be a probability in 0..=1, got {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    #[error("viewport {width}x{height} must have positive dimensions")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
