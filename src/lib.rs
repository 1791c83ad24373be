//! Smash Sides - a two-lane reaction game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, difficulty, enemies, zones, scoring)
//! - `config`: Session options with validation and JSON loading
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::{SessionConfig, Viewport};
pub use error::ConfigError;
pub use sim::{GameEvent, GameMode, Orientation, Session, Side, SmashOutcome, Zone};

/// Game configuration constants
pub mod consts {
    /// Default fast tick cadence (seconds)
    pub const FAST_TICK_INTERVAL: f64 = 0.075;
    /// Slow tick cadence (seconds), drives countdowns and the elapsed clock
    pub const SLOW_TICK_INTERVAL: f64 = 1.0;

    /// Reference viewport (portrait phone, points)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 390.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 844.0;

    /// Enemy side length as a fraction of viewport height
    pub const ENEMY_SIZE_FRACTION: f32 = 0.05;
    /// Player width as a fraction of viewport height
    pub const PLAYER_SIZE_FRACTION: f32 = 0.05;
    /// Enemy spawn distance as a fraction of viewport width
    pub const SPAWN_OFFSET_FRACTION: f32 = 0.6;

    /// Band widths as fractions of viewport width (C inner, B middle, A outer)
    pub const ZONE_C_WIDTH_FRACTION: f32 = 0.07;
    pub const ZONE_B_WIDTH_FRACTION: f32 = 0.105;
    pub const ZONE_A_WIDTH_FRACTION: f32 = 0.14;

    /// Difficulty defaults
    pub const SPAWN_INTERVAL: u32 = 15;
    pub const SPAWN_INTERVAL_FLOOR: u32 = 5;
    pub const ACCELERATION_INTERVAL: u32 = 28;
    pub const ENEMY_SPEED: f32 = 130.0;
    pub const ENEMY_SPEED_CAP: f32 = 260.0;
    pub const SPEED_STEP_MIN: f32 = 1.0;
    pub const SPEED_STEP_MAX: f32 = 3.0;
    pub const RETUNE_CHANCE: f32 = 0.5;
    pub const INTERVAL_DECREMENT_CHANCE: f32 = 1.0;
    pub const DUAL_SPAWN_CHANCE: f32 = 0.4;
    pub const DUAL_SPAWN_MIN_SLOW_TICKS: u32 = 20;

    /// Scoring
    pub const BASE_POINTS_A: u64 = 1;
    pub const BASE_POINTS_B: u64 = 5;
    pub const BASE_POINTS_C: u64 = 1;
}

/// Format whole seconds as a `MM:SS` HUD clock
pub fn format_clock(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(605), "10:05");
    }
}
