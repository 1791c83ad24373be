//! Session configuration
//!
//! Chosen at session start and immutable for the session's lifetime.
//! Loadable from JSON; invalid values fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::GameMode;

/// Reference viewport the zone and spawn geometry is derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Enemy side length
    pub fn enemy_size(&self) -> f32 {
        self.height * ENEMY_SIZE_FRACTION
    }

    /// Distance from center at which an enemy touches the player
    pub fn player_boundary(&self) -> f32 {
        self.height * PLAYER_SIZE_FRACTION / 2.0 + self.enemy_size() / 2.0
    }

    /// Vertical lane coordinate (enemies sit slightly above the ground line)
    pub fn lane_y(&self) -> f32 {
        self.enemy_size() * 0.4
    }
}

/// Options recognized at session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Termination rule
    pub mode: GameMode,
    /// Geometry reference
    pub viewport: Viewport,
    /// RNG seed (spawn sides, orientations, difficulty gates)
    pub seed: u64,
    /// Seconds between fast ticks
    pub fast_interval: f64,

    // === Difficulty ===
    /// Fast ticks between spawns
    pub initial_spawn_interval: u32,
    /// Lowest spawn interval retuning may reach
    pub spawn_interval_floor: u32,
    /// Fast ticks between retune attempts
    pub initial_acceleration_interval: u32,
    /// Enemy speed (distance units per second)
    pub initial_speed: f32,
    pub speed_cap: f32,
    /// Random speed increment range per retune
    pub speed_step_min: f32,
    pub speed_step_max: f32,
    /// Probability a retune attempt goes ahead
    pub retune_chance: f32,
    /// Probability a retune also shortens the spawn interval
    pub interval_decrement_chance: f32,

    // === Spawning ===
    /// Probability a spawn event brings a second enemy
    pub dual_spawn_chance: f32,
    /// Slow ticks that must elapse before dual spawns are allowed
    pub dual_spawn_min_slow_ticks: u32,
    /// Spawn distance as a fraction of viewport width
    pub spawn_offset: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            viewport: Viewport::default(),
            seed: 0,
            fast_interval: FAST_TICK_INTERVAL,

            initial_spawn_interval: SPAWN_INTERVAL,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            initial_acceleration_interval: ACCELERATION_INTERVAL,
            initial_speed: ENEMY_SPEED,
            speed_cap: ENEMY_SPEED_CAP,
            speed_step_min: SPEED_STEP_MIN,
            speed_step_max: SPEED_STEP_MAX,
            retune_chance: RETUNE_CHANCE,
            interval_decrement_chance: INTERVAL_DECREMENT_CHANCE,

            dual_spawn_chance: DUAL_SPAWN_CHANCE,
            dual_spawn_min_slow_ticks: DUAL_SPAWN_MIN_SLOW_TICKS,
            spawn_offset: SPAWN_OFFSET_FRACTION,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

impl SessionConfig {
    /// Default config with the given mode
    pub fn with_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every option; returns the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.problems().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// All problems with this config, in field order
    pub fn problems(&self) -> Vec<ConfigError> {
        let checks = [
            self.check_mode(),
            self.check_viewport(),
            self.check_fast_interval(),
            self.check_intervals(),
            self.check_speed(),
            self.check_speed_step(),
            probability("retune_chance", self.retune_chance),
            probability("interval_decrement_chance", self.interval_decrement_chance),
            probability("dual_spawn_chance", self.dual_spawn_chance),
            positive("spawn_offset", self.spawn_offset),
        ];
        checks.into_iter().filter_map(Result::err).collect()
    }

    /// Replace every invalid option with its default, logging each fallback
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if let Err(err) = self.check_mode() {
            log::warn!("{err}; using {:?}", defaults.mode);
            self.mode = defaults.mode;
        }
        if let Err(err) = self.check_viewport() {
            log::warn!("{err}; using default viewport");
            self.viewport = defaults.viewport;
        }
        if let Err(err) = self.check_fast_interval() {
            log::warn!("{err}; using {}s", defaults.fast_interval);
            self.fast_interval = defaults.fast_interval;
        }
        if let Err(err) = self.check_intervals() {
            log::warn!("{err}; using default tick intervals");
            self.initial_spawn_interval = defaults.initial_spawn_interval;
            self.spawn_interval_floor = defaults.spawn_interval_floor;
            self.initial_acceleration_interval = defaults.initial_acceleration_interval;
        }
        if let Err(err) = self.check_speed() {
            log::warn!("{err}; using default speed and cap");
            self.initial_speed = defaults.initial_speed;
            self.speed_cap = defaults.speed_cap;
        }
        if let Err(err) = self.check_speed_step() {
            log::warn!("{err}; using default speed step");
            self.speed_step_min = defaults.speed_step_min;
            self.speed_step_max = defaults.speed_step_max;
        }
        if let Err(err) = probability("retune_chance", self.retune_chance) {
            log::warn!("{err}; using {}", defaults.retune_chance);
            self.retune_chance = defaults.retune_chance;
        }
        if let Err(err) = probability("interval_decrement_chance", self.interval_decrement_chance)
        {
            log::warn!("{err}; using {}", defaults.interval_decrement_chance);
            self.interval_decrement_chance = defaults.interval_decrement_chance;
        }
        if let Err(err) = probability("dual_spawn_chance", self.dual_spawn_chance) {
            log::warn!("{err}; using {}", defaults.dual_spawn_chance);
            self.dual_spawn_chance = defaults.dual_spawn_chance;
        }
        if let Err(err) = positive("spawn_offset", self.spawn_offset) {
            log::warn!("{err}; using {}", defaults.spawn_offset);
            self.spawn_offset = defaults.spawn_offset;
        }

        self
    }

    fn check_mode(&self) -> Result<(), ConfigError> {
        match self.mode {
            GameMode::Timed { seconds: 0 } => Err(ConfigError::InvalidDuration(0)),
            GameMode::Hittable { max_hits: 0 } => Err(ConfigError::InvalidHitBudget(0)),
            _ => Ok(()),
        }
    }

    fn check_viewport(&self) -> Result<(), ConfigError> {
        let Viewport { width, height } = self.viewport;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidViewport { width, height })
        }
    }

    fn check_fast_interval(&self) -> Result<(), ConfigError> {
        if self.fast_interval.is_finite() && self.fast_interval > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive {
                name: "fast_interval",
                value: self.fast_interval as f32,
            })
        }
    }

    fn check_intervals(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_floor == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "spawn_interval_floor",
            });
        }
        if self.initial_acceleration_interval == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "initial_acceleration_interval",
            });
        }
        if self.initial_spawn_interval < self.spawn_interval_floor {
            return Err(ConfigError::IntervalBelowFloor {
                interval: self.initial_spawn_interval,
                floor: self.spawn_interval_floor,
            });
        }
        Ok(())
    }

    fn check_speed(&self) -> Result<(), ConfigError> {
        positive("initial_speed", self.initial_speed)?;
        positive("speed_cap", self.speed_cap)?;
        if self.initial_speed > self.speed_cap {
            return Err(ConfigError::SpeedAboveCap {
                speed: self.initial_speed,
                cap: self.speed_cap,
            });
        }
        Ok(())
    }

    fn check_speed_step(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.speed_step_min, self.speed_step_max);
        if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
            Ok(())
        } else {
            Err(ConfigError::InvalidSpeedStep { min, max })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SessionConfig {
            initial_acceleration_interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroInterval { .. })
        ));
    }

    #[test]
    fn test_sanitized_keeps_valid_fields() {
        let config = SessionConfig {
            mode: GameMode::Timed { seconds: 45 },
            initial_speed: -3.0,
            dual_spawn_chance: 1.5,
            seed: 7,
            ..Default::default()
        };
        assert_eq!(config.problems().len(), 2);

        let fixed = config.sanitized();
        assert!(fixed.validate().is_ok());
        assert_eq!(fixed.mode, GameMode::Timed { seconds: 45 });
        assert_eq!(fixed.seed, 7);
        assert_eq!(fixed.initial_speed, ENEMY_SPEED);
        assert_eq!(fixed.dual_spawn_chance, DUAL_SPAWN_CHANCE);
    }

    #[test]
    fn test_zero_mode_budget_falls_back() {
        let config = SessionConfig::with_mode(GameMode::Hittable { max_hits: 0 });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHitBudget(0))
        ));
        assert_eq!(config.sanitized().mode, GameMode::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config = SessionConfig::from_json(
            r#"{ "mode": { "Timed": { "seconds": 30 } }, "speed_cap": 200.0 }"#,
        )
        .unwrap();
        assert_eq!(config.mode, GameMode::Timed { seconds: 30 });
        assert_eq!(config.speed_cap, 200.0);
        assert_eq!(config.initial_spawn_interval, SPAWN_INTERVAL);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            SessionConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SessionConfig {
            mode: GameMode::Hittable { max_hits: 3 },
            seed: 42,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_player_boundary() {
        let viewport = Viewport::new(400.0, 800.0);
        assert!((viewport.enemy_size() - 40.0).abs() < 1e-4);
        assert!((viewport.player_boundary() - 40.0).abs() < 1e-4);
    }
}
