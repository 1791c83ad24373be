//! Adaptive difficulty and spawning
//!
//! Driven by fast ticks. Spawns on tick 1 and then every `spawn_interval`
//! ticks; every `acceleration_interval` ticks a coin flip may shorten the
//! spawn interval and raise the enemy speed. Speed only ever goes up and
//! stops at its cap; the interval only goes down and stops at its floor.

use serde::{Deserialize, Serialize};

use super::enemy::{EnemyId, EnemyRegistry};
use super::rng::RandomSource;
use super::{Orientation, Side};
use crate::config::SessionConfig;

/// Result of a successful retune
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Retune {
    pub spawn_interval: u32,
    pub previous_speed: f32,
    pub speed: f32,
}

/// Everything one fast tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FastTickOutcome {
    pub spawned: Vec<EnemyId>,
    pub retuned: Option<Retune>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScheduler {
    spawn_interval: u32,
    spawn_interval_floor: u32,
    acceleration_interval: u32,
    speed: f32,
    speed_cap: f32,
    speed_step: (f32, f32),
    retune_chance: f32,
    interval_decrement_chance: f32,
    dual_spawn_chance: f32,
    dual_spawn_min_slow_ticks: u32,
    /// Distance from center where new enemies appear
    spawn_distance: f32,
    /// Minimum gap kept between a new enemy and the furthest one in its lane
    spawn_spacing: f32,
}

impl DifficultyScheduler {
    /// Build from an already validated config
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            spawn_interval: config.initial_spawn_interval,
            spawn_interval_floor: config.spawn_interval_floor,
            acceleration_interval: config.initial_acceleration_interval,
            speed: config.initial_speed,
            speed_cap: config.speed_cap,
            speed_step: (config.speed_step_min, config.speed_step_max),
            retune_chance: config.retune_chance,
            interval_decrement_chance: config.interval_decrement_chance,
            dual_spawn_chance: config.dual_spawn_chance,
            dual_spawn_min_slow_ticks: config.dual_spawn_min_slow_ticks,
            spawn_distance: config.viewport.width * config.spawn_offset,
            spawn_spacing: config.viewport.enemy_size() * 2.0,
        }
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    pub fn spawn_interval_floor(&self) -> u32 {
        self.spawn_interval_floor
    }

    pub fn acceleration_interval(&self) -> u32 {
        self.acceleration_interval
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn speed_cap(&self) -> f32 {
        self.speed_cap
    }

    pub fn spawn_distance(&self) -> f32 {
        self.spawn_distance
    }

    /// Whether fast tick `tick` is a spawn tick at the current interval
    pub fn is_spawn_tick(&self, tick: u64) -> bool {
        tick == 1 || (tick > 1 && tick % self.spawn_interval as u64 == 0)
    }

    /// React to fast tick `tick` (1-based)
    pub fn on_fast_tick<R: RandomSource>(
        &mut self,
        tick: u64,
        slow_ticks: u64,
        registry: &mut EnemyRegistry,
        rng: &mut R,
    ) -> FastTickOutcome {
        let mut outcome = FastTickOutcome::default();
        if tick == 0 {
            return outcome;
        }

        if self.is_spawn_tick(tick) {
            outcome.spawned = self.spawn_wave(slow_ticks, registry, rng);
        }

        if tick % self.acceleration_interval as u64 == 0 && rng.chance(self.retune_chance) {
            outcome.retuned = self.retune(rng);
            if let Some(retune) = outcome.retuned {
                log::debug!(
                    "Tick {}: spawn interval {}, speed {:.1} -> {:.1}",
                    tick,
                    retune.spawn_interval,
                    retune.previous_speed,
                    retune.speed
                );
            }
        }

        outcome
    }

    /// Shorten the spawn interval and raise the speed, within floor and cap
    fn retune<R: RandomSource>(&mut self, rng: &mut R) -> Option<Retune> {
        let previous_interval = self.spawn_interval;
        let previous_speed = self.speed;

        if self.spawn_interval > self.spawn_interval_floor
            && rng.chance(self.interval_decrement_chance)
        {
            self.spawn_interval -= 1;
        }

        let (min, max) = self.speed_step;
        let step = rng.range(min, max);
        self.speed = (self.speed + step).min(self.speed_cap);

        if self.spawn_interval == previous_interval && self.speed == previous_speed {
            return None;
        }
        Some(Retune {
            spawn_interval: self.spawn_interval,
            previous_speed,
            speed: self.speed,
        })
    }

    /// One spawn event: a random enemy, sometimes with a partner
    fn spawn_wave<R: RandomSource>(
        &self,
        slow_ticks: u64,
        registry: &mut EnemyRegistry,
        rng: &mut R,
    ) -> Vec<EnemyId> {
        let side = rng.side();
        let orientation = rng.orientation();
        let mut spawned = vec![self.spawn_one(side, orientation, registry)];

        let dual_allowed = slow_ticks >= self.dual_spawn_min_slow_ticks as u64;
        if dual_allowed && rng.chance(self.dual_spawn_chance) {
            let second_side = rng.side();
            // Same lane shares orientation so it can't be telegraphed as a trap
            let second_orientation = if second_side == side {
                orientation
            } else {
                rng.orientation()
            };
            spawned.push(self.spawn_one(second_side, second_orientation, registry));
        }

        spawned
    }

    fn spawn_one(
        &self,
        side: Side,
        orientation: Orientation,
        registry: &mut EnemyRegistry,
    ) -> EnemyId {
        let distance = self.placement(side, registry);
        let id = registry.spawn(side, orientation, distance, self.speed);
        log::debug!("Spawned enemy {id} on {side:?} ({orientation:?}) at {distance:.1}");
        id
    }

    /// Spawn distance for a new enemy on `side`, pushed out past any enemy
    /// still crowding the spawn point
    pub fn placement(&self, side: Side, registry: &EnemyRegistry) -> f32 {
        match registry.furthest_on_side(side) {
            Some(furthest) if furthest.distance > self.spawn_distance - self.spawn_spacing => {
                furthest.distance + self.spawn_spacing
            }
            _ => self.spawn_distance,
        }
    }
}
