//! Session state and the per-frame update
//!
//! `Session` is the single writer of all gameplay state. The host calls
//! `update` once per frame and `attempt_smash` once per press; everything the
//! presentation layer reacts to comes back as `GameEvent`s or a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::collision::{Collision, collect_collisions};
use super::difficulty::{DifficultyScheduler, Retune};
use super::enemy::{EnemyId, EnemyRegistry};
use super::hit::{ScoreBoard, SmashEvent, SmashOutcome, resolve_smash};
use super::mode::{GameMode, ModeController};
use super::rng::{RandomSource, SeededRandom};
use super::zone::{Zone, ZoneLayout, ZoneMap};
use super::{Orientation, Side};
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::format_clock;

/// Everything the presentation layer may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Static zone indicators, raised once per session setup
    ZonesLaidOut(Vec<ZoneLayout>),
    Spawned {
        enemy: EnemyId,
        side: Side,
        orientation: Orientation,
        position: Vec2,
    },
    Retuned(Retune),
    Smashed(SmashEvent),
    /// A smash that found a target but didn't count
    Missed { side: Side, zone: Option<Zone> },
    Collided(Collision),
    /// One second of game time passed
    SlowTick {
        elapsed: u64,
        countdown: Option<u32>,
    },
    Ended { score: u64 },
}

/// By-value view of one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: EnemyId,
    pub side: Side,
    pub orientation: Orientation,
    pub position: Vec2,
    pub distance: f32,
    /// Seconds to reach the center at the current speed
    pub eta: f32,
}

/// By-value view of the session, read by the presentation layer each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub score: u64,
    pub sequence: u32,
    pub hits_taken: u32,
    pub missed_hits: u32,
    pub enemies_smashed: u32,
    pub fast_ticks: u64,
    pub slow_ticks: u64,
    pub countdown_remaining: Option<u32>,
    pub has_ended: bool,
    pub is_paused: bool,
    pub can_start: bool,
    pub spawn_interval: u32,
    pub acceleration_interval: u32,
    pub speed: f32,
    pub enemies: Vec<EnemySnapshot>,
}

#[derive(Debug)]
pub struct Session<R: RandomSource = SeededRandom> {
    config: SessionConfig,
    clock: Clock,
    scheduler: DifficultyScheduler,
    registry: EnemyRegistry,
    zones: ZoneMap,
    mode: ModeController,
    board: ScoreBoard,
    hits_taken: u32,
    fast_ticks: u64,
    slow_ticks: u64,
    is_paused: bool,
    can_start: bool,
    rng: R,
    /// Events raised outside `update`, handed out by the next `update`
    outbox: Vec<GameEvent>,
}

impl Session<SeededRandom> {
    /// Start a session; invalid options fall back to their defaults
    pub fn new(config: SessionConfig) -> Self {
        let config = config.sanitized();
        let rng = SeededRandom::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Start a session, rejecting any invalid option
    pub fn try_new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = SeededRandom::new(config.seed);
        Ok(Self::with_rng(config, rng))
    }
}

impl<R: RandomSource> Session<R> {
    /// Start a session with an injected random source
    pub fn with_rng(config: SessionConfig, rng: R) -> Self {
        let config = config.sanitized();
        let zones = ZoneMap::new(config.viewport);
        let layouts = zones.layouts();
        log::info!(
            "Session setup: {:?}, viewport {}x{}",
            config.mode,
            config.viewport.width,
            config.viewport.height
        );

        Self {
            clock: Clock::new(config.fast_interval),
            scheduler: DifficultyScheduler::new(&config),
            registry: EnemyRegistry::new(),
            zones,
            mode: ModeController::new(config.mode),
            board: ScoreBoard::default(),
            hits_taken: 0,
            fast_ticks: 0,
            slow_ticks: 0,
            is_paused: false,
            can_start: false,
            rng,
            outbox: vec![GameEvent::ZonesLaidOut(layouts)],
            config,
        }
    }

    /// Reinitialize every counter and re-enter Running with `mode`
    pub fn reset_session(&mut self, mode: GameMode) {
        let config = SessionConfig {
            mode,
            ..self.config.clone()
        }
        .sanitized();

        self.zones = ZoneMap::new(config.viewport);
        self.clock = Clock::new(config.fast_interval);
        self.scheduler = DifficultyScheduler::new(&config);
        self.registry.clear();
        self.mode = ModeController::new(config.mode);
        self.board = ScoreBoard::default();
        self.hits_taken = 0;
        self.fast_ticks = 0;
        self.slow_ticks = 0;
        self.is_paused = false;
        self.can_start = false;
        self.rng.reseed();
        self.outbox = vec![GameEvent::ZonesLaidOut(self.zones.layouts())];
        self.config = config;

        log::info!("Session reset: {:?}", self.config.mode);
    }

    /// Advance the session to `now` (monotonic seconds). Call once per frame.
    pub fn update(&mut self, now: f64) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.outbox);

        if self.has_ended() || self.is_paused {
            self.clock.freeze(now);
            return events;
        }
        if !self.can_start {
            self.clock.resync(now);
            return events;
        }

        let step = self.clock.advance(now);

        if step.fast_tick {
            self.on_fast_tick(&mut events);
        }
        if step.slow_tick {
            self.on_slow_tick(&mut events);
        }
        if !self.has_ended() {
            self.registry.advance(step.dt, self.scheduler.speed());
            self.handle_collisions(&mut events);
        }

        events
    }

    fn on_fast_tick(&mut self, events: &mut Vec<GameEvent>) {
        self.fast_ticks += 1;
        let outcome = self.scheduler.on_fast_tick(
            self.fast_ticks,
            self.slow_ticks,
            &mut self.registry,
            &mut self.rng,
        );

        let lane_y = self.config.viewport.lane_y();
        for id in outcome.spawned {
            if let Some(enemy) = self.registry.get(id) {
                events.push(GameEvent::Spawned {
                    enemy: id,
                    side: enemy.side,
                    orientation: enemy.orientation,
                    position: enemy.position(lane_y),
                });
            }
        }
        if let Some(retune) = outcome.retuned {
            events.push(GameEvent::Retuned(retune));
        }
    }

    fn on_slow_tick(&mut self, events: &mut Vec<GameEvent>) {
        self.slow_ticks += 1;
        let ended = self.mode.on_slow_tick();
        events.push(GameEvent::SlowTick {
            elapsed: self.slow_ticks,
            countdown: self.mode.countdown_remaining(),
        });
        if ended {
            self.end(events);
        }
    }

    fn handle_collisions(&mut self, events: &mut Vec<GameEvent>) {
        let boundary = self.zones.inner_edge();
        let lane_y = self.config.viewport.lane_y();

        for collision in collect_collisions(&mut self.registry, boundary, lane_y) {
            self.hits_taken += 1;
            self.board.break_sequence();
            events.push(GameEvent::Collided(collision));
            log::debug!(
                "Enemy {} reached the player ({} hits taken)",
                collision.enemy,
                self.hits_taken
            );

            if self.mode.on_hits_taken(self.hits_taken) {
                self.end(events);
                break;
            }
        }
    }

    fn end(&mut self, events: &mut Vec<GameEvent>) {
        self.is_paused = true;
        self.registry.clear_live();
        log::info!(
            "Session ended: score {}, smashed {}, missed {}, hits taken {}",
            self.board.score,
            self.board.enemies_smashed,
            self.board.missed_hits,
            self.hits_taken
        );
        events.push(GameEvent::Ended {
            score: self.board.score,
        });
    }

    /// Smash `side` with `orientation`; true iff an enemy was hit
    pub fn attempt_smash(&mut self, side: Side, orientation: Orientation) -> bool {
        self.resolve_smash(side, orientation).is_hit()
    }

    /// Smash `side` with `orientation` and report exactly what happened
    pub fn resolve_smash(&mut self, side: Side, orientation: Orientation) -> SmashOutcome {
        if self.has_ended() || self.is_paused {
            return SmashOutcome::Ignored;
        }

        let outcome = resolve_smash(
            side,
            orientation,
            &mut self.registry,
            &self.zones,
            &mut self.board,
            self.config.viewport.lane_y(),
        );

        match outcome {
            SmashOutcome::Hit(event) => self.outbox.push(GameEvent::Smashed(event)),
            SmashOutcome::Miss => self.outbox.push(GameEvent::Missed { side, zone: None }),
            SmashOutcome::OrientationMismatch { zone } => self.outbox.push(GameEvent::Missed {
                side,
                zone: Some(zone),
            }),
            SmashOutcome::NoTarget | SmashOutcome::Ignored => {}
        }
        outcome
    }

    /// Hand out queued events without advancing time
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Let the clock run (called when the pre-game countdown finishes)
    pub fn start(&mut self) {
        if !self.can_start {
            log::info!("Session started");
        }
        self.can_start = true;
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    /// Resume a paused session; an ended session stays paused
    pub fn resume(&mut self) {
        if !self.has_ended() {
            self.is_paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode.mode()
    }

    pub fn zones(&self) -> &ZoneMap {
        &self.zones
    }

    pub fn zone_layouts(&self) -> Vec<ZoneLayout> {
        self.zones.layouts()
    }

    pub fn registry(&self) -> &EnemyRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &DifficultyScheduler {
        &self.scheduler
    }

    pub fn score(&self) -> u64 {
        self.board.score
    }

    pub fn sequence(&self) -> u32 {
        self.board.sequence
    }

    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    pub fn missed_hits(&self) -> u32 {
        self.board.missed_hits
    }

    pub fn enemies_smashed(&self) -> u32 {
        self.board.enemies_smashed
    }

    pub fn fast_ticks(&self) -> u64 {
        self.fast_ticks
    }

    pub fn slow_ticks(&self) -> u64 {
        self.slow_ticks
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.mode.countdown_remaining()
    }

    pub fn has_ended(&self) -> bool {
        self.mode.has_ended()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn can_start(&self) -> bool {
        self.can_start
    }

    /// HUD clock: time left in Timed mode, time survived in Hittable mode
    pub fn time_text(&self) -> String {
        match self.mode.countdown_remaining() {
            Some(remaining) => format_clock(remaining),
            None => format_clock(self.slow_ticks.min(u32::MAX as u64) as u32),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let speed = self.scheduler.speed();
        let lane_y = self.config.viewport.lane_y();
        SessionSnapshot {
            mode: self.mode.mode(),
            score: self.board.score,
            sequence: self.board.sequence,
            hits_taken: self.hits_taken,
            missed_hits: self.board.missed_hits,
            enemies_smashed: self.board.enemies_smashed,
            fast_ticks: self.fast_ticks,
            slow_ticks: self.slow_ticks,
            countdown_remaining: self.mode.countdown_remaining(),
            has_ended: self.has_ended(),
            is_paused: self.is_paused,
            can_start: self.can_start,
            spawn_interval: self.scheduler.spawn_interval(),
            acceleration_interval: self.scheduler.acceleration_interval(),
            speed,
            enemies: self
                .registry
                .iter()
                .map(|e| EnemySnapshot {
                    id: e.id,
                    side: e.side,
                    orientation: e.orientation,
                    position: e.position(lane_y),
                    distance: e.distance,
                    eta: e.time_to_center(speed),
                })
                .collect(),
        }
    }

    /// Place an enemy directly (scripted scenarios and tests)
    pub fn spawn_enemy_at(&mut self, side: Side, orientation: Orientation, distance: f32) -> EnemyId {
        self.registry
            .spawn(side, orientation, distance, self.scheduler.speed())
    }

    /// Force the sequence counter (scripted scenarios and tests)
    pub fn set_sequence(&mut self, sequence: u32) {
        self.board.sequence = sequence;
    }
}
