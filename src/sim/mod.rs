//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the samples passed to `Session::update`
//! - Randomness comes only from the injected `RandomSource`
//! - Stable iteration order (spawn order, nearest-first queries by side)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod enemy;
pub mod hit;
pub mod mode;
pub mod rng;
pub mod state;
pub mod zone;

pub use clock::{Clock, ClockStep};
pub use collision::{Collision, collect_collisions, reached_player};
pub use difficulty::{DifficultyScheduler, FastTickOutcome, Retune};
pub use enemy::{Enemy, EnemyId, EnemyRegistry, Orientation, Side};
pub use hit::{ScoreBoard, SmashEvent, SmashOutcome, resolve_smash};
pub use mode::{GameMode, ModeController, ModeState};
pub use rng::{RandomSource, SeededRandom};
pub use state::{EnemySnapshot, GameEvent, Session, SessionSnapshot};
pub use zone::{Zone, ZoneBand, ZoneLayout, ZoneMap};
