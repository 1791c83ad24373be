//! Smash resolution and the sequence multiplier
//!
//! Landing in the B band grows the sequence; any other hit or any miss
//! breaks it. Points are `base_points(zone) * max(sequence, 1)`, using the
//! sequence after the update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{EnemyId, EnemyRegistry};
use super::zone::{Zone, ZoneMap};
use super::{Orientation, Side};

/// Raised on every successful hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmashEvent {
    pub enemy: EnemyId,
    /// Scene position of the enemy when it was smashed
    pub position: Vec2,
    pub points: u64,
    pub zone: Zone,
    /// Sequence after this hit
    pub sequence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SmashOutcome {
    /// Session is paused or over; input is dropped
    Ignored,
    /// Nothing in that lane
    NoTarget,
    /// Nearest enemy is outside every band
    Miss,
    /// Nearest enemy is in a band but faces the other way
    OrientationMismatch { zone: Zone },
    Hit(SmashEvent),
}

impl SmashOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, SmashOutcome::Hit(_))
    }

    /// True for outcomes that count as a missed hit
    pub fn is_miss(&self) -> bool {
        matches!(
            self,
            SmashOutcome::Miss | SmashOutcome::OrientationMismatch { .. }
        )
    }
}

/// Score counters mutated by smashes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub sequence: u32,
    pub enemies_smashed: u32,
    pub missed_hits: u32,
}

impl ScoreBoard {
    /// Apply a hit in `zone`; returns the awarded points
    pub fn record_hit(&mut self, zone: Zone) -> u64 {
        if zone == Zone::B {
            self.sequence += 1;
        } else {
            self.sequence = 0;
        }
        let points = zone.base_points() * self.sequence.max(1) as u64;
        self.score += points;
        self.enemies_smashed += 1;
        points
    }

    pub fn record_miss(&mut self) {
        self.sequence = 0;
        self.missed_hits += 1;
    }

    /// A taken hit breaks the streak
    pub fn break_sequence(&mut self) {
        self.sequence = 0;
    }
}

/// Resolve a smash on `side` against the nearest enemy in that lane
pub fn resolve_smash(
    side: Side,
    orientation: Orientation,
    registry: &mut EnemyRegistry,
    zones: &ZoneMap,
    board: &mut ScoreBoard,
    lane_y: f32,
) -> SmashOutcome {
    let Some(target) = registry.nearest_on_side(side) else {
        return SmashOutcome::NoTarget;
    };
    let target_id = target.id;
    let target_orientation = target.orientation;

    let Some(zone) = zones.classify(target.distance) else {
        board.record_miss();
        return SmashOutcome::Miss;
    };

    if target_orientation != orientation {
        board.record_miss();
        return SmashOutcome::OrientationMismatch { zone };
    }

    let Some(enemy) = registry.remove(target_id) else {
        log::warn!("Smash target {target_id} vanished before removal");
        return SmashOutcome::NoTarget;
    };

    let points = board.record_hit(zone);
    SmashOutcome::Hit(SmashEvent {
        enemy: enemy.id,
        position: enemy.position(lane_y),
        points,
        zone,
        sequence: board.sequence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;

    fn setup() -> (EnemyRegistry, ZoneMap, ScoreBoard) {
        (
            EnemyRegistry::new(),
            ZoneMap::new(Viewport::new(400.0, 800.0)),
            ScoreBoard::default(),
        )
    }

    #[test]
    fn test_no_target() {
        let (mut reg, zones, mut board) = setup();
        reg.spawn(Side::Left, Orientation::Up, zones.band(Zone::B).center(), 100.0);

        let outcome = resolve_smash(Side::Right, Orientation::Up, &mut reg, &zones, &mut board, 0.0);
        assert_eq!(outcome, SmashOutcome::NoTarget);
        assert_eq!(board, ScoreBoard::default());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_outside_bands_is_miss() {
        let (mut reg, zones, mut board) = setup();
        board.sequence = 4;
        reg.spawn(Side::Left, Orientation::Up, zones.outer_edge() + 50.0, 100.0);

        let outcome = resolve_smash(Side::Left, Orientation::Up, &mut reg, &zones, &mut board, 0.0);
        assert_eq!(outcome, SmashOutcome::Miss);
        assert_eq!(board.sequence, 0);
        assert_eq!(board.missed_hits, 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_orientation_mismatch() {
        let (mut reg, zones, mut board) = setup();
        board.sequence = 2;
        reg.spawn(Side::Right, Orientation::Down, zones.band(Zone::A).center(), 100.0);

        let outcome = resolve_smash(Side::Right, Orientation::Up, &mut reg, &zones, &mut board, 0.0);
        assert_eq!(outcome, SmashOutcome::OrientationMismatch { zone: Zone::A });
        assert!(outcome.is_miss());
        assert_eq!(board.sequence, 0);
        assert_eq!(board.missed_hits, 1);
        assert_eq!(board.score, 0);
    }

    #[test]
    fn test_sweet_spot_streak() {
        let (mut reg, zones, mut board) = setup();
        board.sequence = 10;
        let id = reg.spawn(Side::Left, Orientation::Up, zones.band(Zone::B).center(), 100.0);

        let outcome = resolve_smash(Side::Left, Orientation::Up, &mut reg, &zones, &mut board, 3.0);
        let SmashOutcome::Hit(event) = outcome else {
            panic!("expected hit, got {outcome:?}");
        };
        assert_eq!(event.enemy, id);
        assert_eq!(event.zone, Zone::B);
        assert_eq!(event.sequence, 11);
        assert_eq!(event.points, 55);
        assert_eq!(event.position.y, 3.0);
        assert!(event.position.x < 0.0);
        assert_eq!(board.score, 55);
        assert_eq!(board.enemies_smashed, 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_outer_and_inner_hits_break_streak() {
        let (mut reg, zones, mut board) = setup();
        for zone in [Zone::A, Zone::C] {
            board.sequence = 3;
            reg.spawn(Side::Right, Orientation::Down, zones.band(zone).center(), 100.0);
            let outcome =
                resolve_smash(Side::Right, Orientation::Down, &mut reg, &zones, &mut board, 0.0);
            let SmashOutcome::Hit(event) = outcome else {
                panic!("expected hit, got {outcome:?}");
            };
            assert_eq!(event.sequence, 0);
            assert_eq!(event.points, 1);
        }
        assert_eq!(board.score, 2);
    }

    #[test]
    fn test_targets_nearest_enemy() {
        let (mut reg, zones, mut board) = setup();
        // Far enemy spawned first, out of range
        reg.spawn(Side::Left, Orientation::Down, zones.outer_edge() + 80.0, 100.0);
        let near = reg.spawn(Side::Left, Orientation::Up, zones.band(Zone::C).center(), 100.0);

        let outcome = resolve_smash(Side::Left, Orientation::Up, &mut reg, &zones, &mut board, 0.0);
        assert!(matches!(outcome, SmashOutcome::Hit(e) if e.enemy == near));
        assert_eq!(reg.len(), 1);
    }
}
