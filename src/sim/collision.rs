//! Player contact
//!
//! Contact is reduced to "an unresolved enemy reached the player boundary".
//! Every such enemy is removed and counts as one taken hit. Smashed enemies
//! are already out of the registry, so an enemy is never both smashed and
//! collided.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Side;
use super::enemy::{EnemyId, EnemyRegistry};

/// An enemy that reached the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub enemy: EnemyId,
    pub side: Side,
    pub position: Vec2,
}

/// Whether an enemy at `distance` has reached the player
#[inline]
pub fn reached_player(distance: f32, boundary: f32) -> bool {
    distance <= boundary
}

/// Remove every enemy at or inside `boundary`, in spawn order
pub fn collect_collisions(
    registry: &mut EnemyRegistry,
    boundary: f32,
    lane_y: f32,
) -> Vec<Collision> {
    registry
        .drain_where(|e| reached_player(e.distance, boundary))
        .into_iter()
        .map(|enemy| Collision {
            enemy: enemy.id,
            side: enemy.side,
            position: enemy.position(lane_y),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Orientation;

    #[test]
    fn test_reached_player() {
        assert!(reached_player(0.0, 40.0));
        assert!(reached_player(40.0, 40.0));
        assert!(!reached_player(40.1, 40.0));
    }

    #[test]
    fn test_collect_collisions() {
        let mut registry = EnemyRegistry::new();
        let a = registry.spawn(Side::Left, Orientation::Up, 100.0, 130.0);
        let b = registry.spawn(Side::Right, Orientation::Down, 45.0, 130.0);

        registry.advance(0.1, 130.0);
        let hits = collect_collisions(&mut registry, 40.0, 2.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].enemy, b);
        assert_eq!(hits[0].side, Side::Right);
        assert_eq!(hits[0].position.y, 2.0);
        assert!(registry.get(a).is_some());

        // Already removed: nothing collides twice
        assert!(collect_collisions(&mut registry, 40.0, 2.0).is_empty());
    }
}
