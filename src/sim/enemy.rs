//! Enemy entities and the live-enemy registry
//!
//! Enemies walk toward the center of their lane at the current global speed.
//! The registry keeps spawn order; anything that cares about proximity asks
//! for enemies by side, nearest first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lane an enemy travels in, and the control that targets it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// -1 for left, +1 for right (scene x axis)
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Orientation an enemy carries; a smash must match it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Up,
    Down,
}

pub type EnemyId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub side: Side,
    pub orientation: Orientation,
    /// Distance from center along the lane
    pub distance: f32,
    pub speed_at_spawn: f32,
}

impl Enemy {
    /// Scene position, centered on the player
    pub fn position(&self, lane_y: f32) -> Vec2 {
        Vec2::new(self.distance * self.side.sign(), lane_y)
    }

    /// Seconds until this enemy reaches the center at `speed`
    pub fn time_to_center(&self, speed: f32) -> f32 {
        if speed <= 0.0 {
            return f32::INFINITY;
        }
        self.distance / speed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRegistry {
    enemies: Vec<Enemy>,
    next_id: EnemyId,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    pub fn spawn(
        &mut self,
        side: Side,
        orientation: Orientation,
        distance: f32,
        speed: f32,
    ) -> EnemyId {
        let id = self.next_id;
        self.next_id += 1;
        self.enemies.push(Enemy {
            id,
            side,
            orientation,
            distance: distance.max(0.0),
            speed_at_spawn: speed,
        });
        id
    }

    /// Move every enemy toward the center. Depends only on `dt` and the current speed.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let step = speed * dt;
        for enemy in &mut self.enemies {
            enemy.distance = (enemy.distance - step).max(0.0);
        }
    }

    /// Remove by id. Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Enemies in `side`'s lane, nearest to center first (ties keep spawn order)
    pub fn on_side(&self, side: Side) -> Vec<&Enemy> {
        let mut lane: Vec<&Enemy> = self.enemies.iter().filter(|e| e.side == side).collect();
        lane.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        lane
    }

    pub fn nearest_on_side(&self, side: Side) -> Option<&Enemy> {
        self.on_side(side).into_iter().next()
    }

    pub fn furthest_on_side(&self, side: Side) -> Option<&Enemy> {
        self.on_side(side).into_iter().next_back()
    }

    /// Remove and return every enemy matching `pred`, keeping spawn order
    pub fn drain_where(&mut self, pred: impl Fn(&Enemy) -> bool) -> Vec<Enemy> {
        let (drained, kept): (Vec<Enemy>, Vec<Enemy>) =
            std::mem::take(&mut self.enemies).into_iter().partition(|e| pred(e));
        self.enemies = kept;
        drained
    }

    /// Spawn order
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Drop every enemy and restart id allocation
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.next_id = 1;
    }

    /// Drop every enemy; ids keep counting so stale references never alias
    pub fn clear_live(&mut self) {
        self.enemies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_allocates_ids() {
        let mut reg = EnemyRegistry::new();
        let a = reg.spawn(Side::Left, Orientation::Up, 200.0, 130.0);
        let b = reg.spawn(Side::Right, Orientation::Down, 200.0, 130.0);
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(b).map(|e| e.side), Some(Side::Right));
    }

    #[test]
    fn test_advance_uses_current_speed() {
        let mut reg = EnemyRegistry::new();
        let id = reg.spawn(Side::Left, Orientation::Up, 200.0, 100.0);
        reg.advance(0.5, 100.0);
        assert!((reg.get(id).unwrap().distance - 150.0).abs() < 1e-4);
        // Faster speed applies immediately
        reg.advance(0.5, 200.0);
        assert!((reg.get(id).unwrap().distance - 50.0).abs() < 1e-4);
        // Never overshoots the center
        reg.advance(10.0, 200.0);
        assert_eq!(reg.get(id).unwrap().distance, 0.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut reg = EnemyRegistry::new();
        let id = reg.spawn(Side::Left, Orientation::Up, 200.0, 100.0);
        assert!(reg.remove(id).is_some());
        assert!(reg.remove(id).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_on_side_nearest_first() {
        let mut reg = EnemyRegistry::new();
        let far = reg.spawn(Side::Right, Orientation::Up, 300.0, 100.0);
        reg.spawn(Side::Left, Orientation::Up, 10.0, 100.0);
        let near = reg.spawn(Side::Right, Orientation::Down, 120.0, 100.0);

        let lane: Vec<EnemyId> = reg.on_side(Side::Right).iter().map(|e| e.id).collect();
        assert_eq!(lane, vec![near, far]);
        assert_eq!(reg.nearest_on_side(Side::Right).map(|e| e.id), Some(near));
        assert_eq!(reg.furthest_on_side(Side::Right).map(|e| e.id), Some(far));
    }

    #[test]
    fn test_drain_where() {
        let mut reg = EnemyRegistry::new();
        let inside = reg.spawn(Side::Left, Orientation::Up, 30.0, 100.0);
        let outside = reg.spawn(Side::Left, Orientation::Up, 90.0, 100.0);
        let drained = reg.drain_where(|e| e.distance <= 40.0);
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].id, inside);
        assert!(reg.get(outside).is_some());
    }

    #[test]
    fn test_time_to_center() {
        let mut reg = EnemyRegistry::new();
        let id = reg.spawn(Side::Left, Orientation::Up, 260.0, 130.0);
        let enemy = reg.get(id).unwrap();
        assert!((enemy.time_to_center(130.0) - 2.0).abs() < 1e-5);
        assert!((enemy.time_to_center(260.0) - 1.0).abs() < 1e-5);
        assert_eq!(enemy.position(5.0), Vec2::new(-260.0, 5.0));
    }
}
