//! Scoring zones
//!
//! Each lane has three adjacent bands, measured as distance from center:
//!
//! ```text
//!   player | C | B | A |  ... spawn
//! ```
//!
//! C is innermost and narrowest, B is the sweet spot, A is outermost and
//! widest. Bands are half-open `[inner, outer)` and derived from the viewport
//! once per session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Side;
use crate::config::Viewport;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    C,
}

impl Zone {
    /// Classification priority at shared boundaries
    pub const PRIORITY: [Zone; 3] = [Zone::C, Zone::B, Zone::A];

    /// Points for a hit in this band before the sequence multiplier
    pub fn base_points(self) -> u64 {
        match self {
            Zone::A => BASE_POINTS_A,
            Zone::B => BASE_POINTS_B,
            Zone::C => BASE_POINTS_C,
        }
    }

    /// Short feedback text for floating messages
    pub fn feedback(self) -> &'static str {
        match self {
            Zone::A => "A bit soon...",
            Zone::B => "WOW",
            Zone::C => "Too late!",
        }
    }
}

/// One band along a lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBand {
    pub zone: Zone,
    pub inner: f32,
    pub outer: f32,
}

impl ZoneBand {
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.inner && distance < self.outer
    }

    pub fn width(&self) -> f32 {
        self.outer - self.inner
    }

    pub fn center(&self) -> f32 {
        (self.inner + self.outer) / 2.0
    }
}

/// Static band indicator for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub zone: Zone,
    pub side: Side,
    pub center: Vec2,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMap {
    /// C, B, A (innermost first); both lanes are mirror images
    bands: [ZoneBand; 3],
    lane_y: f32,
}

impl ZoneMap {
    pub fn new(viewport: Viewport) -> Self {
        let c_inner = viewport.player_boundary();
        let c_outer = c_inner + viewport.width * ZONE_C_WIDTH_FRACTION;
        let b_outer = c_outer + viewport.width * ZONE_B_WIDTH_FRACTION;
        let a_outer = b_outer + viewport.width * ZONE_A_WIDTH_FRACTION;

        Self {
            bands: [
                ZoneBand { zone: Zone::C, inner: c_inner, outer: c_outer },
                ZoneBand { zone: Zone::B, inner: c_outer, outer: b_outer },
                ZoneBand { zone: Zone::A, inner: b_outer, outer: a_outer },
            ],
            lane_y: viewport.lane_y(),
        }
    }

    pub fn band(&self, zone: Zone) -> ZoneBand {
        match zone {
            Zone::C => self.bands[0],
            Zone::B => self.bands[1],
            Zone::A => self.bands[2],
        }
    }

    /// Band containing `distance`, checked C, then B, then A. Both lanes
    /// share the same bands.
    pub fn classify(&self, distance: f32) -> Option<Zone> {
        Zone::PRIORITY
            .into_iter()
            .find(|&zone| self.band(zone).contains(distance))
    }

    /// Inner edge of the innermost band
    pub fn inner_edge(&self) -> f32 {
        self.bands[0].inner
    }

    /// Outer edge of the outermost band
    pub fn outer_edge(&self) -> f32 {
        self.bands[2].outer
    }

    /// Six indicators (A/B/C x Left/Right) in scene coordinates
    pub fn layouts(&self) -> Vec<ZoneLayout> {
        let mut layouts = Vec::with_capacity(6);
        for zone in [Zone::A, Zone::B, Zone::C] {
            let band = self.band(zone);
            for side in [Side::Left, Side::Right] {
                layouts.push(ZoneLayout {
                    zone,
                    side,
                    center: Vec2::new(band.center() * side.sign(), self.lane_y),
                    width: band.width(),
                });
            }
        }
        layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> ZoneMap {
        ZoneMap::new(Viewport::new(400.0, 800.0))
    }

    #[test]
    fn test_band_geometry() {
        let zones = map();
        let c = zones.band(Zone::C);
        let b = zones.band(Zone::B);
        let a = zones.band(Zone::A);

        // boundary = 800 * 0.05
        assert!((c.inner - 40.0).abs() < 1e-4);
        assert_eq!(c.outer, b.inner);
        assert_eq!(b.outer, a.inner);
        assert!(c.width() < b.width());
        assert!(b.width() < a.width());
    }

    #[test]
    fn test_classify_priority() {
        let zones = map();
        let b = zones.band(Zone::B);

        assert_eq!(zones.classify(10.0), None);
        assert_eq!(zones.classify(zones.inner_edge()), Some(Zone::C));
        // Shared boundary belongs to the outer band (half-open intervals)
        assert_eq!(zones.classify(b.inner), Some(Zone::B));
        assert_eq!(zones.classify(b.center()), Some(Zone::B));
        assert_eq!(zones.classify(b.outer), Some(Zone::A));
        assert_eq!(zones.classify(zones.outer_edge()), None);
    }

    #[test]
    fn test_layouts_mirror() {
        let layouts = map().layouts();
        assert_eq!(layouts.len(), 6);
        for pair in layouts.chunks(2) {
            assert_eq!(pair[0].zone, pair[1].zone);
            assert_eq!(pair[0].center.x, -pair[1].center.x);
            assert_eq!(pair[0].width, pair[1].width);
        }
    }

    #[test]
    fn test_base_points() {
        assert_eq!(Zone::A.base_points(), 1);
        assert_eq!(Zone::B.base_points(), 5);
        assert_eq!(Zone::C.base_points(), 1);
    }
}
