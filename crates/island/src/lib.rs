//! Island geometry: static zones, region classification and movement.

mod movement;

pub use movement::{direction, resolve, MoveOutcome, DEFAULT_SPEED};

use common::Vec3;
use serde::Deserialize;

/// Axis-aligned rectangle in the ground plane with exclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Rect {
    /// Creates a new [`Rect`].
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Returns `true` if `p` lies strictly inside the rectangle.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.z > self.min_z && p.z < self.max_z
    }
}

/// Static zone definitions of the island.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct IslandLayout {
    /// Walkable radius around the origin.
    pub radius: f32,
    /// Walkable pier area extending past the island edge.
    pub pier_walkway: Rect,
    /// Part of the pier where fishing is possible.
    pub pier: Rect,
    /// End of the pier where the boat moors.
    pub boat_dock: Rect,
    /// Shed footprint; blocks movement only.
    pub shed_block: Rect,
    /// Point in front of the shed door.
    pub shed_anchor: Vec3,
    /// Distance to [`IslandLayout::shed_anchor`] that counts as "at the shed".
    pub shed_reach: f32,
}

impl Default for IslandLayout {
    fn default() -> Self {
        Self {
            radius: 3.5,
            pier_walkway: Rect::new(1.5, 4.5, 0.8, 2.4),
            pier: Rect::new(2.5, 4.0, 1.0, 2.2),
            boat_dock: Rect::new(3.5, 4.5, 1.0, 2.2),
            shed_block: Rect::new(-2.3, -0.7, -1.7, -0.3),
            shed_anchor: Vec3::on_ground(-1.5, 0.3),
            shed_reach: 0.8,
        }
    }
}

impl IslandLayout {
    /// Returns `true` if `p` is strictly inside the island radius.
    pub fn within_island(&self, p: Vec3) -> bool {
        p.ground_length() < self.radius
    }

    /// Returns `true` if `p` is on the walkable part of the pier.
    pub fn in_pier_walkway(&self, p: Vec3) -> bool {
        self.pier_walkway.contains(p)
    }

    /// Returns `true` if `p` is inside the shed footprint.
    pub fn in_shed_block(&self, p: Vec3) -> bool {
        self.shed_block.contains(p)
    }

    /// Returns `true` if `p` may be occupied by the player.
    pub fn is_walkable(&self, p: Vec3) -> bool {
        (self.within_island(p) || self.in_pier_walkway(p)) && !self.in_shed_block(p)
    }
}

/// Zones the player currently stands in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionFlags {
    pub on_pier: bool,
    pub on_shed: bool,
    pub on_boat_dock: bool,
}

/// Classifies a position against the island zones.
pub fn classify(layout: &IslandLayout, p: Vec3) -> RegionFlags {
    RegionFlags {
        on_pier: layout.pier.contains(p),
        on_shed: p.ground_distance(layout.shed_anchor) < layout.shed_reach,
        on_boat_dock: layout.boat_dock.contains(p),
    }
}
