//! Isometric player movement against the island zones.

use common::{InputState, Vec3};

use crate::IslandLayout;

/// Distance covered per frame while a direction is held.
pub const DEFAULT_SPEED: f32 = 0.05;

/// Result of resolving one frame of movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// No direction held, or opposite keys cancelled out.
    Idle,
    /// The candidate position was accepted.
    Moved { position: Vec3, rotation: f32 },
    /// The candidate position left the walkable area; the player turns in place.
    Blocked { rotation: f32 },
}

impl MoveOutcome {
    /// Facing after this frame, if it changed.
    pub fn rotation(&self) -> Option<f32> {
        match self {
            MoveOutcome::Idle => None,
            MoveOutcome::Moved { rotation, .. } | MoveOutcome::Blocked { rotation } => {
                Some(*rotation)
            }
        }
    }
}

/// Raw `(x, z)` direction for the held keys in the isometric basis.
pub fn direction(input: &InputState) -> (f32, f32) {
    let mut dx = 0.0;
    let mut dz = 0.0;
    if input.up {
        dx -= 1.0;
        dz -= 1.0;
    }
    if input.down {
        dx += 1.0;
        dz += 1.0;
    }
    if input.left {
        dx -= 1.0;
        dz += 1.0;
    }
    if input.right {
        dx += 1.0;
        dz -= 1.0;
    }
    (dx, dz)
}

/// Computes the player's next position and facing for one frame.
pub fn resolve(layout: &IslandLayout, input: &InputState, position: Vec3, speed: f32) -> MoveOutcome {
    let (dx, dz) = direction(input);
    let len = (dx * dx + dz * dz).sqrt();
    if len == 0.0 {
        return MoveOutcome::Idle;
    }
    let rotation = dx.atan2(dz);
    let candidate = Vec3::new(
        position.x + dx / len * speed,
        position.y,
        position.z + dz / len * speed,
    );
    if layout.is_walkable(candidate) {
        MoveOutcome::Moved {
            position: candidate,
            rotation,
        }
    } else {
        MoveOutcome::Blocked { rotation }
    }
}
