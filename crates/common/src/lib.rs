//! Common types shared across Flip Flop crates.

use serde::Deserialize;

/// Milliseconds on the simulation clock.
pub type Millis = u64;

/// Height at which the player and reward tokens sit on the island surface.
pub const GROUND_HEIGHT: f32 = 0.25;

/// Simple 3D coordinate. The island lives in the `x`/`z` plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Creates a new [`Vec3`].
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a point resting on the island surface.
    pub fn on_ground(x: f32, z: f32) -> Self {
        Self::new(x, GROUND_HEIGHT, z)
    }

    /// Distance to the world origin in the ground plane.
    pub fn ground_length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Ground-plane distance between two points.
    pub fn ground_distance(&self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Per-frame snapshot of the player's controls.
///
/// `interact` is only `true` on the frame the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub interact: bool,
}

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("audio unavailable: manager is {0}")]
    AudioUnavailable(&'static str),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
