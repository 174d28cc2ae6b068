use boat::BoatEvent;
use common::Vec3;
use fishing::{FishingState, FishingTick};

/// Player entity with position, facing and fishing state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    /// Facing around the vertical axis, `atan2(dx, dz)` of the last input.
    pub rotation: f32,
    pub fishing: FishingState,
}

impl PlayerState {
    pub fn is_fishing(&self) -> bool {
        self.fishing.is_fishing()
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::on_ground(0.0, 0.0),
            rotation: 0.0,
            fishing: FishingState::Idle,
        }
    }
}

/// Every timer event the game schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameTimer {
    Boat(BoatEvent),
    Fishing(FishingTick),
}

impl From<BoatEvent> for GameTimer {
    fn from(e: BoatEvent) -> Self {
        GameTimer::Boat(e)
    }
}

impl From<FishingTick> for GameTimer {
    fn from(t: FishingTick) -> Self {
        GameTimer::Fishing(t)
    }
}
