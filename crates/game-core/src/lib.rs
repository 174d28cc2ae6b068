//! Island simulation and game loop entry point.

mod app;
pub mod config;
pub mod input;
pub mod interaction;
mod render;
mod types;

use bracket_lib::prelude::*;

use boat::{BoatScheduler, BoatState};
use clock::{Fired, TimerQueue};
use common::InputState;
use fishing::{FishingRules, Inventory, RewardList};
use island::{classify, resolve, IslandLayout, MoveOutcome, RegionFlags};

pub use app::{FlipFlopApp, GameState};
pub use config::GameConfig;
pub use interaction::{Action, Interaction};
pub use types::{GameTimer, PlayerState};

const CONFIG_PATH: &str = "flipflop.toml";

/// Simulation state of the island while the game runs.
pub struct IslandWorld {
    layout: IslandLayout,
    speed: f32,
    rules: FishingRules,
    player: PlayerState,
    regions: RegionFlags,
    inventory: Inventory,
    rewards: RewardList,
    boat: BoatScheduler,
    rng: RandomNumberGenerator,
}

impl IslandWorld {
    /// Creates a fresh island with the player at the origin.
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        };
        let player = PlayerState::default();
        let regions = classify(&config.island, player.position);
        Self {
            layout: config.island,
            speed: config.movement.speed,
            rules: config.fishing,
            player,
            regions,
            inventory: Inventory::new(config.fishing.capacity),
            rewards: RewardList::default(),
            boat: BoatScheduler::new(config.boat),
            rng,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn regions(&self) -> RegionFlags {
        self.regions
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn rewards(&self) -> &RewardList {
        &self.rewards
    }

    pub fn boat_state(&self) -> BoatState {
        self.boat.state()
    }

    pub fn layout(&self) -> &IslandLayout {
        &self.layout
    }

    /// Starts the boat schedule and puts the rod away.
    pub(crate) fn begin_play(&mut self, timers: &mut TimerQueue<GameTimer>) {
        self.player.fishing.stop(timers);
        self.boat.start(timers);
    }

    /// Cancels every boat and fishing timer.
    pub(crate) fn end_play(&mut self, timers: &mut TimerQueue<GameTimer>) {
        self.player.fishing.stop(timers);
        self.boat.stop(timers);
    }

    /// Runs one frame: movement, zone checks, fishing auto-stop and interaction.
    pub fn frame(
        &mut self,
        input: &InputState,
        timers: &mut TimerQueue<GameTimer>,
    ) -> Option<Interaction> {
        match resolve(&self.layout, input, self.player.position, self.speed) {
            MoveOutcome::Idle => {}
            MoveOutcome::Moved { position, rotation } => {
                self.player.position = position;
                self.player.rotation = rotation;
            }
            MoveOutcome::Blocked { rotation } => self.player.rotation = rotation,
        }
        self.regions = classify(&self.layout, self.player.position);

        if self.player.is_fishing() && (self.inventory.is_full() || !self.regions.on_pier) {
            self.player.fishing.stop(timers);
            tracing::debug!(carried = self.inventory.carried(), "stopped fishing");
        }

        if input.interact {
            self.interact(timers)
        } else {
            None
        }
    }

    fn interact(&mut self, timers: &mut TimerQueue<GameTimer>) -> Option<Interaction> {
        let action = interaction::choose(
            self.regions,
            self.player.is_fishing(),
            &self.inventory,
            self.boat.state(),
        )?;
        match action {
            Action::Sell => fishing::sell_catch(
                &mut self.inventory,
                &mut self.rewards,
                &mut self.rng,
                &self.rules,
            )
            .map(Interaction::Sold),
            Action::StartFishing => {
                self.player.fishing.start(timers, &self.rules)?;
                tracing::debug!("cast the line");
                Some(Interaction::StartedFishing)
            }
            Action::Store => {
                let moved = self.inventory.store_catch();
                tracing::debug!(moved, stored = self.inventory.stored(), "stored fish in the shed");
                Some(Interaction::Stored(moved))
            }
        }
    }

    /// Applies a fired timer.
    pub fn dispatch(&mut self, timers: &mut TimerQueue<GameTimer>, fired: Fired<GameTimer>) {
        match fired.event {
            GameTimer::Boat(event) => self.boat.handle(timers, fired.handle, event),
            GameTimer::Fishing(_) => {
                if self.player.fishing.owns(fired.handle) {
                    fishing::on_tick(&mut self.inventory);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn place_player(&mut self, x: f32, z: f32) {
        self.player.position = common::Vec3::on_ground(x, z);
        self.regions = classify(&self.layout, self.player.position);
    }

    #[cfg(test)]
    pub(crate) fn has_active_timers(&self) -> bool {
        self.boat.is_running() || self.player.is_fishing()
    }

    #[cfg(test)]
    pub(crate) fn set_inventory(&mut self, carried: u32, stored: u32) {
        self.inventory = Inventory::with_counts(self.rules.capacity, carried, stored);
    }
}

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    let config = GameConfig::load(CONFIG_PATH)?;
    tracing::info!(path = CONFIG_PATH, "configuration loaded");

    let context = BTermBuilder::simple(80, 25)?
        .with_title("Flip Flop")
        .with_advanced_input(true)
        .build()?;
    let gs = FlipFlopApp::new(&config)?;
    main_loop(context, gs)
}
