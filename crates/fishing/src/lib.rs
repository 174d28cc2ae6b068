//! Fishing, inventory and the fish economy.

use bracket_lib::prelude::RandomNumberGenerator;
use clock::{TimerHandle, TimerQueue};
use common::Vec3;
use serde::Deserialize;
use std::f32::consts::TAU;

/// Tunables for catching and selling fish.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FishingRules {
    /// Fish the player can carry at once.
    pub capacity: u32,
    /// Milliseconds between catches while fishing.
    pub tick_ms: u64,
    /// Reward tokens spawn at least this far from the origin.
    pub reward_min_radius: f32,
    /// Reward tokens spawn closer than this to the origin.
    pub reward_max_radius: f32,
}

impl Default for FishingRules {
    fn default() -> Self {
        Self {
            capacity: 5,
            tick_ms: 4500,
            reward_min_radius: 1.5,
            reward_max_radius: 3.0,
        }
    }
}

/// Fish counters of the current process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inventory {
    capacity: u32,
    carried: u32,
    stored: u32,
    total_sold: u32,
}

impl Inventory {
    /// Creates an empty inventory with room for `capacity` carried fish.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            carried: 0,
            stored: 0,
            total_sold: 0,
        }
    }

    /// Creates an inventory with preset counts, clamping `carried` to capacity.
    pub fn with_counts(capacity: u32, carried: u32, stored: u32) -> Self {
        Self {
            capacity,
            carried: carried.min(capacity),
            stored,
            total_sold: 0,
        }
    }

    pub fn carried(&self) -> u32 {
        self.carried
    }

    pub fn stored(&self) -> u32 {
        self.stored
    }

    pub fn total_sold(&self) -> u32 {
        self.total_sold
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `true` when no more fish can be carried.
    pub fn is_full(&self) -> bool {
        self.carried >= self.capacity
    }

    /// Returns `true` if there is anything to sell.
    pub fn has_sellable(&self) -> bool {
        self.carried > 0 || self.stored > 0
    }

    /// Adds one carried fish unless the player is full.
    pub fn catch_fish(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.carried += 1;
        true
    }

    /// Moves every carried fish into the shed. Returns how many moved.
    pub fn store_catch(&mut self) -> u32 {
        let moved = self.carried;
        self.stored += moved;
        self.carried = 0;
        moved
    }

    /// Sells carried and stored fish. Returns how many were sold.
    pub fn sell_all(&mut self) -> u32 {
        let sold = self.carried + self.stored;
        self.total_sold += sold;
        self.carried = 0;
        self.stored = 0;
        sold
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(FishingRules::default().capacity)
    }
}

/// Decorative object spawned by a sale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardToken {
    pub position: Vec3,
}

/// Reward tokens in the order they were earned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardList {
    tokens: Vec<RewardToken>,
}

impl RewardList {
    pub fn push(&mut self, token: RewardToken) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewardToken> {
        self.tokens.iter()
    }
}

/// Places a reward token at a random angle and radius around the origin.
pub fn spawn_reward(rng: &mut RandomNumberGenerator, rules: &FishingRules) -> RewardToken {
    let angle = rng.range(0.0_f32, TAU);
    let distance = rng.range(rules.reward_min_radius, rules.reward_max_radius);
    RewardToken {
        position: Vec3::on_ground(angle.cos() * distance, angle.sin() * distance),
    }
}

/// Outcome of a successful sale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sale {
    pub sold: u32,
    pub reward: RewardToken,
}

/// Sells everything and appends one reward token. Nothing to sell is a no-op.
pub fn sell_catch(
    inventory: &mut Inventory,
    rewards: &mut RewardList,
    rng: &mut RandomNumberGenerator,
    rules: &FishingRules,
) -> Option<Sale> {
    if !inventory.has_sellable() {
        return None;
    }
    let sold = inventory.sell_all();
    let reward = spawn_reward(rng, rules);
    rewards.push(reward);
    tracing::info!(sold, total = inventory.total_sold(), "sold fish to the boat");
    Some(Sale { sold, reward })
}

/// Timer event fired while the line is out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FishingTick;

/// Whether the player is fishing. The active state owns its tick timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FishingState {
    #[default]
    Idle,
    Fishing {
        tick: TimerHandle,
    },
}

impl FishingState {
    pub fn is_fishing(&self) -> bool {
        matches!(self, FishingState::Fishing { .. })
    }

    /// Casts the line and schedules the repeating catch tick.
    ///
    /// Returns `None` if the line is already out.
    pub fn start<E>(&mut self, queue: &mut TimerQueue<E>, rules: &FishingRules) -> Option<TimerHandle>
    where
        E: Clone + From<FishingTick>,
    {
        if self.is_fishing() {
            return None;
        }
        let tick = queue.schedule_repeating(rules.tick_ms, rules.tick_ms, FishingTick.into());
        *self = FishingState::Fishing { tick };
        Some(tick)
    }

    /// Reels in and cancels the tick timer. Returns `false` if already idle.
    pub fn stop<E: Clone>(&mut self, queue: &mut TimerQueue<E>) -> bool {
        match std::mem::take(self) {
            FishingState::Fishing { tick } => {
                queue.cancel(tick);
                true
            }
            FishingState::Idle => false,
        }
    }

    /// Returns `true` if `handle` is the tick of the current cast.
    pub fn owns(&self, handle: TimerHandle) -> bool {
        matches!(self, FishingState::Fishing { tick } if *tick == handle)
    }
}

/// Applies one catch tick. Ticks past capacity change nothing.
pub fn on_tick(inventory: &mut Inventory) -> bool {
    let caught = inventory.catch_fish();
    if caught {
        tracing::debug!(carried = inventory.carried(), "caught a fish");
    }
    caught
}
