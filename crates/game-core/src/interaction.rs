//! What an interact press does, given where the player stands.

use boat::BoatState;
use fishing::{Inventory, Sale};
use island::RegionFlags;

/// Action selected for an interact press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Sell,
    StartFishing,
    Store,
}

/// Outcome of an applied action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Sold(Sale),
    StartedFishing,
    Stored(u32),
}

/// Picks the action for an interact press, if any.
///
/// Checked in priority order: sell at the docked boat, cast from the pier,
/// store at the shed. The dock overlaps the end of the pier and wins there.
pub fn choose(
    regions: RegionFlags,
    fishing: bool,
    inventory: &Inventory,
    boat: BoatState,
) -> Option<Action> {
    if regions.on_boat_dock && boat == BoatState::Docked && inventory.has_sellable() {
        Some(Action::Sell)
    } else if regions.on_pier && !fishing && !inventory.is_full() && !regions.on_boat_dock {
        Some(Action::StartFishing)
    } else if regions.on_shed && inventory.carried() > 0 && !regions.on_boat_dock {
        Some(Action::Store)
    } else {
        None
    }
}
