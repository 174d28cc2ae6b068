//! HUD, prompts and menu screens.
use bracket_lib::prelude::{BTerm, BLACK, CYAN, GRAY, GREEN, NAVY, RED, RGB, WHITE, YELLOW};
use boat::BoatState;
use island::RegionFlags;

/// First row below the island view.
pub const HUD_Y: i32 = 20;

/// Color palette for island and entity rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub sand: RGB,
    pub water: RGB,
    pub pier: RGB,
    pub shed: RGB,
    pub player: RGB,
    pub boat: RGB,
    pub reward: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            sand: RGB::from_u8(244, 164, 96),
            water: RGB::named(NAVY),
            pier: RGB::from_u8(139, 90, 43),
            shed: RGB::from_u8(205, 133, 63),
            player: RGB::named(YELLOW),
            boat: RGB::named(WHITE),
            reward: RGB::named(GREEN),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            sand: RGB::named(GRAY),
            water: RGB::named(BLACK),
            pier: RGB::named(WHITE),
            shed: RGB::named(CYAN),
            player: RGB::named(YELLOW),
            boat: RGB::named(WHITE),
            reward: RGB::named(RED),
        }
    }
}

/// Everything the HUD needs from the running game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudView {
    pub carried: u32,
    pub capacity: u32,
    pub stored: u32,
    pub rewards: usize,
    pub fishing: bool,
    pub regions: RegionFlags,
    pub boat: BoatState,
}

/// Contextual action hint shown above the player.
pub fn prompt(view: &HudView) -> Option<&'static str> {
    let r = view.regions;
    if view.fishing {
        Some("Fishing...")
    } else if r.on_boat_dock && view.boat == BoatState::Docked {
        Some("SPACE to SELL")
    } else if r.on_pier && !r.on_boat_dock && view.carried < view.capacity {
        Some("SPACE to fish")
    } else if r.on_shed && view.carried > 0 && !r.on_boat_dock {
        Some("SPACE to store")
    } else {
        None
    }
}

/// Banner announcing the boat.
pub fn boat_banner(boat: BoatState) -> Option<&'static str> {
    match boat {
        BoatState::Arriving => Some("Boat arriving..."),
        BoatState::Docked => Some("Boat docked! Sell your fish!"),
        BoatState::Leaving | BoatState::Gone => None,
    }
}

fn catch_bar_string(carried: u32, capacity: u32) -> String {
    let filled = carried.min(capacity) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(capacity as usize - filled)
    )
}

/// Draws counters, prompt and boat banner.
pub fn draw_hud(ctx: &mut BTerm, view: &HudView, palette: &ColorPalette) {
    ctx.print(
        0,
        HUD_Y,
        format!(
            "Fish: {} {}/{}",
            catch_bar_string(view.carried, view.capacity),
            view.carried,
            view.capacity
        ),
    );
    ctx.print(0, HUD_Y + 1, format!("Shed: {}", view.stored));
    ctx.print_color(
        0,
        HUD_Y + 2,
        palette.reward,
        RGB::named(BLACK),
        format!("Trees: {}", view.rewards),
    );
    if let Some(text) = prompt(view) {
        ctx.print_color_centered(HUD_Y + 3, RGB::named(YELLOW), RGB::named(BLACK), text);
    }
    if let Some(text) = boat_banner(view.boat) {
        ctx.print_color_centered(1, palette.boat, RGB::named(BLACK), text);
    }
    ctx.print(0, HUD_Y + 4, "WASD/arrows move  SPACE interact  Q quit");
}

fn intro_strings() -> Vec<String> {
    vec![
        "Flip Flop".to_string(),
        "A Cozy Fishing Experience".to_string(),
        String::new(),
        "Catch fish, sell them to passing boats,".to_string(),
        "and grow your island paradise".to_string(),
        String::new(),
        "WASD move  SPACE interact".to_string(),
        "Press Enter to start, Q to quit".to_string(),
    ]
}

fn credits_strings(total_sold: u32, rewards: usize) -> Vec<String> {
    vec![
        "Thanks for Playing!".to_string(),
        String::new(),
        "Your Session".to_string(),
        format!("Fish sold: {}", total_sold),
        format!("Trees grown: {}", rewards),
        String::new(),
        "\"Flip Flop\" - An original composition".to_string(),
        String::new(),
        "Press Enter to keep playing, Q to quit".to_string(),
    ]
}

/// Draws the title screen.
pub fn draw_intro(ctx: &mut BTerm) {
    ctx.cls();
    for (i, line) in intro_strings().iter().enumerate() {
        ctx.print_centered(8 + i as i32, line);
    }
}

/// Draws the end-of-track summary.
pub fn draw_credits(ctx: &mut BTerm, total_sold: u32, rewards: usize) {
    ctx.cls();
    for (i, line) in credits_strings(total_sold, rewards).iter().enumerate() {
        ctx.print_centered(8 + i as i32, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> HudView {
        HudView {
            carried: 0,
            capacity: 5,
            stored: 0,
            rewards: 0,
            fishing: false,
            regions: RegionFlags::default(),
            boat: BoatState::Gone,
        }
    }

    #[test]
    fn catch_bar_format() {
        assert_eq!(catch_bar_string(2, 5), "[##---]");
        assert_eq!(catch_bar_string(0, 5), "[-----]");
        assert_eq!(catch_bar_string(5, 5), "[#####]");
    }

    #[test]
    fn no_prompt_on_plain_sand() {
        assert_eq!(prompt(&view()), None);
    }

    #[test]
    fn pier_prompts_fishing_until_full() {
        let mut v = view();
        v.regions.on_pier = true;
        assert_eq!(prompt(&v), Some("SPACE to fish"));
        v.carried = 5;
        assert_eq!(prompt(&v), None);
    }

    #[test]
    fn fishing_prompt_wins() {
        let mut v = view();
        v.regions.on_pier = true;
        v.fishing = true;
        assert_eq!(prompt(&v), Some("Fishing..."));
    }

    #[test]
    fn shed_prompts_store_with_catch() {
        let mut v = view();
        v.regions.on_shed = true;
        assert_eq!(prompt(&v), None);
        v.carried = 2;
        assert_eq!(prompt(&v), Some("SPACE to store"));
    }

    #[test]
    fn dock_prompts_sell_only_when_docked() {
        let mut v = view();
        v.regions.on_pier = true;
        v.regions.on_boat_dock = true;
        assert_eq!(prompt(&v), None);
        v.boat = BoatState::Docked;
        assert_eq!(prompt(&v), Some("SPACE to SELL"));
    }

    #[test]
    fn banner_follows_boat() {
        assert_eq!(boat_banner(BoatState::Gone), None);
        assert!(boat_banner(BoatState::Arriving).is_some());
        assert!(boat_banner(BoatState::Docked).unwrap().contains("Sell"));
        assert_eq!(boat_banner(BoatState::Leaving), None);
    }

    #[test]
    fn credits_show_session_stats() {
        let lines = credits_strings(12, 3);
        assert!(lines.iter().any(|l| l == "Fish sold: 12"));
        assert!(lines.iter().any(|l| l == "Trees grown: 3"));
    }

    #[test]
    fn intro_mentions_controls() {
        let lines = intro_strings();
        assert_eq!(lines.first().unwrap(), "Flip Flop");
        assert!(lines.iter().any(|l| l.contains("SPACE")));
    }

    #[test]
    fn colorblind_palette_differs() {
        let normal = ColorPalette::default();
        let cb = ColorPalette::colorblind();
        assert_ne!(normal.reward, cb.reward);
    }
}
