//! Terminal view of the island in an isometric projection.

use bracket_lib::prelude::{to_cp437, BTerm, BLACK, RGB};
use boat::BoatState;
use common::Vec3;
use ui::{ColorPalette, HudView};

use crate::IslandWorld;

const VIEW_WIDTH: i32 = 80;
const VIEW_HEIGHT: i32 = ui::HUD_Y;
const ORIGIN_X: f32 = 40.0;
const ORIGIN_Y: f32 = 9.0;
const SCALE_X: f32 = 4.0;
const SCALE_Y: f32 = 1.4;
/// Where the boat moors, just past the end of the pier.
const DOCK: Vec3 = Vec3 {
    x: 4.7,
    y: 0.0,
    z: 1.6,
};

/// Screen cell for a world position. Up-screen is `-x -z`, right is `+x -z`.
fn project(p: Vec3) -> (i32, i32) {
    let col = ORIGIN_X + (p.x - p.z) * SCALE_X;
    let row = ORIGIN_Y + (p.x + p.z) * SCALE_Y;
    (col.round() as i32, row.round() as i32)
}

/// World position at the centre of a screen cell.
fn unproject(col: i32, row: i32) -> Vec3 {
    let u = (col as f32 - ORIGIN_X) / SCALE_X;
    let v = (row as f32 - ORIGIN_Y) / SCALE_Y;
    Vec3::on_ground((u + v) / 2.0, (v - u) / 2.0)
}

fn tile_style(world: &IslandWorld, p: Vec3, palette: &ColorPalette) -> (char, RGB) {
    let layout = world.layout();
    if layout.in_shed_block(p) {
        ('#', palette.shed)
    } else if layout.within_island(p) {
        ('.', palette.sand)
    } else if layout.in_pier_walkway(p) {
        ('=', palette.pier)
    } else {
        ('~', palette.water)
    }
}

fn boat_position(state: BoatState) -> Option<Vec3> {
    match state {
        BoatState::Docked => Some(DOCK),
        BoatState::Arriving | BoatState::Leaving => Some(Vec3::new(DOCK.x + 2.0, 0.0, DOCK.z + 1.0)),
        BoatState::Gone => None,
    }
}

fn put(ctx: &mut BTerm, p: Vec3, color: RGB, glyph: char) {
    let (x, y) = project(p);
    if (0..VIEW_WIDTH).contains(&x) && (0..VIEW_HEIGHT).contains(&y) {
        ctx.set(x, y, color, RGB::named(BLACK), to_cp437(glyph));
    }
}

/// Draws island, boat, rewards, player and HUD.
pub(crate) fn draw_world(ctx: &mut BTerm, world: &IslandWorld, palette: &ColorPalette) {
    ctx.cls();
    for y in 0..VIEW_HEIGHT {
        for x in 0..VIEW_WIDTH {
            let (glyph, color) = tile_style(world, unproject(x, y), palette);
            ctx.set(x, y, color, RGB::named(BLACK), to_cp437(glyph));
        }
    }
    for token in world.rewards().iter() {
        put(ctx, token.position, palette.reward, 'T');
    }
    if let Some(p) = boat_position(world.boat_state()) {
        put(ctx, p, palette.boat, 'B');
    }
    put(ctx, world.player().position, palette.player, '@');

    let inventory = world.inventory();
    let view = HudView {
        carried: inventory.carried(),
        capacity: inventory.capacity(),
        stored: inventory.stored(),
        rewards: world.rewards().len(),
        fishing: world.player().is_fishing(),
        regions: world.regions(),
        boat: world.boat_state(),
    };
    ui::draw_hud(ctx, &view, palette);
}
