//! Distance → shaded vertical strip.
//!
//! Inverse-distance height scaling plus flat per-column shading: nearer
//! walls are taller and brighter, and the two boundary families get
//! distinct tints so corners stay readable without textures.

use crate::engine::types::{Axis, ColumnHit, Screen, Viewer};
use crate::renderer::{Rgba, WallColumn, pack_rgb, scale_rgb};
use crate::world::TileId;

/// Distance floor that keeps the height scale finite when the player leans
/// into a wall.
const NEAR: f32 = 1e-3;

/// Flat base colors, indexed by `tile_id - 1` (wrapping).
const WALL_PALETTE: [Rgba; 4] = [
    pack_rgb(200, 200, 200),
    pack_rgb(180, 180, 250),
    pack_rgb(250, 180, 180),
    pack_rgb(180, 250, 180),
];

/// Shading tunables.
#[derive(Clone, Copy, Debug)]
pub struct Fade {
    /// Distance at which a wall still shows at full brightness.
    pub reference: f32,
    /// Lower bound so distant walls never fade to pure black.
    pub floor: f32,
    /// Brightness multiplier for horizontal-boundary hits.
    pub side_tint: f32,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            reference: 96.0,
            floor: 0.15,
            side_tint: 0.7,
        }
    }
}

/// Base color for a wall tile id (0 falls back to the first entry).
#[inline]
fn wall_base(tile: TileId) -> Rgba {
    WALL_PALETTE[(tile.max(1) as usize - 1) % WALL_PALETTE.len()]
}

/// Scale one column's hit into a screen strip.
///
/// Strip height is `tile_size · focal / dist`; the eye-height fraction
/// splits it around the horizon row (0.5 = centered, the classic look).
pub fn project_column(
    x: usize,
    hit: &ColumnHit,
    screen: &Screen,
    view: &Viewer,
    tile_size: f32,
    fade: &Fade,
) -> WallColumn {
    let dist = hit.dist.max(NEAR);
    let strip = tile_size * view.focal / dist;

    WallColumn {
        x,
        y_top: screen.half_h - strip * (1.0 - view.eye_frac),
        y_bot: screen.half_h + strip * view.eye_frac,
        color: shade(hit, fade),
    }
}

/// Distance + axis attenuation of the base wall color.
fn shade(hit: &ColumnHit, fade: &Fade) -> Rgba {
    let mut light = (fade.reference / hit.dist.max(NEAR)).clamp(fade.floor, 1.0);
    if hit.axis == Axis::Horizontal {
        light *= fade.side_tint;
    }
    scale_rgb(wall_base(hit.tile), light)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
