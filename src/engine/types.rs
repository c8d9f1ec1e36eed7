use glam::Vec2;

use crate::world::TileId;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: f32, // pre-derived for speed
    pub half_w: f32, // pre-derived for speed
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_w: w as f32 * 0.5,
            half_h: h as f32 * 0.5,
        }
    }
}

/// Camera state reused by every raster unit, recomputed once per frame.
#[derive(Clone, Copy, Default)]
pub struct Viewer {
    /// Pixel-per-map-unit scale: `half_w / tan(fov/2)`.
    pub focal: f32,
    /// Eye height as a fraction of one tile; splits the strip around the
    /// horizon (0.5 = centered).
    pub eye_frac: f32,
}

/// Which family of grid line produced a hit.  Drives the shading tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// A row boundary (the ray crossed a horizontal grid line).
    Horizontal,
    /// A column boundary (the ray crossed a vertical grid line).
    Vertical,
}

/// Result of casting one column's ray.
#[derive(Clone, Copy, Debug)]
pub struct ColumnHit {
    /// Perpendicular (fish-eye-corrected) distance, grid units.
    pub dist: f32,
    /// Boundary family of the winning intersection.
    pub axis: Axis,
    /// World-space point where the ray struck the wall.
    pub point: Vec2,
    /// Id of the struck wall cell (palette index for the shader).
    pub tile: TileId,
}
