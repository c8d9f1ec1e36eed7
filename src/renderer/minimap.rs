//! Top-down debug overlay: map tiles, the player marker and the cast rays.
//!
//! Composed into the top-left corner of the frame-buffer after the wall
//! pass, through [`Renderer::overlay`](crate::renderer::Renderer::overlay).

use glam::Vec2;

use crate::engine::ColumnHit;
use crate::renderer::{Rgba, pack_rgb};
use crate::world::{GridMap, Player};

/// Overlay colors and scale.
#[derive(Clone, Copy, Debug)]
pub struct Style {
    /// Pixels per map tile.
    pub scale: f32,
    /// Draw every n-th column's ray; drawing all of them smears the pane.
    pub ray_stride: usize,
    pub wall: Rgba,
    pub floor: Rgba,
    pub player: Rgba,
    pub ray: Rgba,
    pub heading: Rgba,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            scale: 8.0,
            ray_stride: 8,
            wall: pack_rgb(220, 220, 220),
            floor: pack_rgb(96, 96, 96),
            player: pack_rgb(255, 255, 255),
            ray: pack_rgb(255, 64, 64),
            heading: pack_rgb(255, 224, 64),
        }
    }
}

/// Compose the overlay into the frame-buffer.
pub fn draw(
    fb: &mut [Rgba],
    fb_w: usize,
    fb_h: usize,
    grid: &GridMap,
    player: &Player,
    hits: &[ColumnHit],
    tile_size: f32,
    style: &Style,
) {
    let pane_w = ((grid.width() as f32 * style.scale) as usize).min(fb_w);
    let pane_h = ((grid.height() as f32 * style.scale) as usize).min(fb_h);
    if pane_w == 0 || pane_h == 0 {
        return;
    }

    /* tiles */
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let color = if grid.is_wall(col as i32, row as i32) {
                style.wall
            } else {
                style.floor
            };
            let x0 = (col as f32 * style.scale) as usize;
            let y0 = (row as f32 * style.scale) as usize;
            let x1 = ((col + 1) as f32 * style.scale) as usize;
            let y1 = ((row + 1) as f32 * style.scale) as usize;
            fill_rect(fb, fb_w, x0, y0, x1.min(pane_w), y1.min(pane_h), color);
        }
    }

    let to_pane = |p: Vec2| p / tile_size * style.scale;
    let origin = to_pane(player.pos());

    /* cast rays, then the heading indicator on top */
    for hit in hits.iter().step_by(style.ray_stride.max(1)) {
        draw_line(fb, fb_w, pane_w, pane_h, origin, to_pane(hit.point), style.ray);
    }
    let ahead = to_pane(player.pos() + player.dir() * tile_size * 0.4);
    draw_line(fb, fb_w, pane_w, pane_h, origin, ahead, style.heading);

    /* player marker */
    let px = origin.x as i32;
    let py = origin.y as i32;
    fill_rect(
        fb,
        fb_w,
        (px - 1).max(0) as usize,
        (py - 1).max(0) as usize,
        ((px + 2).max(0) as usize).min(pane_w),
        ((py + 2).max(0) as usize).min(pane_h),
        style.player,
    );
}

fn fill_rect(fb: &mut [Rgba], fb_w: usize, x0: usize, y0: usize, x1: usize, y1: usize, color: Rgba) {
    if x0 >= x1 {
        return;
    }
    for y in y0..y1 {
        let row = y * fb_w;
        fb[row + x0..row + x1].fill(color);
    }
}

/// Integer Bresenham line, clipped to the pane.
fn draw_line(fb: &mut [Rgba], fb_w: usize, pane_w: usize, pane_h: usize, a: Vec2, b: Vec2, color: Rgba) {
    let (mut x0, mut y0) = (a.x as i32, a.y as i32);
    let (x1, y1) = (b.x as i32, b.y as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..pane_w as i32).contains(&x0) && (0..pane_h as i32).contains(&y0) {
            fb[y0 as usize * fb_w + x0 as usize] = color;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
