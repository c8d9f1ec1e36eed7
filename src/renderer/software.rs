//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills an owned `Vec<u32>` scratch buffer in **0xAARRGGBB** format.
//! * One opaque strip per screen column, no overdraw, so no Z-buffer is
//!   needed.
//! ---------------------------------------------------------------------------

use crate::renderer::{Renderer, Rgba, WallColumn, pack_rgb};

const CEILING: Rgba = pack_rgb(40, 44, 70);
const FLOOR: Rgba = pack_rgb(48, 44, 40);

/// CPU backend owning the frame scratch buffer.
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Default for Software {
    fn default() -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
        }
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }

        /* two-tone clear around the horizon */
        let mid = (h / 2) * w;
        self.scratch[..mid].fill(CEILING);
        self.scratch[mid..].fill(FLOOR);
    }

    fn draw_column(&mut self, column: &WallColumn) {
        if column.x >= self.width {
            return;
        }
        /* clamp the strip to integer pixel rows */
        let y0 = column.y_top.max(0.0) as i32;
        let y1 = (column.y_bot as i32).min(self.height as i32 - 1);
        if y0 > y1 {
            return;
        }

        let mut idx = y0 as usize * self.width + column.x;
        for _ in y0..=y1 {
            self.scratch[idx] = column.color;
            idx += self.width;
        }
    }

    fn overlay<F>(&mut self, compose: F)
    where
        F: FnOnce(&mut [Rgba], usize, usize),
    {
        compose(&mut self.scratch, self.width, self.height);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
