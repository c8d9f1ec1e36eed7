//! Per-frame orchestration: input → cast → project → compose.

use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::{
    engine::caster::cast_column,
    engine::projection::{Fade, project_column},
    engine::types::{ColumnHit, Screen, Viewer},
    renderer::{Renderer, Rgba, minimap},
    world::{Buttons, GridMap, MoveTuning, Player},
};

/// Everything tunable from the command line, bundled.
#[derive(Clone, Copy, Debug)]
pub struct Tuning {
    /// Horizontal field of view, degrees.
    pub fov_deg: f32,
    /// Size of one map tile in grid units.
    pub tile_size: f32,
    /// Eye height above the floor, grid units.  Reserved for a real
    /// floor/ceiling split; today it only places the strip on the horizon.
    pub eye_height: f32,
    pub movement: MoveTuning,
    pub fade: Fade,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            tile_size: 64.0,
            eye_height: 32.0,
            movement: MoveTuning::default(),
            fade: Fade::default(),
        }
    }
}

/// Owns the world, the player and a rendering backend.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub grid: GridMap,
    pub player: Player,
    pub screen: Screen,
    pub tuning: Tuning,
    view: Viewer,
    minimap: Option<minimap::Style>,
    hits: Vec<ColumnHit>, // per-column scratch, reused across frames
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, grid: GridMap, player: Player, screen: Screen, tuning: Tuning) -> Self {
        Self {
            renderer,
            grid,
            player,
            screen,
            tuning,
            view: Viewer::default(),
            minimap: None,
            hits: Vec::new(),
        }
    }

    /// Enable the top-down overlay.
    pub fn with_minimap(mut self, style: minimap::Style) -> Self {
        self.minimap = Some(style);
        self
    }

    /// Apply one frame of input to the player.
    pub fn update(&mut self, buttons: Buttons) {
        self.player.apply_input(buttons, &self.tuning.movement);
    }

    /// Angle (degrees) of the ray for screen column `x`: the fan starts
    /// half a FOV left of the heading and advances `fov / columns` per
    /// column.
    fn ray_angle(heading: f32, fov_deg: f32, columns: usize, x: usize) -> f32 {
        heading - fov_deg * 0.5 + fov_deg * x as f32 / columns as f32
    }

    /// Cast, project and compose one frame, then loan the buffer to
    /// `submit`.
    pub fn render_frame(&mut self, submit: impl FnOnce(&[Rgba], usize, usize)) {
        let screen = self.screen;
        self.renderer.begin_frame(screen.w, screen.h);

        self.view = Viewer {
            focal: screen.half_w / (self.tuning.fov_deg * 0.5).to_radians().tan(),
            eye_frac: self.tuning.eye_height / self.tuning.tile_size,
        };

        // Each column only reads the frame-start snapshot, so the casts
        // fan out across the pool.
        let grid = &self.grid;
        let snap = self.player;
        let tuning = self.tuning;
        (0..screen.w)
            .into_par_iter()
            .map(|x| {
                let angle = Self::ray_angle(snap.heading(), tuning.fov_deg, screen.w, x);
                cast_column(grid, snap.pos(), snap.heading(), angle, tuning.tile_size)
            })
            .collect_into_vec(&mut self.hits);

        for (x, hit) in self.hits.iter().enumerate() {
            let column = project_column(x, hit, &screen, &self.view, tuning.tile_size, &tuning.fade);
            self.renderer.draw_column(&column);
        }

        if let Some(style) = &self.minimap {
            let (grid, player, hits) = (&self.grid, &self.player, &self.hits);
            self.renderer.overlay(|fb, w, h| {
                minimap::draw(fb, w, h, grid, player, hits, tuning.tile_size, style);
            });
        }

        self.renderer.end_frame(submit);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
