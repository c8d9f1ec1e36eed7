//! Grid-traversal ray casting, the heart of the renderer.
//!
//! One ray leaves the player per screen column and walks the tile
//! boundaries it can cross: row boundaries (the horizontal family) and
//! column boundaries (the vertical family).  Both walks share
//! [`axis_hit`]; the nearer candidate wins and is fish-eye-corrected into
//! the perpendicular distance the projector scales by.

use glam::{Vec2, vec2};

use crate::engine::types::{Axis, ColumnHit};
use crate::world::{GridMap, TileId, wrap_deg};

/// A direction component smaller than this is treated as parallel to the
/// boundary family it would otherwise divide by (the 0/90/180/270° rays).
const PARALLEL_EPS: f32 = 1e-4;

/// Cast the ray for one screen column.
///
/// Pure in `(grid, origin, heading, angle)`: columns may be evaluated in
/// any order, or in parallel.  `ray_deg` need not be pre-normalized.
pub fn cast_column(
    grid: &GridMap,
    origin: Vec2,
    heading_deg: f32,
    ray_deg: f32,
    tile_size: f32,
) -> ColumnHit {
    let ray = wrap_deg(ray_deg);

    let row_hit = axis_hit(grid, origin, ray, tile_size, Axis::Horizontal);
    let col_hit = axis_hit(grid, origin, ray, tile_size, Axis::Vertical);

    let (raw, axis, point, tile) = match (row_hit, col_hit) {
        (Some(h), Some(v)) => {
            if h.0 <= v.0 {
                (h.0, Axis::Horizontal, h.1, h.2)
            } else {
                (v.0, Axis::Vertical, v.1, v.2)
            }
        }
        (Some(h), None) => (h.0, Axis::Horizontal, h.1, h.2),
        (None, Some(v)) => (v.0, Axis::Vertical, v.1, v.2),
        (None, None) => {
            // Only reachable when the border invariant is broken; cap the
            // distance instead of looping.
            debug_assert!(false, "ray escaped the grid: map border is not solid");
            let cap = max_range(grid, tile_size);
            let (s, c) = ray.to_radians().sin_cos();
            (cap, Axis::Vertical, origin + vec2(c, s) * cap, 0)
        }
    };

    ColumnHit {
        dist: raw * (ray - heading_deg).to_radians().cos(),
        axis,
        point,
        tile,
    }
}

/// Upper bound on any in-grid ray length; used when the walk finds nothing.
pub fn max_range(grid: &GridMap, tile_size: f32) -> f32 {
    (grid.width() + grid.height()) as f32 * tile_size
}

/// Crossing bound: a ray inside a bordered grid strikes the border ring
/// long before crossing this many boundaries of one family.
fn traverse_bound(grid: &GridMap) -> usize {
    2 * grid.width().max(grid.height())
}

/// Walk the boundaries of one grid-line family until a wall cell is struck.
///
/// `Horizontal` walks row boundaries (primary coordinate y), `Vertical`
/// walks column boundaries (primary coordinate x).  Returns the Euclidean
/// distance, the hit point and the struck tile id, or `None` when the ray
/// is parallel to the family or leaves the grid.
fn axis_hit(
    grid: &GridMap,
    origin: Vec2,
    ray_deg: f32,
    tile_size: f32,
    family: Axis,
) -> Option<(f32, Vec2, TileId)> {
    let (sin, cos) = ray_deg.to_radians().sin_cos();

    // `p` runs perpendicular to the boundary lines, `s` along them.
    let (p0, s0, toward, along) = match family {
        Axis::Horizontal => (origin.y, origin.x, sin, cos),
        Axis::Vertical => (origin.x, origin.y, cos, sin),
    };
    if toward.abs() < PARALLEL_EPS {
        return None; // never crosses this family
    }
    // Secondary displacement per unit of primary displacement.  Zero when
    // the *other* component is degenerate: the walk steps axis-aligned.
    let ratio = if along.abs() < PARALLEL_EPS {
        0.0
    } else {
        along / toward
    };

    let forward = toward > 0.0;
    let cell0 = (p0 / tile_size).floor() as i32;
    let first_p = if forward {
        (cell0 + 1) as f32 * tile_size
    } else {
        cell0 as f32 * tile_size
    };
    let dp = if forward { tile_size } else { -tile_size };

    let mut p = first_p;
    let mut s = s0 + (first_p - p0) * ratio;
    // the struck cell sits on the far side of the boundary, in the travel
    // direction
    let mut pcell = if forward { cell0 + 1 } else { cell0 - 1 };
    let pstep = if forward { 1 } else { -1 };

    for _ in 0..traverse_bound(grid) {
        let scell = (s / tile_size).floor() as i32;
        let (col, row) = match family {
            Axis::Horizontal => (scell, pcell),
            Axis::Vertical => (pcell, scell),
        };
        match grid.tile(col, row) {
            None => return None, // left the grid: border invariant broken
            Some(id) if id != 0 => {
                let point = match family {
                    Axis::Horizontal => vec2(s, p),
                    Axis::Vertical => vec2(p, s),
                };
                return Some(((point - origin).length(), point, id));
            }
            Some(_) => {}
        }
        p += dp;
        s += ratio * dp;
        pcell += pstep;
    }
    None
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    const TILE: f32 = 64.0;

    /// 10×10 solid border, empty interior.
    fn arena() -> GridMap {
        let mut src = String::from("10x10\n");
        for row in 0..10 {
            for col in 0..10 {
                src.push(if row == 0 || row == 9 || col == 0 || col == 9 {
                    '#'
                } else {
                    '.'
                });
            }
            src.push('\n');
        }
        GridMap::parse(&src).unwrap()
    }

    #[test]
    fn center_column_faces_east_border() {
        let g = arena();
        let origin = vec2(320.0, 320.0);
        let hit = cast_column(&g, origin, 0.0, 0.0, TILE);
        assert_eq!(hit.axis, Axis::Vertical);
        assert!((hit.dist - 256.0).abs() < 1e-3, "dist = {}", hit.dist);
        assert!((hit.point.x - 576.0).abs() < 1e-3);
        assert_eq!(hit.tile, 1);
    }

    #[test]
    fn degenerate_angles_hit_the_right_walls() {
        let g = arena();
        let origin = vec2(96.0, 96.0); // center of cell (1,1)
        let cases = [
            (0.0, Axis::Vertical, 480.0),    // east border at x = 576
            (90.0, Axis::Horizontal, 480.0), // south border at y = 576
            (180.0, Axis::Vertical, 32.0),   // west border at x = 64
            (270.0, Axis::Horizontal, 32.0), // north border at y = 64
        ];
        for (angle, axis, dist) in cases {
            let hit = cast_column(&g, origin, angle, angle, TILE);
            assert_eq!(hit.axis, axis, "angle {angle}");
            assert!((hit.dist - dist).abs() < 0.05, "angle {angle}: {}", hit.dist);
        }
    }

    #[test]
    fn sweep_is_finite_and_bounded() {
        let g = GridMap::demo();
        let origin = g.spawn_point(TILE).unwrap();
        let cap = max_range(&g, TILE);
        for deg in 0..360 {
            // ±29°: widest off-center ray of a 58° fan
            for off in [-29.0f32, 0.0, 29.0] {
                let hit = cast_column(&g, origin, deg as f32, deg as f32 + off, TILE);
                assert!(hit.dist.is_finite(), "{deg}+{off}");
                assert!(hit.dist >= 0.0, "{deg}+{off}: {}", hit.dist);
                assert!(hit.dist <= cap, "{deg}+{off}: {}", hit.dist);
            }
        }
    }

    #[test]
    fn hits_land_on_tile_boundaries() {
        let g = arena();
        let origin = vec2(200.0, 300.0);
        for deg in (0..360).step_by(7) {
            let hit = cast_column(&g, origin, deg as f32, deg as f32, TILE);
            let boundary = match hit.axis {
                Axis::Horizontal => hit.point.y,
                Axis::Vertical => hit.point.x,
            };
            let off = (boundary - (boundary / TILE).round() * TILE).abs();
            assert!(off < 1e-2, "angle {deg}: {off}");
        }
    }

    #[test]
    fn center_ray_correction_is_identity() {
        let g = arena();
        let origin = vec2(200.0, 300.0);
        let hit = cast_column(&g, origin, 37.0, 37.0, TILE);
        let raw = (hit.point - origin).length();
        assert!((raw - hit.dist).abs() < 1e-3);
    }

    #[test]
    fn off_center_ray_is_foreshortened() {
        let g = arena();
        let origin = vec2(200.0, 300.0);
        let hit = cast_column(&g, origin, 10.0, 40.0, TILE);
        let raw = (hit.point - origin).length();
        assert!(hit.dist < raw);
        assert!(hit.dist > 0.0);
    }

    #[test]
    fn interior_wall_shadows_the_border() {
        // demo map: wall stub at cell (4,1); fire at it from the west
        let g = GridMap::demo();
        let origin = vec2(96.0, 96.0);
        let hit = cast_column(&g, origin, 0.0, 0.0, TILE);
        assert_eq!(hit.axis, Axis::Vertical);
        assert!((hit.dist - (4.0 * TILE - 96.0)).abs() < 1e-3);
    }
}
