//! Fixed-size tile grid the rays march through.
//!
//! A map is a `width × height` array of [`TileId`]s (0 = walkable floor,
//! anything else = wall), loaded once at startup and read-only afterwards.
//! The loader guarantees the border ring is solid; that invariant is what
//! bounds every ray walk in `engine::caster`.

use glam::{Vec2, vec2};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, io, path::Path};
use thiserror::Error;

/// One map cell.  `0` is walkable; any non-zero value is a wall and doubles
/// as the palette index used by the shader.
pub type TileId = u8;

/// `WIDTHxHEIGHT` header line, e.g. `10x10`.
static DIM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*x\s*(\d+)\s*$").unwrap());

/// The level the binary falls back to when no `--map` is given.
const DEMO_MAP: &str = include_str!("../../maps/demo.map");

/// Errors raised while reading a map file.
#[derive(Error, Debug)]
pub enum GridError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing or malformed `WIDTHxHEIGHT` header line.
    #[error("bad map header: expected `WIDTHxHEIGHT`, got `{0}`")]
    BadHeader(String),

    /// Maps smaller than 3×3 cannot have a border around an interior.
    #[error("map must be at least 3x3, got {w}x{h}")]
    TooSmall { w: usize, h: usize },

    /// A row's length disagrees with the header.
    #[error("row {row} has {found} tiles, header promised {expected}")]
    BadRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The number of rows disagrees with the header.
    #[error("map has {found} rows, header promised {expected}")]
    BadRowCount { expected: usize, found: usize },

    /// A character outside the tile alphabet.
    #[error("unknown tile character `{ch}` at row {row}")]
    BadTile { ch: char, row: usize },

    /// A walkable cell on the border ring.  An open border would let rays
    /// leave the grid, so it is rejected at load time.
    #[error("border must be solid: open tile at column {col}, row {row}")]
    OpenBorder { col: usize, row: usize },
}

/// Immutable tile grid, row-major.
#[derive(Clone, Debug)]
pub struct GridMap {
    w: usize,
    h: usize,
    tiles: Vec<TileId>,
}

impl GridMap {
    /// Load a map from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Parse map text: `;` comment lines, a `WxH` header, then `H` rows of
    /// `W` tile characters (`.`/space = floor, `#` = wall 1, `1`–`9` =
    /// explicit wall ids).
    pub fn parse(src: &str) -> Result<Self, GridError> {
        let mut lines = src
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.trim_start().starts_with(';'));

        let header = lines
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| GridError::BadHeader(String::new()))?;
        let caps = DIM_RE
            .captures(header)
            .ok_or_else(|| GridError::BadHeader(header.to_string()))?;
        let w: usize = caps[1]
            .parse()
            .map_err(|_| GridError::BadHeader(header.to_string()))?;
        let h: usize = caps[2]
            .parse()
            .map_err(|_| GridError::BadHeader(header.to_string()))?;
        if w < 3 || h < 3 {
            return Err(GridError::TooSmall { w, h });
        }

        let mut tiles = Vec::with_capacity(w * h);
        let mut rows = 0usize;
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            if rows == h {
                return Err(GridError::BadRowCount {
                    expected: h,
                    found: rows + 1,
                });
            }
            let mut found = 0usize;
            for ch in line.chars() {
                let id = match ch {
                    '.' | ' ' => 0,
                    '#' => 1,
                    '1'..='9' => ch as u8 - b'0',
                    _ => return Err(GridError::BadTile { ch, row: rows }),
                };
                tiles.push(id);
                found += 1;
            }
            if found != w {
                return Err(GridError::BadRow {
                    row: rows,
                    expected: w,
                    found,
                });
            }
            rows += 1;
        }
        if rows != h {
            return Err(GridError::BadRowCount {
                expected: h,
                found: rows,
            });
        }

        let grid = Self { w, h, tiles };
        grid.ensure_border()?;
        Ok(grid)
    }

    /// The embedded 10×10 demo level.
    pub fn demo() -> Self {
        Self::parse(DEMO_MAP).expect("embedded demo map is valid")
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Bounds-checked tile query; `None` out of range.
    #[inline]
    pub fn tile(&self, col: i32, row: i32) -> Option<TileId> {
        if col < 0 || row < 0 || col as usize >= self.w || row as usize >= self.h {
            return None;
        }
        Some(self.tiles[row as usize * self.w + col as usize])
    }

    /// True for in-range non-zero tiles.
    #[inline]
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.tile(col, row).is_some_and(|t| t != 0)
    }

    /// Center of the first walkable interior cell, in grid units.
    pub fn spawn_point(&self, tile_size: f32) -> Option<Vec2> {
        for row in 1..self.h.saturating_sub(1) {
            for col in 1..self.w.saturating_sub(1) {
                if self.tiles[row * self.w + col] == 0 {
                    return Some(vec2(
                        (col as f32 + 0.5) * tile_size,
                        (row as f32 + 0.5) * tile_size,
                    ));
                }
            }
        }
        None
    }

    fn ensure_border(&self) -> Result<(), GridError> {
        for col in 0..self.w {
            for row in [0, self.h - 1] {
                if !self.is_wall(col as i32, row as i32) {
                    return Err(GridError::OpenBorder { col, row });
                }
            }
        }
        for row in 0..self.h {
            for col in [0, self.w - 1] {
                if !self.is_wall(col as i32, row as i32) {
                    return Err(GridError::OpenBorder { col, row });
                }
            }
        }
        Ok(())
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_map_parses() {
        let g = GridMap::demo();
        assert_eq!((g.width(), g.height()), (10, 10));
        // wall stub at (4,1) and floor next to it
        assert_eq!(g.tile(4, 1), Some(1));
        assert_eq!(g.tile(3, 1), Some(0));
    }

    #[test]
    fn out_of_range_is_none() {
        let g = GridMap::demo();
        assert_eq!(g.tile(-1, 0), None);
        assert_eq!(g.tile(0, -1), None);
        assert_eq!(g.tile(10, 0), None);
        assert_eq!(g.tile(0, 10), None);
        assert!(!g.is_wall(-1, -1));
    }

    #[test]
    fn open_border_is_rejected() {
        let src = "3x3\n###\n#..\n###\n";
        match GridMap::parse(src) {
            Err(GridError::OpenBorder { col: 2, row: 1 }) => {}
            other => panic!("expected OpenBorder, got {other:?}"),
        }
    }

    #[test]
    fn bad_inputs_are_rejected() {
        assert!(matches!(
            GridMap::parse("nonsense\n"),
            Err(GridError::BadHeader(_))
        ));
        assert!(matches!(
            GridMap::parse("3x3\n###\n#?#\n###\n"),
            Err(GridError::BadTile { ch: '?', row: 1 })
        ));
        assert!(matches!(
            GridMap::parse("3x3\n###\n##\n###\n"),
            Err(GridError::BadRow { row: 1, .. })
        ));
        assert!(matches!(
            GridMap::parse("3x3\n###\n###\n"),
            Err(GridError::BadRowCount { .. })
        ));
        assert!(matches!(
            GridMap::parse("2x2\n##\n##\n"),
            Err(GridError::TooSmall { .. })
        ));
    }

    #[test]
    fn explicit_ids_and_comments() {
        let src = ";header comment\n3x3\n###\n#2#\n###\n";
        // interior wall keeps the map valid and carries its id
        let g = GridMap::parse(src).unwrap();
        assert_eq!(g.tile(1, 1), Some(2));
        assert_eq!(g.spawn_point(64.0), None);
    }

    #[test]
    fn spawn_point_is_first_open_cell_center() {
        let g = GridMap::demo();
        let p = g.spawn_point(64.0).unwrap();
        assert_eq!((p.x, p.y), (96.0, 96.0));
    }
}
