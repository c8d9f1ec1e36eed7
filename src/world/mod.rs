mod grid;
mod player;

pub use grid::{GridError, GridMap, TileId};
pub use player::{Buttons, MoveTuning, Player, wrap_deg};
