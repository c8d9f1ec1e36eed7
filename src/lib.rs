//! yaray_rs: yet another grid raycaster.
//!
//! A real-time first-person renderer over a fixed 2D tile grid: one ray
//! per screen column finds the nearest wall boundary, and the perpendicular
//! distance scales a flat-shaded vertical strip (the classic 2.5D look).
//!
//! * [`world`] – the tile grid, the player and the movement policy.
//! * [`engine`] – ray casting, projection/shading and frame orchestration.
//! * [`renderer`] – pixel back-ends and the minimap overlay.

pub mod engine;
pub mod renderer;
pub mod world;
