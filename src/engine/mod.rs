mod caster;
mod engine;
mod projection;
mod types;

pub use caster::{cast_column, max_range};
pub use engine::{Engine, Tuning};
pub use projection::{Fade, project_column};
pub use types::{Axis, ColumnHit, Screen, Viewer};
