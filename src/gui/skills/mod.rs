pub mod model;
pub mod view;

pub use model::{SkillsBoard, SkillsHit};
pub use view::draw;

pub const TITLE_HEIGHT: f64 = 110.0;
pub const CHIP_HEIGHT: f64 = 36.0;
pub const CHIP_WIDTH: f64 = 104.0;
pub const CHIP_GAP: f64 = 16.0;
pub const GRID_TOP: f64 = TITLE_HEIGHT + CHIP_HEIGHT + 40.0;
pub const GRID_GAP: f64 = 24.0;
pub const TILE_HEIGHT: f64 = 96.0;
pub const MAX_GRID_WIDTH: f64 = 1024.0;
pub const SIDE_PADDING: f64 = 16.0;
