pub mod model;
pub mod view;

pub use model::{Hero, HeroTransform};
pub use view::draw;

// entrance
pub const ENTRANCE_SECS: f64 = 1.2;
pub const ENTRANCE_DELAY_SECS: f64 = 0.6;
pub const ENTRANCE_Y: f64 = 40.0;
pub const ENTRANCE_SCALE: f64 = 0.92;
pub const ENTRANCE_ROTATE: f64 = -2.0;

// idle float
pub const FLOAT_SECS: f64 = 3.6;
pub const FLOAT_DELAY_SECS: f64 = 1.6;
pub const FLOAT_Y: f64 = -12.0;
pub const FLOAT_ROTATE: f64 = 1.2;

// pointer follow
pub const FOLLOW_SECS: f64 = 0.85;
pub const STRETCH_SECS: f64 = 0.65;
pub const FOLLOW_X: f64 = 34.0;
pub const FOLLOW_Y: f64 = 22.0;
pub const FOLLOW_ROTATION: f64 = 10.0;
pub const MAX_POINTER_SPEED: f64 = 50.0;
pub const MAX_STRETCH: f64 = 0.1;
pub const SKEW: f64 = 6.0;
