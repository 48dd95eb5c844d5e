pub mod model;
pub mod view;

pub use model::{Card, CardTransform, Carousel, Direction, shortest_delta};
pub use view::{Hit, draw, hit_test};

pub const DEFAULT_RADIUS: f64 = 320.0;
pub const MIN_RADIUS: f64 = 240.0;
pub const MAX_RADIUS: f64 = 350.0;
pub const RADIUS_FACTOR: f64 = 0.35; // of container width
pub const FRONT_THRESHOLD: f64 = 0.85;
pub const TILT: f64 = 120.0; // vertical parallax at full depth
pub const MIN_SCALE: f64 = 0.55;
pub const MIN_OPACITY: f64 = 0.15;
pub const BLUR_FACTOR: f64 = 10.0;

pub const CARD_WIDTH: f64 = 250.0;
pub const CARD_HEIGHT: f64 = 264.0;
pub const CARD_IMAGE_HEIGHT: f64 = 144.0;
pub const INDICATOR_SPACING: f64 = 18.0;
pub const INDICATOR_MARGIN: f64 = 28.0;
