pub mod model;

pub use model::{OverlayController, OverlayHost, OverlayState, close_button_rect, target_rect};

pub const MAX_WIDTH: f64 = 860.0;
pub const MAX_HEIGHT: f64 = 580.0;
pub const H_MARGIN: f64 = 48.0;
pub const V_MARGIN: f64 = 140.0;
pub const CLOSE_BUTTON_SIZE: f64 = 36.0;

// opening
pub const BACKDROP_IN_SECS: f64 = 0.2;
pub const EXPAND_SECS: f64 = 0.55;
pub const FLIP_IN_SECS: f64 = 0.55;
pub const FLIP_IN_OFFSET: f64 = 0.05;

// closing
pub const BACKDROP_OUT_SECS: f64 = 0.18;
pub const FLIP_OUT_SECS: f64 = 0.45;
pub const COLLAPSE_SECS: f64 = 0.5;
