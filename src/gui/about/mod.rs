pub mod model;
pub mod view;

pub use model::AboutBoard;
pub use view::{draw_cards, draw_overlay};

pub const PAGE_PADDING: f64 = 24.0;
pub const HEADER_HEIGHT: f64 = 140.0; // title + intro paragraph
pub const MAX_CARD_WIDTH: f64 = 640.0;
pub const CARD_HEIGHT: f64 = 150.0;
pub const CARD_GAP: f64 = 24.0;
pub const CARD_RADIUS: f64 = 16.0;
pub const FACE_PADDING: f64 = 24.0;
