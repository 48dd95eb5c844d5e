use super::{CARD_GAP, CARD_HEIGHT, HEADER_HEIGHT, MAX_CARD_WIDTH, PAGE_PADDING};
use crate::config::AboutCardConfig;
use crate::gui::geometry::{Point, Rect, Size};
use crate::gui::overlay::OverlayHost;

/// The about page: a column of cards inside a scrolled window. Card
/// rectangles are kept in content coordinates; the overlay gets them
/// shifted by the current scroll offset.
#[derive(Debug, Clone, Default)]
pub struct AboutBoard {
    pub cards: Vec<AboutCardConfig>,
    viewport: Size,
    scroll_offset: f64,
    scroll_locked: bool,
}

impl AboutBoard {
    pub fn new(cards: Vec<AboutCardConfig>) -> Self {
        Self {
            cards,
            ..Default::default()
        }
    }

    pub fn set_cards(&mut self, cards: Vec<AboutCardConfig>) {
        self.cards = cards;
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn card_width(&self) -> f64 {
        (self.viewport.width - PAGE_PADDING * 2.0)
            .min(MAX_CARD_WIDTH)
            .max(0.0)
    }

    /// Card `index` in content coordinates.
    pub fn card_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.cards.len() {
            return None;
        }
        let width = self.card_width();
        Some(Rect::new(
            HEADER_HEIGHT + index as f64 * (CARD_HEIGHT + CARD_GAP),
            ((self.viewport.width - width) / 2.0).round(),
            width,
            CARD_HEIGHT,
        ))
    }

    pub fn content_height(&self) -> f64 {
        let n = self.cards.len() as f64;
        HEADER_HEIGHT + n * CARD_HEIGHT + (n - 1.0).max(0.0) * CARD_GAP + PAGE_PADDING
    }

    /// Card under a point given in content coordinates.
    pub fn card_at(&self, point: Point) -> Option<usize> {
        (0..self.cards.len()).find(|&i| self.card_rect(i).is_some_and(|r| r.contains(point)))
    }
}

impl OverlayHost for AboutBoard {
    fn measure(&self, index: usize) -> Option<Rect> {
        if self.viewport.width <= 0.0 {
            return None;
        }
        self.card_rect(index)
            .map(|r| r.translate(0.0, -self.scroll_offset))
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
