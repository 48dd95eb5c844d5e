use super::{
    CHIP_GAP, CHIP_HEIGHT, CHIP_WIDTH, GRID_GAP, GRID_TOP, MAX_GRID_WIDTH, SIDE_PADDING,
    TILE_HEIGHT, TITLE_HEIGHT,
};
use crate::config::{Category, SkillConfig};
use crate::gui::geometry::{Point, Rect};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillsHit {
    Category(Category),
    Skill(usize),
}

/// Skill tiles filtered by one category at a time.
#[derive(Debug, Clone, Default)]
pub struct SkillsBoard {
    skills: Vec<SkillConfig>,
    category: Category,
    width: f64,
}

impl SkillsBoard {
    pub fn new(skills: Vec<SkillConfig>) -> Self {
        Self {
            skills,
            ..Default::default()
        }
    }

    pub fn set_skills(&mut self, skills: Vec<SkillConfig>) {
        self.skills = skills;
    }

    pub fn resize(&mut self, width: f64) {
        self.width = width;
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns false when `category` was already selected.
    pub fn select(&mut self, category: Category) -> bool {
        if self.category == category {
            return false;
        }
        log::debug!("Skills filter: {}", category);
        self.category = category;
        true
    }

    pub fn visible(&self) -> Vec<&SkillConfig> {
        self.skills
            .iter()
            .filter(|s| self.category == Category::All || s.category == self.category)
            .collect()
    }

    pub fn columns(&self) -> usize {
        match self.width {
            w if w >= 1024.0 => 3,
            w if w >= 640.0 => 2,
            _ => 1,
        }
    }

    pub fn chip_rects(&self) -> Vec<(Category, Rect)> {
        let count = Category::iter().count() as f64;
        let total = count * CHIP_WIDTH + (count - 1.0) * CHIP_GAP;
        let mut left = ((self.width - total) / 2.0).max(SIDE_PADDING);
        Category::iter()
            .map(|c| {
                let rect = Rect::new(TITLE_HEIGHT, left, CHIP_WIDTH, CHIP_HEIGHT);
                left += CHIP_WIDTH + CHIP_GAP;
                (c, rect)
            })
            .collect()
    }

    /// Tiles for the visible skills, row-major.
    pub fn tile_rects(&self) -> Vec<Rect> {
        let cols = self.columns();
        let grid_w = (self.width - SIDE_PADDING * 2.0).clamp(0.0, MAX_GRID_WIDTH);
        let tile_w = ((grid_w - GRID_GAP * (cols - 1) as f64) / cols as f64).max(0.0);
        let left = (self.width - grid_w) / 2.0;

        (0..self.visible().len())
            .map(|i| {
                let (row, col) = ((i / cols) as f64, (i % cols) as f64);
                Rect::new(
                    GRID_TOP + row * (TILE_HEIGHT + GRID_GAP),
                    left + col * (tile_w + GRID_GAP),
                    tile_w,
                    TILE_HEIGHT,
                )
            })
            .collect()
    }

    pub fn content_height(&self) -> f64 {
        let rows = self.visible().len().div_ceil(self.columns()) as f64;
        GRID_TOP + rows * TILE_HEIGHT + (rows - 1.0).max(0.0) * GRID_GAP + GRID_GAP
    }

    pub fn hit_test(&self, point: Point) -> Option<SkillsHit> {
        if let Some((category, _)) = self
            .chip_rects()
            .into_iter()
            .find(|(_, r)| r.contains(point))
        {
            return Some(SkillsHit::Category(category));
        }
        self.tile_rects()
            .iter()
            .position(|r| r.contains(point))
            .map(SkillsHit::Skill)
    }

    /// Applies a click. Returns true when the board needs a redraw.
    pub fn click(&mut self, point: Point) -> bool {
        match self.hit_test(point) {
            Some(SkillsHit::Category(c)) => self.select(c),
            Some(SkillsHit::Skill(i)) => {
                if let Some(skill) = self.visible().get(i) {
                    log::debug!("Skill tile: {} ({}%)", skill.name, skill.level);
                }
                false
            }
            None => false,
        }
    }
}
