use super::model::{Card, CardTransform, Carousel};
use super::{CARD_HEIGHT, CARD_IMAGE_HEIGHT, CARD_WIDTH, INDICATOR_MARGIN, INDICATOR_SPACING};
use crate::gui::geometry::{Point, Rect, Size};
use crate::gui::paint::{fill_rounded_rect, set_color, show_wrapped};
use crate::gui::stage::{Prop, Target};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk4::prelude::*;
use glide::Tweener;

const MIN_SQUASH: f64 = 0.08;
const ACTIVE_DOT_WIDTH: f64 = 32.0;
const DOT_SIZE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Indicator(usize),
    Card(usize),
}

fn stage_center(size: Size) -> Point {
    Point::new(size.width / 2.0, (size.height - INDICATOR_MARGIN * 2.0) / 2.0)
}

/// Horizontal foreshortening for the card's facing rotation.
fn squash(t: &CardTransform) -> f64 {
    t.rotation_y.to_radians().cos().abs().max(MIN_SQUASH)
}

pub fn card_rect(size: Size, t: &CardTransform) -> Rect {
    let center = stage_center(size);
    let (w, h) = (CARD_WIDTH * t.scale * squash(t), CARD_HEIGHT * t.scale);
    Rect::new(center.y + t.y - h / 2.0, center.x + t.x - w / 2.0, w, h)
}

pub fn indicator_rects(size: Size, count: usize, active: usize) -> Vec<Rect> {
    let widths: Vec<f64> = (0..count)
        .map(|i| if i == active { ACTIVE_DOT_WIDTH } else { DOT_SIZE })
        .collect();
    let gaps = INDICATOR_SPACING * count.saturating_sub(1) as f64;
    let total = widths.iter().sum::<f64>() + gaps;
    let top = size.height - INDICATOR_MARGIN - DOT_SIZE / 2.0;

    let mut left = (size.width - total) / 2.0;
    widths
        .into_iter()
        .map(|w| {
            let rect = Rect::new(top, left, w, DOT_SIZE);
            left += w + INDICATOR_SPACING;
            rect
        })
        .collect()
}

/// Finds what a click at `point` lands on. Only the front card is
/// clickable; indicator dots get a little slack around them.
pub fn hit_test(
    size: Size,
    layout: &[CardTransform],
    active: usize,
    point: Point,
) -> Option<Hit> {
    let slack = INDICATOR_SPACING / 2.0;
    if let Some(i) = indicator_rects(size, layout.len(), active)
        .iter()
        .position(|r| r.inflate(slack).contains(point))
    {
        return Some(Hit::Indicator(i));
    }

    layout
        .iter()
        .filter(|t| t.interactive)
        .find(|t| card_rect(size, t).contains(point))
        .map(|t| Hit::Card(t.index))
}

pub fn draw<A: Tweener<Target, Prop>>(
    cr: &Context,
    carousel: &Carousel,
    anim: &A,
    size: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_star(cr, size, colors)?;

    let mut layout = carousel.layout(anim);
    layout.sort_by_key(|t| t.z_index);

    for t in &layout {
        let card = &carousel.cards[t.index];
        CardRenderer::new(card, t, card_rect(size, t)).draw(cr, colors)?;
    }

    let active = carousel.current_index(anim).unwrap_or(0);
    for (i, rect) in indicator_rects(size, layout.len(), active).iter().enumerate() {
        set_color(cr, if i == active { colors.primary } else { colors.muted });
        fill_rounded_rect(cr, rect, DOT_SIZE / 2.0)?;
    }
    Ok(())
}

fn draw_star(cr: &Context, size: Size, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let c = stage_center(size);
    let (r, g, b, _) = colors.primary.into_components();
    let glow = cairo::RadialGradient::new(c.x, c.y, 0.0, c.x, c.y, 40.0);
    glow.add_color_stop_rgba(0.0, r, g, b, 0.8);
    glow.add_color_stop_rgba(0.7, r, g, b, 0.0);
    cr.set_source(&glow)?;
    cr.arc(c.x, c.y, 40.0, 0.0, 2.0 * std::f64::consts::PI);
    cr.fill()
}

struct CardRenderer<'a> {
    card: &'a Card,
    transform: &'a CardTransform,
    rect: Rect,
}

impl<'a> CardRenderer<'a> {
    fn new(card: &'a Card, transform: &'a CardTransform, rect: Rect) -> Self {
        Self {
            card,
            transform,
            rect,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.push_group();
        self.draw_face(cr, colors)?;
        cr.pop_group_to_source()?;

        // box blur: repaint the face at small offsets with split alpha
        let passes = self.transform.blur.ceil() as i32;
        if passes <= 0 {
            return cr.paint_with_alpha(self.transform.opacity);
        }
        let source = cr.source();
        let alpha = self.transform.opacity / (passes * 2 + 1) as f64;
        for k in -passes..=passes {
            cr.save()?;
            cr.translate(k as f64 * self.transform.blur / passes as f64, 0.0);
            cr.set_source(&source)?;
            cr.paint_with_alpha(alpha)?;
            cr.restore()?;
        }
        Ok(())
    }

    fn draw_face(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(self.rect.left, self.rect.top);
        cr.scale(
            self.rect.width / CARD_WIDTH,
            self.rect.height / CARD_HEIGHT,
        );

        let face = Rect::new(0.0, 0.0, CARD_WIDTH, CARD_HEIGHT);
        set_color(cr, colors.card);
        fill_rounded_rect(cr, &face, 16.0)?;

        self.draw_image(cr, colors)?;

        set_color(cr, colors.foreground);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(16.0);
        cr.move_to(16.0, CARD_IMAGE_HEIGHT + 30.0);
        cr.show_text(&self.card.project.title)?;

        set_color(cr, colors.muted_foreground);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(11.0);
        show_wrapped(
            cr,
            &self.card.project.description,
            Point::new(16.0, CARD_IMAGE_HEIGHT + 50.0),
            CARD_WIDTH - 32.0,
            2,
        )?;

        if self.card.project.demo_url.is_some() {
            let live = Rect::new(CARD_HEIGHT - 44.0, 16.0, CARD_WIDTH - 80.0, 26.0);
            set_color(cr, colors.primary);
            fill_rounded_rect(cr, &live, 8.0)?;
            cr.set_source_rgb(1.0, 1.0, 1.0);
            cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
            cr.set_font_size(10.0);
            if let Ok(ext) = cr.text_extents("LIVE") {
                let c = live.center();
                cr.move_to(c.x - ext.width() / 2.0, c.y + ext.height() / 2.0);
                cr.show_text("LIVE")?;
            }
        }
        if self.card.project.repo_url.is_some() {
            let repo = Rect::new(CARD_HEIGHT - 44.0, CARD_WIDTH - 56.0, 40.0, 26.0);
            set_color(cr, colors.secondary);
            fill_rounded_rect(cr, &repo, 8.0)?;
        }

        cr.restore()
    }

    fn draw_image(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.rectangle(0.0, 0.0, CARD_WIDTH, CARD_IMAGE_HEIGHT);
        cr.clip();

        match &self.card.pixbuf {
            Some(pixbuf) => {
                // cover: fill the strip, crop the overflow
                let scale = (CARD_WIDTH / pixbuf.width() as f64)
                    .max(CARD_IMAGE_HEIGHT / pixbuf.height() as f64);
                let (iw, ih) = (
                    pixbuf.width() as f64 * scale,
                    pixbuf.height() as f64 * scale,
                );
                cr.translate((CARD_WIDTH - iw) / 2.0, (CARD_IMAGE_HEIGHT - ih) / 2.0);
                cr.scale(scale, scale);
                cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
                cr.paint()?;
            }
            None => {
                let (r, g, b, a) = colors.primary.into_components();
                let fill = cairo::LinearGradient::new(0.0, 0.0, CARD_WIDTH, CARD_IMAGE_HEIGHT);
                fill.add_color_stop_rgba(0.0, r, g, b, a * 0.6);
                fill.add_color_stop_rgba(1.0, r * 0.3, g * 0.3, b * 0.3, a);
                cr.set_source(&fill)?;
                cr.paint()?;
            }
        }
        cr.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(index: usize, interactive: bool, x: f64) -> CardTransform {
        CardTransform {
            index,
            x,
            y: 0.0,
            z: 0.0,
            depth: if interactive { 1.0 } else { 0.5 },
            scale: 1.0,
            opacity: 1.0,
            rotation_y: 0.0,
            blur: 0.0,
            z_index: 0,
            interactive,
        }
    }

    #[test]
    fn test_indicators_centered_with_wide_active_dot() {
        let size = Size::new(800.0, 560.0);
        let rects = indicator_rects(size, 5, 2);
        assert_eq!(rects.len(), 5);
        assert_eq!(rects[2].width, ACTIVE_DOT_WIDTH);
        assert_eq!(rects[0].width, DOT_SIZE);
        let left = rects[0].left;
        let right = rects[4].right();
        assert!(((left + right) / 2.0 - 400.0).abs() < 1e-9);
        assert!(rects.windows(2).all(|w| w[0].right() < w[1].left));
    }

    #[test]
    fn test_hit_front_card_only() {
        let size = Size::new(800.0, 560.0);
        let layout = vec![transform(0, true, 0.0), transform(1, false, 250.0)];
        let center = stage_center(size);

        assert_eq!(hit_test(size, &layout, 0, center), Some(Hit::Card(0)));
        assert_eq!(
            hit_test(size, &layout, 0, Point::new(center.x + 250.0, center.y)),
            None
        );
        assert_eq!(hit_test(size, &layout, 0, Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_hit_indicator() {
        let size = Size::new(800.0, 560.0);
        let layout = vec![
            transform(0, true, 0.0),
            transform(1, false, 250.0),
            transform(2, false, -250.0),
        ];
        let rects = indicator_rects(size, 3, 0);
        assert_eq!(
            hit_test(size, &layout, 0, rects[2].center()),
            Some(Hit::Indicator(2))
        );
    }

    #[test]
    fn test_card_rect_squashes_when_turned() {
        let size = Size::new(800.0, 560.0);
        let mut t = transform(0, true, 0.0);
        let flat = card_rect(size, &t);
        t.rotation_y = 60.0;
        let turned = card_rect(size, &t);
        assert!((turned.width - flat.width * 0.5).abs() < 1e-9);
        assert_eq!(turned.height, flat.height);
        assert!((turned.center().x - flat.center().x).abs() < 1e-9);
    }
}
