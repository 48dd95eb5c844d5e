use super::model::AboutBoard;
use super::{CARD_RADIUS, FACE_PADDING, HEADER_HEIGHT, PAGE_PADDING};
use crate::config::AboutCardConfig;
use crate::gui::geometry::{Point, Rect, Size};
use crate::gui::overlay::{OverlayController, OverlayHost, close_button_rect};
use crate::gui::paint::{fill_rounded_rect, rounded_rect_path, set_color, show_wrapped};
use crate::gui::stage::{Prop, Target};
use crate::gui::theme::{ThemeColors, fade};
use cairo::Context;
use glide::Tweener;

const MIN_FLIP_SQUASH: f64 = 0.02;

pub fn draw_cards(
    cr: &Context,
    board: &AboutBoard,
    suppressed: Option<usize>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_header(cr, board, colors)?;

    for (i, card) in board.cards.iter().enumerate() {
        if suppressed == Some(i) {
            continue;
        }
        let Some(rect) = board.card_rect(i) else {
            continue;
        };
        draw_card_shell(cr, &rect, colors)?;
        draw_front(cr, card, &rect, "Click to open", colors)?;
    }
    Ok(())
}

fn draw_header(cr: &Context, board: &AboutBoard, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let width = board.viewport().width;
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(32.0);

    let (about, me) = ("About ", "Me");
    let about_w = cr.text_extents(about)?.x_advance();
    let me_w = cr.text_extents(me)?.x_advance();
    let x = (width - about_w - me_w) / 2.0;
    let y = PAGE_PADDING + 48.0;

    set_color(cr, colors.foreground);
    cr.move_to(x, y);
    cr.show_text(about)?;
    set_color(cr, colors.primary);
    cr.show_text(me)?;

    set_color(cr, colors.muted_foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(14.0);
    let hint = "Pick a card to read more";
    let hint_w = cr.text_extents(hint)?.x_advance();
    cr.move_to((width - hint_w) / 2.0, HEADER_HEIGHT - 32.0);
    cr.show_text(hint)
}

fn draw_card_shell(cr: &Context, rect: &Rect, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.card);
    fill_rounded_rect(cr, rect, CARD_RADIUS)?;
    set_color(cr, colors.border);
    cr.set_line_width(1.0);
    rounded_rect_path(cr, rect, CARD_RADIUS);
    cr.stroke()
}

fn draw_icon_dot(cr: &Context, origin: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, fade(colors.primary, 0.15));
    cr.arc(origin.x + 22.0, origin.y + 22.0, 22.0, 0.0, 2.0 * std::f64::consts::PI);
    cr.fill()?;
    set_color(cr, colors.primary);
    cr.arc(origin.x + 22.0, origin.y + 22.0, 7.0, 0.0, 2.0 * std::f64::consts::PI);
    cr.fill()
}

fn draw_front(
    cr: &Context,
    card: &AboutCardConfig,
    rect: &Rect,
    footer: &str,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let origin = Point::new(rect.left + FACE_PADDING, rect.top + FACE_PADDING);
    draw_icon_dot(cr, origin, colors)?;

    let text_x = origin.x + 60.0;
    let text_w = rect.right() - FACE_PADDING - text_x;

    set_color(cr, colors.foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(17.0);
    cr.move_to(text_x, origin.y + 18.0);
    cr.show_text(&card.title)?;

    set_color(cr, colors.muted_foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(13.0);
    let y = show_wrapped(cr, &card.preview, Point::new(text_x, origin.y + 42.0), text_w, 3)?;

    set_color(cr, fade(colors.primary, 0.7));
    cr.set_font_size(12.0);
    cr.move_to(text_x, y + 10.0);
    cr.show_text(footer)
}

fn draw_back(
    cr: &Context,
    card: &AboutCardConfig,
    rect: &Rect,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let origin = Point::new(rect.left + FACE_PADDING, rect.top + FACE_PADDING);
    draw_icon_dot(cr, origin, colors)?;

    let close = close_button_rect(rect);
    let text_x = origin.x + 60.0;
    let text_w = close.left - 12.0 - text_x;

    set_color(cr, colors.foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(20.0);
    cr.move_to(text_x, origin.y + 20.0);
    cr.show_text(&card.title)?;

    cr.save()?;
    cr.rectangle(rect.left, rect.top, rect.width, rect.height - FACE_PADDING / 2.0);
    cr.clip();

    set_color(cr, colors.muted_foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(13.0);
    let mut y = origin.y + 56.0;
    for paragraph in &card.body {
        y = show_wrapped(cr, paragraph, Point::new(text_x, y), text_w, 8)? + 10.0;
    }
    for bullet in &card.bullets {
        cr.arc(text_x + 4.0, y - 4.0, 2.5, 0.0, 2.0 * std::f64::consts::PI);
        cr.fill()?;
        y = show_wrapped(cr, bullet, Point::new(text_x + 16.0, y), text_w - 16.0, 4)? + 6.0;
    }
    cr.restore()?;

    draw_close_button(cr, &close, colors)
}

fn draw_close_button(cr: &Context, rect: &Rect, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, fade(colors.primary, 0.1));
    fill_rounded_rect(cr, rect, rect.width / 2.0)?;

    let c = rect.center();
    let arm = rect.width * 0.2;
    set_color(cr, fade(colors.primary, 0.8));
    cr.set_line_width(2.0);
    cr.move_to(c.x - arm, c.y - arm);
    cr.line_to(c.x + arm, c.y + arm);
    cr.move_to(c.x + arm, c.y - arm);
    cr.line_to(c.x - arm, c.y + arm);
    cr.stroke()
}

/// Paints the backdrop and the flipping panel on top of the page.
pub fn draw_overlay<A: Tweener<Target, Prop>>(
    cr: &Context,
    overlay: &OverlayController,
    anim: &A,
    board: &AboutBoard,
    size: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Some(index) = overlay.index() else {
        return Ok(());
    };
    let Some(card) = board.cards.get(index) else {
        return Ok(());
    };

    let backdrop = overlay.backdrop_opacity(anim);
    if backdrop > 0.0 {
        set_color(cr, fade(colors.backdrop, backdrop));
        cr.rectangle(0.0, 0.0, size.width, size.height);
        cr.fill()?;
    }

    let Some(panel) = overlay.panel_rect(anim) else {
        return Ok(());
    };

    // rotateY about the vertical axis seen head-on is a horizontal squash
    let squash = overlay.flip(anim).to_radians().cos().abs().max(MIN_FLIP_SQUASH);
    let c = panel.center();
    cr.save()?;
    cr.translate(c.x, c.y);
    cr.scale(squash, 1.0);
    cr.translate(-c.x, -c.y);

    draw_card_shell(cr, &panel, colors)?;
    if overlay.shows_back(anim) {
        draw_back(cr, card, &panel, colors)?;
    } else {
        draw_front(cr, card, &panel, "Opening…", colors)?;
    }
    cr.restore()
}
