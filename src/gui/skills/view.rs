use super::model::SkillsBoard;
use super::{CHIP_HEIGHT, TITLE_HEIGHT};
use crate::gui::geometry::Rect;
use crate::gui::paint::{fill_rounded_rect, set_color};
use crate::gui::theme::{ThemeColors, fade};
use cairo::Context;

pub fn draw(
    cr: &Context,
    board: &SkillsBoard,
    width: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_title(cr, width, colors)?;

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(14.0);
    for (category, rect) in board.chip_rects() {
        let active = category == board.category();
        set_color(cr, if active { colors.primary } else { fade(colors.secondary, 0.7) });
        fill_rounded_rect(cr, &rect, CHIP_HEIGHT / 2.0)?;

        if active {
            cr.set_source_rgb(1.0, 1.0, 1.0);
        } else {
            set_color(cr, colors.foreground);
        }
        let label = capitalize(category.as_ref());
        let ext = cr.text_extents(&label)?;
        let c = rect.center();
        cr.move_to(c.x - ext.x_advance() / 2.0, c.y + ext.height() / 2.0);
        cr.show_text(&label)?;
    }

    for (skill, rect) in board.visible().into_iter().zip(board.tile_rects()) {
        draw_tile(cr, &skill.name, skill.level, &rect, colors)?;
    }
    Ok(())
}

fn draw_title(cr: &Context, width: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(32.0);
    let (my, skills) = ("My ", "Skills");
    let total = cr.text_extents(my)?.x_advance() + cr.text_extents(skills)?.x_advance();
    cr.move_to((width - total) / 2.0, TITLE_HEIGHT - 40.0);
    set_color(cr, colors.foreground);
    cr.show_text(my)?;
    set_color(cr, colors.primary);
    cr.show_text(skills)
}

fn draw_tile(
    cr: &Context,
    name: &str,
    level: u8,
    rect: &Rect,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.card);
    fill_rounded_rect(cr, rect, 10.0)?;

    set_color(cr, colors.foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(16.0);
    cr.move_to(rect.left + 24.0, rect.top + 36.0);
    cr.show_text(name)?;

    let track = Rect::new(rect.bottom() - 30.0, rect.left + 24.0, rect.width - 48.0, 8.0);
    set_color(cr, fade(colors.secondary, 0.8));
    fill_rounded_rect(cr, &track, 4.0)?;
    let fill = Rect::new(
        track.top,
        track.left,
        track.width * f64::from(level.min(100)) / 100.0,
        track.height,
    );
    set_color(cr, colors.primary);
    fill_rounded_rect(cr, &fill, 4.0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("frontend"), "Frontend");
        assert_eq!(capitalize(""), "");
    }
}
