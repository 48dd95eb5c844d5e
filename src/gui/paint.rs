use crate::gui::geometry::{Point, Rect};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

pub fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn rounded_rect_path(cr: &Context, rect: &Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (x, y, w, h) = (rect.left, rect.top, rect.width, rect.height);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

pub fn fill_rounded_rect(cr: &Context, rect: &Rect, radius: f64) -> Result<(), cairo::Error> {
    rounded_rect_path(cr, rect, radius);
    cr.fill()
}

/// Greedy word wrap into at most `max_lines` lines; the last line gets an
/// ellipsis when text is cut. Returns the y of the line after the last one.
pub fn show_wrapped(
    cr: &Context,
    text: &str,
    origin: Point,
    max_width: f64,
    max_lines: usize,
) -> Result<f64, cairo::Error> {
    let line_height = cr.font_extents()?.height();
    let lines = wrap_lines(text, max_lines, |s| {
        cr.text_extents(s).map(|e| e.x_advance()).unwrap_or(0.0) <= max_width
    });

    let mut y = origin.y;
    for line in &lines {
        cr.move_to(origin.x, y);
        cr.show_text(line)?;
        y += line_height;
    }
    Ok(y)
}

/// Splits on whitespace so every line satisfies `fits`. A single word that
/// does not fit gets a line of its own.
pub fn wrap_lines(text: &str, max_lines: usize, fits: impl Fn(&str) -> bool) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) || current.is_empty() {
            current = candidate;
            continue;
        }
        lines.push(std::mem::take(&mut current));
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        current = word.to_string();
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }

    if truncated && let Some(last) = lines.last_mut() {
        last.push('…');
    }
    lines
}
