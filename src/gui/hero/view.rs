use super::model::{Hero, HeroTransform};
use crate::config::HeroConfig;
use crate::gui::geometry::{Point, Rect, Size};
use crate::gui::paint::{set_color, show_wrapped};
use crate::gui::stage::{Prop, Target};
use crate::gui::theme::{ThemeColors, fade};
use cairo::Context;
use gdk4::prelude::*;
use gdk_pixbuf::Pixbuf;
use glide::Tweener;
use std::f64::consts::PI;

const WIDE_LAYOUT: f64 = 800.0;
const PERSPECTIVE_MIN: f64 = 0.2;

/// Where the portrait sits: right half on wide windows, lower half otherwise.
pub fn portrait_rect(size: Size) -> Rect {
    if size.width >= WIDE_LAYOUT {
        let side = (size.width * 0.4).min(size.height * 0.75).min(620.0);
        Rect::new(
            (size.height - side) / 2.0,
            size.width * 0.75 - side / 2.0,
            side,
            side,
        )
    } else {
        let side = (size.width * 0.7).min(size.height * 0.45).min(380.0);
        Rect::new(size.height - side - 48.0, (size.width - side) / 2.0, side, side)
    }
}

pub fn draw<A: Tweener<Target, Prop>>(
    cr: &Context,
    hero: &Hero,
    anim: &A,
    config: &HeroConfig,
    portrait: Option<&Pixbuf>,
    size: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_text(cr, config, size, colors)?;
    draw_portrait(cr, &hero.transform(anim), portrait, portrait_rect(size), colors)
}

fn draw_text(
    cr: &Context,
    config: &HeroConfig,
    size: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let wide = size.width >= WIDE_LAYOUT;
    let (x, top, max_w) = if wide {
        (size.width * 0.08, size.height * 0.35, size.width * 0.42)
    } else {
        (24.0, 80.0, size.width - 48.0)
    };

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(if wide { 52.0 } else { 34.0 });
    cr.move_to(x, top);
    set_color(cr, colors.foreground);
    cr.show_text(&format!("{} ", config.greeting))?;
    set_color(cr, colors.primary);
    cr.show_text(&config.name)?;

    set_color(cr, colors.muted_foreground);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(18.0);
    show_wrapped(cr, &config.tagline, Point::new(x, top + 48.0), max_w, 4)?;
    Ok(())
}

fn draw_portrait(
    cr: &Context,
    t: &HeroTransform,
    portrait: Option<&Pixbuf>,
    rect: Rect,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if t.opacity <= 0.0 || rect.width <= 0.0 {
        return Ok(());
    }
    let c = rect.center();

    cr.push_group();
    cr.save()?;
    // float group
    cr.translate(c.x, c.y + t.float_y);
    cr.rotate(t.rotate.to_radians());
    cr.scale(t.scale, t.scale);
    draw_glow(cr, rect.width / 2.0, colors)?;

    // tilt: rotations about the screen axes read as squashes head-on
    cr.translate(t.tilt_x, t.tilt_y);
    cr.scale(
        t.rotate_y.to_radians().cos().max(PERSPECTIVE_MIN),
        t.rotate_x.to_radians().cos().max(PERSPECTIVE_MIN),
    );

    // image stretch and skew
    cr.scale(t.scale_x, t.scale_y);
    cr.transform(cairo::Matrix::new(1.0, 0.0, t.skew.to_radians().tan(), 1.0, 0.0, 0.0));

    let half = rect.width / 2.0;
    match portrait {
        Some(pixbuf) => {
            let scale = rect.width / pixbuf.width().max(pixbuf.height()).max(1) as f64;
            cr.scale(scale, scale);
            let (w, h) = (pixbuf.width() as f64, pixbuf.height() as f64);
            cr.set_source_pixbuf(pixbuf, -w / 2.0, -h / 2.0);
            cr.paint()?;
        }
        None => draw_placeholder(cr, half * 0.7, colors)?,
    }
    cr.restore()?;
    cr.pop_group_to_source()?;
    cr.paint_with_alpha(t.opacity)
}

fn draw_glow(cr: &Context, radius: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, _) = colors.primary.into_components();
    let glow = cairo::RadialGradient::new(0.0, 0.0, 0.0, 0.0, 0.0, radius * 1.15);
    glow.add_color_stop_rgba(0.0, r, g, b, 0.35);
    glow.add_color_stop_rgba(0.6, r, g, b, 0.0);
    cr.set_source(&glow)?;
    cr.arc(0.0, 0.0, radius * 1.15, 0.0, 2.0 * PI);
    cr.fill()
}

/// A helmet-like disc standing in for a missing portrait image.
fn draw_placeholder(cr: &Context, radius: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.card);
    cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
    cr.fill()?;

    set_color(cr, fade(colors.primary, 0.8));
    cr.set_line_width(radius * 0.08);
    cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
    cr.stroke()?;

    let visor = cairo::LinearGradient::new(-radius, -radius, radius, radius);
    let (r, g, b, _) = colors.primary.into_components();
    visor.add_color_stop_rgba(0.0, r, g, b, 0.9);
    visor.add_color_stop_rgba(1.0, r * 0.3, g * 0.3, b * 0.3, 0.9);
    cr.set_source(&visor)?;
    cr.save()?;
    cr.scale(1.0, 0.7);
    cr.arc(0.0, -radius * 0.1, radius * 0.6, 0.0, 2.0 * PI);
    cr.restore()?;
    cr.fill()
}
