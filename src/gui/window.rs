use crate::gui::geometry::Size;
use crate::preferences::ThemeMode;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Hands a link to the desktop's default handler.
pub fn open_uri(uri: &str) {
    log::info!("Opening {}", uri);
    if let Err(e) = Command::new("xdg-open")
        .arg(uri)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        log::error!("Failed to open '{}': {}", uri, e);
    }
}

pub fn frame_time(clock: &gdk::FrameClock) -> Duration {
    Duration::from_micros(clock.frame_time().max(0) as u64)
}

pub fn widget_size(widget: &impl IsA<gtk::Widget>) -> Size {
    Size::new(widget.width() as f64, widget.height() as f64)
}

pub fn desktop_animations_enabled() -> bool {
    gtk::Settings::default().is_none_or(|s| s.is_gtk_enable_animations())
}

pub fn apply_theme(mode: ThemeMode) {
    if let Some(settings) = gtk::Settings::default() {
        settings.set_gtk_application_prefer_dark_theme(mode.is_dark());
    }
}
