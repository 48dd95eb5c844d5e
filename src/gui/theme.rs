use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colours for the cairo-drawn pages, resolved from the active GTK theme so
/// the light/dark switch repaints them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub foreground: Srgba<f64>,
    pub primary: Srgba<f64>,
    pub secondary: Srgba<f64>,
    pub card: Srgba<f64>,
    pub muted: Srgba<f64>,
    pub muted_foreground: Srgba<f64>,
    pub border: Srgba<f64>,
    pub backdrop: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: Srgba::new(0.07, 0.07, 0.09, 1.0),
            foreground: Srgba::new(0.95, 0.95, 0.97, 1.0),
            primary: Srgba::new(0.55, 0.36, 0.96, 1.0),
            secondary: Srgba::new(0.2, 0.2, 0.24, 1.0),
            card: Srgba::new(0.12, 0.12, 0.15, 1.0),
            muted: Srgba::new(0.3, 0.3, 0.35, 1.0),
            muted_foreground: Srgba::new(0.65, 0.65, 0.7, 1.0),
            border: Srgba::new(1.0, 1.0, 1.0, 0.1),
            backdrop: Srgba::new(0.0, 0.0, 0.0, 0.6),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            background: Self::lookup_color(context, "theme_bg_color", fallback.background, None),
            foreground: Self::lookup_color(context, "theme_fg_color", fallback.foreground, None),
            primary: Self::lookup_color(context, "showcase_primary", fallback.primary, None),
            secondary: Self::lookup_color(
                context,
                "theme_unfocused_bg_color",
                fallback.secondary,
                None,
            ),
            card: Self::lookup_color(context, "theme_base_color", fallback.card, None),
            muted: Self::lookup_color(context, "borders", fallback.muted, Some(1.0)),
            muted_foreground: Self::lookup_color(
                context,
                "insensitive_fg_color",
                fallback.muted_foreground,
                None,
            ),
            border: Self::lookup_color(context, "borders", fallback.border, Some(0.4)),
            backdrop: fallback.backdrop,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Same colour with its alpha multiplied by `factor`.
pub fn fade(color: Srgba<f64>, factor: f64) -> Srgba<f64> {
    let (r, g, b, a) = color.into_components();
    Srgba::new(r, g, b, a * factor.clamp(0.0, 1.0))
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color showcase_primary #8b5cf6;

.showcase-stage {
    background-color: @theme_bg_color;
}

.showcase-nav-button {
    min-width: 40px;
    min-height: 40px;
    border-radius: 20px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
