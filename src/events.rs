use crate::gui::Section;

/// Events raised off the GTK thread, by the socket server and the config
/// watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Next,
    Prev,
    GoTo(i64),
    Close,
    ToggleTheme,
    Show(Section),
    ConfigReload,
}
