pub mod about;
pub mod app;
pub mod carousel;
pub mod geometry;
pub mod hero;
pub mod overlay;
pub mod paint;
pub mod skills;
pub mod stage;
pub mod theme;
pub mod window;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Pages of the main stack. The string form doubles as the stack child name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
    AsRefStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Section {
    #[default]
    #[strum(to_string = "home", serialize = "hero")]
    Home,
    About,
    Skills,
    #[strum(to_string = "projects", serialize = "work")]
    Projects,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
        }
    }
}
