use crate::config::{MotionConfig, project_dirs};
use parking_lot::RwLock;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// Only an exact `light` selects the light theme.
    pub fn from_stored(value: &str) -> Self {
        if value.trim() == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn theme_path() -> Result<PathBuf, PreferenceError> {
    let dirs = project_dirs().ok_or(PreferenceError::DataDirNotFound)?;
    Ok(dirs.data_dir().join("theme"))
}

/// Reads the stored mode. A missing file means dark, and `dark` is written
/// back so the choice sticks.
pub fn read_theme(path: &Path) -> Result<ThemeMode, PreferenceError> {
    match fs_err::read_to_string(path) {
        Ok(value) => Ok(ThemeMode::from_stored(&value)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            write_theme(path, ThemeMode::Dark)?;
            Ok(ThemeMode::Dark)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn write_theme(path: &Path, mode: ThemeMode) -> Result<(), PreferenceError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, mode.to_string())?;
    Ok(())
}

static THEME: OnceLock<RwLock<ThemeMode>> = OnceLock::new();

fn slot() -> &'static RwLock<ThemeMode> {
    THEME.get_or_init(|| RwLock::new(ThemeMode::default()))
}

/// Loads the persisted theme into the process-wide slot. Storage failures
/// are logged and leave the default in place.
pub fn init() -> ThemeMode {
    let mode = theme_path()
        .and_then(|path| read_theme(&path))
        .unwrap_or_else(|e| {
            log::error!("Failed to read theme preference: {}", e);
            ThemeMode::default()
        });
    *slot().write() = mode;
    mode
}

pub fn theme() -> ThemeMode {
    *slot().read()
}

/// Flips the theme and persists it. The in-memory value changes even when
/// writing fails.
pub fn toggle() -> ThemeMode {
    let mode = {
        let mut lock = slot().write();
        *lock = lock.toggled();
        *lock
    };
    if let Err(e) = theme_path().and_then(|path| write_theme(&path, mode)) {
        log::error!("Failed to persist theme preference: {}", e);
    }
    log::info!("Theme: {}", mode);
    mode
}

/// Reduced motion is on when the config forces it or the desktop has
/// animations disabled.
pub fn reduced_motion(motion: &MotionConfig, desktop_animations: bool) -> bool {
    motion.reduce || !desktop_animations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("showcase-prefs-{}-{}", std::process::id(), name))
            .join("theme")
    }

    #[test]
    fn test_stored_values() {
        assert_eq!(ThemeMode::from_stored("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored("light\n"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored("Light"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored(""), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored("solarized"), ThemeMode::Dark);
    }

    #[test]
    fn test_missing_file_persists_dark() {
        let path = temp_path("missing");
        let _ = fs_err::remove_file(&path);
        assert_eq!(read_theme(&path).unwrap(), ThemeMode::Dark);
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "dark");
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = temp_path("roundtrip");
        write_theme(&path, ThemeMode::Light).unwrap();
        assert_eq!(read_theme(&path).unwrap(), ThemeMode::Light);
        write_theme(&path, ThemeMode::Light.toggled()).unwrap();
        assert_eq!(read_theme(&path).unwrap(), ThemeMode::Dark);
    }

    #[test]
    fn test_serde_names() {
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_reduced_motion_sources() {
        let forced = MotionConfig { reduce: true };
        let free = MotionConfig::default();
        assert!(reduced_motion(&forced, true));
        assert!(reduced_motion(&free, false));
        assert!(!reduced_motion(&free, true));
    }
}
