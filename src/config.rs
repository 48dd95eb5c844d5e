use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use glide::Ease;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

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
pub enum Category {
    #[default]
    All,
    #[strum(serialize = "frontend", serialize = "front")]
    Frontend,
    #[strum(serialize = "backend", serialize = "back")]
    Backend,
    Tools,
    Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AboutCardConfig {
    pub title: String,
    pub preview: String,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SkillConfig {
    pub name: String,
    #[serde(default)]
    pub level: u8,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Degrees of rotation per dragged pixel.
    pub sensitivity: f64,
    pub settle_ms: u64,
    pub ease: Ease,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.18,
            settle_ms: 1200,
            ease: Ease::Power3Out,
        }
    }
}

impl CarouselConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Force reduced motion regardless of the desktop setting.
    pub reduce: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeroConfig {
    pub greeting: String,
    pub name: String,
    pub tagline: String,
    pub image: Option<PathBuf>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi, I'm".to_string(),
            name: "Showcase".to_string(),
            tagline: String::new(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    #[serde(default)]
    pub about: Vec<AboutCardConfig>,
    #[serde(default)]
    pub skills: Vec<SkillConfig>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "showcase", "showcase")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Relative asset paths in the config are relative to the config directory.
pub fn resolve_asset(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    get_config_path()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join(path)))
        .unwrap_or_else(|| path.to_path_buf())
}

fn builder_for(config_path: &Path) -> config::ConfigBuilder<config::builder::DefaultState> {
    let builder = config::Config::builder();
    let builder = if config_path.exists() {
        builder.add_source(config::File::from(config_path))
    } else {
        builder.add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
    };
    builder.add_source(
        config::Environment::with_prefix("SHOWCASE")
            .separator("__")
            .try_parsing(true),
    )
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    let s = builder_for(&config_path).build()?;
    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;
    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using built-in defaults: {}", e);
            parse_config(DEFAULT_CONFIG).unwrap_or_default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Editors often emit several events per save; they are folded into one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(150);

/// True when `event` changed the config file itself.
pub fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create {}: {}", config_dir.display(), e);
        return;
    }

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create config watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", config_dir.display(), e);
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = events_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                // Swallow the burst that follows a single save.
                while let Ok(Ok(_)) =
                    tokio::time::timeout(RELOAD_DEBOUNCE, events_rx.recv()).await
                {}
                log::info!("{} changed, reloading", config_path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Config watch error: {}", e),
        }
    }
}
