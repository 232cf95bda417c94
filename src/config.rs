use crate::gui::anim::Easing;
use crate::gui::theme::{ColorPair, HexColor};
use crate::sys::sound::SoundId;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSecondsWithFrac, serde_as};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelStyle {
    pub inner_circle_radius: f64,
    pub outer_circle_radius: f64,
    pub active_arc_width: f64,
    pub hovered: ColorPair,
    pub unhovered: ColorPair,
    pub active_arc: ColorPair,
    pub inactive_arc: ColorPair,
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            inner_circle_radius: 150.0,
            outer_circle_radius: 300.0,
            active_arc_width: 7.0,
            hovered: ColorPair::new(
                HexColor::rgba(0.58, 0.58, 0.58, 0.39),
                HexColor::rgba(0.17, 0.17, 0.17, 0.39),
            ),
            unhovered: ColorPair::new(
                HexColor::rgba(0.0, 0.0, 0.0, 0.2),
                HexColor::rgba(0.0, 0.0, 0.0, 0.35),
            ),
            active_arc: ColorPair::new(
                HexColor::rgba(0.96, 0.84, 0.49, 0.9),
                HexColor::rgba(0.78, 0.62, 0.31, 0.9),
            ),
            inactive_arc: ColorPair::new(
                HexColor::rgba(0.2, 0.2, 0.2, 0.4),
                HexColor::rgba(0.2, 0.2, 0.2, 0.4),
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightText {
    pub offset_x: f64,
    pub offset_y: f64,
    pub size: f64,
    pub color: HexColor,
}

impl Default for HighlightText {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 70.0,
            size: 20.0,
            color: HexColor::rgba(1.0, 1.0, 1.0, 1.0),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Hover growth of the outer radius, as a fraction of the ring thickness.
    pub expand_scale: f64,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub expand_time: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub retract_time: Duration,
    /// Radius offset applied on activation. Negative pulls the arc inwards.
    pub bounce_offset: f64,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub bounce_time: Duration,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            expand_scale: 0.1,
            expand_time: Duration::from_millis(150),
            retract_time: Duration::from_millis(100),
            bounce_offset: -10.0,
            bounce_time: Duration::from_millis(100),
            easing: Easing::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundConfig {
    pub item_switch: SoundId,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            item_switch: SoundId::new("UIFavorite"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub wheel: WheelStyle,
    pub highlight: HighlightText,
    pub animation: AnimationConfig,
    pub sound: SoundConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "wheeler", "wheeler").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    load_layered(path, environment())
}

/// `WHEELER_<SECTION>__<KEY>`, e.g. `WHEELER_WHEEL__OUTER_CIRCLE_RADIUS=320`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("WHEELER")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_layered(path: &std::path::Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
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
