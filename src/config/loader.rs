//! Configuration loading and discovery for `pxd.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxdConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up on disk
pub const CONFIG_FILE_NAME: &str = "pxd.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxd.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override render scale
    pub scale: Option<u32>,
    /// Override cell outlines
    pub grid: Option<bool>,
    /// Override background color
    pub background: Option<String>,
    /// Override starting color
    pub default_color: Option<String>,
    /// Override pixel cap
    pub max_pixels: Option<usize>,
}

/// Find pxd.toml by walking up from the current working directory,
/// falling back to `XDG_CONFIG_HOME/pixeldraw/pxd.toml`.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxd.toml in the XDG config directory.
///
/// Checks XDG_CONFIG_HOME/pixeldraw/pxd.toml or ~/.config/pixeldraw/pxd.toml
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixeldraw").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find pxd.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxd.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()`; with no file found, returns the defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/pxd.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PxdConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(PxdConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PxdConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let config: PxdConfig = toml::from_str(&contents)?;
    check(config)
}

fn check(config: PxdConfig) -> Result<PxdConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration and re-validate it.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(
    mut config: PxdConfig,
    overrides: &CliOverrides,
) -> Result<PxdConfig, ConfigError> {
    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }
    if let Some(grid) = overrides.grid {
        config.render.grid = grid;
    }
    if let Some(ref background) = overrides.background {
        config.render.background = background.clone();
    }
    if let Some(ref color) = overrides.default_color {
        config.compile.default_color = color.clone();
    }
    if let Some(max_pixels) = overrides.max_pixels {
        config.compile.max_pixels = Some(max_pixels);
    }

    check(config)
}
