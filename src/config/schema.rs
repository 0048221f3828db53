//! Configuration schema types for `pxd.toml`
//!
//! Defines the structure and validation rules for PixelDraw configuration.

use crate::color::{parse_color, Color};
use crate::compile::CompileConfig;
use crate::renderer::RenderOptions;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Largest accepted render scale
pub const MAX_SCALE: u32 = 64;

/// Pixel cap applied when pxd.toml does not set one
pub const DEFAULT_MAX_PIXELS: usize = 1_000_000;

/// Compiler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileSection {
    /// Drawing color before the first `color` statement
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Cap on emitted pixels
    #[serde(default = "default_max_pixels", skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<usize>,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            max_pixels: default_max_pixels(),
        }
    }
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_max_pixels() -> Option<usize> {
    Some(DEFAULT_MAX_PIXELS)
}

/// PNG / terminal rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSection {
    /// Screen pixels per grid cell
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Canvas fill before any pixel is drawn
    #[serde(default = "default_background")]
    pub background: String,
    /// Outline each painted cell in gray
    #[serde(default = "default_true")]
    pub grid: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            background: default_background(),
            grid: true,
        }
    }
}

fn default_scale() -> u32 {
    20
}

fn default_background() -> String {
    "white".to_string()
}

fn default_true() -> bool {
    true
}

/// Complete pxd.toml configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PxdConfig {
    #[serde(default)]
    pub compile: CompileSection,
    #[serde(default)]
    pub render: RenderSection,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxd.toml: '{}' {}", self.field, self.message)
    }
}

impl PxdConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.compile.default_color.parse::<Color>() {
            errors.push(ConfigValidationError {
                field: "compile.default_color".to_string(),
                message: format!("must be #RRGGBB or a color name ({})", e),
            });
        }

        if self.compile.max_pixels == Some(0) {
            errors.push(ConfigValidationError {
                field: "compile.max_pixels".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.render.scale == 0 || self.render.scale > MAX_SCALE {
            errors.push(ConfigValidationError {
                field: "render.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        if let Err(e) = parse_color(&self.render.background) {
            errors.push(ConfigValidationError {
                field: "render.background".to_string(),
                message: format!("is not a valid color ({})", e),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Compiler settings as the core's configuration value.
    ///
    /// An unparseable default color falls back to black; run
    /// [`PxdConfig::validate`] first to report it instead.
    pub fn compile_config(&self) -> CompileConfig {
        CompileConfig {
            default_color: self.compile.default_color.parse().unwrap_or_default(),
            max_pixels: self.compile.max_pixels,
        }
    }

    /// Rendering settings for the PNG backend.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scale: self.render.scale,
            background: self.background(),
            grid: self.render.grid,
        }
    }

    /// Background color, white if it cannot be parsed.
    pub fn background(&self) -> Rgba<u8> {
        parse_color(&self.render.background).unwrap_or(Rgba([255, 255, 255, 255]))
    }
}
