//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ipc7351::density::DensityLevel;
use crate::ipc7351::packages::{DrawOptions, ParameterOverrides};
use crate::render::raster::DEFAULT_PIXELS_PER_MM;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// IPC-7351 defaults.
    #[serde(default)]
    pub ipc: IpcConfig,

    /// Style settings.
    #[serde(default)]
    pub style: StyleConfig,

    /// PNG output settings.
    #[serde(default)]
    pub image: ImageConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.density()?;

        for (name, value) in [
            ("ipc.terminal_length", self.ipc.terminal_length),
            ("ipc.terminal_width", self.ipc.terminal_width),
            ("style.silkscreen_line_width", self.style.silkscreen_line_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must be a positive number of millimetres"),
                });
            }
        }

        if self.image.pixels_per_mm == 0 {
            return Err(ConfigError::ValidationError {
                message: "image.pixels_per_mm must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Default density level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the level is not one of
    /// M, N or L.
    pub fn density(&self) -> Result<DensityLevel, ConfigError> {
        DensityLevel::from_str_loose(&self.ipc.default_density).ok_or_else(|| {
            ConfigError::ValidationError {
                message: format!(
                    "Invalid IPC density level '{}'. Must be one of: M, N, L",
                    self.ipc.default_density
                ),
            }
        })
    }

    /// Parameter overrides built from the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured density level is unknown.
    pub fn overrides(&self) -> Result<ParameterOverrides, ConfigError> {
        Ok(ParameterOverrides {
            terminal_length: self.ipc.terminal_length,
            terminal_width: self.ipc.terminal_width,
            density: self.density()?,
            toe_override: None,
            draw: DrawOptions {
                outline: self.style.draw_outline,
                courtyard: self.style.draw_courtyard,
                terminals: self.style.draw_terminals,
            },
            line_width: self.style.silkscreen_line_width,
        })
    }
}

/// IPC-7351 configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpcConfig {
    /// Default density level: "M" (Most), "N" (Nominal), "L" (Least).
    /// Used when the package name has no density suffix. Default: "N"
    #[serde(default = "default_density")]
    pub default_density: String,

    /// Nominal heel-to-toe terminal length in mm.
    #[serde(default = "default_terminal_length")]
    pub terminal_length: f64,

    /// Maximum terminal width in mm.
    #[serde(default = "default_terminal_width")]
    pub terminal_width: f64,
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self {
            default_density: default_density(),
            terminal_length: default_terminal_length(),
            terminal_width: default_terminal_width(),
        }
    }
}

fn default_density() -> String {
    "N".to_string()
}

const fn default_terminal_length() -> f64 {
    0.6
}

const fn default_terminal_width() -> f64 {
    0.27
}

/// Style configuration for generated footprints.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Silkscreen line width in mm.
    #[serde(default = "default_silkscreen_width")]
    pub silkscreen_line_width: f64,

    /// Draw the placement guide and orientation dot by default.
    #[serde(default)]
    pub draw_outline: bool,

    /// Draw the courtyard by default.
    #[serde(default)]
    pub draw_courtyard: bool,

    /// Draw terminal outlines by default.
    #[serde(default)]
    pub draw_terminals: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            silkscreen_line_width: default_silkscreen_width(),
            draw_outline: false,
            draw_courtyard: false,
            draw_terminals: false,
        }
    }
}

const fn default_silkscreen_width() -> f64 {
    0.15
}

/// PNG preview configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Image scale in pixels per mm.
    #[serde(default = "default_pixels_per_mm")]
    pub pixels_per_mm: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            pixels_per_mm: default_pixels_per_mm(),
        }
    }
}

const fn default_pixels_per_mm() -> u32 {
    DEFAULT_PIXELS_PER_MM
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
