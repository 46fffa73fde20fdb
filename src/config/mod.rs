//! Configuration file loading and parsing.
//!
//! The configuration file is optional. It supplies defaults for values the
//! package name does not encode (terminal size, density, drawing options,
//! image scale) and the log level. Command-line options take precedence.
//!
//! # Configuration File Locations
//!
//! 1. Path specified via `--config` CLI flag (must exist)
//! 2. Default location, used only if present:
//!    - **Linux/macOS:** `~/.qfp-land-pattern/config.json`
//!    - **Windows:** `%USERPROFILE%\.qfp-land-pattern\config.json`

mod settings;

pub use settings::{Config, ImageConfig, IpcConfig, LoggingConfig, StyleConfig};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.qfp-land-pattern/`
/// - **Windows:** `%USERPROFILE%\.qfp-land-pattern\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".qfp-land-pattern"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Required fields are missing or invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path().ok_or_else(|| ConfigError::NotFound {
            path: PathBuf::from("<default config path>"),
        })?,
    };

    if !config_path.exists() {
        return Err(ConfigError::NotFound { path: config_path });
    }

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Loads the configuration, falling back to built-in defaults.
///
/// An explicit `path` must exist. Without one, the default location is read
/// if a file is there; otherwise [`Config::default`] is returned.
///
/// # Errors
///
/// Returns an error if a configuration file is found but cannot be loaded.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    if path.is_some() {
        return load_config(path);
    }

    match default_config_path() {
        Some(default_path) if default_path.exists() => load_config(Some(&default_path)),
        _ => {
            debug!("No configuration file, using built-in defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_dir_exists() {
        assert!(default_config_dir().is_some());
    }

    #[test]
    fn default_config_path_exists() {
        let path = default_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = Path::new("/definitely/not/here/config.json");
        let err = load_config_or_default(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "ipc": { "default_density": "L" }, "image": { "pixels_per_mm": 12 } }"#,
        )
        .unwrap();

        let config = load_config_or_default(Some(&path)).unwrap();
        assert_eq!(config.density().unwrap(), crate::ipc7351::DensityLevel::Least);
        assert_eq!(config.image.pixels_per_mm, 12);
    }

    #[test]
    fn malformed_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
