//! Error types for qfp-land-pattern.
//!
//! Footprint errors carry the offending field so the caller can fix the
//! input; nothing here is retried or recovered from, since the computation
//! is deterministic.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for land pattern operations.
pub type FootprintResult<T> = Result<T, FootprintError>;

/// Errors raised while resolving package parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
    /// The package identifier does not match the QFP naming grammar.
    #[error("malformed package name '{name}': expected QFP<pitch>P<L1>X<L2>[X<height>]-<pins>[L|N|M]")]
    MalformedName {
        /// The identifier as given.
        name: String,
    },

    /// Density level outside Least/Nominal/Most.
    #[error("invalid density '{value}' (need L, N or M)")]
    InvalidDensity {
        /// The rejected density code.
        value: String,
    },

    /// Only square packages are supported.
    #[error("unsupported package shape: body is {length_x:.2} x {length_y:.2} mm, only square packages are supported")]
    NonSquareBody {
        /// Toe-to-toe span along X (mm).
        length_x: f64,
        /// Toe-to-toe span along Y (mm).
        length_y: f64,
    },

    /// Pins must be spread evenly over four sides.
    #[error("unsupported pin count {pin_count}: must be divisible by 4")]
    PinCountNotDivisible {
        /// The rejected pin count.
        pin_count: u32,
    },

    /// A numeric parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of what's wrong.
        message: String,
    },
}

impl FootprintError {
    /// Creates a malformed name error.
    pub fn malformed_name(name: impl Into<String>) -> Self {
        Self::MalformedName { name: name.into() }
    }

    /// Creates an invalid density error.
    pub fn invalid_density(value: impl Into<String>) -> Self {
        Self::InvalidDensity {
            value: value.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_name_display() {
        let err = FootprintError::malformed_name("XYZ123");
        let msg = err.to_string();
        assert!(msg.contains("XYZ123"));
        assert!(msg.contains("QFP<pitch>"));
    }

    #[test]
    fn shape_errors_name_the_field() {
        let err = FootprintError::PinCountNotDivisible { pin_count: 50 };
        assert_eq!(
            err.to_string(),
            "unsupported pin count 50: must be divisible by 4"
        );

        let err = FootprintError::NonSquareBody {
            length_x: 9.0,
            length_y: 7.0,
        };
        assert!(err.to_string().contains("9.00 x 7.00"));
    }

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }
}
