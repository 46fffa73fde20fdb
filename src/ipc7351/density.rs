//! IPC-7351 density levels and land margins for gull-wing QFP leads.
//!
//! The standard defines three density levels:
//!
//! - **Most (M)**: Maximum land protrusion, best solder fillet, for high reliability
//! - **Nominal (N)**: Standard density, recommended for most applications
//! - **Least (L)**: Minimum land protrusion, for high-density boards
//!
//! The side margin additionally depends on the lead pitch: fine-pitch
//! parts (pitch at or below [`FINE_PITCH_THRESHOLD`]) get narrower pads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, FootprintResult};

/// Pitch (mm) above which the coarse-pitch side margins apply.
pub const FINE_PITCH_THRESHOLD: f64 = 0.625;

/// Density level per IPC-7351.
///
/// Controls the land margins which determine pad dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityLevel {
    /// Least (L) - Minimum land protrusion for high-density boards.
    Least,

    /// Nominal (N) - Standard density, recommended for most applications.
    #[default]
    Nominal,

    /// Most (M) - Maximum land protrusion for best solder fillet.
    Most,
}

impl DensityLevel {
    /// Parses a density level from a string.
    ///
    /// Accepts: "M", "Most", "N", "Nominal", "L", "Least" (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "M" | "MOST" => Some(Self::Most),
            "N" | "NOMINAL" => Some(Self::Nominal),
            "L" | "LEAST" => Some(Self::Least),
            _ => None,
        }
    }

    /// Maps the single-letter suffix of an IPC name to a density level.
    ///
    /// Only the upper-case letters used in IPC names are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::InvalidDensity`] for any other character.
    pub fn from_suffix(code: char) -> FootprintResult<Self> {
        match code {
            'M' => Ok(Self::Most),
            'N' => Ok(Self::Nominal),
            'L' => Ok(Self::Least),
            other => Err(FootprintError::invalid_density(other.to_string())),
        }
    }

    /// Returns the suffix character for IPC names.
    #[must_use]
    pub const fn suffix(&self) -> char {
        match self {
            Self::Most => 'M',
            Self::Nominal => 'N',
            Self::Least => 'L',
        }
    }
}

impl FromStr for DensityLevel {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| FootprintError::invalid_density(s))
    }
}

impl fmt::Display for DensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Land margins (J-values) and courtyard excess for one density level.
///
/// These values determine how much the pad extends beyond the component
/// lead to achieve proper solder fillet formation.
///
/// All values in millimetres. Side may be negative on fine-pitch parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandMargins {
    /// Toe margin (Jt) - extension beyond the outer edge of the lead.
    pub toe: f64,

    /// Heel margin (Jh) - extension beyond the inner edge of the lead.
    pub heel: f64,

    /// Side margin (Js) - added to the lead width to give the pad width.
    pub side: f64,

    /// Clearance between the outermost pad edge and the courtyard line.
    pub courtyard_excess: f64,
}

impl LandMargins {
    /// Creates new land margins.
    #[must_use]
    pub const fn new(toe: f64, heel: f64, side: f64, courtyard_excess: f64) -> Self {
        Self {
            toe,
            heel,
            side,
            courtyard_excess,
        }
    }

    /// Looks up the gull-wing QFP margins for a density level and pitch.
    #[must_use]
    pub fn for_qfp(density: DensityLevel, pitch: f64) -> Self {
        let coarse = pitch > FINE_PITCH_THRESHOLD;
        match density {
            DensityLevel::Least => Self::new(0.15, 0.25, if coarse { 0.01 } else { -0.04 }, 0.10),
            DensityLevel::Nominal => {
                Self::new(0.35, 0.35, if coarse { 0.03 } else { -0.02 }, 0.25)
            }
            DensityLevel::Most => Self::new(0.55, 0.45, if coarse { 0.05 } else { 0.01 }, 0.50),
        }
    }

    /// Replaces the toe margin when an override is given.
    ///
    /// Heel, side and courtyard values are left as looked up.
    #[must_use]
    pub fn with_toe_override(self, toe: Option<f64>) -> Self {
        match toe {
            Some(toe) => Self { toe, ..self },
            None => self,
        }
    }
}
