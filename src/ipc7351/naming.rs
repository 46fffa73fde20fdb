//! IPC-7351 QFP naming convention: parsing and generation.
//!
//! # Name Format
//!
//! `QFP{PITCH}P{L1}X{L2}[X{HEIGHT}]-{PINS}[{DENSITY}]`
//!
//! All numeric fields are integers in 0.01mm units. `L1` and `L2` are the
//! toe-to-toe spans along X and Y, not the plastic body size. The height is
//! accepted but has no influence on the 2-D land pattern.
//!
//! Examples:
//! - `QFP50P900X900-48` - LQFP-48, 7x7mm body, 0.5mm pitch
//! - `QFP80P900X900X100-32` - TQFP-32, 0.8mm pitch, 1.00mm high
//! - `QFP40P3000X3000-256M` - 256 pins, 0.4mm pitch, most density

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::FootprintError;
use crate::ipc7351::density::DensityLevel;

static QFP_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^QFP(\d+)P(\d+)X(\d+)(?:X\d+)?-(\d+)([A-Za-z])?$")
        .expect("QFP name pattern is a valid regex")
});

/// Dimensions decoded from a QFP identifier, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QfpName {
    /// Centre-to-centre lead pitch (mm).
    pub pitch: f64,

    /// Toe-to-toe span along X (mm).
    pub body_length_x: f64,

    /// Toe-to-toe span along Y (mm).
    pub body_length_y: f64,

    /// Total number of leads.
    pub pin_count: u32,

    /// Trailing density letter, if the name carries one.
    ///
    /// Kept raw; it is checked against L/N/M when parameters are resolved.
    pub density_code: Option<char>,
}

impl QfpName {
    /// Returns the density level encoded in the name, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::InvalidDensity`] if the trailing letter is
    /// not one of L, N or M.
    pub fn density(&self) -> Result<Option<DensityLevel>, FootprintError> {
        self.density_code.map(DensityLevel::from_suffix).transpose()
    }
}

impl FromStr for QfpName {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_qfp_name(s).ok_or_else(|| FootprintError::malformed_name(s))
    }
}

/// Parses an IPC QFP name such as `QFP50P900X900-48`.
///
/// Returns `None` if the string does not follow the naming grammar. No range
/// checks are made on the decoded values.
///
/// # Examples
///
/// ```
/// use qfp_land_pattern::ipc7351::naming::parse_qfp_name;
///
/// let name = parse_qfp_name("QFP50P900X900-48").unwrap();
/// assert_eq!(name.pin_count, 48);
/// assert!((name.pitch - 0.5).abs() < 1e-9);
/// ```
#[must_use]
pub fn parse_qfp_name(name: &str) -> Option<QfpName> {
    let caps = QFP_NAME.captures(name)?;

    let pitch = hundredths_to_mm(caps.get(1)?.as_str())?;
    let body_length_x = hundredths_to_mm(caps.get(2)?.as_str())?;
    let body_length_y = hundredths_to_mm(caps.get(3)?.as_str())?;
    let pin_count = caps.get(4)?.as_str().parse().ok()?;
    let density_code = caps.get(5).and_then(|m| m.as_str().chars().next());

    Some(QfpName {
        pitch,
        body_length_x,
        body_length_y,
        pin_count,
        density_code,
    })
}

/// Generates the IPC name for a QFP component.
///
/// Format: `QFP{PITCH}P{L1}X{L2}[X{HEIGHT}]-{PINS}{DENSITY}`
///
/// # Examples
///
/// ```
/// use qfp_land_pattern::ipc7351::naming::qfp_name;
/// use qfp_land_pattern::ipc7351::density::DensityLevel;
///
/// let name = qfp_name(0.5, 9.0, 9.0, Some(1.0), 48, DensityLevel::Nominal);
/// assert_eq!(name, "QFP50P900X900X100-48N");
/// ```
#[must_use]
pub fn qfp_name(
    pitch: f64,
    body_length_x: f64,
    body_length_y: f64,
    height: Option<f64>,
    pin_count: u32,
    density: DensityLevel,
) -> String {
    let pitch_units = mm_to_hundredths(pitch);
    let x_units = mm_to_hundredths(body_length_x);
    let y_units = mm_to_hundredths(body_length_y);
    let height_part = height
        .map(|h| format!("X{}", mm_to_hundredths(h)))
        .unwrap_or_default();

    format!(
        "QFP{pitch_units}P{x_units}X{y_units}{height_part}-{pin_count}{density}",
        density = density.suffix()
    )
}

/// Converts a 0.01mm-unit field to millimetres.
fn hundredths_to_mm(field: &str) -> Option<f64> {
    let units: u32 = field.parse().ok()?;
    Some(f64::from(units) / 100.0)
}

/// Converts millimetres to IPC naming units (0.01mm = 1 unit).
///
/// Values are rounded to nearest integer.
fn mm_to_hundredths(mm: f64) -> u32 {
    // All package dimensions are positive and small, so cast is safe
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let units = (mm * 100.0).round() as u32;
    units
}
