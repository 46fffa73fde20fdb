//! Package parameters and the land pattern produced from them.
//!
//! A [`QfpParameters`] record is resolved once from the IPC name and the
//! caller's overrides, then handed by reference to a [`PackageCalculator`].

pub mod qfp;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FootprintError, FootprintResult};
use crate::ipc7351::density::{DensityLevel, LandMargins};
use crate::ipc7351::naming::QfpName;
use crate::ipc7351::primitives::{Pad, Primitive, DEFAULT_LINE_WIDTH};

/// Optional drawing layers; all off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Placement guide and orientation dot inside the pads.
    pub outline: bool,
    /// Courtyard corners and orientation mark outside the pads.
    pub courtyard: bool,
    /// Terminal outlines on the drawing layer.
    pub terminals: bool,
}

/// Caller-supplied values that the package name does not encode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    /// Nominal heel-to-toe lead length (mm).
    pub terminal_length: f64,
    /// Maximum lead width (mm).
    pub terminal_width: f64,
    /// Density used when the name has no density suffix.
    pub density: DensityLevel,
    /// Replaces the table toe margin when set (mm).
    pub toe_override: Option<f64>,
    /// Optional drawing layers.
    pub draw: DrawOptions,
    /// Silkscreen stroke width (mm).
    pub line_width: f64,
}

impl Default for ParameterOverrides {
    fn default() -> Self {
        Self {
            terminal_length: 0.6,
            terminal_width: 0.27,
            density: DensityLevel::Nominal,
            toe_override: None,
            draw: DrawOptions::default(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Fully resolved description of one QFP footprint.
///
/// All measurements are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QfpParameters {
    /// Centre-to-centre lead pitch.
    pub pitch: f64,
    /// Toe-to-toe span along X.
    pub body_length_x: f64,
    /// Toe-to-toe span along Y.
    pub body_length_y: f64,
    /// Total pin count, a multiple of four.
    pub pin_count: u32,
    /// Density level the margins were taken from.
    pub density: DensityLevel,
    /// Land margins, with any toe override applied.
    pub margins: LandMargins,
    /// Nominal heel-to-toe lead length.
    pub terminal_length: f64,
    /// Maximum lead width.
    pub terminal_width: f64,
    /// Optional drawing layers.
    pub draw: DrawOptions,
    /// Silkscreen stroke width.
    pub line_width: f64,
}

impl QfpParameters {
    /// Resolves parameters from an IPC name and caller overrides.
    ///
    /// A density suffix in the name wins over `overrides.density`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is malformed, carries an unknown density
    /// letter, or describes a package the calculator cannot lay out.
    pub fn resolve(name: &str, overrides: &ParameterOverrides) -> FootprintResult<Self> {
        let parsed: QfpName = name.parse()?;
        Self::from_name(&parsed, overrides)
    }

    /// Resolves parameters from an already parsed name.
    ///
    /// # Errors
    ///
    /// See [`QfpParameters::resolve`].
    pub fn from_name(name: &QfpName, overrides: &ParameterOverrides) -> FootprintResult<Self> {
        let density = name.density()?.unwrap_or(overrides.density);
        let margins =
            LandMargins::for_qfp(density, name.pitch).with_toe_override(overrides.toe_override);

        let params = Self {
            pitch: name.pitch,
            body_length_x: name.body_length_x,
            body_length_y: name.body_length_y,
            pin_count: name.pin_count,
            density,
            margins,
            terminal_length: overrides.terminal_length,
            terminal_width: overrides.terminal_width,
            draw: overrides.draw,
            line_width: overrides.line_width,
        };
        params.validate()?;

        debug!(
            pitch = params.pitch,
            body = params.body_length_x,
            pins = params.pin_count,
            density = %params.density,
            toe = params.margins.toe,
            heel = params.margins.heel,
            side = params.margins.side,
            "Resolved QFP parameters"
        );

        Ok(params)
    }

    /// Checks that the package can be laid out as a square QFP.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> FootprintResult<()> {
        if self.pin_count == 0 {
            return Err(FootprintError::invalid_parameter(
                "pin_count",
                "must be greater than zero",
            ));
        }
        if self.pin_count % 4 != 0 {
            return Err(FootprintError::PinCountNotDivisible {
                pin_count: self.pin_count,
            });
        }
        if (self.body_length_x - self.body_length_y).abs() > f64::EPSILON {
            return Err(FootprintError::NonSquareBody {
                length_x: self.body_length_x,
                length_y: self.body_length_y,
            });
        }
        for (name, value) in [
            ("pitch", self.pitch),
            ("body_length", self.body_length_x),
            ("terminal_length", self.terminal_length),
            ("terminal_width", self.terminal_width),
            ("line_width", self.line_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FootprintError::invalid_parameter(
                    name,
                    format!("must be a positive number of millimetres, got {value}"),
                ));
            }
        }
        for (name, value) in [
            ("toe_override", self.margins.toe),
            ("heel_margin", self.margins.heel),
            ("side_margin", self.margins.side),
            ("courtyard_excess", self.margins.courtyard_excess),
        ] {
            if !value.is_finite() {
                return Err(FootprintError::invalid_parameter(
                    name,
                    format!("must be a finite number of millimetres, got {value}"),
                ));
            }
        }

        let pad_length = self.margins.toe + self.terminal_length + self.margins.heel;
        if pad_length <= 0.0 {
            return Err(FootprintError::invalid_parameter(
                "toe_override",
                format!("leaves a pad length of {pad_length:.3} mm"),
            ));
        }
        let pad_width = self.terminal_width + self.margins.side;
        if pad_width <= 0.0 {
            return Err(FootprintError::invalid_parameter(
                "terminal_width",
                format!("leaves a pad width of {pad_width:.3} mm"),
            ));
        }
        Ok(())
    }

    /// Number of pins on each of the four sides.
    #[must_use]
    pub const fn pins_per_side(&self) -> u32 {
        self.pin_count / 4
    }

    /// Toe-to-toe span the geometry is built from.
    #[must_use]
    pub const fn body_length(&self) -> f64 {
        self.body_length_x
    }

    /// Summary lines as `(label, value)` pairs, in millimetres.
    #[must_use]
    pub fn summary(&self) -> [(&'static str, f64); 8] {
        [
            ("pitch", self.pitch),
            ("body_x", self.body_length_x),
            ("body_y", self.body_length_y),
            ("toe", self.margins.toe),
            ("heel", self.margins.heel),
            ("side", self.margins.side),
            ("term_length", self.terminal_length),
            ("term_width", self.terminal_width),
        ]
    }
}

/// Calculated land pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandPattern {
    /// Footprint name, as given by the caller.
    pub name: String,

    /// Parameters the pattern was built from.
    pub parameters: QfpParameters,

    /// Primitives in drawing order: outline, courtyard, terminals, pads.
    pub primitives: Vec<Primitive>,
}

impl LandPattern {
    /// Iterates over the pads in pin order.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.primitives.iter().filter_map(Primitive::as_pad)
    }

    /// Number of pads.
    #[must_use]
    pub fn pad_count(&self) -> usize {
        self.pads().count()
    }

    /// Looks up a pad by pin number.
    #[must_use]
    pub fn pad(&self, number: u32) -> Option<&Pad> {
        self.pads().find(|pad| pad.number == number)
    }
}

/// Trait for package calculators.
pub trait PackageCalculator {
    /// Calculates the land pattern for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails [`QfpParameters::validate`].
    fn calculate(&self, name: &str, params: &QfpParameters) -> FootprintResult<LandPattern>;
}
