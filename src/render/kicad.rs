//! `KiCad` footprint (`.kicad_mod`) writer.
//!
//! Produces the legacy S-expression module format with a commented header
//! recording how the footprint was generated. Coordinates are millimetres
//! with Y pointing down.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::ipc7351::packages::{LandPattern, QfpParameters};
use crate::ipc7351::primitives::{Circle, Layer, Line, Pad};
use crate::render::{render_all, write_output, RenderResult, RenderTarget};

/// Millimetres per mil.
const MM_PER_MIL: f64 = 0.0254;

/// How and when a footprint file was generated.
#[derive(Debug, Clone)]
pub struct Provenance {
    /// Generation time.
    pub generated_at: DateTime<Local>,
    /// Command line that produced the file.
    pub command_line: String,
}

impl Provenance {
    /// Records the current time and the given command line.
    #[must_use]
    pub fn now(command_line: impl Into<String>) -> Self {
        Self {
            generated_at: Local::now(),
            command_line: command_line.into(),
        }
    }
}

/// Accumulates `KiCad` module text.
#[derive(Debug, Default)]
pub struct KicadModWriter {
    out: String,
}

impl KicadModWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { out: String::new() }
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    fn header(&mut self, provenance: &Provenance, params: &QfpParameters) {
        let _ = writeln!(
            self.out,
            "# This footprint was generated on {} using the command",
            provenance.generated_at.format("%a %b %e %H:%M:%S %Y")
        );
        let _ = writeln!(self.out, "# {}", provenance.command_line);
        self.out.push_str("# Footprint parameters:\n");
        let _ = writeln!(self.out, "#{:>12}: {:>8}", "pins", params.pin_count);
        for (label, value) in params.summary() {
            let _ = writeln!(
                self.out,
                "#{label:>12}: {value:>8.2} mm  ({:>8.1} mil)",
                value / MM_PER_MIL
            );
        }
    }

    fn open_module(&mut self, name: &str) {
        let silk = Layer::FrontSilkscreen.kicad_name();
        let _ = writeln!(self.out, "(module {name} (layer {})", Layer::FrontCopper.kicad_name());
        self.out.push_str("  (at 0 0)\n");
        let _ = writeln!(
            self.out,
            "  (fp_text reference {name} (at 0 -1) (layer {silk})"
        );
        self.out
            .push_str("    (effects (font (size 1.5 1.5) (thickness 0.15))))\n");
        let _ = writeln!(self.out, "  (fp_text value VAL** (at 0 1) (layer {silk}) hide");
        self.out
            .push_str("    (effects (font (size 1.5 1.5) (thickness 0.15))))\n");
    }
}

impl RenderTarget for KicadModWriter {
    fn line(&mut self, line: &Line) {
        let _ = writeln!(
            self.out,
            "  (fp_line (start {:.3} {:.3}) (end {:.3} {:.3}) (layer {}) (width {:.2}))",
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y,
            line.layer.kicad_name(),
            line.width
        );
    }

    fn circle(&mut self, circle: &Circle) {
        let _ = writeln!(
            self.out,
            "  (fp_circle (center {:.2} {:.2}) (end {:.2} {:.2}) (layer {}) (width {:.2}))",
            circle.centre.x,
            circle.centre.y,
            circle.centre.x + circle.radius,
            circle.centre.y,
            circle.layer.kicad_name(),
            circle.width
        );
    }

    fn pad(&mut self, pad: &Pad) {
        let layers = pad.layers().map(|layer| layer.kicad_name()).join(" ");
        let _ = writeln!(
            self.out,
            "  (pad {} smd rect (at {:.2} {:.2} {:.0}) (size {:.2} {:.2}) (layers {layers}))",
            pad.number, pad.centre.x, pad.centre.y, pad.rotation, pad.size_x, pad.size_y
        );
    }
}

/// Renders a land pattern as `KiCad` module text.
///
/// The provenance header is omitted when `provenance` is `None`, which keeps
/// the output byte-for-byte reproducible.
#[must_use]
pub fn to_kicad_mod(pattern: &LandPattern, provenance: Option<&Provenance>) -> String {
    let mut writer = KicadModWriter::new();
    if let Some(provenance) = provenance {
        writer.header(provenance, &pattern.parameters);
    }
    writer.open_module(&pattern.name);
    render_all(pattern, &mut writer);
    writer.out.push_str(")\n");
    writer.into_string()
}

/// Renders a land pattern and writes it to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_kicad_mod(
    pattern: &LandPattern,
    provenance: Option<&Provenance>,
    path: &Path,
) -> RenderResult<()> {
    write_output(path, to_kicad_mod(pattern, provenance).as_bytes())
}
