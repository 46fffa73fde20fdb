//! PNG preview rendering.
//!
//! The canvas is sized to hold the courtyard plus a small margin, with the
//! package centre in the middle of the image. Silkscreen and drawing lines
//! are stroked in teal with round caps, pads are filled in dark red.

use std::path::Path;

use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::{debug, warn};

use crate::ipc7351::packages::{LandPattern, QfpParameters};
use crate::ipc7351::primitives::{Circle, Line, Pad};
use crate::render::{render_all, write_output, RenderError, RenderResult, RenderTarget};

/// Blank border around the courtyard (mm).
pub const CANVAS_MARGIN: f64 = 0.1;

/// Image scale used when none is configured (pixels per mm).
pub const DEFAULT_PIXELS_PER_MM: u32 = 8;

/// Stroke colour for lines and circles.
const STROKE_RGB: (u8, u8, u8) = (0, 133, 133);

/// Fill colour for pads.
const PAD_RGB: (u8, u8, u8) = (133, 0, 0);

/// Returns the canvas size in pixels for the given parameters and scale.
#[must_use]
pub fn canvas_size(params: &QfpParameters, pixels_per_mm: u32) -> (u32, u32) {
    let extent = |length: f64| {
        let half = length / 2.0
            + params.margins.toe
            + params.margins.courtyard_excess
            + CANVAS_MARGIN;
        // Sizes are small and positive; truncation matches the image grid
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pixels = (half * 2.0 * f64::from(pixels_per_mm)) as u32;
        pixels
    };
    (extent(params.body_length_x), extent(params.body_length_y))
}

/// A pixmap that land pattern primitives can be drawn onto.
pub struct RasterCanvas {
    pixmap: Pixmap,
    transform: Transform,
}

impl RasterCanvas {
    /// Creates a transparent canvas for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CanvasSize`] if the canvas would be empty.
    pub fn new(params: &QfpParameters, pixels_per_mm: u32) -> RenderResult<Self> {
        let (width, height) = canvas_size(params, pixels_per_mm);
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::CanvasSize { width, height })?;

        // Origin at the image centre, millimetres scaled to pixels
        #[allow(clippy::cast_precision_loss)]
        let transform = Transform::from_row(
            pixels_per_mm as f32,
            0.0,
            0.0,
            pixels_per_mm as f32,
            width as f32 / 2.0,
            height as f32 / 2.0,
        );

        debug!(width, height, pixels_per_mm, "Created raster canvas");
        Ok(Self { pixmap, transform })
    }

    /// Returns the pixmap drawn so far.
    #[must_use]
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encodes the canvas as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::encode(e.to_string()))
    }

    fn paint(rgb: (u8, u8, u8)) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgb.0, rgb.1, rgb.2, 255);
        paint
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke(width: f64) -> Stroke {
        Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            ..Stroke::default()
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
impl RenderTarget for RasterCanvas {
    fn line(&mut self, line: &Line) {
        let mut builder = PathBuilder::new();
        builder.move_to(line.start.x as f32, line.start.y as f32);
        builder.line_to(line.end.x as f32, line.end.y as f32);
        let Some(path) = builder.finish() else {
            warn!(?line, "Skipping degenerate line");
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(STROKE_RGB),
            &Self::stroke(line.width),
            self.transform,
            None,
        );
    }

    fn circle(&mut self, circle: &Circle) {
        let Some(path) = PathBuilder::from_circle(
            circle.centre.x as f32,
            circle.centre.y as f32,
            circle.radius as f32,
        ) else {
            warn!(?circle, "Skipping degenerate circle");
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(STROKE_RGB),
            &Self::stroke(circle.width),
            self.transform,
            None,
        );
    }

    fn pad(&mut self, pad: &Pad) {
        let (w, h) = (pad.size_x as f32, pad.size_y as f32);
        let Some(rect) = Rect::from_xywh(-w / 2.0, -h / 2.0, w, h) else {
            warn!(number = pad.number, "Skipping degenerate pad");
            return;
        };
        let transform = self
            .transform
            .pre_concat(Transform::from_translate(
                pad.centre.x as f32,
                pad.centre.y as f32,
            ))
            .pre_concat(Transform::from_rotate(pad.rotation as f32));
        self.pixmap
            .fill_rect(rect, &Self::paint(PAD_RGB), transform, None);
    }
}

/// Renders a land pattern onto a fresh canvas.
///
/// # Errors
///
/// Returns an error if the canvas cannot be created.
pub fn render_canvas(pattern: &LandPattern, pixels_per_mm: u32) -> RenderResult<RasterCanvas> {
    let mut canvas = RasterCanvas::new(&pattern.parameters, pixels_per_mm)?;
    render_all(pattern, &mut canvas);
    Ok(canvas)
}

/// Renders a land pattern to PNG bytes.
///
/// # Errors
///
/// Returns an error if the canvas cannot be created or encoded.
pub fn to_png(pattern: &LandPattern, pixels_per_mm: u32) -> RenderResult<Vec<u8>> {
    render_canvas(pattern, pixels_per_mm)?.encode_png()
}

/// Renders a land pattern to a PNG file.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_png(pattern: &LandPattern, pixels_per_mm: u32, path: &Path) -> RenderResult<()> {
    write_output(path, &to_png(pattern, pixels_per_mm)?)
}
