//! Drawable footprint primitives and the rotation used to place them.
//!
//! All coordinates are millimetres relative to the package centre, with the
//! Y axis pointing down as on a PCB layout screen.

use serde::{Deserialize, Serialize};

use crate::render::RenderTarget;

/// Silkscreen stroke width used when none is configured (mm).
pub const DEFAULT_LINE_WIDTH: f64 = 0.15;

/// Stroke width of terminal outlines on the drawing layer (mm).
pub const TERMINAL_LINE_WIDTH: f64 = 0.02;

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates the point about the origin by `angle` degrees.
    ///
    /// Positive angles turn counter-clockwise as seen on a board, which
    /// means clockwise in the stored coordinates since Y points down.
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self {
            x: cos.mul_add(self.x, sin * self.y),
            y: cos.mul_add(self.y, -(sin * self.x)),
        }
    }
}

#[cfg(test)]
impl Point {
    /// Euclidean distance to another point.
    pub(crate) fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Footprint layers used by the generated primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Front silkscreen (outline, courtyard, orientation marks).
    #[default]
    FrontSilkscreen,
    /// User drawing layer, not manufactured (terminal outlines).
    UserDrawing,
    /// Front copper.
    FrontCopper,
    /// Front solder paste.
    FrontPaste,
    /// Front solder mask.
    FrontMask,
}

impl Layer {
    /// Layers an SMD pad occupies.
    pub const SMD_PAD: [Self; 3] = [Self::FrontCopper, Self::FrontPaste, Self::FrontMask];

    /// Returns the `KiCad` layer name.
    #[must_use]
    pub const fn kicad_name(&self) -> &'static str {
        match self {
            Self::FrontSilkscreen => "F.SilkS",
            Self::UserDrawing => "Dwgs.User",
            Self::FrontCopper => "F.Cu",
            Self::FrontPaste => "F.Paste",
            Self::FrontMask => "F.Mask",
        }
    }
}

/// A straight stroked segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Layer the line is drawn on.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl Line {
    /// Creates a silkscreen line.
    #[must_use]
    pub const fn silkscreen(start: Point, end: Point, width: f64) -> Self {
        Self {
            start,
            end,
            layer: Layer::FrontSilkscreen,
            width,
        }
    }

    /// Creates a thin line on the user drawing layer.
    #[must_use]
    pub const fn drawing(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            layer: Layer::UserDrawing,
            width: TERMINAL_LINE_WIDTH,
        }
    }
}

#[cfg(test)]
impl Line {
    /// Length of the segment.
    pub(crate) fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}

/// A stroked circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre point.
    pub centre: Point,
    /// Radius (mm).
    pub radius: f64,
    /// Layer the circle is drawn on.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl Circle {
    /// Creates a silkscreen circle.
    #[must_use]
    pub const fn silkscreen(centre: Point, radius: f64, width: f64) -> Self {
        Self {
            centre,
            radius,
            layer: Layer::FrontSilkscreen,
            width,
        }
    }
}

/// A rectangular SMD pad on copper, paste and mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    /// Pin number, starting at 1.
    pub number: u32,
    /// Pad centre.
    pub centre: Point,
    /// Rotation in degrees, kept in `[0, 360)`.
    pub rotation: f64,
    /// Size along the pad's local X axis (heel to toe, mm).
    pub size_x: f64,
    /// Size along the pad's local Y axis (across the lead, mm).
    pub size_y: f64,
}

impl Pad {
    /// Creates an unrotated pad.
    #[must_use]
    pub const fn new(number: u32, centre: Point, size_x: f64, size_y: f64) -> Self {
        Self {
            number,
            centre,
            rotation: 0.0,
            size_x,
            size_y,
        }
    }

    /// Layers the pad occupies.
    #[must_use]
    pub const fn layers(&self) -> [Layer; 3] {
        Layer::SMD_PAD
    }
}

/// Any drawable element of a land pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Stroked segment.
    Line(Line),
    /// Stroked circle.
    Circle(Circle),
    /// Copper pad.
    Pad(Pad),
}

impl Primitive {
    /// Rotates the primitive about the package origin by `angle` degrees.
    ///
    /// Pads also accumulate the angle into their own rotation.
    pub fn rotate(&mut self, angle: f64) {
        match self {
            Self::Line(line) => {
                line.start = line.start.rotate(angle);
                line.end = line.end.rotate(angle);
            }
            Self::Circle(circle) => {
                circle.centre = circle.centre.rotate(angle);
            }
            Self::Pad(pad) => {
                pad.centre = pad.centre.rotate(angle);
                pad.rotation = (pad.rotation + angle).rem_euclid(360.0);
            }
        }
    }

    /// Hands the primitive to a renderer.
    pub fn render_to<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        match self {
            Self::Line(line) => target.line(line),
            Self::Circle(circle) => target.circle(circle),
            Self::Pad(pad) => target.pad(pad),
        }
    }

    /// Returns the pad if this primitive is one.
    #[must_use]
    pub const fn as_pad(&self) -> Option<&Pad> {
        match self {
            Self::Pad(pad) => Some(pad),
            _ => None,
        }
    }

    /// Returns the layer the primitive is drawn on (copper for pads).
    #[must_use]
    pub const fn layer(&self) -> Layer {
        match self {
            Self::Line(line) => line.layer,
            Self::Circle(circle) => circle.layer,
            Self::Pad(_) => Layer::FrontCopper,
        }
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Pad> for Primitive {
    fn from(pad: Pad) -> Self {
        Self::Pad(pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        a.distance_to(b) < TOLERANCE
    }

    #[test]
    fn rotate_zero_is_identity() {
        let p = Point::new(1.25, -3.5);
        assert_eq!(p.rotate(0.0), p);
    }

    #[test]
    fn full_turn_returns_original() {
        let p = Point::new(4.2, 2.75);
        assert!(close(p.rotate(360.0), p));

        let mut q = p;
        for _ in 0..4 {
            q = q.rotate(90.0);
        }
        assert!(close(q, p));
    }

    #[test]
    fn quarter_turns_follow_board_convention() {
        let p = Point::new(1.0, 0.0);
        assert!(close(p.rotate(90.0), Point::new(0.0, -1.0)));
        assert!(close(p.rotate(180.0), Point::new(-1.0, 0.0)));
        assert!(close(p.rotate(270.0), Point::new(0.0, 1.0)));
    }

    #[test]
    fn pad_rotation_wraps() {
        let mut prim = Primitive::from(Pad::new(1, Point::new(1.0, 0.0), 1.0, 0.3));
        prim.rotate(270.0);
        prim.rotate(180.0);
        let pad = prim.as_pad().unwrap();
        assert!((pad.rotation - 90.0).abs() < TOLERANCE);
        assert!(close(pad.centre, Point::new(0.0, -1.0)));
    }

    #[test]
    fn line_rotation_moves_both_ends() {
        let mut prim = Primitive::from(Line::silkscreen(
            Point::new(1.0, 1.0),
            Point::new(1.0, -1.0),
            DEFAULT_LINE_WIDTH,
        ));
        prim.rotate(90.0);
        let Primitive::Line(line) = prim else {
            panic!("expected a line");
        };
        assert!(close(line.start, Point::new(1.0, -1.0)));
        assert!(close(line.end, Point::new(-1.0, -1.0)));
        assert!((line.length() - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn layer_names() {
        assert_eq!(Layer::FrontSilkscreen.kicad_name(), "F.SilkS");
        assert_eq!(Layer::UserDrawing.kicad_name(), "Dwgs.User");
        let pad = Pad::new(3, Point::default(), 1.0, 0.25);
        let names: Vec<_> = pad.layers().iter().map(Layer::kicad_name).collect();
        assert_eq!(names, ["F.Cu", "F.Paste", "F.Mask"]);
    }

    #[test]
    fn drawing_lines_use_fixed_width() {
        let line = Line::drawing(Point::default(), Point::new(1.0, 0.0));
        assert_eq!(line.layer, Layer::UserDrawing);
        assert!((line.width - TERMINAL_LINE_WIDTH).abs() < f64::EPSILON);
    }
}
