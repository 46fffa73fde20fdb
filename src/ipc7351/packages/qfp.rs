//! IPC-7351 land pattern calculations for quad flat packages.
//!
//! QFP packages include LQFP, TQFP and similar gull-wing parts with an equal
//! number of leads on each of the four sides of a square body.
//!
//! Geometry is defined once for the right-hand side of the package and then
//! turned into place for each side with [`place_side`]. Pin 1 ends up on the
//! side nearest negative X / positive Y and numbering runs around the part.

use tracing::{debug, info};

use crate::error::FootprintResult;
use crate::ipc7351::packages::{LandPattern, PackageCalculator, QfpParameters};
use crate::ipc7351::primitives::{Circle, Line, Pad, Point, Primitive};

/// Distance the silkscreen placement guide sits inside the pad heels (mm).
pub const OUTLINE_INSET: f64 = 0.25;

/// Distance of the orientation dot from the pad heels (mm).
pub const ORIENTATION_DOT_INSET: f64 = 1.25;

/// Radius of the orientation dot (mm).
pub const ORIENTATION_DOT_RADIUS: f64 = 0.5;

/// Leg length of the diagonal orientation mark on the courtyard (mm).
pub const COURTYARD_MARK_LENGTH: f64 = 1.5;

/// Pad dimensions shared by every pin of a square QFP.
///
/// Distances are measured outward from the package centre along the
/// toe-to-toe axis of the side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadGeometry {
    /// Outer pad edge.
    pub toe: f64,
    /// Inner pad edge.
    pub heel: f64,
    /// Heel-to-toe pad length.
    pub length: f64,
    /// Pad centre offset.
    pub centre: f64,
    /// Pad width across the lead.
    pub width: f64,
}

impl PadGeometry {
    /// Derives pad dimensions from the package parameters.
    ///
    /// - Toe = L/2 + Jt
    /// - Heel = L/2 - terminal length - Jh
    /// - Width = terminal width + Js
    #[must_use]
    pub fn for_params(params: &QfpParameters) -> Self {
        let half = params.body_length() / 2.0;
        let toe = half + params.margins.toe;
        let heel = half - params.terminal_length - params.margins.heel;
        let length = toe - heel;

        Self {
            toe,
            heel,
            length,
            centre: toe - length / 2.0,
            width: params.terminal_width + params.margins.side,
        }
    }
}

/// Rotation (degrees) that carries right-hand-side geometry onto `side`.
///
/// Sides 0..=3 map to 270, 0, 90 and 180 degrees.
#[must_use]
pub fn side_rotation(side: u32) -> f64 {
    f64::from((270 + 90 * side) % 360)
}

/// Rotates geometry defined for the right-hand side into place on `side`.
#[must_use]
pub fn place_side(mut local: Vec<Primitive>, side: u32) -> Vec<Primitive> {
    let angle = side_rotation(side);
    for primitive in &mut local {
        primitive.rotate(angle);
    }
    local
}

/// Builds the same right-hand-side geometry for all four sides.
fn on_each_side(build: impl Fn(u32) -> Vec<Primitive>) -> Vec<Primitive> {
    (0..4).flat_map(|side| place_side(build(side), side)).collect()
}

/// Lead centre offsets along one side, first pin at the most positive Y.
fn pin_offsets(params: &QfpParameters) -> impl Iterator<Item = f64> {
    let pitch = params.pitch;
    let first = f64::from(params.pins_per_side() - 1) * pitch / 2.0;
    (0..params.pins_per_side()).map(move |pin| f64::from(pin).mul_add(-pitch, first))
}

/// Calculator for square QFP land patterns.
#[derive(Debug, Default)]
pub struct QfpCalculator;

impl QfpCalculator {
    /// Creates a new QFP calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Calculates the land pattern for a resolved QFP.
    ///
    /// Output order is outline, courtyard, terminal outlines, then pads in
    /// pin order. Optional parts are only emitted when enabled in
    /// `params.draw`.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails [`QfpParameters::validate`]; no
    /// geometry is built in that case.
    pub fn calculate(&self, name: &str, params: &QfpParameters) -> FootprintResult<LandPattern> {
        params.validate()?;

        let pads = PadGeometry::for_params(params);
        debug!(
            toe = pads.toe,
            heel = pads.heel,
            length = pads.length,
            width = pads.width,
            "Pad geometry"
        );

        let mut primitives = Vec::new();
        if params.draw.outline {
            primitives.extend(Self::outline(params, &pads));
        }
        if params.draw.courtyard {
            primitives.extend(Self::courtyard(params, &pads));
        }
        if params.draw.terminals {
            primitives.extend(Self::terminals(params));
        }
        primitives.extend(Self::pads(params, &pads));

        info!(
            name,
            pads = params.pin_count,
            primitives = primitives.len(),
            "Calculated QFP land pattern"
        );

        Ok(LandPattern {
            name: name.to_string(),
            parameters: params.clone(),
            primitives,
        })
    }

    /// Corner guides inside the pad ring plus the pin 1 dot.
    fn outline(params: &QfpParameters, pads: &PadGeometry) -> Vec<Primitive> {
        let r = pads.heel - OUTLINE_INSET;
        let mut primitives = on_each_side(|_| {
            vec![Line::silkscreen(Point::new(r, r), Point::new(r, -r), params.line_width).into()]
        });

        let d = pads.heel - ORIENTATION_DOT_INSET;
        primitives.push(
            Circle::silkscreen(Point::new(-d, d), ORIENTATION_DOT_RADIUS, params.line_width).into(),
        );
        primitives
    }

    /// Courtyard corners outside the pad ring plus a diagonal pin 1 mark.
    fn courtyard(params: &QfpParameters, pads: &PadGeometry) -> Vec<Primitive> {
        let c = pads.toe + params.margins.courtyard_excess;
        let mut primitives = on_each_side(|_| {
            vec![Line::silkscreen(Point::new(c, c), Point::new(c, -c), params.line_width).into()]
        });

        primitives.push(
            Line::silkscreen(
                Point::new(-c, c - COURTYARD_MARK_LENGTH),
                Point::new(-c + COURTYARD_MARK_LENGTH, c),
                params.line_width,
            )
            .into(),
        );
        primitives
    }

    /// Closed rectangles tracing each physical lead, heel to toe.
    fn terminals(params: &QfpParameters) -> Vec<Primitive> {
        let toe = params.body_length() / 2.0;
        let heel = toe - params.terminal_length;
        let half_width = params.terminal_width / 2.0;

        on_each_side(|_| {
            pin_offsets(params)
                .flat_map(|y| {
                    let (top, bottom) = (y + half_width, y - half_width);
                    [
                        Line::drawing(Point::new(heel, top), Point::new(toe, top)),
                        Line::drawing(Point::new(toe, top), Point::new(toe, bottom)),
                        Line::drawing(Point::new(toe, bottom), Point::new(heel, bottom)),
                        Line::drawing(Point::new(heel, bottom), Point::new(heel, top)),
                    ]
                })
                .map(Primitive::from)
                .collect()
        })
    }

    /// One pad per pin, numbered from 1 around the package.
    fn pads(params: &QfpParameters, pads: &PadGeometry) -> Vec<Primitive> {
        let per_side = params.pins_per_side();
        on_each_side(|side| {
            pin_offsets(params)
                .zip(side * per_side + 1..)
                .map(|(y, number)| {
                    Primitive::from(Pad::new(
                        number,
                        Point::new(pads.centre, y),
                        pads.length,
                        pads.width,
                    ))
                })
                .collect()
        })
    }
}

impl PackageCalculator for QfpCalculator {
    fn calculate(&self, name: &str, params: &QfpParameters) -> FootprintResult<LandPattern> {
        Self::calculate(self, name, params)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::error::FootprintError;
    use crate::ipc7351::packages::{DrawOptions, ParameterOverrides};
    use crate::ipc7351::primitives::Layer;

    const TOLERANCE: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn lqfp48(draw: DrawOptions) -> QfpParameters {
        let overrides = ParameterOverrides {
            terminal_length: 0.6,
            terminal_width: 0.27,
            draw,
            ..ParameterOverrides::default()
        };
        QfpParameters::resolve("QFP50P900X900-48", &overrides).unwrap()
    }

    fn all_drawn() -> DrawOptions {
        DrawOptions {
            outline: true,
            courtyard: true,
            terminals: true,
        }
    }

    #[test]
    fn side_rotations() {
        let angles: Vec<f64> = (0..4).map(side_rotation).collect();
        assert_eq!(angles, [270.0, 0.0, 90.0, 180.0]);
    }

    #[test]
    fn pad_geometry_lqfp48_nominal() {
        let pads = PadGeometry::for_params(&lqfp48(DrawOptions::default()));
        assert!(approx_eq(pads.toe, 4.85));
        assert!(approx_eq(pads.heel, 3.55));
        assert!(approx_eq(pads.length, 1.30));
        assert!(approx_eq(pads.centre, 4.20));
        assert!(approx_eq(pads.width, 0.25));
    }

    #[test]
    fn pads_only_by_default() {
        let params = lqfp48(DrawOptions::default());
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        assert_eq!(pattern.primitives.len(), 48);
        assert_eq!(pattern.pad_count(), 48);
    }

    #[test]
    fn pad_numbers_cover_every_pin_once() {
        for pins in [4, 32, 48, 100, 256] {
            let name = format!("QFP50P2000X2000-{pins}");
            let params = QfpParameters::resolve(&name, &ParameterOverrides::default()).unwrap();
            let pattern = QfpCalculator::new()
                .calculate(&name, &params)
                .unwrap();
            let numbers: Vec<u32> = pattern.pads().map(|p| p.number).collect();
            let unique: BTreeSet<u32> = numbers.iter().copied().collect();
            assert_eq!(numbers.len(), pins as usize);
            assert_eq!(unique, (1..=pins).collect::<BTreeSet<u32>>());
            assert_eq!(numbers, (1..=pins).collect::<Vec<_>>());
        }
    }

    #[test]
    fn pin_one_is_bottom_left() {
        let params = lqfp48(DrawOptions::default());
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();

        let pin1 = pattern.pad(1).unwrap();
        assert!(approx_eq(pin1.centre.x, -2.75));
        assert!(approx_eq(pin1.centre.y, 4.20));
        assert!(approx_eq(pin1.rotation, 270.0));

        let pin2 = pattern.pad(2).unwrap();
        assert!(approx_eq(pin2.centre.x, -2.25));

        let pin13 = pattern.pad(13).unwrap();
        assert!(approx_eq(pin13.centre.x, 4.20));
        assert!(approx_eq(pin13.centre.y, 2.75));
        assert!(approx_eq(pin13.rotation, 0.0));

        let pin25 = pattern.pad(25).unwrap();
        assert!(approx_eq(pin25.centre.x, 2.75));
        assert!(approx_eq(pin25.centre.y, -4.20));
        assert!(approx_eq(pin25.rotation, 90.0));

        let pin37 = pattern.pad(37).unwrap();
        assert!(approx_eq(pin37.centre.x, -4.20));
        assert!(approx_eq(pin37.centre.y, -2.75));
        assert!(approx_eq(pin37.rotation, 180.0));
    }

    #[test]
    fn first_pads_of_each_side_are_quarter_turns() {
        let params = lqfp48(DrawOptions::default());
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        let per_side = params.pins_per_side();

        for side in 0..4 {
            let this = pattern.pad(side * per_side + 1).unwrap();
            let next = pattern.pad((side + 1) % 4 * per_side + 1).unwrap();
            let turned = this.centre.rotate(90.0);
            assert!(turned.distance_to(next.centre) < TOLERANCE);
        }
    }

    #[test]
    fn pads_share_size() {
        let params = lqfp48(DrawOptions::default());
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        for pad in pattern.pads() {
            assert!(approx_eq(pad.size_x, 1.30));
            assert!(approx_eq(pad.size_y, 0.25));
            assert!(approx_eq(pad.centre.x.abs().max(pad.centre.y.abs()), 4.20));
        }
    }

    #[test]
    fn all_features_counts_and_order() {
        let params = lqfp48(all_drawn());
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        // 4 guides + dot, 4 corners + mark, 4 lines per terminal, pads
        assert_eq!(pattern.primitives.len(), 5 + 5 + 4 * 48 + 48);

        let prims = &pattern.primitives;
        assert!(prims[..4].iter().all(|p| matches!(p, Primitive::Line(_))));
        assert!(matches!(prims[4], Primitive::Circle(_)));
        assert!(prims[5..10].iter().all(|p| matches!(p, Primitive::Line(_))));
        assert!(prims[10..202]
            .iter()
            .all(|p| p.layer() == Layer::UserDrawing));
        assert!(prims[202..].iter().all(|p| p.as_pad().is_some()));
    }

    #[test]
    fn outline_sits_inside_pads() {
        let params = lqfp48(DrawOptions {
            outline: true,
            ..DrawOptions::default()
        });
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        assert_eq!(pattern.primitives.len(), 48 + 5);

        for prim in &pattern.primitives[..4] {
            let Primitive::Line(line) = prim else {
                panic!("expected outline line");
            };
            assert_eq!(line.layer, Layer::FrontSilkscreen);
            assert!(approx_eq(line.width, 0.15));
            assert!(approx_eq(line.length(), 2.0 * 3.30));
            for end in [line.start, line.end] {
                assert!(approx_eq(end.x.abs(), 3.30));
                assert!(approx_eq(end.y.abs(), 3.30));
            }
        }

        let Primitive::Circle(dot) = pattern.primitives[4] else {
            panic!("expected orientation dot");
        };
        assert!(approx_eq(dot.centre.x, -2.30));
        assert!(approx_eq(dot.centre.y, 2.30));
        assert!(approx_eq(dot.radius, 0.5));
    }

    #[test]
    fn courtyard_lines_and_mark() {
        let params = lqfp48(DrawOptions {
            courtyard: true,
            ..DrawOptions::default()
        });
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        assert_eq!(pattern.primitives.len(), 48 + 5);

        let lines: Vec<&Line> = pattern.primitives[..5]
            .iter()
            .map(|p| match p {
                Primitive::Line(line) => line,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        for line in &lines[..4] {
            assert!(approx_eq(line.start.x.abs(), 5.10));
            assert!(approx_eq(line.start.y.abs(), 5.10));
        }

        let mark = lines[4];
        assert!(approx_eq(mark.start.x, -5.10));
        assert!(approx_eq(mark.start.y, 3.60));
        assert!(approx_eq(mark.end.x, -3.60));
        assert!(approx_eq(mark.end.y, 5.10));
    }

    #[test]
    fn terminal_outlines_are_closed() {
        let params = lqfp48(DrawOptions {
            terminals: true,
            ..DrawOptions::default()
        });
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();
        let lines: Vec<&Line> = pattern
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line(line) => Some(line),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 4 * 48);

        for rect in lines.chunks(4) {
            for (a, b) in rect.iter().zip(rect.iter().cycle().skip(1)) {
                assert!(a.end.distance_to(b.start) < TOLERANCE);
            }
            assert!(approx_eq(rect[0].length(), 0.6));
            assert!(approx_eq(rect[1].length(), 0.27));
            assert!(rect.iter().all(|l| approx_eq(l.width, 0.02)));
        }
    }

    #[test]
    fn coarse_pitch_widens_pads() {
        let params =
            QfpParameters::resolve("QFP80P900X900X100-32", &ParameterOverrides::default())
                .unwrap();
        let pads = PadGeometry::for_params(&params);
        assert!(approx_eq(pads.width, 0.30));
        assert!(approx_eq(pads.centre, 4.20));
    }

    #[test]
    fn unvalidated_pin_count_builds_nothing() {
        let mut params = lqfp48(all_drawn());
        params.pin_count = 50;
        let err = QfpCalculator::new()
            .calculate("QFP50P900X900-50", &params)
            .unwrap_err();
        assert_eq!(err, FootprintError::PinCountNotDivisible { pin_count: 50 });
    }

    #[test]
    fn deserialised_zero_pins_is_an_error() {
        let mut value = serde_json::to_value(lqfp48(DrawOptions::default())).unwrap();
        value["pin_count"] = serde_json::json!(0);
        let params: QfpParameters = serde_json::from_value(value).unwrap();

        let err = QfpCalculator::new()
            .calculate("QFP50P900X900-0", &params)
            .unwrap_err();
        assert!(
            matches!(err, FootprintError::InvalidParameter { ref name, .. } if name == "pin_count")
        );
    }

    #[test]
    fn nan_toe_builds_nothing() {
        let mut params = lqfp48(DrawOptions::default());
        params.margins.toe = f64::NAN;
        let err = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap_err();
        assert!(
            matches!(err, FootprintError::InvalidParameter { ref name, .. } if name == "toe_override")
        );
    }
}
