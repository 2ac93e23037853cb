//! SVG path data construction for circular outlines.

use std::fmt::Write as _;

use crate::geometry::{Point, polar};

/// Largest sweep emitted by a single elliptical-arc command.
const MAX_ARC_STEP: f32 = 90.0;

/// Sweeps below this many degrees are treated as empty.
const ANGLE_EPSILON: f32 = 1e-4;

/// Incrementally builds the `d` attribute of an SVG `<path>`.
///
/// Circular arcs are expressed in degrees around a center, with angles
/// growing counter-clockwise on screen (see [`polar`]). Long sweeps are
/// split into pieces of at most 90 degrees so the SVG large-arc flag is
/// never needed.
///
/// # Examples
///
/// ```
/// use chordal_core::{draw::PathBuilder, geometry::Point};
///
/// let center = Point::new(0.0, 0.0);
/// let data = PathBuilder::new()
///     .move_to(Point::new(10.0, 0.0))
///     .arc_to(center, 10.0, 0.0, 180.0)
///     .close()
///     .build();
///
/// // Two 90 degree pieces
/// assert_eq!(data.matches(" A ").count(), 2);
/// assert!(data.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.push_command(format_args!("M {} {}", point.x(), point.y()));
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.push_command(format_args!("L {} {}", point.x(), point.y()));
        self
    }

    /// Cubic Bézier curve from the current point to `to`.
    pub fn cubic_to(mut self, control1: Point, control2: Point, to: Point) -> Self {
        self.push_command(format_args!(
            "C {} {}, {} {}, {} {}",
            control1.x(),
            control1.y(),
            control2.x(),
            control2.y(),
            to.x(),
            to.y()
        ));
        self
    }

    /// Circular arc around `center` from `from_deg` to `to_deg`.
    ///
    /// The current point must already be at `polar(center, radius, from_deg)`.
    /// The arc runs counter-clockwise when `to_deg > from_deg` and clockwise
    /// otherwise.
    pub fn arc_to(mut self, center: Point, radius: f32, from_deg: f32, to_deg: f32) -> Self {
        let sweep = to_deg - from_deg;
        if sweep.abs() < ANGLE_EPSILON || radius <= 0.0 {
            return self;
        }

        let steps = (sweep.abs() / MAX_ARC_STEP).ceil().max(1.0) as usize;
        let step = sweep / steps as f32;
        // SVG sweep-flag 0 is counter-clockwise on screen
        let sweep_flag = if sweep > 0.0 { 0 } else { 1 };

        for i in 1..=steps {
            let angle = if i == steps {
                to_deg
            } else {
                from_deg + step * i as f32
            };
            let end = polar(center, radius, angle);
            self.push_command(format_args!(
                "A {radius} {radius} 0 0 {sweep_flag} {} {}",
                end.x(),
                end.y()
            ));
        }
        self
    }

    pub fn close(mut self) -> Self {
        self.push_command(format_args!("Z"));
        self
    }

    pub fn build(self) -> String {
        self.data
    }

    fn push_command(&mut self, command: std::fmt::Arguments<'_>) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        // Writing into a String cannot fail
        let _ = self.data.write_fmt(command);
    }
}

/// Points along a circular arc, at most `max_step` degrees apart, ends included.
///
/// Used to bound curved outlines without solving for arc extrema.
pub(crate) fn arc_samples(
    center: Point,
    radius: f32,
    from_deg: f32,
    to_deg: f32,
    max_step: f32,
) -> Vec<Point> {
    let sweep = to_deg - from_deg;
    let steps = (sweep.abs() / max_step).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| polar(center, radius, from_deg + sweep * i as f32 / steps as f32))
        .collect()
}
