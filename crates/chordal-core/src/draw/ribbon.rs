//! Ribbons: closed curved shapes joining two arch sub-intervals.
//!
//! A ribbon outline is made of two circular arcs, one on each endpoint arch,
//! and two cubic connectors between them:
//!
//! ```text
//! origin.start ──arc──▶ origin.end
//!      ▲                    │
//!  connector            connector
//!      │                    ▼
//! destination.end ◀──arc── destination.start
//! ```
//!
//! Both control points of a connector sit on the same bend point, so the
//! convex hull of a connector is the triangle `(from, bend, to)`.

use svg::node::element as svg_element;

use crate::{
    apply_style,
    draw::{Drawable, ElementStyle, LayeredOutput, PathBuilder, RenderLayer, path::arc_samples},
    geometry::{Bounds, Point, polar},
};

/// One end of a ribbon: an angular sub-interval at a fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonEnd {
    start: f32,
    end: f32,
    radius: f32,
}

impl RibbonEnd {
    pub fn new(start: f32, end: f32, radius: f32) -> Self {
        Self { start, end, radius }
    }

    pub fn start_angle(&self) -> f32 {
        self.start
    }

    pub fn end_angle(&self) -> f32 {
        self.end
    }

    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn start_point(&self, center: Point) -> Point {
        polar(center, self.radius, self.start)
    }

    fn end_point(&self, center: Point) -> Point {
        polar(center, self.radius, self.end)
    }
}

/// Where the connectors of a ribbon bend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bend {
    /// A fixed point, given as an offset from the circle center.
    Offset(Point),
    /// Towards the midpoint of the chord joining the connector endpoints,
    /// at this fraction of the way from the center.
    ///
    /// Keeps a connector on its own side of the circle, so its hull never
    /// contains the center unless the endpoints are diametrically opposed.
    Chord(f32),
}

impl Default for Bend {
    fn default() -> Self {
        Self::Offset(Point::default())
    }
}

impl Bend {
    fn control_point(self, center: Point, from: Point, to: Point) -> Point {
        match self {
            Self::Offset(offset) => center.add_point(offset),
            Self::Chord(factor) => {
                let chord_mid = from.midpoint(to).sub_point(center);
                center.add_point(chord_mid.scale(factor))
            }
        }
    }
}

/// A cubic connector whose two control points coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    from: Point,
    control: Point,
    to: Point,
}

impl Connector {
    pub fn from(&self) -> Point {
        self.from
    }

    pub fn control(&self) -> Point {
        self.control
    }

    pub fn to(&self) -> Point {
        self.to
    }

    /// Returns `true` if `point` lies strictly inside the connector's hull.
    ///
    /// Points on the hull boundary, including its vertices, are outside.
    pub fn hull_contains(&self, point: Point) -> bool {
        let d1 = edge_side(self.from, self.control, point);
        let d2 = edge_side(self.control, self.to, point);
        let d3 = edge_side(self.to, self.from, point);

        let eps = 1e-3;
        (d1 > eps && d2 > eps && d3 > eps) || (d1 < -eps && d2 < -eps && d3 < -eps)
    }
}

fn edge_side(a: Point, b: Point, p: Point) -> f32 {
    b.sub_point(a).cross(p.sub_point(a))
}

/// A weighted relationship drawn between two arch sub-intervals.
///
/// # Examples
///
/// ```
/// use chordal_core::draw::{Bend, Ribbon, RibbonEnd};
/// use chordal_core::geometry::Point;
///
/// let ribbon = Ribbon::new(
///     RibbonEnd::new(10.0, 20.0, 90.0),
///     RibbonEnd::new(200.0, 215.0, 90.0),
/// );
/// let data = ribbon.path_data(Point::new(0.0, 0.0));
/// assert!(data.starts_with("M "));
/// assert_eq!(data.matches(" C ").count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ribbon {
    origin: RibbonEnd,
    destination: RibbonEnd,
    bend: Bend,
    style: ElementStyle,
}

impl Ribbon {
    /// Creates a ribbon bending through the circle center.
    pub fn new(origin: RibbonEnd, destination: RibbonEnd) -> Self {
        Self {
            origin,
            destination,
            bend: Bend::default(),
            style: ElementStyle::default(),
        }
    }

    pub fn with_bend(mut self, bend: Bend) -> Self {
        self.bend = bend;
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn origin(&self) -> &RibbonEnd {
        &self.origin
    }

    pub fn destination(&self) -> &RibbonEnd {
        &self.destination
    }

    pub fn bend(&self) -> Bend {
        self.bend
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    /// The two connectors: origin end to destination start, then
    /// destination end back to origin start.
    pub fn connectors(&self, center: Point) -> [Connector; 2] {
        let connector = |from: Point, to: Point| Connector {
            from,
            control: self.bend.control_point(center, from, to),
            to,
        };

        [
            connector(
                self.origin.end_point(center),
                self.destination.start_point(center),
            ),
            connector(
                self.destination.end_point(center),
                self.origin.start_point(center),
            ),
        ]
    }

    /// Returns `true` if the circle center lies inside either connector hull.
    pub fn passes_through_center(&self, center: Point) -> bool {
        self.connectors(center)
            .iter()
            .any(|c| c.hull_contains(center))
    }

    /// SVG path data of the closed ribbon outline.
    pub fn path_data(&self, center: Point) -> String {
        let [outbound, inbound] = self.connectors(center);

        PathBuilder::new()
            .move_to(self.origin.start_point(center))
            .arc_to(center, self.origin.radius, self.origin.start, self.origin.end)
            .cubic_to(outbound.control, outbound.control, outbound.to)
            .arc_to(
                center,
                self.destination.radius,
                self.destination.start,
                self.destination.end,
            )
            .cubic_to(inbound.control, inbound.control, inbound.to)
            .close()
            .build()
    }
}

impl Drawable for Ribbon {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if !self.style.is_visible() {
            return output;
        }

        let path = svg_element::Path::new().set("d", self.path_data(position));
        let path = apply_style!(path, &self.style);
        output.add_to_layer(RenderLayer::Ribbon, Box::new(path));
        output
    }

    fn bounds(&self, position: Point) -> Bounds {
        // Bézier curves stay inside the hull of their control polygon
        let mut points = arc_samples(
            position,
            self.origin.radius,
            self.origin.start,
            self.origin.end,
            5.0,
        );
        points.extend(arc_samples(
            position,
            self.destination.radius,
            self.destination.start,
            self.destination.end,
            5.0,
        ));
        points.extend(self.connectors(position).iter().map(|c| c.control));
        Bounds::from_points(points).unwrap_or_default()
    }
}
