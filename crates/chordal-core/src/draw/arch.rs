//! Annular sectors on the rim of the circle.

use svg::node::element as svg_element;

use crate::{
    apply_style,
    draw::{Drawable, ElementStyle, LayeredOutput, PathBuilder, RenderLayer, path::arc_samples},
    geometry::{Bounds, Point, polar},
};

/// One radial segment of the circle, drawn between `radius - height` and `radius`.
///
/// Angles are in degrees, counter-clockwise from the positive X axis. `end`
/// may exceed 360 when the arch wraps past the axis.
///
/// # Examples
///
/// ```
/// use chordal_core::draw::Arch;
///
/// let arch = Arch::new(30.0, 60.0, 100.0, 10.0);
/// assert_eq!(arch.span(), 30.0);
/// assert_eq!(arch.mid_angle(), 45.0);
/// assert_eq!(arch.inner_radius(), 90.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Arch {
    start: f32,
    end: f32,
    radius: f32,
    height: f32,
    style: ElementStyle,
}

impl Arch {
    pub fn new(start: f32, end: f32, radius: f32, height: f32) -> Self {
        Self {
            start,
            end,
            radius,
            height,
            style: ElementStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn start_angle(&self) -> f32 {
        self.start
    }

    pub fn end_angle(&self) -> f32 {
        self.end
    }

    /// Angle covered by the arch.
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    pub fn mid_angle(&self) -> f32 {
        self.start + self.span() / 2.0
    }

    /// Outer radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Radius of the inner edge, never negative.
    pub fn inner_radius(&self) -> f32 {
        (self.radius - self.height).max(0.0)
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    /// SVG path data of the sector outline around `center`.
    pub fn path_data(&self, center: Point) -> String {
        let inner = self.inner_radius();
        let builder = PathBuilder::new()
            .move_to(polar(center, self.radius, self.start))
            .arc_to(center, self.radius, self.start, self.end);

        let builder = if inner > 0.0 {
            builder
                .line_to(polar(center, inner, self.end))
                .arc_to(center, inner, self.end, self.start)
        } else {
            builder.line_to(center)
        };

        builder.close().build()
    }
}

impl Drawable for Arch {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if !self.style.is_visible() {
            return output;
        }

        let path = svg_element::Path::new().set("d", self.path_data(position));
        let path = apply_style!(path, &self.style);
        output.add_to_layer(RenderLayer::Arch, Box::new(path));
        output
    }

    fn bounds(&self, position: Point) -> Bounds {
        let mut points = arc_samples(position, self.radius, self.start, self.end, 5.0);
        points.extend(arc_samples(
            position,
            self.inner_radius(),
            self.start,
            self.end,
            5.0,
        ));
        Bounds::from_points(points).unwrap_or_default()
    }
}
