//! Labels placed just outside an arch.
//!
//! A label sits at the arch's mid angle, `gap` beyond its outer radius. Text
//! is anchored so it grows away from the circle and, when rotation is on,
//! turned to follow the radius while staying upright.
//!
//! With a [`LeaderPlacement`], the text is pulled further out and joined to
//! the arch by a two-segment leader line: horizontal from the text, then
//! radial into the label point.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Point, normalize_degrees, polar},
};

const ARROW_HEAD_LENGTH: f32 = 6.0;
const ARROW_HEAD_HALF_WIDTH: f32 = 3.0;

/// Where an arrowed label's text goes, as factors of the arch geometry.
///
/// The text is placed at `x_factor * arch_radius` to the side of the label
/// point and at `y_factor` times its vertical offset, both relative to the
/// circle center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderPlacement {
    x_factor: f32,
    y_factor: f32,
}

impl LeaderPlacement {
    pub fn new(x_factor: f32, y_factor: f32) -> Self {
        Self { x_factor, y_factor }
    }

    pub fn x_factor(&self) -> f32 {
        self.x_factor
    }

    pub fn y_factor(&self) -> f32 {
        self.y_factor
    }
}

impl Default for LeaderPlacement {
    fn default() -> Self {
        Self::new(1.2, 1.2)
    }
}

/// Text attached to one arch.
///
/// # Examples
///
/// ```
/// use chordal_core::draw::ArchLabel;
///
/// let label = ArchLabel::new("left side", 180.0, 100.0);
/// // Text on the left half is turned half a turn to stay upright
/// assert_eq!(label.rotation(), Some(0.0));
///
/// let label = ArchLabel::new("top right", 45.0, 100.0);
/// assert_eq!(label.rotation(), Some(45.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArchLabel {
    text: String,
    mid_angle: f32,
    arch_radius: f32,
    gap: f32,
    rotate: bool,
    rotation_override: Option<f32>,
    wrap_words: usize,
    leader: Option<LeaderPlacement>,
    definition: TextDefinition,
    visible: bool,
}

impl ArchLabel {
    /// Creates a rotated, visible label for an arch whose mid angle and outer
    /// radius are given.
    pub fn new(text: impl Into<String>, mid_angle: f32, arch_radius: f32) -> Self {
        Self {
            text: text.into(),
            mid_angle,
            arch_radius,
            gap: 0.0,
            rotate: true,
            rotation_override: None,
            wrap_words: 0,
            leader: None,
            definition: TextDefinition::default(),
            visible: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn mid_angle(&self) -> f32 {
        self.mid_angle
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: f32) {
        self.gap = gap;
    }

    pub fn set_rotate(&mut self, rotate: bool) {
        self.rotate = rotate;
    }

    /// Forces a fixed rotation (degrees, counter-clockwise) instead of following the radius.
    pub fn set_rotation_override(&mut self, rotation: Option<f32>) {
        self.rotation_override = rotation;
    }

    /// Breaks the text after every `words` words; `0` disables wrapping.
    pub fn set_wrap_words(&mut self, words: usize) {
        self.wrap_words = words;
    }

    pub fn leader(&self) -> Option<LeaderPlacement> {
        self.leader
    }

    pub fn set_leader(&mut self, leader: Option<LeaderPlacement>) {
        self.leader = leader;
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn definition_mut(&mut self) -> &mut TextDefinition {
        &mut self.definition
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Distance of the label point from the circle center.
    pub fn radius(&self) -> f32 {
        self.arch_radius + self.gap
    }

    /// The point just outside the arch the label belongs to.
    pub fn anchor_point(&self, center: Point) -> Point {
        polar(center, self.radius(), self.mid_angle)
    }

    /// Text rotation in degrees, counter-clockwise.
    ///
    /// Labels whose mid angle lies in `(90, 270]` are turned by half a turn so
    /// they read left to right. Arrowed labels are never rotated.
    pub fn rotation(&self) -> Option<f32> {
        if !self.rotate || self.leader.is_some() {
            return None;
        }
        if self.rotation_override.is_some() {
            return self.rotation_override;
        }

        let angle = normalize_degrees(self.mid_angle);
        if angle > 90.0 && angle <= 270.0 {
            Some(angle - 180.0)
        } else {
            Some(angle)
        }
    }

    /// Alignment of the text: away from the vertical axis through the center.
    pub fn text_anchor(&self, center: Point) -> TextAnchor {
        TextAnchor::for_offset(self.anchor_point(center).x() - center.x())
    }

    /// Text with a line break after every `wrap_words` words.
    pub fn wrapped_text(&self) -> String {
        wrap_words(&self.text, self.wrap_words)
    }

    /// Where the text itself is drawn.
    pub fn text_position(&self, center: Point) -> Point {
        let anchor = self.anchor_point(center);
        match self.leader {
            None => anchor,
            Some(leader) => {
                let offset = anchor.sub_point(center);
                let side = if offset.x().abs() < 1e-3 {
                    0.0
                } else {
                    offset.x().signum()
                };
                Point::new(
                    center.x() + leader.x_factor * self.arch_radius * side,
                    center.y() + leader.y_factor * offset.y(),
                )
            }
        }
    }

    /// Vertices of the leader line from the text to the label point, if arrowed.
    ///
    /// Labels at 0 or 180 degrees get a straight line; all others go
    /// horizontally to the radius through the label point, then along it.
    pub fn leader_points(&self, center: Point) -> Option<Vec<Point>> {
        self.leader?;

        let start = self.text_position(center);
        let end = self.anchor_point(center);
        let (sin, _) = self.mid_angle.to_radians().sin_cos();
        if sin.abs() < 1e-3 {
            return Some(vec![start, end]);
        }

        let along_radius = (center.y() - start.y()) / sin;
        let corner = polar(center, along_radius, self.mid_angle);
        Some(vec![start, corner, end])
    }

    fn leader_color(&self) -> Color {
        self.definition.color().unwrap_or_default()
    }

    fn render_leader(&self, points: &[Point], output: &mut LayeredOutput) {
        let (Some(first), Some(&tip)) = (points.first(), points.last()) else {
            return;
        };
        let color = self.leader_color();

        let mut data = format!("M {} {}", first.x(), first.y());
        for point in &points[1..] {
            data.push_str(&format!(" L {} {}", point.x(), point.y()));
        }
        let line = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none");
        let line = apply_stroke!(line, &StrokeDefinition::new(color, 1.0));
        output.add_to_layer(RenderLayer::Arrow, Box::new(line));

        let tail = points[points.len() - 2];
        if let Some([a, b]) = arrow_head(tail, tip) {
            let head = svg_element::Path::new()
                .set(
                    "d",
                    format!(
                        "M {} {} L {} {} L {} {} Z",
                        tip.x(),
                        tip.y(),
                        a.x(),
                        a.y(),
                        b.x(),
                        b.y()
                    ),
                )
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Arrow, Box::new(head));
        }
    }
}

/// Base corners of an arrow head pointing from `tail` to `tip`.
fn arrow_head(tail: Point, tip: Point) -> Option<[Point; 2]> {
    let direction = tip.sub_point(tail);
    let length = direction.hypot();
    if length <= f32::EPSILON {
        return None;
    }
    let unit = direction.scale(1.0 / length);
    let base = tip.sub_point(unit.scale(ARROW_HEAD_LENGTH));
    let normal = Point::new(-unit.y(), unit.x()).scale(ARROW_HEAD_HALF_WIDTH);
    Some([base.add_point(normal), base.sub_point(normal)])
}

fn wrap_words(text: &str, per_line: usize) -> String {
    if per_line == 0 {
        return text.to_string();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(per_line)
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Drawable for ArchLabel {
    /// `position` is the circle center.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if !self.visible {
            return output;
        }

        let content = self.wrapped_text();
        let text = Text::new(&self.definition, &content)
            .with_anchor(self.text_anchor(position))
            .with_rotation(self.rotation());
        output.merge(text.render_to_layers(self.text_position(position)));

        if let Some(points) = self.leader_points(position) {
            self.render_leader(&points, &mut output);
        }

        output
    }

    fn bounds(&self, position: Point) -> Bounds {
        let content = self.wrapped_text();
        let text_position = self.text_position(position);
        let bounds = Text::new(&self.definition, &content)
            .with_anchor(self.text_anchor(position))
            .with_rotation(self.rotation())
            .bounds(text_position);

        match self.leader_points(position).and_then(Bounds::from_points) {
            Some(leader) => bounds.merge(&leader),
            None => bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const CENTER: Point = Point::new(0.0, 0.0);

    #[test]
    fn test_rotation_keeps_text_upright() {
        let cases = [
            (0.0, 0.0),
            (45.0, 45.0),
            (90.0, 90.0),
            (135.0, -45.0),
            (180.0, 0.0),
            (270.0, 90.0),
            (300.0, 300.0),
            (405.0, 45.0),
        ];
        for (mid, expected) in cases {
            let label = ArchLabel::new("x", mid, 100.0);
            let rotation = label.rotation().unwrap();
            assert_approx_eq!(f32, rotation, expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_rotation_disabled_and_override() {
        let mut label = ArchLabel::new("x", 120.0, 100.0);
        label.set_rotate(false);
        assert_eq!(label.rotation(), None);

        label.set_rotate(true);
        label.set_rotation_override(Some(12.0));
        assert_eq!(label.rotation(), Some(12.0));
    }

    #[test]
    fn test_text_anchor_by_side() {
        assert_eq!(
            ArchLabel::new("r", 10.0, 100.0).text_anchor(CENTER),
            TextAnchor::Start
        );
        assert_eq!(
            ArchLabel::new("l", 170.0, 100.0).text_anchor(CENTER),
            TextAnchor::End
        );
        assert_eq!(
            ArchLabel::new("t", 90.0, 100.0).text_anchor(CENTER),
            TextAnchor::Middle
        );
    }

    #[test]
    fn test_anchor_point_uses_gap() {
        let mut label = ArchLabel::new("x", 0.0, 100.0);
        label.set_gap(6.0);
        let point = label.anchor_point(CENTER);
        assert_approx_eq!(f32, point.x(), 106.0, epsilon = 1e-4);
        assert_approx_eq!(f32, point.y(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("one two three", 0), "one two three");
        assert_eq!(wrap_words("one two three", 1), "one\ntwo\nthree");
        assert_eq!(wrap_words("one two three four five", 2), "one two\nthree four\nfive");
    }

    #[test]
    fn test_arrowed_label_position() {
        let mut label = ArchLabel::new("x", 30.0, 100.0);
        label.set_leader(Some(LeaderPlacement::default()));

        let anchor = label.anchor_point(CENTER);
        let position = label.text_position(CENTER);
        assert_approx_eq!(f32, position.x(), 120.0, epsilon = 1e-3);
        assert_approx_eq!(f32, position.y(), 1.2 * anchor.y(), epsilon = 1e-3);
        assert_eq!(label.rotation(), None);
    }

    #[test]
    fn test_leader_has_corner_on_radius() {
        let mut label = ArchLabel::new("x", 30.0, 100.0);
        label.set_leader(Some(LeaderPlacement::default()));

        let points = label.leader_points(CENTER).unwrap();
        assert_eq!(points.len(), 3);

        let (start, corner, end) = (points[0], points[1], points[2]);
        // First segment is horizontal
        assert_approx_eq!(f32, start.y(), corner.y(), epsilon = 1e-3);
        // Corner lies on the radius through the label point
        assert_approx_eq!(f32, corner.cross(end), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_leader_straight_on_horizontal_axis() {
        let mut label = ArchLabel::new("x", 180.0, 100.0);
        label.set_leader(Some(LeaderPlacement::default()));
        assert_eq!(label.leader_points(CENTER).unwrap().len(), 2);
    }

    #[test]
    fn test_no_leader_without_placement() {
        assert!(ArchLabel::new("x", 30.0, 100.0).leader_points(CENTER).is_none());
    }

    #[test]
    fn test_render_layers() {
        let mut label = ArchLabel::new("x", 30.0, 100.0);
        let output = label.render_to_layers(CENTER);
        assert_eq!(output.count(RenderLayer::Text), 1);
        assert_eq!(output.count(RenderLayer::Arrow), 0);

        label.set_leader(Some(LeaderPlacement::default()));
        let output = label.render_to_layers(CENTER);
        assert_eq!(output.count(RenderLayer::Arrow), 2);

        label.hide();
        assert!(label.render_to_layers(CENTER).is_empty());
    }

    #[test]
    fn test_arrow_head_points_back_from_tip() {
        let [a, b] = arrow_head(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert_approx_eq!(f32, a.x(), 4.0, epsilon = 1e-4);
        assert_approx_eq!(f32, b.x(), 4.0, epsilon = 1e-4);
        assert_approx_eq!(f32, (a.y() - b.y()).abs(), 6.0, epsilon = 1e-4);
        assert!(arrow_head(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_none());
    }
}
