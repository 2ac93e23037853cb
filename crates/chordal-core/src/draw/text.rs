//! Text rendering for arch labels.
//!
//! - [`TextDefinition`] - Reusable font and color configuration
//! - [`Text`] - A renderable text element: content, anchor side and rotation
//!
//! # Quick Start
//!
//! ```
//! # use chordal_core::draw::{Text, TextAnchor, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_family("Helvetica");
//! style.set_font_size(14);
//!
//! let text = Text::new(&style, "Boston")
//!     .with_anchor(TextAnchor::Start)
//!     .with_rotation(Some(30.0));
//! assert_eq!(text.content(), "Boston");
//! ```
//!
//! Text is measured with `cosmic-text` so the exporter can size the
//! document to include every label.

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text extends to the right of the anchor.
    Start,
    #[default]
    Middle,
    /// Text extends to the left of the anchor.
    End,
}

impl TextAnchor {
    /// Picks the anchor for text placed at horizontal offset `dx` from the
    /// circle center: text right of center grows outward to the right, text
    /// left of center grows outward to the left.
    pub fn for_offset(dx: f32) -> Self {
        const EPSILON: f32 = 1e-3;
        if dx > EPSILON {
            Self::Start
        } else if dx < -EPSILON {
            Self::End
        } else {
            Self::Middle
        }
    }

    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font and color settings shared by text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `12` |
/// | Text color | `None` (SVG default, black) |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the fill color. `None` keeps the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12,
            color: None,
        }
    }
}

/// A renderable text element.
///
/// Multi-line content (separated by `\n`) is emitted as one `<tspan>` per
/// line, vertically centered on the anchor point. Rotation is in degrees,
/// counter-clockwise, around the anchor point.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    anchor: TextAnchor,
    rotation: Option<f32>,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            anchor: TextAnchor::default(),
            rotation: None,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_rotation(mut self, rotation: Option<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn content(&self) -> &str {
        self.content
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    /// Size of the unrotated text block.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let lines: Vec<&str> = self.content.lines().collect();
        if lines.is_empty() {
            return output;
        }

        let line_height = self.calculate_size().height() / lines.len() as f32;
        let first_line_y = position.y() - line_height * (lines.len() - 1) as f32 / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", first_line_y)
            .set("text-anchor", self.anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        if let Some(rotation) = self.rotation {
            // SVG rotates clockwise with Y pointing down
            rendered_text = rendered_text.set(
                "transform",
                format!("rotate({} {} {})", -rotation, position.x(), position.y()),
            );
        }

        for (i, line) in lines.into_iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn bounds(&self, position: Point) -> Bounds {
        let size = self.calculate_size();
        let min_x = match self.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -size.width() / 2.0,
            TextAnchor::End => -size.width(),
        };
        let corners = [
            Point::new(min_x, -size.height() / 2.0),
            Point::new(min_x + size.width(), -size.height() / 2.0),
            Point::new(min_x + size.width(), size.height() / 2.0),
            Point::new(min_x, size.height() / 2.0),
        ];

        let (sin, cos) = self.rotation.unwrap_or(0.0).to_radians().sin_cos();
        let rotated = corners.into_iter().map(|c| {
            // Counter-clockwise on screen with Y down
            Point::new(
                c.x() * cos + c.y() * sin,
                -c.x() * sin + c.y() * cos,
            )
            .add_point(position)
        });

        Bounds::from_points(rotated).unwrap_or_default()
    }
}

/// TextManager handles text measurement and font operations
/// It maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the size of text in pixels using cosmic-text.
    ///
    /// Falls back to an estimate from character count when no font could
    /// shape the text.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);
        let line_count = text.lines().count().max(1);

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, estimating text size");
            return estimate_size(text, font_size_px, line_height, line_count);
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 {
            return estimate_size(text, font_size_px, line_height, line_count);
        }

        Size::new(max_width, total_height.max(line_height))
    }
}

fn estimate_size(text: &str, font_size_px: f32, line_height: f32, line_count: usize) -> Size {
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    Size::new(
        longest as f32 * font_size_px * 0.55,
        line_height * line_count as f32,
    )
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_anchor_for_offset() {
        assert_eq!(TextAnchor::for_offset(10.0), TextAnchor::Start);
        assert_eq!(TextAnchor::for_offset(-10.0), TextAnchor::End);
        assert_eq!(TextAnchor::for_offset(0.0), TextAnchor::Middle);
        assert_eq!(TextAnchor::for_offset(1e-6), TextAnchor::Middle);
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        assert_eq!(def.font_size(), 12);
        assert_eq!(def.font_family(), "Arial");
        assert!(def.color().is_none());

        def.set_font_size(20);
        def.set_font_family("monospace");
        def.set_color(Some(Color::new("navy").unwrap()));
        assert_eq!(def.font_size(), 20);
        assert_eq!(def.font_family(), "monospace");
        assert!(def.color().is_some());
    }

    #[test]
    fn test_text_calculate_size_empty() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "").calculate_size();
        assert_approx_eq!(f32, size.width(), 0.0);
        assert_approx_eq!(f32, size.height(), 0.0);
    }

    #[test]
    fn test_text_calculate_size_multiline_is_taller() {
        let def = TextDefinition::new();
        let single = Text::new(&def, "Line 1").calculate_size();
        let multi = Text::new(&def, "Line 1\nLine 2\nLine 3").calculate_size();
        assert!(single.width() > 0.0);
        assert!(multi.height() > single.height());
    }

    #[test]
    fn test_estimate_size() {
        let size = estimate_size("abcd\nab", 10.0, 12.0, 2);
        assert_approx_eq!(f32, size.width(), 22.0);
        assert_approx_eq!(f32, size.height(), 24.0);
    }

    #[test]
    fn test_render_sets_anchor_and_rotation() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "west")
            .with_anchor(TextAnchor::End)
            .with_rotation(Some(30.0));

        let document = text
            .render_to_layers(Point::new(5.0, 7.0))
            .render()
            .into_iter()
            .fold(svg::Document::new(), |doc, node| doc.add(node))
            .to_string();

        assert!(document.contains("text-anchor=\"end\""));
        assert!(document.contains("rotate(-30 5 7)"));
        assert!(document.contains("west"));
    }

    #[test]
    fn test_render_one_tspan_per_line() {
        let def = TextDefinition::new();
        let document = Text::new(&def, "one\ntwo\nthree")
            .render_to_layers(Point::default())
            .render()
            .into_iter()
            .fold(svg::Document::new(), |doc, node| doc.add(node))
            .to_string();
        assert_eq!(document.matches("<tspan").count(), 3);
    }

    #[test]
    fn test_bounds_follow_anchor() {
        let def = TextDefinition::new();
        let start = Text::new(&def, "label").with_anchor(TextAnchor::Start);
        let end = Text::new(&def, "label").with_anchor(TextAnchor::End);
        let origin = Point::new(100.0, 100.0);

        let start_bounds = start.bounds(origin);
        let end_bounds = end.bounds(origin);
        assert_approx_eq!(f32, start_bounds.min_x(), 100.0, epsilon = 1e-3);
        assert_approx_eq!(f32, end_bounds.max_x(), 100.0, epsilon = 1e-3);
        assert_approx_eq!(
            f32,
            start_bounds.width(),
            end_bounds.width(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_bounds_rotated_quarter_turn_swaps_extent() {
        let def = TextDefinition::new();
        let flat = Text::new(&def, "vertical").bounds(Point::default());
        let turned = Text::new(&def, "vertical")
            .with_rotation(Some(90.0))
            .bounds(Point::default());
        assert_approx_eq!(f32, flat.width(), turned.height(), epsilon = 1e-2);
        assert_approx_eq!(f32, flat.height(), turned.width(), epsilon = 1e-2);
    }
}
