//! Outline strokes for arches, ribbons and leader lines.
//!
//! - [`StrokeDefinition`]: color, width and dash pattern
//! - [`StrokeStyle`]: solid or patterned lines
//! - [`apply_stroke!`](crate::apply_stroke!): applies a definition to an SVG element
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"10,5,2,5"` |

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// # SVG Mapping
///
/// - `Solid`: no dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `Custom(pattern)`: the provided pattern string
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Raw SVG dasharray, e.g. `"10,5,2,3"`
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern if is_dash_pattern(pattern) => Ok(Self::Custom(pattern.to_string())),
            _ => Err(format!(
                "invalid stroke style `{s}`, expected solid, dashed, dotted or a dash pattern like `10,5`"
            )),
        }
    }
}

fn is_dash_pattern(s: &str) -> bool {
    !s.is_empty()
        && s.split([',', ' '])
            .filter(|part| !part.is_empty())
            .all(|part| part.parse::<f32>().is_ok_and(|v| v >= 0.0))
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or `None` for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for outlines and lines.
///
/// # Examples
///
/// ```
/// use chordal_core::draw::{StrokeDefinition, StrokeStyle};
/// use chordal_core::color::Color;
///
/// let mut stroke = StrokeDefinition::new(Color::new("white").unwrap(), 0.5);
/// stroke.set_style(StrokeStyle::Dashed);
/// assert_eq!(stroke.width(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use chordal_core::draw::StrokeDefinition;
/// use chordal_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let path = svg_element::Path::new().set("d", "M 0 0 L 10 10");
/// let path = chordal_core::apply_stroke!(path, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linejoin", "round");

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
