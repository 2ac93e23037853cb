//! Shared fill, transparency, outline and visibility of filled elements.

use crate::{color::Color, draw::StrokeDefinition};

/// Visual style shared by arches and ribbons.
///
/// # Examples
///
/// ```
/// use chordal_core::{color::Color, draw::ElementStyle};
///
/// let mut style = ElementStyle::new(Color::new("teal").unwrap());
/// style.set_alpha(0.2);
/// style.hide();
/// assert!(!style.is_visible());
/// assert_eq!(style.alpha(), 0.2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    fill: Color,
    alpha: f32,
    stroke: Option<StrokeDefinition>,
    visible: bool,
}

impl ElementStyle {
    /// Creates an opaque, visible style without outline.
    pub fn new(fill: Color) -> Self {
        Self {
            fill,
            alpha: 1.0,
            stroke: None,
            visible: true,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Effective fill opacity: the element alpha times the color's own alpha.
    pub fn fill_opacity(&self) -> f32 {
        self.alpha * self.fill.alpha()
    }

    pub fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    /// Sets the element alpha, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.set_alpha(alpha);
        self
    }

    pub fn with_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::new(Color::default())
    }
}

/// Apply fill, opacity and optional outline of an [`ElementStyle`] to an SVG element.
#[macro_export]
macro_rules! apply_style {
    ($element:expr, $style:expr) => {{
        let elem = $element
            .set("fill", $style.fill().to_string())
            .set("fill-opacity", $style.fill_opacity());

        match $style.stroke() {
            Some(stroke) => $crate::apply_stroke!(elem, stroke),
            None => elem.set("stroke", "none"),
        }
    }};
}
