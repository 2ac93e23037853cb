//! Per-element style state of a chord diagram.
//!
//! Styles live independently of geometry: arches are keyed by entity id,
//! ribbons by relation index and labels by entity id. Layout reads them
//! every time it runs, so changes show up on the next render.

use std::collections::HashMap;

use chordal_core::{
    color::Color,
    draw::{ElementStyle, TextDefinition},
    identifier::Id,
    semantic::Dataset,
};

use crate::config::AppConfig;

/// Alphas applied to everything that is not highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    arch_alpha: f32,
    ribbon_alpha: f32,
}

impl Fade {
    pub fn new(arch_alpha: f32, ribbon_alpha: f32) -> Self {
        Self {
            arch_alpha,
            ribbon_alpha,
        }
    }

    pub fn arch_alpha(&self) -> f32 {
        self.arch_alpha
    }

    pub fn ribbon_alpha(&self) -> f32 {
        self.ribbon_alpha
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new(0.2, 0.2)
    }
}

/// How one arch label is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    text: String,
    visible: bool,
    rotate: bool,
    rotation: Option<f32>,
    wrap_words: usize,
    arrow: bool,
    colored: bool,
    definition: TextDefinition,
}

impl LabelStyle {
    pub fn new(text: impl Into<String>, definition: TextDefinition) -> Self {
        Self {
            text: text.into(),
            visible: true,
            rotate: true,
            rotation: None,
            wrap_words: 0,
            arrow: false,
            colored: false,
            definition,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
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

    pub fn rotate(&self) -> bool {
        self.rotate
    }

    /// Whether the label turns to follow the radius.
    pub fn set_rotate(&mut self, rotate: bool) {
        self.rotate = rotate;
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    /// Pins the label to a fixed rotation in degrees.
    pub fn set_rotation(&mut self, rotation: Option<f32>) {
        self.rotation = rotation;
    }

    pub fn wrap_words(&self) -> usize {
        self.wrap_words
    }

    pub fn set_wrap_words(&mut self, words: usize) {
        self.wrap_words = words;
    }

    pub fn has_arrow(&self) -> bool {
        self.arrow
    }

    pub fn set_arrow(&mut self, arrow: bool) {
        self.arrow = arrow;
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    /// Draw the text in the color of its arch instead of the label color.
    pub fn set_colored(&mut self, colored: bool) {
        self.colored = colored;
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn definition_mut(&mut self) -> &mut TextDefinition {
        &mut self.definition
    }
}

/// Every arch, ribbon and label style of one diagram.
#[derive(Debug, Clone)]
pub(crate) struct StyleSheet {
    arches: HashMap<Id, ElementStyle>,
    ribbons: Vec<ElementStyle>,
    labels: HashMap<Id, LabelStyle>,
}

impl StyleSheet {
    /// Builds the initial styles from configuration.
    ///
    /// Arches take their configured color, or the palette color for their
    /// position in `order`. Ribbons take the color of the arch picked by
    /// `style.ribbon_color`.
    pub fn from_config(
        dataset: &Dataset,
        order: &[Id],
        config: &AppConfig,
    ) -> Result<Self, String> {
        let style = config.style();
        let palette = style.palette()?;
        let overrides: HashMap<Id, Color> = style.entity_colors()?.into_iter().collect();
        let stroke = style.stroke()?;

        let arches: HashMap<Id, ElementStyle> = order
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let fill = overrides
                    .get(id)
                    .copied()
                    .unwrap_or_else(|| palette.color_at(index));
                let arch_style = ElementStyle::new(fill)
                    .with_alpha(style.arch_alpha())
                    .with_stroke(stroke.clone());
                (*id, arch_style)
            })
            .collect();

        let ribbons = dataset
            .relations()
            .iter()
            .map(|relation| {
                let owner = style.ribbon_color().pick(relation);
                let fill = arches
                    .get(&owner)
                    .map(ElementStyle::fill)
                    .unwrap_or_default();
                ElementStyle::new(fill)
                    .with_alpha(style.ribbon_alpha())
                    .with_stroke(stroke.clone())
            })
            .collect();

        let label_config = config.label();
        let definition = label_config.text_definition()?;
        let labels = order
            .iter()
            .map(|id| {
                let mut label = LabelStyle::new(id.to_string(), definition.clone());
                label.set_rotate(label_config.rotate());
                label.set_wrap_words(label_config.wrap_words());
                label.set_arrow(label_config.arrows());
                label.set_colored(label_config.colored());
                if label_config.hidden() {
                    label.hide();
                }
                (*id, label)
            })
            .collect();

        Ok(Self {
            arches,
            ribbons,
            labels,
        })
    }

    pub fn arch(&self, id: Id) -> Option<&ElementStyle> {
        self.arches.get(&id)
    }

    pub fn arch_mut(&mut self, id: Id) -> Option<&mut ElementStyle> {
        self.arches.get_mut(&id)
    }

    pub fn arches_mut(&mut self) -> impl Iterator<Item = (Id, &mut ElementStyle)> {
        self.arches.iter_mut().map(|(id, style)| (*id, style))
    }

    pub fn ribbon(&self, index: usize) -> Option<&ElementStyle> {
        self.ribbons.get(index)
    }

    pub fn ribbon_mut(&mut self, index: usize) -> Option<&mut ElementStyle> {
        self.ribbons.get_mut(index)
    }

    pub fn ribbons_mut(&mut self) -> impl Iterator<Item = &mut ElementStyle> {
        self.ribbons.iter_mut()
    }

    pub fn label(&self, id: Id) -> Option<&LabelStyle> {
        self.labels.get(&id)
    }

    pub fn label_mut(&mut self, id: Id) -> Option<&mut LabelStyle> {
        self.labels.get_mut(&id)
    }

    pub fn labels_mut(&mut self) -> impl Iterator<Item = (Id, &mut LabelStyle)> {
        self.labels.iter_mut().map(|(id, label)| (*id, label))
    }
}
