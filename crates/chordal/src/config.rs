//! Configuration types for Chordal diagram rendering.
//!
//! All types implement [`serde::Deserialize`], so a whole configuration can
//! be read from a TOML file. Every field has a default; an empty file is a
//! valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Root combining the sections below.
//! - [`LayoutConfig`] - Circle geometry, ordering and entity groups.
//! - [`StyleConfig`] - Colors, alphas and strokes of arches and ribbons.
//! - [`LabelConfig`] - Placement and typography of arch labels.
//!
//! # Example
//!
//! ```
//! # use chordal::config::{AppConfig, LayoutConfig};
//! let config = AppConfig::default()
//!     .with_layout(LayoutConfig::default().with_radius(150.0).with_arch_gap(3.0));
//! assert_eq!(config.layout().radius(), 150.0);
//! assert!(config.validate().is_ok());
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use chordal_core::{
    color::{Color, Palette},
    draw::{LeaderPlacement, StrokeDefinition, StrokeStyle, TextDefinition},
    identifier::Id,
    semantic::{ArchOrder, RibbonColorSource},
};

/// Top-level configuration combining layout, style and label settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Label configuration section.
    #[serde(default)]
    label: LabelConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, label: LabelConfig) -> Self {
        Self {
            layout,
            style,
            label,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the label configuration.
    pub fn label(&self) -> &LabelConfig {
        &self.label
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: LabelConfig) -> Self {
        self.label = label;
        self
    }

    /// Checks every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()?;
        self.label.validate()
    }
}

/// A named set of entities drawn together on the group track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    name: String,

    #[serde(default)]
    members: Vec<String>,

    /// Fill of the group band; a neutral gray when unset.
    #[serde(default)]
    color: Option<String>,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member ids in the order they were listed.
    pub fn members(&self) -> Vec<Id> {
        self.members.iter().map(Id::from).collect()
    }

    /// Returns the parsed band [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn color(&self) -> Result<Option<Color>, String> {
        parse_optional_color(self.color.as_deref())
            .map_err(|err| format!("Invalid color for group `{}`: {err}", self.name))
    }
}

/// Geometry of the circle, entity ordering and grouping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Outer radius of the entity arches.
    radius: f32,
    /// Radial thickness of every arch.
    arch_height: f32,
    /// Angle in degrees left empty after every arch.
    arch_gap: f32,
    /// Total angle in degrees available to arches and gaps.
    max_angle: f32,
    /// Angle given to entities whose total weight is zero.
    min_arch_angle: f32,
    /// Start angle of the first arch, degrees counter-clockwise from the positive X axis.
    rotation: f32,
    /// Gap between the inner edge of an arch and ribbons leaving it.
    origin_margin: f32,
    /// Gap between the inner edge of an arch and ribbons arriving at it.
    destination_margin: f32,
    /// How far from the center self-relations bend, as a fraction of the chord midpoint distance.
    self_loop_bend: f32,
    /// Empty space around the drawing.
    padding: f32,
    order: ArchOrder,
    /// Ids listed first when `order = "custom"`.
    custom_order: Vec<String>,
    /// Sum relations that share the same source and target.
    merge_duplicates: bool,
    groups: Vec<GroupConfig>,
    /// Distance between the entity track and the group track.
    group_gap: f32,
    /// Radial thickness of the group track.
    group_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            arch_height: 20.0,
            arch_gap: 5.0,
            max_angle: 360.0,
            min_arch_angle: 1.0,
            rotation: 0.0,
            origin_margin: 10.0,
            destination_margin: 10.0,
            self_loop_bend: 0.5,
            padding: 20.0,
            order: ArchOrder::default(),
            custom_order: Vec::new(),
            merge_duplicates: false,
            groups: Vec::new(),
            group_gap: 6.0,
            group_height: 18.0,
        }
    }
}

impl LayoutConfig {
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn arch_height(&self) -> f32 {
        self.arch_height
    }

    pub fn arch_gap(&self) -> f32 {
        self.arch_gap
    }

    pub fn max_angle(&self) -> f32 {
        self.max_angle
    }

    pub fn min_arch_angle(&self) -> f32 {
        self.min_arch_angle
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn origin_margin(&self) -> f32 {
        self.origin_margin
    }

    pub fn destination_margin(&self) -> f32 {
        self.destination_margin
    }

    pub fn self_loop_bend(&self) -> f32 {
        self.self_loop_bend
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn order(&self) -> ArchOrder {
        self.order
    }

    pub fn custom_order(&self) -> Vec<Id> {
        self.custom_order.iter().map(Id::from).collect()
    }

    pub fn merge_duplicates(&self) -> bool {
        self.merge_duplicates
    }

    pub fn groups(&self) -> &[GroupConfig] {
        &self.groups
    }

    pub fn group_gap(&self) -> f32 {
        self.group_gap
    }

    pub fn group_height(&self) -> f32 {
        self.group_height
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_arch_height(mut self, height: f32) -> Self {
        self.arch_height = height;
        self
    }

    pub fn with_arch_gap(mut self, gap: f32) -> Self {
        self.arch_gap = gap;
        self
    }

    pub fn with_max_angle(mut self, max_angle: f32) -> Self {
        self.max_angle = max_angle;
        self
    }

    pub fn with_min_arch_angle(mut self, min_arch_angle: f32) -> Self {
        self.min_arch_angle = min_arch_angle;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_margins(mut self, origin: f32, destination: f32) -> Self {
        self.origin_margin = origin;
        self.destination_margin = destination;
        self
    }

    pub fn with_self_loop_bend(mut self, bend: f32) -> Self {
        self.self_loop_bend = bend;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_order(mut self, order: ArchOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the custom id order and switches ordering to [`ArchOrder::Custom`].
    pub fn with_custom_order(mut self, ids: &[&str]) -> Self {
        self.order = ArchOrder::Custom;
        self.custom_order = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    pub fn with_merge_duplicates(mut self, merge: bool) -> Self {
        self.merge_duplicates = merge;
        self
    }

    pub fn with_group(mut self, group: GroupConfig) -> Self {
        self.groups.push(group);
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_finite(
            "layout",
            &[
                ("radius", self.radius),
                ("arch_height", self.arch_height),
                ("arch_gap", self.arch_gap),
                ("max_angle", self.max_angle),
                ("min_arch_angle", self.min_arch_angle),
                ("rotation", self.rotation),
                ("origin_margin", self.origin_margin),
                ("destination_margin", self.destination_margin),
                ("self_loop_bend", self.self_loop_bend),
                ("padding", self.padding),
                ("group_gap", self.group_gap),
                ("group_height", self.group_height),
            ],
        )?;
        if self.radius <= 0.0 {
            return Err(format!("layout.radius must be positive, got {}", self.radius));
        }
        if self.arch_height < 0.0 || self.arch_height > self.radius {
            return Err(format!(
                "layout.arch_height must lie in [0, radius], got {}",
                self.arch_height
            ));
        }
        if self.max_angle <= 0.0 || self.max_angle > 360.0 {
            return Err(format!(
                "layout.max_angle must lie in (0, 360], got {}",
                self.max_angle
            ));
        }
        if self.arch_gap < 0.0 {
            return Err(format!("layout.arch_gap must not be negative, got {}", self.arch_gap));
        }
        if self.min_arch_angle < 0.0 {
            return Err(format!(
                "layout.min_arch_angle must not be negative, got {}",
                self.min_arch_angle
            ));
        }
        if !(0.0..=1.0).contains(&self.self_loop_bend) {
            return Err(format!(
                "layout.self_loop_bend must lie in [0, 1], got {}",
                self.self_loop_bend
            ));
        }
        if self.origin_margin < 0.0 || self.destination_margin < 0.0 {
            return Err("layout ribbon margins must not be negative".to_string());
        }
        if self.padding < 0.0 || self.group_gap < 0.0 || self.group_height < 0.0 {
            return Err("layout.padding, group_gap and group_height must not be negative".to_string());
        }
        for group in &self.groups {
            group.color()?;
        }
        Ok(())
    }
}

/// Colors, transparency and outlines of arches and ribbons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    background_color: Option<String>,
    /// Colors cycled over arches in display order.
    palette: Option<Vec<String>>,
    /// Per-entity colors, overriding the palette.
    colors: BTreeMap<String, String>,
    arch_alpha: f32,
    ribbon_alpha: f32,
    ribbon_color: RibbonColorSource,
    stroke_color: Option<String>,
    stroke_width: f32,
    /// `solid`, `dashed`, `dotted` or a raw dash pattern such as `"10,5"`.
    stroke_style: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            palette: None,
            colors: BTreeMap::new(),
            arch_alpha: 1.0,
            ribbon_alpha: 0.6,
            ribbon_color: RibbonColorSource::default(),
            stroke_color: None,
            stroke_width: 1.0,
            stroke_style: "solid".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional_color(self.background_color.as_deref())
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured palette, or the default one.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or holds an invalid color.
    pub fn palette(&self) -> Result<Palette, String> {
        match &self.palette {
            Some(colors) => Palette::from_strings(colors.as_slice())
                .map_err(|err| format!("Invalid palette in config: {err}")),
            None => Ok(Palette::default()),
        }
    }

    /// Returns the per-entity color overrides.
    ///
    /// # Errors
    ///
    /// Returns an error naming the entity whose color cannot be parsed.
    pub fn entity_colors(&self) -> Result<Vec<(Id, Color)>, String> {
        self.colors
            .iter()
            .map(|(id, color)| {
                Color::new(color)
                    .map(|color| (Id::new(id), color))
                    .map_err(|err| format!("Invalid color for `{id}` in config: {err}"))
            })
            .collect()
    }

    pub fn arch_alpha(&self) -> f32 {
        self.arch_alpha
    }

    pub fn ribbon_alpha(&self) -> f32 {
        self.ribbon_alpha
    }

    pub fn ribbon_color(&self) -> RibbonColorSource {
        self.ribbon_color
    }

    /// Returns the outline drawn around arches and ribbons, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stroke color or style cannot be parsed.
    pub fn stroke(&self) -> Result<Option<StrokeDefinition>, String> {
        let style: StrokeStyle = self
            .stroke_style
            .parse()
            .map_err(|err| format!("Invalid stroke style in config: {err}"))?;
        Ok(parse_optional_color(self.stroke_color.as_deref())
            .map_err(|err| format!("Invalid stroke color in config: {err}"))?
            .map(|color| {
                let mut stroke = StrokeDefinition::new(color, self.stroke_width);
                stroke.set_style(style);
                stroke
            }))
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_palette(mut self, colors: &[&str]) -> Self {
        self.palette = Some(colors.iter().map(|c| (*c).to_string()).collect());
        self
    }

    pub fn with_color(mut self, id: &str, color: &str) -> Self {
        self.colors.insert(id.to_string(), color.to_string());
        self
    }

    pub fn with_alphas(mut self, arch_alpha: f32, ribbon_alpha: f32) -> Self {
        self.arch_alpha = arch_alpha;
        self.ribbon_alpha = ribbon_alpha;
        self
    }

    pub fn with_ribbon_color(mut self, source: RibbonColorSource) -> Self {
        self.ribbon_color = source;
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.stroke_color = Some(color.into());
        self.stroke_width = width;
        self
    }

    pub fn with_stroke_style(mut self, style: impl Into<String>) -> Self {
        self.stroke_style = style.into();
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_finite(
            "style",
            &[
                ("arch_alpha", self.arch_alpha),
                ("ribbon_alpha", self.ribbon_alpha),
                ("stroke_width", self.stroke_width),
            ],
        )?;
        for (name, alpha) in [
            ("arch_alpha", self.arch_alpha),
            ("ribbon_alpha", self.ribbon_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(format!("style.{name} must lie in [0, 1], got {alpha}"));
            }
        }
        if self.stroke_width < 0.0 {
            return Err(format!(
                "style.stroke_width must not be negative, got {}",
                self.stroke_width
            ));
        }
        self.background_color()?;
        self.palette()?;
        self.entity_colors()?;
        self.stroke()?;
        Ok(())
    }
}

/// Placement and typography of arch labels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    hidden: bool,
    /// Rotate labels to follow the radius.
    rotate: bool,
    /// Draw label text in its arch's color.
    colored: bool,
    /// Distance between the outer edge of the arches and the label.
    gap: f32,
    /// Break label text after this many words; `0` never breaks.
    wrap_words: usize,
    /// Move labels out to the side and join them to their arch with a leader line.
    arrows: bool,
    arrow_x_factor: f32,
    arrow_y_factor: f32,
    font_family: String,
    font_size: u16,
    color: Option<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            hidden: false,
            rotate: true,
            colored: false,
            gap: 6.0,
            wrap_words: 0,
            arrows: false,
            arrow_x_factor: 1.2,
            arrow_y_factor: 1.2,
            font_family: "Arial".to_string(),
            font_size: 12,
            color: None,
        }
    }
}

impl LabelConfig {
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn rotate(&self) -> bool {
        self.rotate
    }

    pub fn colored(&self) -> bool {
        self.colored
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn wrap_words(&self) -> usize {
        self.wrap_words
    }

    pub fn arrows(&self) -> bool {
        self.arrows
    }

    /// Where arrowed labels are placed, relative to the circle radius.
    pub fn leader(&self) -> LeaderPlacement {
        LeaderPlacement::new(self.arrow_x_factor, self.arrow_y_factor)
    }

    /// Builds the text definition shared by all labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the label color cannot be parsed.
    pub fn text_definition(&self) -> Result<TextDefinition, String> {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition.set_font_size(self.font_size);
        definition.set_color(
            parse_optional_color(self.color.as_deref())
                .map_err(|err| format!("Invalid label color in config: {err}"))?,
        );
        Ok(definition)
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_wrap_words(mut self, words: usize) -> Self {
        self.wrap_words = words;
        self
    }

    pub fn with_arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: u16) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_finite(
            "label",
            &[
                ("gap", self.gap),
                ("arrow_x_factor", self.arrow_x_factor),
                ("arrow_y_factor", self.arrow_y_factor),
            ],
        )?;
        if self.font_size == 0 {
            return Err("label.font_size must be positive".to_string());
        }
        if self.gap < 0.0 {
            return Err(format!("label.gap must not be negative, got {}", self.gap));
        }
        self.text_definition().map(|_| ())
    }
}

fn require_finite(section: &str, values: &[(&str, f32)]) -> Result<(), String> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(format!("{section}.{name} must be a finite number, got {value}")),
        None => Ok(()),
    }
}

fn parse_optional_color(color: Option<&str>) -> Result<Option<Color>, String> {
    color.map(Color::new).transpose()
}
