//! Layout engine for chord diagrams.
//!
//! Turns validated relations into positioned drawables. The whole layout is a
//! pure function of the relations, the configuration and the current style
//! state, and is rebuilt on every render.
//!
//! # Pipeline Position
//!
//! ```text
//! Dataset + display order
//!     ↓ allocate arch angles
//! Entity track (+ group track)
//!     ↓ tile arches with ribbon ends
//! Ribbons
//!     ↓ place labels
//! ChordLayout
//!     ↓ export
//! SVG
//! ```

mod allocation;
mod track;

use std::collections::{HashMap, HashSet};

use log::{debug, info, trace};

use chordal_core::{
    color::Color,
    draw::{
        Arch, ArchLabel, Bend, Drawable, ElementStyle, LayeredOutput, Ribbon, RibbonEnd, Text,
        TextAnchor, TextDefinition,
    },
    geometry::{Bounds, Insets, Point, Size, normalize_degrees, polar},
    identifier::Id,
    semantic::{Dataset, Entity},
};

pub use allocation::AngularSpan;
pub use track::{PlacedArch, Track};

pub(crate) use allocation::display_order;

use crate::{config::AppConfig, error::ChordError, style::StyleSheet};
use allocation::{AllocationParams, allocate_arches, allocate_ribbon_ends};

const GROUP_FILL: &str = "#b8b8b8";

/// Everything a layout is computed from.
pub(crate) struct LayoutInput<'a> {
    pub dataset: &'a Dataset,
    pub order: &'a [Id],
    pub config: &'a AppConfig,
    pub styles: &'a StyleSheet,
    pub rotation: f32,
    pub bend_offset: Point,
}

/// A ribbon and the index of the relation it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRibbon {
    relation: usize,
    ribbon: Ribbon,
}

impl PlacedRibbon {
    pub fn relation(&self) -> usize {
        self.relation
    }

    pub fn ribbon(&self) -> &Ribbon {
        &self.ribbon
    }
}

/// A label and the entity it names.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    id: Id,
    label: ArchLabel,
}

impl PlacedLabel {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &ArchLabel {
        &self.label
    }
}

/// A group name written along the middle of its band.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupName {
    text: String,
    mid_angle: f32,
    radius: f32,
    definition: TextDefinition,
    visible: bool,
}

impl GroupName {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tangential rotation, flipped on the lower half to stay upright.
    pub fn rotation(&self) -> f32 {
        let angle = normalize_degrees(self.mid_angle);
        if angle > 180.0 {
            angle + 90.0
        } else {
            angle - 90.0
        }
    }

    fn text_element(&self) -> Text<'_> {
        Text::new(&self.definition, &self.text)
            .with_anchor(TextAnchor::Middle)
            .with_rotation(Some(self.rotation()))
    }
}

impl Drawable for GroupName {
    /// `position` is the circle center.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        if !self.visible {
            return LayeredOutput::new();
        }
        self.text_element()
            .render_to_layers(polar(position, self.radius, self.mid_angle))
    }

    fn bounds(&self, position: Point) -> Bounds {
        self.text_element()
            .bounds(polar(position, self.radius, self.mid_angle))
    }
}

/// Positioned arches, ribbons and labels of one chord diagram.
#[derive(Debug, Clone)]
pub struct ChordLayout {
    center: Point,
    entities: Track,
    groups: Option<Track>,
    group_names: Vec<GroupName>,
    ribbons: Vec<PlacedRibbon>,
    labels: Vec<PlacedLabel>,
    padding: f32,
}

impl ChordLayout {
    pub(crate) fn compute(input: &LayoutInput<'_>) -> Result<Self, ChordError> {
        info!(entities = input.order.len(), relations = input.dataset.relations().len(); "Computing layout");
        let layout_config = input.config.layout();
        let center = Point::default();
        if !input.bend_offset.x().is_finite() || !input.bend_offset.y().is_finite() {
            return Err(ChordError::Layout(format!(
                "ribbon bend center must be finite, got {:?}",
                input.bend_offset
            )));
        }

        let weights: Vec<f64> = input
            .order
            .iter()
            .map(|id| input.dataset.entity(*id).map_or(0.0, Entity::weight))
            .collect();
        let params = AllocationParams::from_config(layout_config, input.rotation);
        let spans = allocate_arches(&weights, &params).map_err(ChordError::Layout)?;

        let mut entities = Track::new(layout_config.radius(), layout_config.arch_height());
        let mut span_by_id: HashMap<Id, AngularSpan> = HashMap::with_capacity(spans.len());
        for (id, span) in input.order.iter().zip(&spans) {
            let style = input.styles.arch(*id).cloned().unwrap_or_default();
            entities.push(*id, *span, style);
            span_by_id.insert(*id, *span);
        }

        let ribbons = build_ribbons(input, &entities, &span_by_id)?;
        let (groups, group_names) = build_groups(input, &span_by_id)?;

        let label_radius = groups.as_ref().map_or(entities.radius(), Track::radius);
        let labels = build_labels(input, &entities, label_radius);

        let layout = Self {
            center,
            entities,
            groups,
            group_names,
            ribbons,
            labels,
            padding: layout_config.padding(),
        };
        debug!(
            arches = layout.entities.len(),
            ribbons = layout.ribbons.len(),
            labels = layout.labels.len();
            "Layout computed"
        );
        trace!(layout:?; "Full layout");

        Ok(layout)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// The ring of entity arches.
    pub fn entity_track(&self) -> &Track {
        &self.entities
    }

    /// The ring of group bands, if groups are configured.
    pub fn group_track(&self) -> Option<&Track> {
        self.groups.as_ref()
    }

    pub fn group_names(&self) -> &[GroupName] {
        &self.group_names
    }

    pub fn arch(&self, id: Id) -> Option<&Arch> {
        self.entities.get(id)
    }

    pub fn ribbons(&self) -> &[PlacedRibbon] {
        &self.ribbons
    }

    /// The ribbon drawing relation `index`.
    pub fn ribbon(&self, index: usize) -> Option<&Ribbon> {
        self.ribbons
            .iter()
            .find(|placed| placed.relation == index)
            .map(PlacedRibbon::ribbon)
    }

    pub fn labels(&self) -> &[PlacedLabel] {
        &self.labels
    }

    pub fn label(&self, id: Id) -> Option<&ArchLabel> {
        self.labels
            .iter()
            .find(|placed| placed.id == id)
            .map(PlacedLabel::label)
    }

    /// All drawables sorted into render layers.
    pub fn to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for placed in &self.ribbons {
            output.merge(placed.ribbon.render_to_layers(self.center));
        }
        output.merge(self.entities.render_to_layers(self.center));
        if let Some(groups) = &self.groups {
            output.merge(groups.render_to_layers(self.center));
        }
        for name in &self.group_names {
            output.merge(name.render_to_layers(self.center));
        }
        for placed in &self.labels {
            output.merge(placed.label.render_to_layers(self.center));
        }
        output
    }

    /// Bounds of both tracks and every visible ribbon and label, including
    /// padding.
    pub fn bounds(&self) -> Bounds {
        let tracks = self
            .entities
            .bounds(self.center)
            .into_iter()
            .chain(self.groups.as_ref().and_then(|groups| groups.bounds(self.center)));
        let ribbons = self
            .ribbons
            .iter()
            .filter(|placed| placed.ribbon.style().is_visible())
            .map(|placed| placed.ribbon.bounds(self.center));
        let labels = self
            .labels
            .iter()
            .filter(|placed| placed.label.is_visible())
            .map(|placed| placed.label.bounds(self.center));
        let names = self
            .group_names
            .iter()
            .filter(|name| name.visible)
            .map(|name| name.bounds(self.center));

        tracks
            .chain(ribbons)
            .chain(labels)
            .chain(names)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_else(|| Bounds::new_from_center(self.center, Size::default()))
            .add_padding(Insets::uniform(self.padding))
    }
}

fn build_ribbons(
    input: &LayoutInput<'_>,
    entities: &Track,
    span_by_id: &HashMap<Id, AngularSpan>,
) -> Result<Vec<PlacedRibbon>, ChordError> {
    let layout_config = input.config.layout();
    let ends = allocate_ribbon_ends(input.dataset, span_by_id).map_err(ChordError::Layout)?;

    let inner = entities.inner_radius();
    let origin_radius = (inner - layout_config.origin_margin()).max(0.0);
    let destination_radius = (inner - layout_config.destination_margin()).max(0.0);

    let ribbons = input
        .dataset
        .relations()
        .iter()
        .zip(ends)
        .enumerate()
        .map(|(index, (relation, ends))| {
            let bend = if relation.is_self_loop() {
                Bend::Chord(layout_config.self_loop_bend())
            } else {
                Bend::Offset(input.bend_offset)
            };
            let ribbon = Ribbon::new(
                RibbonEnd::new(ends.origin.start(), ends.origin.end(), origin_radius),
                RibbonEnd::new(
                    ends.destination.start(),
                    ends.destination.end(),
                    destination_radius,
                ),
            )
            .with_bend(bend)
            .with_style(input.styles.ribbon(index).cloned().unwrap_or_default());

            PlacedRibbon {
                relation: index,
                ribbon,
            }
        })
        .collect();

    Ok(ribbons)
}

fn build_groups(
    input: &LayoutInput<'_>,
    span_by_id: &HashMap<Id, AngularSpan>,
) -> Result<(Option<Track>, Vec<GroupName>), ChordError> {
    let layout_config = input.config.layout();
    if layout_config.groups().is_empty() {
        return Ok((None, Vec::new()));
    }

    let height = layout_config.group_height();
    let radius = layout_config.radius() + layout_config.group_gap() + height;
    let mut track = Track::new(radius, height);
    let mut names = Vec::new();

    let label_config = input.config.label();
    let mut definition = label_config.text_definition().map_err(ChordError::Config)?;
    let font_size = definition.font_size().min((height * 0.7) as u16).max(1);
    definition.set_font_size(font_size);

    let default_fill = Color::new(GROUP_FILL).map_err(ChordError::Config)?;
    let mut claimed: HashSet<Id> = HashSet::new();

    for group in layout_config.groups() {
        let listed: HashSet<Id> = group.members().into_iter().collect();
        let members: Vec<AngularSpan> = input
            .order
            .iter()
            .filter(|id| listed.contains(*id) && claimed.insert(**id))
            .filter_map(|id| span_by_id.get(id).copied())
            .collect();
        let (Some(first), Some(last)) = (members.first(), members.last()) else {
            debug!(group = group.name(); "Skipping group without entities");
            continue;
        };

        let end = first.start() + normalize_degrees(last.start() - first.start()) + last.span();
        let span = AngularSpan::new(first.start(), end);
        let fill = group.color().map_err(ChordError::Config)?.unwrap_or(default_fill);
        let style = ElementStyle::new(fill).with_alpha(input.config.style().arch_alpha());
        track.push(Id::new(group.name()), span, style);

        names.push(GroupName {
            text: group.name().to_string(),
            mid_angle: first.start() + span.span() / 2.0,
            radius: radius - height / 2.0,
            definition: definition.clone(),
            visible: !label_config.hidden(),
        });
    }

    Ok((Some(track), names))
}

fn build_labels(input: &LayoutInput<'_>, entities: &Track, radius: f32) -> Vec<PlacedLabel> {
    let label_config = input.config.label();

    entities
        .arches()
        .iter()
        .filter_map(|placed| {
            let style = input.styles.label(placed.id())?;
            let arch = placed.arch();

            let mut label = ArchLabel::new(style.text(), arch.mid_angle(), radius);
            label.set_gap(label_config.gap());
            label.set_rotate(style.rotate());
            label.set_rotation_override(style.rotation());
            label.set_wrap_words(style.wrap_words());
            if style.has_arrow() {
                label.set_leader(Some(label_config.leader()));
            }
            *label.definition_mut() = style.definition().clone();
            if style.is_colored() {
                label.definition_mut().set_color(Some(arch.style().fill()));
            }
            if !style.is_visible() {
                label.hide();
            }

            Some(PlacedLabel {
                id: placed.id(),
                label,
            })
        })
        .collect()
}
