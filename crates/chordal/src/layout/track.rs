//! Concentric rings of arches.

use chordal_core::{
    draw::{Arch, Drawable, ElementStyle, LayeredOutput},
    geometry::{Bounds, Point},
    identifier::Id,
};

use super::AngularSpan;

/// An arch together with the entity (or group) it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedArch {
    id: Id,
    arch: Arch,
}

impl PlacedArch {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn arch(&self) -> &Arch {
        &self.arch
    }
}

/// A ring of arches sharing an outer radius and a height.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    radius: f32,
    height: f32,
    arches: Vec<PlacedArch>,
}

impl Track {
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            arches: Vec::new(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Radius of the inner edge of the ring.
    pub fn inner_radius(&self) -> f32 {
        (self.radius - self.height).max(0.0)
    }

    /// Adds an arch over `span` at the track's radius.
    pub fn push(&mut self, id: Id, span: AngularSpan, style: ElementStyle) {
        let arch = Arch::new(span.start(), span.end(), self.radius, self.height).with_style(style);
        self.arches.push(PlacedArch { id, arch });
    }

    pub fn arches(&self) -> &[PlacedArch] {
        &self.arches
    }

    pub fn get(&self, id: Id) -> Option<&Arch> {
        self.arches
            .iter()
            .find(|placed| placed.id == id)
            .map(|placed| &placed.arch)
    }

    pub fn is_empty(&self) -> bool {
        self.arches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arches.len()
    }

    /// Sum of the spans of every arch.
    pub fn total_span(&self) -> f32 {
        self.arches.iter().map(|placed| placed.arch.span()).sum()
    }

    pub(crate) fn render_to_layers(&self, center: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for placed in &self.arches {
            output.merge(placed.arch.render_to_layers(center));
        }
        output
    }

    pub(crate) fn bounds(&self, center: Point) -> Option<Bounds> {
        self.arches
            .iter()
            .map(|placed| placed.arch.bounds(center))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
