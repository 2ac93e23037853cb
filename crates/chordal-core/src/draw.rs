//! Drawable Components for Chord Diagram Rendering
//!
//! This module provides the renderable building blocks of a chord diagram.
//! All drawable components implement the [`Drawable`] trait, which provides a
//! consistent interface for rendering to layered SVG output and computing the
//! screen-space bounds used to size the final document.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically
//! ordered during final SVG generation: ribbons sit below arches, leader
//! arrows and label text on top.
mod arch;
mod label;
mod layer;
mod path;
mod ribbon;
mod stroke;
mod style;
mod text;

pub use arch::Arch;
pub use label::{ArchLabel, LeaderPlacement};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use path::PathBuilder;
pub use ribbon::{Bend, Connector, Ribbon, RibbonEnd};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use style::ElementStyle;
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Bounds, Point};

/// Trait for diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The reference point of the drawable. Arches and ribbons
    ///   are drawn around it as the circle center; text uses it as its anchor.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the screen-space bounds this drawable covers at `position`.
    fn bounds(&self, position: Point) -> Bounds;
}
