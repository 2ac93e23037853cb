//! Layer-based rendering for SVG output.
//!
//! Drawables do not append directly to the document. They push nodes into a
//! [`LayeredOutput`] tagged with a [`RenderLayer`]; the exporter later emits
//! one `<g data-layer="...">` group per non-empty layer, bottom to top.
//!
//! # Example
//!
//! ```
//! # use chordal_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Text};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("apple")));
//! output.add_to_layer(RenderLayer::Ribbon, Box::new(Path::new()));
//!
//! // Ribbons come out first even though they were added last
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers of a chord diagram.
///
/// The `Ord` derive follows declaration order: the first variant renders
/// first (bottom), the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill behind everything else
    Background,
    /// Ribbons joining arch sub-intervals
    Ribbon,
    /// Entity and group arches on the rim
    Arch,
    /// Leader lines of arrowed labels
    Arrow,
    /// Label text
    Text,
}

impl RenderLayer {
    /// Returns the value written to the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Ribbon => "ribbon",
            Self::Arch => "arch",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`. Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes added to `layer`.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes one `<g>` element with a `data-layer`
    /// attribute. Groups are returned bottom to top.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps per-layer insertion order
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new()
                        .set("data-layer", layer.name())
                        .add(node);
                    Some((layer, group))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Path, Rectangle};

    use super::*;

    #[test]
    fn test_layered_output_new_is_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_count() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Ribbon, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Ribbon, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Arch, Box::new(Path::new()));

        assert_eq!(output.count(RenderLayer::Ribbon), 2);
        assert_eq!(output.count(RenderLayer::Arch), 1);
        assert_eq!(output.count(RenderLayer::Text), 0);
    }

    #[test]
    fn test_layered_output_merge_same_layer_single_group() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Arch, Box::new(Path::new()));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Arch, Box::new(Path::new()));

        first.merge(second);
        assert_eq!(first.render().len(), 1);
    }

    #[test]
    fn test_layered_output_render_orders_layers() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Ribbon, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Arch, Box::new(Path::new()));

        let document = output
            .render()
            .into_iter()
            .fold(svg::Document::new(), |doc, node| doc.add(node))
            .to_string();

        let background = document.find("data-layer=\"background\"").unwrap();
        let ribbon = document.find("data-layer=\"ribbon\"").unwrap();
        let arch = document.find("data-layer=\"arch\"").unwrap();
        let text = document.find("data-layer=\"text\"").unwrap();
        assert!(background < ribbon);
        assert!(ribbon < arch);
        assert!(arch < text);
    }
}
