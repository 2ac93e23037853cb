use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use chordal_core::{color::Color, geometry::Bounds};

use crate::{export, layout::ChordLayout};

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    file_name: String,
    background: Option<Color>,
}

impl SvgBuilder {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            background: None,
        }
    }

    /// Fill the whole canvas with `color` before drawing.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    /// # Errors
    ///
    /// Fails when no output file name was given.
    pub fn build(self) -> Result<Svg, export::Error> {
        if self.file_name.trim().is_empty() {
            return Err(export::Error::Render("no output file name".to_string()));
        }
        Ok(Svg {
            file_name: self.file_name,
            background: self.background,
        })
    }
}

/// SVG exporter writing one document per layout.
#[derive(Debug)]
pub struct Svg {
    file_name: String,
    background: Option<Color>,
}

impl Svg {
    /// Renders `layout` into a document sized to its bounds.
    pub fn render_document(&self, layout: &ChordLayout) -> Document {
        render(layout, self.background)
    }

    /// Writes an SVG document to the output file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_layout(&mut self, layout: &ChordLayout) -> Result<(), export::Error> {
        let doc = self.render_document(layout);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

/// Renders `layout` without an exporter, for in-memory output.
pub(crate) fn render(layout: &ChordLayout, background: Option<Color>) -> Document {
    let bounds = layout.bounds();
    let size = bounds.to_size();
    debug!(width = size.width(), height = size.height(); "SVG dimensions");

    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
        .set("width", size.width())
        .set("height", size.height());

    if let Some(color) = background {
        doc = doc.add(background_rect(bounds, color));
    }

    // Move the bounds' top-left corner to the origin
    let origin = bounds.min_point();
    let mut main_group = svg_element::Group::new().set(
        "transform",
        format!("translate({}, {})", -origin.x(), -origin.y()),
    );
    for node in layout.to_layers().render() {
        main_group = main_group.add(node);
    }

    doc.add(main_group)
}

fn background_rect(bounds: Bounds, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha())
}
