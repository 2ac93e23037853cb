//! Chordal - weighted relationships drawn as chord diagrams.
//!
//! Validation, layout, styling and SVG rendering of chord diagrams. Every
//! entity becomes an arch on the rim of a circle sized by the weight of its
//! relations, and every relation a ribbon joining the two arches.

pub mod config;

mod error;
mod export;
mod highlight;
mod layout;
mod style;

pub use chordal_core::{color, draw, geometry, identifier, semantic};

pub use error::ChordError;
pub use layout::{
    AngularSpan, ChordLayout, GroupName, PlacedArch, PlacedLabel, PlacedRibbon, Track,
};
pub use style::{Fade, LabelStyle};

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use geometry::Point;
use identifier::Id;
use semantic::{Dataset, Relation};
use style::StyleSheet;

/// A validated chord diagram together with its styling state.
///
/// Construction validates the relations and the configuration and runs a
/// trial layout, so a diagram that was built successfully always renders.
/// Layout is recomputed on every render from the relations, the
/// configuration and the current styles.
///
/// # Examples
///
/// ```rust,no_run
/// use chordal::{ChordDiagram, config::AppConfig, semantic::Relation};
///
/// let relations = vec![
///     Relation::from(("a", "b", 2.0)),
///     Relation::from(("a", "c", 5.0)),
///     Relation::from(("c", "d", 4.0)),
/// ];
/// let diagram = ChordDiagram::new(relations, AppConfig::default())
///     .expect("Failed to build diagram");
///
/// let svg = diagram.render_svg().expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug, Clone)]
pub struct ChordDiagram {
    dataset: Dataset,
    config: AppConfig,
    order: Vec<Id>,
    styles: StyleSheet,
    rotation: f32,
    bend_offset: Point,
}

impl ChordDiagram {
    /// Build a diagram from relations.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::Config`] for invalid configuration,
    /// [`ChordError::InvalidData`] for empty data, blank ids or bad weights,
    /// and [`ChordError::Layout`] when the arches cannot fit the circle.
    pub fn new(relations: Vec<Relation>, config: AppConfig) -> Result<Self, ChordError> {
        info!(relations = relations.len(); "Validating relations");
        config.validate().map_err(ChordError::Config)?;

        let dataset = Dataset::new(relations, config.layout().merge_duplicates())?;
        let order = layout::display_order(&dataset, config.layout());
        let styles = StyleSheet::from_config(&dataset, &order, &config).map_err(ChordError::Config)?;
        debug!(entities = order.len(), total_weight = dataset.total_weight(); "Relations validated");

        let diagram = Self {
            rotation: config.layout().rotation(),
            dataset,
            config,
            order,
            styles,
            bend_offset: Point::default(),
        };
        diagram.layout()?;

        Ok(diagram)
    }

    /// Parse the relation text format and build a diagram from it.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::Parse`] with the source attached for syntax
    /// errors, otherwise the errors of [`ChordDiagram::new`].
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use chordal::{ChordDiagram, config::AppConfig};
    ///
    /// let source = "a -> b : 2\nb -> c : 1\n";
    /// let diagram = ChordDiagram::from_source(source, AppConfig::default())
    ///     .expect("Failed to parse");
    /// ```
    pub fn from_source(source: &str, config: AppConfig) -> Result<Self, ChordError> {
        info!("Parsing relations");
        let relations = chordal_parser::parse(source)
            .map_err(|err| ChordError::new_parse_error(err, source))?;
        debug!(relations = relations.len(); "Relations parsed successfully");
        trace!(relations:?; "Parsed relations");

        Self::new(relations, config)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Entity ids in the order their arches go around the circle.
    pub fn order(&self) -> &[Id] {
        &self.order
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Start the first arch at `degrees`, counter-clockwise from the
    /// positive x-axis. Replaces any earlier rotation.
    ///
    /// A non-finite angle makes the next layout fail with [`ChordError::Layout`].
    pub fn rotate(&mut self, degrees: f32) {
        debug!(degrees; "Rotating diagram");
        self.rotation = degrees;
    }

    /// Move the point ribbons between distinct arches bend through,
    /// relative to the circle center.
    pub fn set_bend_center(&mut self, offset: Point) {
        self.bend_offset = offset;
    }

    /// Compute the layout for the current state.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::Layout`] when the arches do not fit.
    pub fn layout(&self) -> Result<ChordLayout, ChordError> {
        ChordLayout::compute(&layout::LayoutInput {
            dataset: &self.dataset,
            order: &self.order,
            config: &self.config,
            styles: &self.styles,
            rotation: self.rotation,
            bend_offset: self.bend_offset,
        })
    }

    /// Render the diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `ChordError` for layout errors or an invalid background color.
    pub fn render_svg(&self) -> Result<String, ChordError> {
        let layout = self.layout()?;
        let doc = export::svg::render(&layout, self.background()?);

        info!("SVG rendered successfully");
        Ok(doc.to_string())
    }

    /// Write the diagram to an SVG file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ChordError` for layout errors or when the file cannot be
    /// written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ChordError> {
        let layout = self.layout()?;
        let file_name = path.as_ref().to_string_lossy();

        let mut svg_exporter = export::svg::SvgBuilder::new(&file_name)
            .with_background(self.background()?)
            .build()?;
        svg_exporter.export_layout(&layout)?;

        info!(file_name:% = file_name; "Diagram saved");
        Ok(())
    }

    /// Write the diagram to a kept temporary file and open it in the
    /// platform's default viewer. Returns the file path.
    ///
    /// # Errors
    ///
    /// Returns `ChordError` if the file cannot be written or the viewer
    /// cannot be launched.
    pub fn show(&self) -> Result<PathBuf, ChordError> {
        let file = tempfile::Builder::new()
            .prefix("chordal-")
            .suffix(".svg")
            .tempfile()?;
        let (_, path) = file.keep().map_err(|err| ChordError::Io(err.error))?;
        self.save(&path)?;

        info!(path:? = path; "Opening viewer");
        viewer_command(&path).spawn()?;

        Ok(path)
    }

    fn background(&self) -> Result<Option<color::Color>, ChordError> {
        self.config
            .style()
            .background_color()
            .map_err(ChordError::Config)
    }
}

fn viewer_command(path: &Path) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    command.arg(path);
    command
}
