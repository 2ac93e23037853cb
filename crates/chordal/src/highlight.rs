//! Styling and highlighting operations on [`ChordDiagram`].
//!
//! Every operation checks its arguments before touching any style, so a
//! failed call leaves the diagram unchanged.

use log::debug;

use chordal_core::{color::Color, draw::ElementStyle, identifier::Id, semantic::Relation};

use crate::{ChordDiagram, ChordError, Fade, LabelStyle};

const FULL_ALPHA: f32 = 1.0;

impl ChordDiagram {
    /// Style of the arch drawn for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] if `id` has no arch.
    pub fn arch_style_mut(&mut self, id: impl Into<Id>) -> Result<&mut ElementStyle, ChordError> {
        let id = id.into();
        self.styles
            .arch_mut(id)
            .ok_or(ChordError::UnknownEntity(id))
    }

    /// Style of the ribbon drawing relation `index`.
    ///
    /// Indices follow the validated relation list, after duplicates were
    /// merged if that is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownRelation`] for an index out of range.
    pub fn ribbon_style_mut(&mut self, index: usize) -> Result<&mut ElementStyle, ChordError> {
        let count = self.dataset.relations().len();
        self.styles
            .ribbon_mut(index)
            .ok_or_else(|| ChordError::UnknownRelation(format!("index {index} of {count}")))
    }

    /// Label of the arch drawn for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] if `id` has no arch.
    pub fn label_mut(&mut self, id: impl Into<Id>) -> Result<&mut LabelStyle, ChordError> {
        let id = id.into();
        self.styles
            .label_mut(id)
            .ok_or(ChordError::UnknownEntity(id))
    }

    pub fn update_arches(&mut self, mut f: impl FnMut(Id, &mut ElementStyle)) {
        for (id, style) in self.styles.arches_mut() {
            f(id, style);
        }
    }

    /// Calls `f` with every relation and the style of its ribbon.
    pub fn update_ribbons(&mut self, mut f: impl FnMut(&Relation, &mut ElementStyle)) {
        for (relation, style) in self.dataset.relations().iter().zip(self.styles.ribbons_mut()) {
            f(relation, style);
        }
    }

    pub fn update_labels(&mut self, mut f: impl FnMut(Id, &mut LabelStyle)) {
        for (id, label) in self.styles.labels_mut() {
            f(id, label);
        }
    }

    /// Set the alpha of every arch and ribbon.
    pub fn fade_all(&mut self, fade: Fade) {
        debug!(arch_alpha = fade.arch_alpha(), ribbon_alpha = fade.ribbon_alpha(); "Fading all elements");
        self.update_arches(|_, style| style.set_alpha(fade.arch_alpha()));
        self.update_ribbons(|_, style| style.set_alpha(fade.ribbon_alpha()));
    }

    /// Fade everything except the arch of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] if `id` has no arch.
    pub fn highlight_arch(&mut self, id: impl Into<Id>, fade: Fade) -> Result<(), ChordError> {
        let id = self.known_entity(id)?;
        self.fade_all(fade);
        self.emphasize_arch(id);
        Ok(())
    }

    /// Fade everything except the arch of `id` and the ribbons leaving it.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] if `id` has no arch.
    pub fn highlight_source(&mut self, id: impl Into<Id>, fade: Fade) -> Result<(), ChordError> {
        let id = self.known_entity(id)?;
        self.fade_all(fade);
        self.emphasize_arch(id);
        self.emphasize_ribbons(|relation| relation.source() == id);
        Ok(())
    }

    /// Fade everything except the arch of `id` and the ribbons entering it.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] if `id` has no arch.
    pub fn highlight_target(&mut self, id: impl Into<Id>, fade: Fade) -> Result<(), ChordError> {
        let id = self.known_entity(id)?;
        self.fade_all(fade);
        self.emphasize_arch(id);
        self.emphasize_ribbons(|relation| relation.target() == id);
        Ok(())
    }

    /// Fade everything except both arches of a flow and its ribbons.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] if either id has no arch, and
    /// [`ChordError::UnknownRelation`] if no relation runs from `source` to
    /// `target`.
    pub fn highlight_flow(
        &mut self,
        source: impl Into<Id>,
        target: impl Into<Id>,
        fade: Fade,
    ) -> Result<(), ChordError> {
        let source = self.known_entity(source)?;
        let target = self.known_entity(target)?;
        let is_flow =
            |relation: &Relation| relation.source() == source && relation.target() == target;
        if !self.dataset.relations().iter().any(is_flow) {
            return Err(ChordError::UnknownRelation(format!("{source} -> {target}")));
        }

        self.fade_all(fade);
        self.emphasize_arch(source);
        self.emphasize_arch(target);
        self.emphasize_ribbons(is_flow);
        Ok(())
    }

    /// Recolor arches, and the ribbons that take their color from them.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] for the first id without an
    /// arch; nothing is recolored in that case.
    pub fn color_mapping<I, K>(&mut self, colors: I) -> Result<(), ChordError>
    where
        I: IntoIterator<Item = (K, Color)>,
        K: Into<Id>,
    {
        let colors = self.known_entries(colors)?;
        let source = self.config.style().ribbon_color();

        for (id, color) in colors {
            if let Some(style) = self.styles.arch_mut(id) {
                style.set_fill(color);
            }
            self.update_ribbons(|relation, style| {
                if source.pick(relation) == id {
                    style.set_fill(color);
                }
            });
            debug!(id = id.to_string(), color = color.to_string(); "Recolored arch");
        }
        Ok(())
    }

    /// Replace label texts.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::UnknownEntity`] for the first id without an
    /// arch; no label changes in that case.
    pub fn label_mapping<I, K, S>(&mut self, texts: I) -> Result<(), ChordError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<Id>,
        S: Into<String>,
    {
        for (id, text) in self.known_entries(texts)? {
            if let Some(label) = self.styles.label_mut(id) {
                label.set_text(text);
            }
        }
        Ok(())
    }

    pub fn hide_arch(&mut self, id: impl Into<Id>) -> Result<(), ChordError> {
        self.arch_style_mut(id)?.hide();
        Ok(())
    }

    pub fn show_arch(&mut self, id: impl Into<Id>) -> Result<(), ChordError> {
        self.arch_style_mut(id)?.show();
        Ok(())
    }

    pub fn hide_ribbon(&mut self, index: usize) -> Result<(), ChordError> {
        self.ribbon_style_mut(index)?.hide();
        Ok(())
    }

    pub fn show_ribbon(&mut self, index: usize) -> Result<(), ChordError> {
        self.ribbon_style_mut(index)?.show();
        Ok(())
    }

    pub fn hide_label(&mut self, id: impl Into<Id>) -> Result<(), ChordError> {
        self.label_mut(id)?.hide();
        Ok(())
    }

    pub fn show_label(&mut self, id: impl Into<Id>) -> Result<(), ChordError> {
        self.label_mut(id)?.show();
        Ok(())
    }

    /// Show or hide every label at once.
    pub fn set_labels_visible(&mut self, visible: bool) {
        self.update_labels(|_, label| {
            if visible {
                label.show();
            } else {
                label.hide();
            }
        });
    }

    fn known_entity(&self, id: impl Into<Id>) -> Result<Id, ChordError> {
        let id = id.into();
        if self.styles.arch(id).is_some() {
            Ok(id)
        } else {
            Err(ChordError::UnknownEntity(id))
        }
    }

    fn known_entries<I, K, V>(&self, entries: I) -> Result<Vec<(Id, V)>, ChordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Id>,
    {
        entries
            .into_iter()
            .map(|(id, value)| self.known_entity(id).map(|id| (id, value)))
            .collect()
    }

    fn emphasize_arch(&mut self, id: Id) {
        if let Some(style) = self.styles.arch_mut(id) {
            style.set_alpha(FULL_ALPHA);
        }
    }

    fn emphasize_ribbons(&mut self, mut selected: impl FnMut(&Relation) -> bool) {
        self.update_ribbons(|relation, style| {
            if selected(relation) {
                style.set_alpha(FULL_ALPHA);
            }
        });
    }
}
