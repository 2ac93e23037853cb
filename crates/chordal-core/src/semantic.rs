//! Semantic relation model.
//!
//! A chord diagram is described by an ordered list of weighted [`Relation`]s.
//! [`Dataset`] validates that list once and derives the implicit entity set:
//! every distinct id in first-appearance order, together with its total
//! weight.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text / Vec<Relation>
//!     ↓ validate (Dataset::new)
//! Dataset - relations + entity totals
//!     ↓ layout
//! ChordLayout - arches, ribbons, labels
//!     ↓ export
//! SVG
//! ```
//!
//! # Weight accounting
//!
//! An entity's total is the undirected incident sum: each relation adds its
//! weight to both its source and its target. A self-relation therefore adds
//! its weight twice to the same entity, once for each end it occupies on
//! the arch.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::identifier::Id;

/// A weighted, directed relationship between two entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    source: Id,
    target: Id,
    weight: f64,
}

impl Relation {
    /// Creates a relation from `source` to `target` carrying `weight`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chordal_core::{identifier::Id, semantic::Relation};
    ///
    /// let rel = Relation::new(Id::new("a"), Id::new("b"), 2.0);
    /// assert_eq!(rel.source(), "a");
    /// assert!(!rel.is_self_loop());
    /// ```
    pub fn new(source: Id, target: Id, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns `true` if the relation starts and ends on the same entity.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns `true` if `id` is either endpoint.
    pub fn touches(&self, id: Id) -> bool {
        self.source == id || self.target == id
    }
}

impl From<(&str, &str, f64)> for Relation {
    fn from((source, target, weight): (&str, &str, f64)) -> Self {
        Self::new(Id::new(source), Id::new(target), weight)
    }
}

/// A distinct entity with its aggregated weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    id: Id,
    weight: f64,
}

impl Entity {
    pub fn id(&self) -> Id {
        self.id
    }

    /// Undirected incident weight total.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// How entities are ordered around the circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchOrder {
    /// First appearance in the relation list.
    #[default]
    Insertion,
    /// Stable sort by entity name.
    Alphabetical,
    /// Explicitly listed ids first, remaining ids in insertion order.
    Custom,
}

/// Which endpoint's arch color a ribbon inherits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RibbonColorSource {
    #[default]
    Source,
    Target,
}

impl RibbonColorSource {
    /// Picks the entity whose color the ribbon for `relation` uses.
    pub fn pick(self, relation: &Relation) -> Id {
        match self {
            Self::Source => relation.source(),
            Self::Target => relation.target(),
        }
    }
}

/// Reasons a relation list is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("relation list is empty")]
    Empty,

    #[error("relation #{index} ({origin} -> {destination}) has negative weight {weight}")]
    NegativeWeight {
        index: usize,
        origin: Id,
        destination: Id,
        weight: f64,
    },

    #[error("relation #{index} ({origin} -> {destination}) has non-finite weight {weight}")]
    NonFiniteWeight {
        index: usize,
        origin: Id,
        destination: Id,
        weight: f64,
    },

    #[error("relation #{index} has an empty identifier")]
    EmptyId { index: usize },
}

/// A validated relation list and its derived entities.
///
/// # Examples
///
/// ```
/// use chordal_core::{identifier::Id, semantic::{Dataset, Relation}};
///
/// let data = Dataset::new(
///     vec![
///         ("a", "b", 2.0).into(),
///         ("a", "c", 5.0).into(),
///         ("c", "d", 4.0).into(),
///     ],
///     false,
/// )
/// .unwrap();
///
/// assert_eq!(data.entity(Id::new("a")).unwrap().weight(), 7.0);
/// assert_eq!(data.entity(Id::new("c")).unwrap().weight(), 9.0);
/// assert_eq!(data.total_weight(), 22.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    relations: Vec<Relation>,
    entities: Vec<Entity>,
}

impl Dataset {
    /// Validates `relations` and aggregates entity totals.
    ///
    /// With `merge_duplicates`, relations sharing the same ordered
    /// `(source, target)` pair are summed into their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] for an empty list, a blank id, or a negative
    /// or non-finite weight. The first offending relation is reported.
    pub fn new(relations: Vec<Relation>, merge_duplicates: bool) -> Result<Self, DataError> {
        if relations.is_empty() {
            return Err(DataError::Empty);
        }

        for (index, relation) in relations.iter().enumerate() {
            validate_relation(index, relation)?;
        }

        let relations = if merge_duplicates {
            merge(relations)
        } else {
            relations
        };

        let entities = aggregate(&relations);
        debug!(
            relations = relations.len(),
            entities = entities.len();
            "Dataset validated"
        );

        Ok(Self {
            relations,
            entities,
        })
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Entities in first-appearance order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: Id) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.entity(id).is_some()
    }

    /// Sum of all entity totals (twice the sum of relation weights).
    pub fn total_weight(&self) -> f64 {
        self.entities.iter().map(Entity::weight).sum()
    }

    /// Returns entity ids in display order.
    ///
    /// For [`ArchOrder::Custom`], ids in `custom` that are not entities are
    /// skipped, repeated ids are kept once, and unlisted entities follow in
    /// insertion order.
    pub fn ordered_ids(&self, order: ArchOrder, custom: &[Id]) -> Vec<Id> {
        let insertion = self.entities.iter().map(Entity::id);
        match order {
            ArchOrder::Insertion => insertion.collect(),
            ArchOrder::Alphabetical => {
                let mut ids: Vec<Id> = insertion.collect();
                ids.sort_by(Id::cmp_by_name);
                ids
            }
            ArchOrder::Custom => {
                let mut ids: Vec<Id> = Vec::with_capacity(self.entities.len());
                for id in custom {
                    if self.contains(*id) && !ids.contains(id) {
                        ids.push(*id);
                    }
                }
                for id in insertion {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                ids
            }
        }
    }
}

fn validate_relation(index: usize, relation: &Relation) -> Result<(), DataError> {
    if relation.source.is_blank() || relation.target.is_blank() {
        return Err(DataError::EmptyId { index });
    }
    if !relation.weight.is_finite() {
        return Err(DataError::NonFiniteWeight {
            index,
            origin: relation.source,
            destination: relation.target,
            weight: relation.weight,
        });
    }
    if relation.weight < 0.0 {
        return Err(DataError::NegativeWeight {
            index,
            origin: relation.source,
            destination: relation.target,
            weight: relation.weight,
        });
    }
    Ok(())
}

fn merge(relations: Vec<Relation>) -> Vec<Relation> {
    let mut positions: HashMap<(Id, Id), usize> = HashMap::new();
    let mut merged: Vec<Relation> = Vec::with_capacity(relations.len());

    for relation in relations {
        match positions.get(&(relation.source, relation.target)) {
            Some(&pos) => merged[pos].weight += relation.weight,
            None => {
                positions.insert((relation.source, relation.target), merged.len());
                merged.push(relation);
            }
        }
    }

    merged
}

fn aggregate(relations: &[Relation]) -> Vec<Entity> {
    let mut entities: Vec<Entity> = Vec::new();
    let mut positions: HashMap<Id, usize> = HashMap::new();

    let mut add = |id: Id, weight: f64| match positions.get(&id) {
        Some(&pos) => entities[pos].weight += weight,
        None => {
            positions.insert(id, entities.len());
            entities.push(Entity { id, weight });
        }
    };

    for relation in relations {
        add(relation.source, relation.weight);
        add(relation.target, relation.weight);
    }

    entities
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn rel(source: &str, target: &str, weight: f64) -> Relation {
        Relation::from((source, target, weight))
    }

    fn sample() -> Vec<Relation> {
        vec![rel("a", "b", 2.0), rel("a", "c", 5.0), rel("c", "d", 4.0)]
    }

    #[test]
    fn test_entity_totals_are_undirected_sums() {
        let data = Dataset::new(sample(), false).unwrap();
        let weights: Vec<(String, f64)> = data
            .entities()
            .iter()
            .map(|e| (e.id().to_string(), e.weight()))
            .collect();

        assert_eq!(
            weights,
            vec![
                ("a".to_string(), 7.0),
                ("b".to_string(), 2.0),
                ("c".to_string(), 9.0),
                ("d".to_string(), 4.0),
            ]
        );
        assert_approx_eq!(f64, data.total_weight(), 22.0);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let data = Dataset::new(vec![rel("s", "s", 3.0), rel("s", "t", 1.0)], false).unwrap();
        assert_approx_eq!(f64, data.entity(Id::new("s")).unwrap().weight(), 7.0);
        assert_approx_eq!(f64, data.entity(Id::new("t")).unwrap().weight(), 1.0);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Dataset::new(Vec::new(), false), Err(DataError::Empty));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = Dataset::new(vec![rel("a", "b", 1.0), rel("b", "c", -2.0)], false).unwrap_err();
        match err {
            DataError::NegativeWeight { index, weight, .. } => {
                assert_eq!(index, 1);
                assert_approx_eq!(f64, weight, -2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_weight() {
        let err = Dataset::new(vec![rel("a", "b", f64::NAN)], false).unwrap_err();
        assert!(matches!(err, DataError::NonFiniteWeight { index: 0, .. }));

        let err = Dataset::new(vec![rel("a", "b", f64::INFINITY)], false).unwrap_err();
        assert!(matches!(err, DataError::NonFiniteWeight { index: 0, .. }));
    }

    #[test]
    fn test_rejects_empty_id() {
        let err = Dataset::new(vec![rel("a", "b", 1.0), rel("", "b", 1.0)], false).unwrap_err();
        assert_eq!(err, DataError::EmptyId { index: 1 });
        assert_eq!(err.to_string(), "relation #1 has an empty identifier");
    }

    #[test]
    fn test_zero_weight_is_accepted() {
        let data = Dataset::new(vec![rel("a", "b", 0.0)], false).unwrap();
        assert_eq!(data.entities().len(), 2);
        assert_approx_eq!(f64, data.total_weight(), 0.0);
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let data = Dataset::new(vec![rel("a", "b", 1.0), rel("a", "b", 2.0)], false).unwrap();
        assert_eq!(data.relations().len(), 2);
    }

    #[test]
    fn test_duplicates_merged_into_first_occurrence() {
        let data = Dataset::new(
            vec![
                rel("a", "b", 1.0),
                rel("b", "a", 4.0),
                rel("a", "b", 2.0),
            ],
            true,
        )
        .unwrap();

        assert_eq!(data.relations().len(), 2);
        assert_approx_eq!(f64, data.relations()[0].weight(), 3.0);
        assert_eq!(data.relations()[1].source(), "b");
        assert_approx_eq!(f64, data.entity(Id::new("a")).unwrap().weight(), 7.0);
    }

    #[test]
    fn test_ordered_ids_alphabetical() {
        let data = Dataset::new(vec![rel("zeta", "alpha", 1.0), rel("mid", "alpha", 1.0)], false)
            .unwrap();
        let ids = data.ordered_ids(ArchOrder::Alphabetical, &[]);
        let names: Vec<String> = ids.iter().map(Id::to_string).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_ordered_ids_custom_skips_unknown_and_appends_rest() {
        let data = Dataset::new(sample(), false).unwrap();
        let custom = [Id::new("c"), Id::new("nope"), Id::new("a"), Id::new("c")];
        let names: Vec<String> = data
            .ordered_ids(ArchOrder::Custom, &custom)
            .iter()
            .map(Id::to_string)
            .collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_ribbon_color_source_pick() {
        let relation = rel("from", "to", 1.0);
        assert_eq!(RibbonColorSource::Source.pick(&relation), "from");
        assert_eq!(RibbonColorSource::Target.pick(&relation), "to");
    }
}
