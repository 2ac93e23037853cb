//! Angular space allocation: display order, arch spans and ribbon ends.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use chordal_core::{
    geometry::normalize_degrees,
    identifier::Id,
    semantic::Dataset,
};

use crate::config::LayoutConfig;

/// An angular interval in degrees. `end` may exceed 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularSpan {
    start: f32,
    end: f32,
}

impl AngularSpan {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn span(&self) -> f32 {
        self.end - self.start
    }
}

/// Settings that drive [`allocate_arches`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AllocationParams {
    pub max_angle: f32,
    pub gap: f32,
    pub min_arch_angle: f32,
    pub rotation: f32,
}

impl AllocationParams {
    pub fn from_config(config: &LayoutConfig, rotation: f32) -> Self {
        Self {
            max_angle: config.max_angle(),
            gap: config.arch_gap(),
            min_arch_angle: config.min_arch_angle(),
            rotation,
        }
    }
}

/// Entity ids in the order their arches go around the circle.
///
/// Grouped entities come first, group by group, keeping the configured
/// ordering inside each group. Ungrouped entities follow.
pub(crate) fn display_order(dataset: &Dataset, config: &LayoutConfig) -> Vec<Id> {
    let base = dataset.ordered_ids(config.order(), &config.custom_order());
    if config.groups().is_empty() {
        return base;
    }

    let mut placed: HashSet<Id> = HashSet::with_capacity(base.len());
    let mut order = Vec::with_capacity(base.len());

    for group in config.groups() {
        let members: HashSet<Id> = group.members().into_iter().collect();
        for id in &members {
            if !dataset.contains(*id) {
                warn!(group = group.name(), member = id.to_string(); "Group member has no relations");
            }
        }
        for id in &base {
            if members.contains(id) && placed.insert(*id) {
                order.push(*id);
            }
        }
    }
    order.extend(base.iter().filter(|id| !placed.contains(id)));

    order
}

/// Splits the circle between arches with the given weights.
///
/// A gap follows every arch. Zero-weight arches receive the minimum angle;
/// the rest of the available angle is shared in proportion to weight, or
/// equally when every weight is zero.
///
/// # Errors
///
/// Fails when the rotation is not finite, or when the gaps, or the gaps plus
/// the minimum angles, leave no room.
pub(crate) fn allocate_arches(
    weights: &[f64],
    params: &AllocationParams,
) -> Result<Vec<AngularSpan>, String> {
    if !params.rotation.is_finite() {
        return Err(format!("rotation must be a finite angle, got {}", params.rotation));
    }
    let count = weights.len();
    if count == 0 {
        return Err("there are no arches to lay out".to_string());
    }

    let max_angle = f64::from(params.max_angle);
    let gap = f64::from(params.gap);
    let gaps = gap * count as f64;
    if gaps >= max_angle {
        return Err(format!(
            "arch gap of {}° for {count} arches leaves no room within {}°",
            params.gap, params.max_angle
        ));
    }
    let available = max_angle - gaps;

    let positive_total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    let zero_count = weights.iter().filter(|w| **w <= 0.0).count();

    let spans: Vec<f64> = if positive_total <= 0.0 {
        vec![available / count as f64; count]
    } else {
        let min_angle = f64::from(params.min_arch_angle);
        let reserved = min_angle * zero_count as f64;
        if zero_count > 0 && reserved >= available {
            return Err(format!(
                "{zero_count} empty arches at {}° each leave no room for the others",
                params.min_arch_angle
            ));
        }
        let remaining = available - reserved;
        weights
            .iter()
            .map(|w| {
                if *w > 0.0 {
                    remaining * w / positive_total
                } else {
                    min_angle
                }
            })
            .collect()
    };

    let mut cursor = f64::from(params.rotation);
    let arches = spans
        .into_iter()
        .map(|span| {
            let start = normalize_degrees(cursor as f32);
            cursor += span + gap;
            AngularSpan::new(start, start + span as f32)
        })
        .collect();

    debug!(arches = count, available_angle = available; "Allocated arch angles");
    Ok(arches)
}

/// The two ends of one relation's ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RibbonEnds {
    /// On the source arch.
    pub origin: AngularSpan,
    /// On the target arch.
    pub destination: AngularSpan,
}

/// Tiles every arch with the ends of the relations touching it.
///
/// Incoming ends come first from the arch start, then outgoing ends, each in
/// relation order. An end's share of the arch is its relation weight over
/// the entity total; arches of zero-total entities are split equally.
/// Returns one entry per relation, in relation order.
pub(crate) fn allocate_ribbon_ends(
    dataset: &Dataset,
    arches: &HashMap<Id, AngularSpan>,
) -> Result<Vec<RibbonEnds>, String> {
    let relations = dataset.relations();
    let mut origins: Vec<Option<AngularSpan>> = vec![None; relations.len()];
    let mut destinations: Vec<Option<AngularSpan>> = vec![None; relations.len()];

    for entity in dataset.entities() {
        let arch = arches
            .get(&entity.id())
            .ok_or_else(|| format!("no arch was allocated for `{}`", entity.id()))?;

        let incoming = relations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.target() == entity.id())
            .map(|(index, r)| (index, r.weight(), false));
        let outgoing = relations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.source() == entity.id())
            .map(|(index, r)| (index, r.weight(), true));
        let ends: Vec<(usize, f64, bool)> = incoming.chain(outgoing).collect();

        let total = entity.weight();
        let span = f64::from(arch.span());
        let mut cursor = f64::from(arch.start());
        for (position, (index, weight, is_origin)) in ends.iter().enumerate() {
            let share = if total > 0.0 {
                span * weight / total
            } else {
                span / ends.len() as f64
            };
            let end = if position + 1 == ends.len() {
                // last end closes the arch exactly
                f64::from(arch.end())
            } else {
                cursor + share
            };
            let interval = AngularSpan::new(cursor as f32, end as f32);
            if *is_origin {
                origins[*index] = Some(interval);
            } else {
                destinations[*index] = Some(interval);
            }
            cursor = end;
        }
    }

    origins
        .into_iter()
        .zip(destinations)
        .enumerate()
        .map(|(index, ends)| match ends {
            (Some(origin), Some(destination)) => Ok(RibbonEnds {
                origin,
                destination,
            }),
            _ => Err(format!("relation #{index} has no ribbon ends")),
        })
        .collect()
}
