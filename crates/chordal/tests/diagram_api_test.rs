//! Integration tests for the ChordDiagram API
//!
//! These tests go through the public API only: construction, layout
//! properties and rendering.

use std::collections::HashMap;

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use chordal::{
    ChordDiagram, ChordError, Fade,
    config::{AppConfig, GroupConfig, LayoutConfig},
    identifier::Id,
    semantic::Relation,
};

fn sample_relations() -> Vec<Relation> {
    vec![
        Relation::from(("a", "b", 2.0)),
        Relation::from(("a", "c", 5.0)),
        Relation::from(("c", "d", 4.0)),
    ]
}

#[test]
fn test_entity_weights_are_incident_sums() {
    let diagram = ChordDiagram::new(sample_relations(), AppConfig::default()).unwrap();
    let dataset = diagram.dataset();

    let weight = |id: &str| dataset.entity(Id::new(id)).unwrap().weight();
    assert_approx_eq!(f64, weight("a"), 7.0);
    assert_approx_eq!(f64, weight("b"), 2.0);
    assert_approx_eq!(f64, weight("c"), 9.0);
    assert_approx_eq!(f64, weight("d"), 4.0);
    assert_approx_eq!(f64, dataset.total_weight(), 22.0);
}

#[test]
fn test_spans_proportional_to_weights() {
    let diagram = ChordDiagram::new(sample_relations(), AppConfig::default()).unwrap();
    let layout = diagram.layout().unwrap();

    let available = 360.0 - 4.0 * 5.0;
    for (id, weight) in [("a", 7.0), ("b", 2.0), ("c", 9.0), ("d", 4.0)] {
        let arch = layout.arch(Id::new(id)).unwrap();
        assert_approx_eq!(f32, arch.span(), available * weight / 22.0, epsilon = 1e-3);
    }
}

#[test]
fn test_construction_rejects_bad_input() {
    let negative = vec![Relation::from(("a", "b", -1.0))];
    assert!(matches!(
        ChordDiagram::new(negative, AppConfig::default()),
        Err(ChordError::InvalidData(_))
    ));

    let blank = vec![Relation::from(("", "b", 1.0))];
    assert!(matches!(
        ChordDiagram::new(blank, AppConfig::default()),
        Err(ChordError::InvalidData(_))
    ));

    let crowded = AppConfig::default().with_layout(LayoutConfig::default().with_arch_gap(180.0));
    assert!(matches!(
        ChordDiagram::new(sample_relations(), crowded),
        Err(ChordError::Layout(_))
    ));
}

#[test]
fn test_parse_error_reports_span() {
    let source = "a -> b : 1\nb -> c : lots\n";
    let err = ChordDiagram::from_source(source, AppConfig::default()).unwrap_err();
    let ChordError::Parse { err, src } = err else {
        panic!("expected a parse error");
    };
    assert_eq!(src, source);

    let diagnostic = &err.diagnostics()[0];
    let span = diagnostic.primary_label().unwrap().span();
    assert!(span.start() >= source.find("lots").unwrap());
}

#[test]
fn test_merge_duplicates() {
    let relations = vec![
        Relation::from(("a", "b", 1.0)),
        Relation::from(("a", "b", 2.0)),
    ];
    let merged = AppConfig::default()
        .with_layout(LayoutConfig::default().with_merge_duplicates(true));

    let kept = ChordDiagram::new(relations.clone(), AppConfig::default()).unwrap();
    let summed = ChordDiagram::new(relations, merged).unwrap();

    assert_eq!(kept.layout().unwrap().ribbons().len(), 2);
    assert_eq!(summed.layout().unwrap().ribbons().len(), 1);
    assert_approx_eq!(f64, summed.dataset().relations()[0].weight(), 3.0);
}

#[test]
fn test_groups_render_band_and_name() {
    let config = AppConfig::default().with_layout(
        LayoutConfig::default()
            .with_group(GroupConfig::new("left", &["c", "d"]).with_color("#336699")),
    );
    let diagram = ChordDiagram::new(sample_relations(), config).unwrap();
    assert_eq!(
        diagram.order(),
        &[Id::new("c"), Id::new("d"), Id::new("a"), Id::new("b")]
    );

    let svg = diagram.render_svg().unwrap();
    assert!(svg.contains(">left<"));
    // four arches, three ribbons and one band
    assert_eq!(svg.matches("<path").count(), 8);
}

#[test]
fn test_highlight_then_render() {
    let mut diagram = ChordDiagram::new(sample_relations(), AppConfig::default()).unwrap();
    diagram.highlight_flow("a", "c", Fade::new(0.1, 0.05)).unwrap();

    let svg = diagram.render_svg().unwrap();
    assert!(svg.contains("fill-opacity=\"0.05\""));
    assert!(svg.contains("</svg>"));
}

fn relation_strategy() -> impl Strategy<Value = Vec<Relation>> {
    prop::collection::vec((0..6usize, 0..6usize, 0.1..100.0f64), 1..12).prop_map(|raw| {
        raw.into_iter()
            .map(|(from, to, weight)| {
                Relation::new(
                    Id::new(&format!("e{from}")),
                    Id::new(&format!("e{to}")),
                    weight,
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn arch_spans_fill_available_angle(relations in relation_strategy(), gap in 0.0..4.0f32) {
        let config = AppConfig::default().with_layout(LayoutConfig::default().with_arch_gap(gap));
        let diagram = ChordDiagram::new(relations, config).unwrap();
        let layout = diagram.layout().unwrap();

        let track = layout.entity_track();
        let expected = 360.0 - gap * track.len() as f32;
        prop_assert!((track.total_span() - expected).abs() < 1e-2);
    }

    #[test]
    fn ribbon_ends_tile_every_arch(relations in relation_strategy()) {
        let diagram = ChordDiagram::new(relations, AppConfig::default()).unwrap();
        let layout = diagram.layout().unwrap();
        let relations = diagram.dataset().relations();

        let mut covered: HashMap<Id, f32> = HashMap::new();
        for placed in layout.ribbons() {
            let relation = &relations[placed.relation()];
            *covered.entry(relation.source()).or_default() += placed.ribbon().origin().span();
            *covered.entry(relation.target()).or_default() += placed.ribbon().destination().span();
        }

        for placed in layout.entity_track().arches() {
            let total = covered.get(&placed.id()).copied().unwrap_or_default();
            prop_assert!((total - placed.arch().span()).abs() < 1e-2);
        }
    }

    #[test]
    fn self_loops_avoid_center(self_weight in 0.1..5.0f64, others in prop::collection::vec(10.0..20.0f64, 3)) {
        let mut relations = vec![Relation::from(("s", "s", self_weight))];
        for (index, weight) in others.into_iter().enumerate() {
            let from = format!("o{index}");
            let to = format!("o{}", index + 1);
            relations.push(Relation::from((from.as_str(), to.as_str(), weight)));
        }

        let diagram = ChordDiagram::new(relations, AppConfig::default()).unwrap();
        let layout = diagram.layout().unwrap();
        let ribbon = layout.ribbon(0).unwrap();
        prop_assert!(!ribbon.passes_through_center(layout.center()));
    }

    #[test]
    fn layout_is_deterministic(relations in relation_strategy()) {
        let diagram = ChordDiagram::new(relations, AppConfig::default()).unwrap();
        prop_assert_eq!(diagram.render_svg().unwrap(), diagram.render_svg().unwrap());
    }
}
