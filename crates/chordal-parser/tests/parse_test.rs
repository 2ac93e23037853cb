use chordal_core::identifier::Id;
use chordal_parser::{error::ErrorCode, parse};
use proptest::prelude::*;

#[test]
fn parses_a_small_relation_list() {
    let source = "\
# traffic between rooms
kitchen -> garden : 4
\"living room\" -> kitchen : 2.5
garden -> garden : 1   # self loop
";
    let relations = parse(source).unwrap();

    assert_eq!(relations.len(), 3);
    assert_eq!(relations[1].source(), Id::new("living room"));
    assert!(relations[2].is_self_loop());
}

#[test]
fn empty_input_is_rejected() {
    for source in ["", "\n\n", "# just a comment\n"] {
        let err = parse(source).unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E203));
    }
}

#[test]
fn syntax_and_value_errors_are_reported_together() {
    let err = parse("a -> b : -1\nc d : 2\ne -> f : 3").unwrap_err();
    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();

    assert_eq!(codes.len(), 2);
    assert!(codes.contains(&ErrorCode::E100));
    assert!(codes.contains(&ErrorCode::E200));
}

#[test]
fn syntax_error_suppresses_empty_list_error() {
    let err = parse("nonsense").unwrap_err();
    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn well_formed_lines_parse(
        lines in prop::collection::vec((identifier(), identifier(), 0u32..10_000), 1..20),
    ) {
        let source: String = lines
            .iter()
            .map(|(from, to, weight)| format!("{from} -> {to} : {weight}\n"))
            .collect();

        let relations = parse(&source).unwrap();
        prop_assert_eq!(relations.len(), lines.len());
        for (relation, (from, to, weight)) in relations.iter().zip(&lines) {
            prop_assert_eq!(relation.source(), Id::new(from));
            prop_assert_eq!(relation.target(), Id::new(to));
            prop_assert_eq!(relation.weight(), f64::from(*weight));
        }
    }

    #[test]
    fn arbitrary_input_never_panics(source in "\\PC{0,200}") {
        let _ = parse(&source);
    }
}
