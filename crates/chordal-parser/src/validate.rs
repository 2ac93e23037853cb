//! Value checks on parsed relations.

use crate::{
    Span,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parser::RelationDecl,
};

/// Reports empty identifiers and weights that cannot be drawn.
pub(crate) fn check_relations(relations: &[RelationDecl], collector: &mut DiagnosticCollector) {
    for relation in relations {
        for endpoint in [&relation.source, &relation.target] {
            if endpoint.inner().trim().is_empty() {
                collector.emit(
                    Diagnostic::error("empty identifier")
                        .with_code(ErrorCode::E202)
                        .with_label(endpoint.span(), "identifier has no visible characters")
                        .with_help("give every entity a non-blank name"),
                );
            }
        }

        let weight = *relation.weight.inner();
        if !weight.is_finite() {
            collector.emit(
                Diagnostic::error(format!("weight `{weight}` is not a finite number"))
                    .with_code(ErrorCode::E201)
                    .with_label(relation.weight.span(), "non-finite weight")
                    .with_secondary_label(relation.span(), "in this relation")
                    .with_help("weights must be ordinary decimal numbers"),
            );
        } else if weight < 0.0 {
            collector.emit(
                Diagnostic::error(format!("negative weight `{weight}`"))
                    .with_code(ErrorCode::E200)
                    .with_label(relation.weight.span(), "weight is below zero")
                    .with_secondary_label(relation.span(), "in this relation")
                    .with_help("weights must be zero or positive"),
            );
        }
    }
}

/// Diagnostic for input that holds no relations.
pub(crate) fn empty_input(source: &str) -> Diagnostic {
    let diag = Diagnostic::error("no relations found")
        .with_code(ErrorCode::E203)
        .with_help("add at least one line such as `a -> b : 1`");
    if source.is_empty() {
        diag
    } else {
        diag.with_label(Span::new(0..source.len()), "input has only blank lines and comments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_relations;

    fn check(source: &str) -> Vec<Diagnostic> {
        let mut collector = DiagnosticCollector::new();
        let relations = parse_relations(source, &mut collector);
        check_relations(&relations, &mut collector);
        match collector.finish() {
            Ok(()) => Vec::new(),
            Err(err) => err.into_diagnostics(),
        }
    }

    #[test]
    fn test_valid_values_pass() {
        assert!(check("a -> b : 0\nb -> c : 2.5").is_empty());
    }

    #[test]
    fn test_negative_weight() {
        let source = "a -> b : -2";
        let diags = check(source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E200));
        assert_eq!(diags[0].message(), "negative weight `-2`");
        let span = diags[0].primary_label().unwrap().span();
        assert_eq!(&source[span.to_range()], "-2");
    }

    #[test]
    fn test_non_finite_weights() {
        let diags = check("a -> b : nan\nc -> d : -inf");
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.code() == Some(ErrorCode::E201)));
    }

    #[test]
    fn test_empty_identifiers() {
        let diags = check("\"\" -> b : 1\na -> \"   \" : 1");
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.code() == Some(ErrorCode::E202)));
        assert_eq!(diags[0].primary_label().unwrap().span().to_range(), 0..2);
    }

    #[test]
    fn test_empty_input_label() {
        assert!(empty_input("").labels().is_empty());
        let diag = empty_input("# nothing here\n");
        assert_eq!(diag.code(), Some(ErrorCode::E203));
        assert_eq!(diag.labels().len(), 1);
    }
}
