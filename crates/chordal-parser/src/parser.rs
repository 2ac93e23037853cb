//! Line parser for relation lists.
//!
//! Each non-blank line holds one relation, optionally followed by a comment:
//!
//! ```text
//! # who talks to whom
//! alice -> bob : 3
//! "big team" -> alice : 1.5   # quoted names may contain spaces
//! ```
//!
//! A bad line produces a diagnostic and parsing resumes on the next line,
//! so one pass reports every syntax error in the input.

use log::trace;
use winnow::{
    Parser as _,
    ascii::{float, line_ending, space0},
    combinator::{alt, cut_err, opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, one_of, take_till, take_while},
};

use chordal_core::{identifier::Id, semantic::Relation};

use crate::{
    Span, Spanned,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<Expectation>>;

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expectation {
    Token {
        what: &'static str,
        help: &'static str,
    },
    UnterminatedString {
        start: usize,
    },
    InvalidEscape {
        start: usize,
    },
}

const HELP_RELATION: &str = "relations are written `source -> target : weight`";

const ARROW: Expectation = Expectation::Token {
    what: "`->`",
    help: HELP_RELATION,
};
const TARGET: Expectation = Expectation::Token {
    what: "a target identifier",
    help: "identifiers are letters, digits, `_` and `.`, or any text in double quotes",
};
const COLON: Expectation = Expectation::Token {
    what: "`:` before the weight",
    help: HELP_RELATION,
};
const WEIGHT: Expectation = Expectation::Token {
    what: "a numeric weight",
    help: "weights are decimal numbers such as `2` or `3.5`",
};
const END_OF_LINE: Expectation = Expectation::Token {
    what: "the end of the line",
    help: "write one relation per line; comments start with `#`",
};
const RELATION: Expectation = Expectation::Token {
    what: "a relation",
    help: HELP_RELATION,
};

/// A relation as written in the source, with the span of each part.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RelationDecl {
    pub source: Spanned<String>,
    pub target: Spanned<String>,
    pub weight: Spanned<f64>,
}

impl RelationDecl {
    pub fn span(&self) -> Span {
        self.source.span().union(self.weight.span())
    }

    pub fn into_relation(self) -> Relation {
        Relation::new(
            Id::new(self.source.inner()),
            Id::new(self.target.inner()),
            *self.weight.inner(),
        )
    }
}

/// Parses every line of `source`, emitting a diagnostic for each bad line.
pub(crate) fn parse_relations(
    source: &str,
    collector: &mut DiagnosticCollector,
) -> Vec<RelationDecl> {
    let mut input = LocatingSlice::new(source);
    let mut relations = Vec::new();

    while input.eof_offset() > 0 {
        match line(&mut input) {
            Ok(Some(relation)) => {
                trace!(
                    from = relation.source.inner().as_str(),
                    to = relation.target.inner().as_str();
                    "Parsed relation"
                );
                relations.push(relation);
            }
            Ok(None) => {}
            Err(err) => {
                let position = input.current_token_start();
                collector.emit(to_diagnostic(&err, source, position));
                skip_line(&mut input);
            }
        }
    }

    relations
}

fn line(input: &mut Input<'_>) -> IResult<Option<RelationDecl>> {
    spaces(input)?;
    let relation = opt(relation).parse_next(input)?;
    spaces(input)?;
    opt(comment).parse_next(input)?;

    let expected = if relation.is_some() {
        END_OF_LINE
    } else {
        RELATION
    };
    line_end.context(expected).parse_next(input)?;

    Ok(relation)
}

fn relation(input: &mut Input<'_>) -> IResult<RelationDecl> {
    (
        endpoint,
        spaces,
        cut_err(arrow),
        spaces,
        cut_err(endpoint).context(TARGET),
        spaces,
        cut_err(colon),
        spaces,
        cut_err(weight),
    )
        .map(|(source, _, _, _, target, _, _, _, weight)| RelationDecl {
            source,
            target,
            weight,
        })
        .parse_next(input)
}

fn endpoint(input: &mut Input<'_>) -> IResult<Spanned<String>> {
    alt((quoted, bare))
        .with_span()
        .map(|(name, range)| Spanned::new(name, Span::new(range)))
        .parse_next(input)
}

fn bare(input: &mut Input<'_>) -> IResult<String> {
    take_while(1.., is_bare_char)
        .map(|name: &str| name.to_owned())
        .parse_next(input)
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn quoted(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., alt((escape, none_of(['"', '\\', '\n', '\r'])))).fold(
                String::new,
                |mut name, c| {
                    name.push(c);
                    name
                },
            ),
            '"',
        ))
        .context(Expectation::UnterminatedString { start }),
    )
    .parse_next(input)
}

fn escape(input: &mut Input<'_>) -> IResult<char> {
    let start = input.current_token_start();
    preceded(
        '\\',
        cut_err(one_of(['"', '\\'])).context(Expectation::InvalidEscape { start }),
    )
    .parse_next(input)
}

fn arrow(input: &mut Input<'_>) -> IResult<()> {
    "->".void().context(ARROW).parse_next(input)
}

fn colon(input: &mut Input<'_>) -> IResult<()> {
    ':'.void().context(COLON).parse_next(input)
}

fn weight(input: &mut Input<'_>) -> IResult<Spanned<f64>> {
    float
        .with_span()
        .map(|(value, range): (f64, _)| Spanned::new(value, Span::new(range)))
        .context(WEIGHT)
        .parse_next(input)
}

fn spaces(input: &mut Input<'_>) -> IResult<()> {
    space0.void().parse_next(input)
}

fn comment(input: &mut Input<'_>) -> IResult<()> {
    preceded('#', take_till(0.., ['\n', '\r']))
        .void()
        .parse_next(input)
}

fn line_end(input: &mut Input<'_>) -> IResult<()> {
    if input.eof_offset() == 0 {
        return Ok(());
    }
    line_ending.void().parse_next(input)
}

fn skip_line(input: &mut Input<'_>) {
    while let Some(c) = input.next_token() {
        if c == '\n' {
            break;
        }
    }
}

fn to_diagnostic(
    err: &ErrMode<ContextError<Expectation>>,
    source: &str,
    position: usize,
) -> Diagnostic {
    let expectation = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx.context().next().cloned(),
        ErrMode::Incomplete(_) => None,
    };

    match expectation {
        Some(Expectation::UnterminatedString { start }) => {
            Diagnostic::error("unterminated string literal")
                .with_code(ErrorCode::E001)
                .with_label(Span::new(start..position), "missing closing `\"`")
                .with_help("close quoted identifiers with `\"` before the end of the line")
        }
        Some(Expectation::InvalidEscape { start }) => {
            let escaped_len = source
                .get(start + 1..)
                .and_then(|rest| rest.chars().next())
                .map_or(0, char::len_utf8);
            Diagnostic::error("invalid escape sequence")
                .with_code(ErrorCode::E002)
                .with_label(Span::new(start..start + 1 + escaped_len), "unknown escape")
                .with_help("only `\\\"` and `\\\\` can be escaped inside quotes")
        }
        Some(Expectation::Token { what, help }) => {
            token_diagnostic(source, position, what).with_help(help)
        }
        None => token_diagnostic(source, position, "a relation"),
    }
}

fn token_diagnostic(source: &str, position: usize, what: &str) -> Diagnostic {
    match found_at(source, position) {
        Some(found) => Diagnostic::error(format!("unexpected `{found}`, expected {what}"))
            .with_code(ErrorCode::E100)
            .with_label(
                Span::new(position..position + found.len()),
                format!("expected {what}"),
            ),
        None => {
            let line_start = source[..position].rfind('\n').map_or(0, |i| i + 1);
            let mut diag = Diagnostic::error(format!("incomplete relation, expected {what}"))
                .with_code(ErrorCode::E101)
                .with_label(Span::new(position..position), format!("expected {what}"));
            if line_start < position {
                diag = diag.with_secondary_label(
                    Span::new(line_start..position),
                    "this relation is incomplete",
                );
            }
            diag
        }
    }
}

/// The whitespace-delimited token at `position`, or `None` at the end of a line.
fn found_at(source: &str, position: usize) -> Option<&str> {
    let rest = source.get(position..)?;
    if rest.starts_with(['\n', '\r', '#']) {
        return None;
    }
    let token = rest.split(char::is_whitespace).next().unwrap_or_default();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn parse_ok(source: &str) -> Vec<RelationDecl> {
        let mut collector = DiagnosticCollector::new();
        let relations = parse_relations(source, &mut collector);
        assert!(
            collector.finish().is_ok(),
            "unexpected diagnostics for {source:?}"
        );
        relations
    }

    fn parse_err(source: &str) -> Vec<Diagnostic> {
        let mut collector = DiagnosticCollector::new();
        parse_relations(source, &mut collector);
        collector
            .finish()
            .expect_err("expected diagnostics")
            .into_diagnostics()
    }

    #[test]
    fn test_simple_relation() {
        let relations = parse_ok("a -> b : 2\n");
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].source.inner(), "a");
        assert_eq!(relations[0].target.inner(), "b");
        assert_approx_eq!(f64, *relations[0].weight.inner(), 2.0);
    }

    #[test]
    fn test_spans_are_absolute() {
        let source = "# header\nalpha -> beta : 1.5";
        let relations = parse_ok(source);
        let relation = &relations[0];

        assert_eq!(relation.source.span().to_range(), 9..14);
        assert_eq!(&source[relation.target.span().to_range()], "beta");
        assert_eq!(&source[relation.weight.span().to_range()], "1.5");
        assert_eq!(relation.span().to_range(), 9..source.len());
    }

    #[test]
    fn test_compact_spacing() {
        let relations = parse_ok("a->b:3");
        assert_eq!(relations[0].target.inner(), "b");
        assert_approx_eq!(f64, *relations[0].weight.inner(), 3.0);
    }

    #[test]
    fn test_blank_lines_and_comments() {
        let source = "\n   \n# only a comment\na -> b : 1 # trailing\n\t\nb -> c : 2\r\n";
        let relations = parse_ok(source);
        assert_eq!(relations.len(), 2);
        assert_eq!(relations[1].source.inner(), "b");
    }

    #[test]
    fn test_quoted_identifiers() {
        let relations = parse_ok(r#""big team" -> "say \"hi\" \\ bye" : 4"#);
        assert_eq!(relations[0].source.inner(), "big team");
        assert_eq!(relations[0].target.inner(), r#"say "hi" \ bye"#);
    }

    #[test]
    fn test_bare_identifiers_are_ascii() {
        let diags = parse_err("Zürich -> Bern : 1");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E100));
        assert_eq!(diags[0].primary_label().unwrap().span().start(), 1);

        let relations = parse_ok(r#""Zürich" -> "東京" : 1"#);
        assert_eq!(relations[0].source.inner(), "Zürich");
        assert_eq!(relations[0].target.inner(), "東京");
    }

    #[test]
    fn test_negative_and_special_weights_parse() {
        let relations = parse_ok("a -> b : -2\nc -> d : inf\ne -> f : 1e3");
        assert_approx_eq!(f64, *relations[0].weight.inner(), -2.0);
        assert!(relations[1].weight.inner().is_infinite());
        assert_approx_eq!(f64, *relations[2].weight.inner(), 1000.0);
    }

    #[test]
    fn test_missing_arrow_is_unexpected_token() {
        let diags = parse_err("a b : 1");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E100));
        assert_eq!(diags[0].message(), "unexpected `b`, expected `->`");
        assert_eq!(diags[0].primary_label().unwrap().span().to_range(), 2..3);
    }

    #[test]
    fn test_truncated_relation_is_incomplete() {
        let diags = parse_err("a -> b");
        assert_eq!(diags[0].code(), Some(ErrorCode::E101));
        assert_eq!(
            diags[0].message(),
            "incomplete relation, expected `:` before the weight"
        );
        let secondary = &diags[0].labels()[1];
        assert_eq!(secondary.span().to_range(), 0..6);
    }

    #[test]
    fn test_missing_weight_before_comment() {
        let diags = parse_err("a -> b : # forgot");
        assert_eq!(diags[0].code(), Some(ErrorCode::E101));
        assert!(diags[0].message().contains("numeric weight"));
    }

    #[test]
    fn test_line_starting_with_arrow() {
        let diags = parse_err("-> b : 1");
        assert_eq!(diags[0].code(), Some(ErrorCode::E100));
        assert_eq!(diags[0].message(), "unexpected `->`, expected a relation");
    }

    #[test]
    fn test_trailing_garbage() {
        let diags = parse_err("a -> b : 1 extra");
        assert_eq!(diags[0].code(), Some(ErrorCode::E100));
        assert!(diags[0].message().contains("end of the line"));
    }

    #[test]
    fn test_unterminated_string() {
        let diags = parse_err("\"open -> b : 1\nc -> d : 2");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E001));
        assert_eq!(diags[0].primary_label().unwrap().span().to_range(), 0..14);
    }

    #[test]
    fn test_invalid_escape() {
        let diags = parse_err(r#""a\n" -> b : 1"#);
        assert_eq!(diags[0].code(), Some(ErrorCode::E002));
        assert_eq!(diags[0].primary_label().unwrap().span().to_range(), 2..4);
    }

    #[test]
    fn test_recovers_and_reports_every_line() {
        let source = "a -> b : 1\nbroken\nc -> : 2\nd -> e : 3";
        let mut collector = DiagnosticCollector::new();
        let relations = parse_relations(source, &mut collector);

        assert_eq!(relations.len(), 2);
        let diags = collector.finish().unwrap_err().into_diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code(), Some(ErrorCode::E101));
        assert_eq!(diags[1].code(), Some(ErrorCode::E100));
        assert!(diags[1].message().contains("target identifier"));
    }

    #[test]
    fn test_into_relation() {
        let relation = parse_ok("x -> y : 5").remove(0).into_relation();
        assert_eq!(relation.source(), Id::new("x"));
        assert_eq!(relation.target(), Id::new("y"));
        assert_approx_eq!(f64, relation.weight(), 5.0);
    }
}
