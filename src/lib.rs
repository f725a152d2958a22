// Session-type DSL: AST and parser
//
// Re-exports the AST from `sesh-types` and the parser entry points from
// `sesh-grammar` so downstream code depends on a single crate.

pub use sesh_grammar::{
    parse, parse_or_panic, parse_type, parse_type_or_panic, parse_type_with_config,
    parse_with_config, CollectionKind, ErrorSpan, ParseError, ParseErrorKind, ParserConfig,
    DEFAULT_MAX_DEPTH,
};
pub use sesh_types::{
    normalize, validate_ident, BasicKind, Branch, IdentifierError, NonEmptyError, NonEmptyVec,
    PayloadType, SessionNode, Symbol,
};

/// Result type returned by the parser entry points.
pub type Result<T> = sesh_grammar::Result<T>;

/// Parse a batch of session-type expressions, stopping at the first failure.
///
/// The error is paired with the index of the failing input.
pub fn parse_all<'a, I>(inputs: I) -> std::result::Result<Vec<SessionNode>, (usize, ParseError)>
where
    I: IntoIterator<Item = &'a str>,
{
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| parse(input).map_err(|err| (index, err)))
        .collect()
}
