//! Parser for the sesh session-type DSL.
//!
//! This crate turns text into the AST defined in `sesh-types` using a pest
//! grammar (`session.pest`). The grammar is a set of mutually recursive rules
//! (session type, branch, payload type) resolved with ordered choice and full
//! backtracking; the builder then assembles pest pairs into AST nodes.
//!
//! # Module Structure
//!
//! - `grammar`: pest binding and rule descriptions
//! - `builder`: pairs → `SessionNode` / `PayloadType`
//! - `error`: `ParseError`, `ErrorSpan` and span bookkeeping
//! - `config`: `ParserConfig` and the nesting guard
//!
//! # Example
//!
//! ```
//! use sesh_grammar::{parse, parse_type};
//! use sesh_types::{BasicKind, PayloadType};
//!
//! let node = parse("+Client:{ Request(string).end }").unwrap();
//! assert!(node.is_send());
//! assert_eq!(node.to_string(), "+client:{request(string).end}");
//!
//! let ty = parse_type("boolean[]").unwrap();
//! assert_eq!(ty, PayloadType::List(BasicKind::Boolean));
//!
//! assert!(parse("&Server").is_err());
//! ```
//!
//! All entry points are pure functions and can be called from any number of
//! threads at once.

mod builder;
mod config;
mod error;
mod grammar;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use error::{CollectionKind, ErrorSpan, ParseError, ParseErrorKind};

use pest::iterators::Pair;
use pest::Parser;
use sesh_types::{PayloadType, SessionNode};
use tracing::debug;

use error::Source;
use grammar::{Rule, SessionParser};

pub type Result<T> = std::result::Result<T, ParseError>;

type Build<T> = for<'i, 'r, 's> fn(Pair<'i, Rule>, &'r Source<'s>) -> Result<T>;

/// Run `rule` over the trimmed input, build the AST and require that the
/// whole input was consumed.
fn run<T>(input: &str, config: &ParserConfig, rule: Rule, build: Build<T>) -> Result<T> {
    let source = Source::trimmed(input);
    config::check_depth(&source, config.max_depth)?;

    let mut pairs =
        SessionParser::parse(rule, source.text()).map_err(|e| source.syntax_error(&e))?;
    let pair = pairs.next().ok_or_else(|| ParseError::Syntax {
        span: source.span(0, 0),
        message: format!("expected {}", rule.describe()),
    })?;

    let end = pair.as_span().end();
    let value = build(pair, &source)?;
    source.expect_consumed(end)?;
    Ok(value)
}

fn log_outcome<T>(what: &str, result: &Result<T>) {
    match result {
        Ok(_) => debug!(what, "parse succeeded"),
        Err(err) => debug!(
            what,
            kind = ?err.kind(),
            line = err.span().line,
            column = err.span().column,
            "parse failed"
        ),
    }
}

/// Parse a complete session-type expression.
pub fn parse(input: &str) -> Result<SessionNode> {
    parse_with_config(input, &ParserConfig::default())
}

/// Parse a complete session-type expression with explicit limits.
pub fn parse_with_config(input: &str, config: &ParserConfig) -> Result<SessionNode> {
    debug!(len = input.len(), max_depth = config.max_depth, "parsing session type");
    let result = run(input, config, Rule::session_type, builder::build_session);
    log_outcome("session type", &result);
    result
}

/// Parse a complete payload-type expression.
pub fn parse_type(input: &str) -> Result<PayloadType> {
    parse_type_with_config(input, &ParserConfig::default())
}

/// Parse a complete payload-type expression with explicit limits.
pub fn parse_type_with_config(input: &str, config: &ParserConfig) -> Result<PayloadType> {
    debug!(len = input.len(), max_depth = config.max_depth, "parsing payload type");
    let result = run(input, config, Rule::payload_type, builder::build_payload);
    log_outcome("payload type", &result);
    result
}

/// Like [`parse`], but panics with the rendered error message on failure.
#[track_caller]
pub fn parse_or_panic(input: &str) -> SessionNode {
    match parse(input) {
        Ok(node) => node,
        Err(err) => panic!("{err}"),
    }
}

/// Like [`parse_type`], but panics with the rendered error message on failure.
#[track_caller]
pub fn parse_type_or_panic(input: &str) -> PayloadType {
    match parse_type(input) {
        Ok(ty) => ty,
        Err(err) => panic!("{err}"),
    }
}
