//! AST construction from pest pairs.
//!
//! The grammar accepts a few shapes that are still invalid (empty `{}` and
//! `()`, unknown basic-type names); those are rejected here with a dedicated
//! error kind. Each function consumes one pair and returns a finished node.

use pest::iterators::Pair;
use sesh_types::{BasicKind, Branch, NonEmptyVec, PayloadType, SessionNode, Symbol};
use tracing::trace;

use crate::error::{CollectionKind, ParseError, Source};
use crate::grammar::Rule;

type BuildResult<T> = std::result::Result<T, ParseError>;

fn symbol(pair: &Pair<'_, Rule>) -> Symbol {
    Symbol::from_ident(pair.as_str())
}

/// Unwrap a wrapper rule (`session_type`, `payload_type`) to its single child.
fn unwrap_choice<'i>(
    pair: Pair<'i, Rule>,
    wrapper: Rule,
    source: &Source<'_>,
) -> BuildResult<Pair<'i, Rule>> {
    if pair.as_rule() != wrapper {
        return Ok(pair);
    }
    let span = pair.as_span();
    pair.into_inner()
        .next()
        .ok_or_else(|| source.malformed(span, wrapper.describe()))
}

/// Build a [`SessionNode`] from a `session_type` pair or one of its alternatives.
pub(crate) fn build_session(pair: Pair<'_, Rule>, source: &Source<'_>) -> BuildResult<SessionNode> {
    let pair = unwrap_choice(pair, Rule::session_type, source)?;
    let span = pair.as_span();

    match pair.as_rule() {
        Rule::end => Ok(SessionNode::End),
        Rule::receive => {
            let (from, branches) = build_choice(pair, source)?;
            Ok(SessionNode::Receive { from, branches })
        }
        Rule::send => {
            let (to, branches) = build_choice(pair, source)?;
            Ok(SessionNode::Send { to, branches })
        }
        Rule::handler => {
            let ident = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::identifier)
                .ok_or_else(|| source.malformed(span, "handler"))?;
            let handler = symbol(&ident);
            trace!(%handler, "built handler leaf");
            Ok(SessionNode::NamedHandler { handler })
        }
        _ => Err(source.malformed(span, "session type")),
    }
}

/// Shared body of `receive` and `send`: the role and its branches.
fn build_choice(
    pair: Pair<'_, Rule>,
    source: &Source<'_>,
) -> BuildResult<(Symbol, NonEmptyVec<Branch>)> {
    let span = pair.as_span();
    let mut role = None;
    let mut branches = Vec::new();

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::identifier => role = Some(symbol(&item)),
            Rule::branch => branches.push(build_branch(item, source)?),
            _ => {}
        }
    }

    let role = role.ok_or_else(|| source.malformed(span, "role name"))?;
    let branches = NonEmptyVec::new(branches).map_err(|_| ParseError::EmptyCollection {
        collection: CollectionKind::Branches,
        span: source.pest_span(span),
    })?;

    trace!(%role, branches = branches.len(), "built choice");
    Ok((role, branches))
}

/// Build a [`Branch`] from `label ( payload ) . continuation`.
pub(crate) fn build_branch(pair: Pair<'_, Rule>, source: &Source<'_>) -> BuildResult<Branch> {
    let span = pair.as_span();
    let mut label = None;
    let mut payload = None;
    let mut continuation = None;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::identifier => label = Some(symbol(&item)),
            Rule::payload_type => payload = Some(build_payload(item, source)?),
            Rule::session_type => continuation = Some(build_session(item, source)?),
            _ => {}
        }
    }

    let label = label.ok_or_else(|| source.malformed(span, "branch label"))?;
    let payload = payload.ok_or_else(|| source.malformed(span, "branch payload"))?;
    let continuation =
        continuation.ok_or_else(|| source.malformed(span, "branch continuation"))?;

    Ok(Branch::new(label, payload, continuation))
}

/// Build a [`PayloadType`] from a `payload_type` pair or one of its alternatives.
pub(crate) fn build_payload(pair: Pair<'_, Rule>, source: &Source<'_>) -> BuildResult<PayloadType> {
    let pair = unwrap_choice(pair, Rule::payload_type, source)?;
    let span = pair.as_span();

    match pair.as_rule() {
        Rule::basic => Ok(PayloadType::Basic(basic_kind(&pair, source)?)),
        Rule::list => {
            let element = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::basic)
                .ok_or_else(|| source.malformed(span, "list element"))?;
            Ok(PayloadType::List(basic_kind(&element, source)?))
        }
        Rule::tuple => {
            let elements = pair
                .into_inner()
                .filter(|p| p.as_rule() == Rule::payload_type)
                .map(|p| build_payload(p, source))
                .collect::<BuildResult<Vec<_>>>()?;
            let elements =
                NonEmptyVec::new(elements).map_err(|_| ParseError::EmptyCollection {
                    collection: CollectionKind::TupleElements,
                    span: source.pest_span(span),
                })?;
            Ok(PayloadType::Tuple(elements))
        }
        _ => Err(source.malformed(span, "payload type")),
    }
}

fn basic_kind(pair: &Pair<'_, Rule>, source: &Source<'_>) -> BuildResult<BasicKind> {
    BasicKind::from_keyword(pair.as_str()).ok_or_else(|| ParseError::UnknownType {
        name: pair.as_str().to_string(),
        span: source.pest_span(pair.as_span()),
    })
}
