//! Core AST for the sesh session-type DSL
//!
//! This crate defines the values produced by the parser in `sesh-grammar`:
//!
//! | Type | Surface form |
//! |------|--------------|
//! | `SessionNode::End` | `end` |
//! | `SessionNode::Receive` | `&role:{ label(payload).cont, ... }` |
//! | `SessionNode::Send` | `+role:{ label(payload).cont, ... }` |
//! | `SessionNode::NamedHandler` | `handler_name` |
//! | `PayloadType` | `string`, `number[]`, `(unit, (boolean, string[]))` |
//!
//! All nodes are immutable once built and compare structurally. Identifiers
//! are stored as canonical [`Symbol`]s (see [`normalize`]).
//!
//! `Display` renders every node back into canonical surface syntax, so
//! `parse(&node.to_string())` yields `node` again.

mod identifiers;
mod non_empty;
mod payload;
mod session;

pub use identifiers::{normalize, validate_ident, IdentifierError, Symbol};
pub use non_empty::{NonEmptyError, NonEmptyVec};
pub use payload::{BasicKind, PayloadType};
pub use session::{Branch, SessionNode};
