//! Error types for session-type parsing.
//!
//! Every failure carries an [`ErrorSpan`] pointing into the caller's original
//! input (before surrounding whitespace was trimmed), so the rendered message
//! shows the offending line with a caret underline.

use pest::error::{ErrorVariant, InputLocation};
use pest::Position;
use std::fmt;
use thiserror::Error;

use crate::grammar::Rule;

/// Span information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// Byte offset of the start of the span in the original input
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub line_end: usize,
    pub column_end: usize,
    pub snippet: String,
}

/// Position at `offset`, moved back to the nearest character boundary.
fn position(input: &str, offset: usize) -> Position<'_> {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    Position::new(input, offset).unwrap_or_else(|| Position::from_start(input))
}

impl ErrorSpan {
    /// Create an `ErrorSpan` from byte offsets into `input`.
    pub fn from_offsets(input: &str, start: usize, end: usize) -> Self {
        let (line, column) = position(input, start).line_col();
        let (line_end, column_end) = position(input, end.max(start)).line_col();
        let snippet = input
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or("")
            .to_string();

        Self {
            offset: start,
            line,
            column,
            line_end,
            column_end,
            snippet,
        }
    }

    /// Format the error with context
    #[must_use]
    pub fn format_error(&self, message: &str) -> String {
        let line_num_width = self.line.to_string().len().max(3);
        let mut output = String::new();

        output.push_str(&format!("\n{message}\n"));
        output.push_str(&format!("  --> input:{}:{}\n", self.line, self.column));
        output.push_str(&format!("{:width$} |\n", " ", width = line_num_width));
        output.push_str(&format!(
            "{:>width$} | {}\n",
            self.line,
            self.snippet,
            width = line_num_width
        ));

        let spaces = " ".repeat(line_num_width + 3 + self.column.saturating_sub(1));
        let underline_len = if self.line == self.line_end {
            self.column_end.saturating_sub(self.column).max(1)
        } else {
            (self.snippet.chars().count() + 1)
                .saturating_sub(self.column)
                .max(1)
        };
        output.push_str(&format!("{spaces}{}\n", "^".repeat(underline_len)));

        output
    }
}

/// The collection that was found empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// The branches of a `&role:{}` or `+role:{}` block
    Branches,
    /// The elements of a `()` tuple
    TupleElements,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Branches => f.write_str("branch list"),
            CollectionKind::TupleElements => f.write_str("tuple"),
        }
    }
}

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    Syntax,
    UnknownType,
    IncompleteConsumption,
    EmptyCollection,
    NestingTooDeep,
}

const PREVIEW_CHARS: usize = 32;

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Errors produced while parsing a session type or payload type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{}", .span.format_error(&format!("Syntax error: {}", .message)))]
    Syntax { span: ErrorSpan, message: String },

    #[error("{}", .span.format_error(&format!(
        "Unknown payload type `{}`: expected string, number, unit or boolean",
        .name
    )))]
    UnknownType { name: String, span: ErrorSpan },

    #[error("{}", .span.format_error(&format!(
        "Unexpected input after a complete expression: `{}`",
        preview(.remaining)
    )))]
    IncompleteConsumption { remaining: String, span: ErrorSpan },

    #[error("{}", .span.format_error(&format!(
        "Empty {}: at least one element is required",
        .collection
    )))]
    EmptyCollection {
        collection: CollectionKind,
        span: ErrorSpan,
    },

    #[error("{}", .span.format_error(&format!(
        "Nesting depth {} exceeds the limit of {}",
        .depth, .limit
    )))]
    NestingTooDeep {
        depth: usize,
        limit: usize,
        span: ErrorSpan,
    },
}

impl ParseError {
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::Syntax { .. } => ParseErrorKind::Syntax,
            ParseError::UnknownType { .. } => ParseErrorKind::UnknownType,
            ParseError::IncompleteConsumption { .. } => ParseErrorKind::IncompleteConsumption,
            ParseError::EmptyCollection { .. } => ParseErrorKind::EmptyCollection,
            ParseError::NestingTooDeep { .. } => ParseErrorKind::NestingTooDeep,
        }
    }

    #[must_use]
    pub fn span(&self) -> &ErrorSpan {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::UnknownType { span, .. }
            | ParseError::IncompleteConsumption { span, .. }
            | ParseError::EmptyCollection { span, .. }
            | ParseError::NestingTooDeep { span, .. } => span,
        }
    }
}

/// The slice handed to the grammar, together with the untrimmed input it
/// came from. Offsets reported by pest are relative to `text`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Source<'i> {
    full: &'i str,
    offset: usize,
    text: &'i str,
}

pub(crate) fn is_ws(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

impl<'i> Source<'i> {
    /// Strip surrounding whitespace from `input`.
    pub(crate) fn trimmed(input: &'i str) -> Self {
        let text = input.trim_start_matches(is_ws);
        let offset = input.len() - text.len();
        Self {
            full: input,
            offset,
            text: text.trim_end_matches(is_ws),
        }
    }

    pub(crate) fn text(&self) -> &'i str {
        self.text
    }

    pub(crate) fn span(&self, start: usize, end: usize) -> ErrorSpan {
        ErrorSpan::from_offsets(self.full, self.offset + start, self.offset + end)
    }

    pub(crate) fn pest_span(&self, span: pest::Span<'_>) -> ErrorSpan {
        self.span(span.start(), span.end())
    }

    /// Syntax error for a pair whose children do not have the expected shape.
    pub(crate) fn malformed(&self, span: pest::Span<'_>, what: &str) -> ParseError {
        ParseError::Syntax {
            span: self.pest_span(span),
            message: format!("malformed {what}"),
        }
    }

    /// Fail if anything but whitespace follows byte `end` of the text.
    pub(crate) fn expect_consumed(&self, end: usize) -> Result<(), ParseError> {
        let rest = &self.text[end..];
        let remaining = rest.trim_start_matches(is_ws);
        if remaining.is_empty() {
            return Ok(());
        }
        let start = self.text.len() - remaining.len();
        Err(ParseError::IncompleteConsumption {
            remaining: remaining.to_string(),
            span: self.span(start, self.text.len()),
        })
    }

    /// Translate a pest failure into a [`ParseError::Syntax`].
    pub(crate) fn syntax_error(&self, err: &pest::error::Error<Rule>) -> ParseError {
        let start = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        let next = self.text.get(start..).and_then(|rest| rest.chars().next());
        let end = match err.location {
            InputLocation::Pos(pos) => pos + next.map_or(0, char::len_utf8),
            InputLocation::Span((_, end)) => end,
        };
        let found = match next {
            Some(ch) => format!("`{ch}`"),
            None => "end of input".to_string(),
        };
        let message = match &err.variant {
            ErrorVariant::ParsingError {
                positives,
                negatives,
            } => describe_expectation(positives, negatives, &found),
            ErrorVariant::CustomError { message } => message.clone(),
        };
        ParseError::Syntax {
            span: self.span(start, end),
            message,
        }
    }
}

fn join_alternatives(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => (*one).to_string(),
        [a, b] => format!("{a} or {b}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

fn describe_expectation(positives: &[Rule], negatives: &[Rule], found: &str) -> String {
    let mut expected: Vec<&str> = Vec::new();
    for rule in positives {
        let name = rule.describe();
        if !expected.contains(&name) {
            expected.push(name);
        }
    }
    let mut unexpected: Vec<&str> = Vec::new();
    for rule in negatives {
        let name = rule.describe();
        if !unexpected.contains(&name) {
            unexpected.push(name);
        }
    }

    match (expected.is_empty(), unexpected.is_empty()) {
        (false, true) => format!("expected {}, found {found}", join_alternatives(&expected)),
        (true, false) => format!("unexpected {}", join_alternatives(&unexpected)),
        (false, false) => format!(
            "expected {}, found {found} (unexpected {})",
            join_alternatives(&expected),
            join_alternatives(&unexpected)
        ),
        (true, true) => format!("unexpected {found}"),
    }
}
