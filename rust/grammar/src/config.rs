//! Parser configuration and the nesting guard.
//!
//! The grammar recurses once per nested tuple or choice block, so input depth
//! translates directly into stack depth. Inputs nested deeper than
//! [`ParserConfig::max_depth`] are rejected before the grammar runs.

use crate::error::{ParseError, Source};

/// Default limit on bracket nesting (`(` and `{`).
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed nesting of `(` and `{`
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Reject `source` if its bracket nesting exceeds `limit`.
///
/// Unbalanced closers are ignored here; the grammar reports them.
pub(crate) fn check_depth(source: &Source<'_>, limit: usize) -> Result<(), ParseError> {
    let mut depth = 0usize;
    for (offset, ch) in source.text().char_indices() {
        match ch {
            '(' | '{' => {
                depth += 1;
                if depth > limit {
                    return Err(ParseError::NestingTooDeep {
                        depth,
                        limit,
                        span: source.span(offset, offset + 1),
                    });
                }
            }
            ')' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}
