//! pest grammar binding.

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "session.pest"]
pub(crate) struct SessionParser;

impl Rule {
    /// Human-readable name used in syntax error messages.
    #[allow(unreachable_patterns)]
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Rule::identifier => "an identifier",
            Rule::payload_type => "a payload type",
            Rule::basic => "a basic type (string, number, unit, boolean)",
            Rule::list => "a list type `basic[]`",
            Rule::tuple => "a tuple type `(...)`",
            Rule::session_type => "a session type",
            Rule::end => "`end`",
            Rule::receive => "a receive block `&role:{...}`",
            Rule::send => "a send block `+role:{...}`",
            Rule::handler => "a handler name",
            Rule::branch => "a branch `label(payload).continuation`",
            Rule::colon => "`:`",
            Rule::dot => "`.`",
            Rule::comma => "`,`",
            Rule::close_paren => "`)`",
            Rule::close_brace => "`}`",
            _ => "input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    fn matched(rule: Rule, input: &str) -> Option<&str> {
        SessionParser::parse(rule, input)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .map(|pair| pair.as_str())
    }

    #[test]
    fn test_identifier_rule() {
        assert_eq!(matched(Rule::identifier, "Client_2 rest"), Some("Client_2"));
        assert_eq!(matched(Rule::identifier, "_x"), Some("_x"));
        assert_eq!(matched(Rule::identifier, "2x"), None);
    }

    #[test]
    fn test_end_keyword_boundary() {
        assert_eq!(matched(Rule::end, "end"), Some("end"));
        assert_eq!(matched(Rule::end, "endpoint"), None);
        assert_eq!(matched(Rule::session_type, "endpoint"), Some("endpoint"));
    }

    #[test]
    fn test_list_allows_inner_whitespace() {
        assert_eq!(matched(Rule::list, "unit[]"), Some("unit[]"));
        assert_eq!(matched(Rule::list, "unit [ ]"), Some("unit [ ]"));
        assert_eq!(matched(Rule::list, "[]"), None);
        assert_eq!(matched(Rule::payload_type, "unit ]"), Some("unit"));
    }

    #[test]
    fn test_prefix_match_leaves_remainder() {
        assert_eq!(matched(Rule::session_type, "end garbage"), Some("end"));
        assert_eq!(matched(Rule::payload_type, "string)"), Some("string"));
    }

    #[test]
    fn test_empty_braces_are_grammatical() {
        assert_eq!(matched(Rule::session_type, "&r:{}"), Some("&r:{}"));
        assert_eq!(matched(Rule::payload_type, "()"), Some("()"));
    }

    #[test]
    fn test_separator_rules() {
        assert_eq!(matched(Rule::branch, "x(unit) . end"), Some("x(unit) . end"));
        assert_eq!(matched(Rule::branch, "x(unit),end"), None);
        assert_eq!(matched(Rule::receive, "&r : {x(unit).end}"), Some("&r : {x(unit).end}"));
        assert_eq!(Rule::dot.describe(), "`.`");
        assert_eq!(Rule::close_brace.describe(), "`}`");
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert_eq!(matched(Rule::tuple, "(string,)"), None);
        assert_eq!(matched(Rule::send, "+a:{x(unit).end,}"), None);
    }
}
