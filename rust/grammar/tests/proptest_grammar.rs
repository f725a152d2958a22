#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Property-based tests for the grammar entry points

use proptest::prelude::*;
use sesh_grammar::{parse, parse_type, ParseErrorKind};
use sesh_types::{normalize, BasicKind, Branch, PayloadType, SessionNode, Symbol};

fn ident_strategy() -> impl Strategy<Value = Symbol> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}".prop_map(|raw| Symbol::new(raw).unwrap())
}

fn handler_strategy() -> impl Strategy<Value = Symbol> {
    ident_strategy().prop_filter("`end` is a keyword", |s| s.as_str() != "end")
}

fn basic_strategy() -> impl Strategy<Value = BasicKind> {
    prop::sample::select(BasicKind::ALL.to_vec())
}

fn payload_strategy() -> impl Strategy<Value = PayloadType> {
    let leaf = prop_oneof![
        basic_strategy().prop_map(PayloadType::Basic),
        basic_strategy().prop_map(PayloadType::List),
    ];
    leaf.prop_recursive(4, 16, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(|elements| PayloadType::tuple(elements).unwrap())
    })
}

fn session_strategy() -> impl Strategy<Value = SessionNode> {
    let leaf = prop_oneof![
        Just(SessionNode::End),
        handler_strategy().prop_map(SessionNode::handler),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        let branch = (ident_strategy(), payload_strategy(), inner)
            .prop_map(|(label, payload, cont)| Branch::new(label, payload, cont));
        (
            any::<bool>(),
            ident_strategy(),
            prop::collection::vec(branch, 1..4),
        )
            .prop_map(|(is_send, role, branches)| {
                if is_send {
                    SessionNode::send_choice(role, branches).unwrap()
                } else {
                    SessionNode::receive_choice(role, branches).unwrap()
                }
            })
    })
}

/// Trailing text that can never continue a complete expression.
fn garbage_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec![";", ")", "}", "]", "#", "!", ",", ".", "end"]),
        "[a-z]{0,4}",
    )
        .prop_map(|(head, tail)| format!(" {head}{tail}"))
}

fn whitespace_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec!["", " ", "  ", "\n", "\t", "\r\n", " \n\t "]),
        1..8,
    )
}

/// Pad every structural token of a canonical rendering with whitespace.
fn respace(canonical: &str, pads: &[&str]) -> String {
    let mut out = String::new();
    let mut next = pads.iter().cycle();
    for ch in canonical.chars() {
        if "{},.:()[]&+".contains(ch) {
            out.push_str(next.next().unwrap());
            out.push(ch);
            out.push_str(next.next().unwrap());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Payload nested to exactly `depth`, alternating between tuple shapes.
fn nested_payload(depth: usize) -> String {
    match depth {
        1 => "number".to_string(),
        2 => "boolean[]".to_string(),
        d if d % 2 == 0 => format!("(string[], {})", nested_payload(d - 1)),
        d => format!("({})", nested_payload(d - 1)),
    }
}

proptest! {
    /// Property: canonical rendering parses back to the same AST
    #[test]
    fn rendering_round_trips(node in session_strategy()) {
        let rendered = node.to_string();
        prop_assert_eq!(parse(&rendered).unwrap(), node);
    }

    #[test]
    fn payload_rendering_round_trips(ty in payload_strategy()) {
        prop_assert_eq!(parse_type(&ty.to_string()).unwrap(), ty);
    }

    /// Property: whitespace between tokens does not change the result
    #[test]
    fn whitespace_is_insignificant(node in session_strategy(), pads in whitespace_strategy()) {
        let spaced = respace(&node.to_string(), &pads);
        prop_assert_eq!(parse(&spaced).unwrap(), node);
    }

    /// Property: trailing garbage is reported as incomplete consumption
    #[test]
    fn trailing_garbage_rejected(node in session_strategy(), garbage in garbage_strategy()) {
        let input = format!("{node}{garbage}");
        let err = parse(&input).unwrap_err();
        prop_assert_eq!(err.kind(), ParseErrorKind::IncompleteConsumption);
    }

    #[test]
    fn trailing_garbage_rejected_for_payloads(ty in payload_strategy(), garbage in garbage_strategy()) {
        let input = format!("{ty}{garbage}");
        prop_assert_eq!(parse_type(&input).unwrap_err().kind(), ParseErrorKind::IncompleteConsumption);
    }

    /// Property: handler names are stored normalized
    #[test]
    fn handler_names_normalized(raw in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
        prop_assume!(normalize(&raw) != "end");
        let node = parse(&raw).unwrap();
        prop_assert_eq!(node, SessionNode::handler(Symbol::new(normalize(&raw)).unwrap()));
    }
}

#[test]
fn nesting_depth_matches_generated_depth() {
    for depth in 1..=10 {
        let input = nested_payload(depth);
        let ty = parse_type(&input).unwrap();
        assert_eq!(ty.depth(), depth, "input: {input}");
    }
}
