//! Canonical identifiers used for role names, message labels and handler names.
//!
//! Surface identifiers may be written in CamelCase or snake_case. Every
//! identifier stored in the AST goes through [`normalize`] first, so two
//! spellings of the same name (`RequestData`, `request_data`) produce equal
//! [`Symbol`]s.

use std::fmt;
use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierError {
    pub value: String,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid identifier: {:?}", self.value)
    }
}

impl std::error::Error for IdentifierError {}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Check that `value` matches `(letter | "_") (letter | digit | "_")*`.
pub fn validate_ident(value: &str) -> Result<(), IdentifierError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => is_ident_start(first) && chars.all(is_ident_continue),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(IdentifierError {
            value: value.to_string(),
        })
    }
}

/// Convert a CamelCase or snake_case identifier into its canonical form.
///
/// A `_` is inserted before every uppercase letter that follows a lowercase
/// letter or a digit, the result is lowercased and runs of `_` collapse into
/// one. The function is idempotent.
///
/// ```
/// use sesh_types::normalize;
///
/// assert_eq!(normalize("RequestData"), "request_data");
/// assert_eq!(normalize("request__data"), "request_data");
/// assert_eq!(normalize(&normalize("HTTPServer")), normalize("HTTPServer"));
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev: Option<char> = None;

    for ch in raw.chars() {
        if ch == '_' {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            if ch.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
                && !out.ends_with('_')
            {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        }
        prev = Some(ch);
    }

    out
}

/// A canonical identifier.
///
/// Symbols can only be built through normalization, so the stored text is
/// always lowercase with single `_` separators.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Validate `raw` as an identifier and normalize it.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
        let raw = raw.as_ref();
        validate_ident(raw)?;
        Ok(Self::from_ident(raw))
    }

    /// Normalize a token the caller already matched as an identifier.
    pub fn from_ident(raw: &str) -> Self {
        debug_assert!(validate_ident(raw).is_ok());
        Self(Arc::from(normalize(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Symbol {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Symbol> for &str {
    fn eq(&self, other: &Symbol) -> bool {
        *self == other.as_str()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Symbol::new(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(normalize("Server"), "server");
        assert_eq!(normalize("RequestData"), "request_data");
        assert_eq!(normalize("getHTTPResponse"), "get_httpresponse");
    }

    #[test]
    fn test_snake_case_unchanged() {
        assert_eq!(normalize("already_snake"), "already_snake");
        assert_eq!(normalize("ack"), "ack");
    }

    #[test]
    fn test_underscores_collapse() {
        assert_eq!(normalize("foo__bar"), "foo_bar");
        assert_eq!(normalize("Foo_Bar"), "foo_bar");
        assert_eq!(normalize("__private"), "_private");
    }

    #[test]
    fn test_digits() {
        assert_eq!(normalize("a1B"), "a1_b");
        assert_eq!(normalize("Worker2"), "worker2");
        assert_eq!(normalize("v2Payload"), "v2_payload");
    }

    #[test]
    fn test_uppercase_runs() {
        assert_eq!(normalize("HTTPServer"), "httpserver");
        assert_eq!(normalize("ABC"), "abc");
    }

    #[test]
    fn test_symbol_validation() {
        assert!(Symbol::new("Client").is_ok());
        assert!(Symbol::new("_x1").is_ok());
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("1abc").is_err());
        assert!(Symbol::new("has-dash").is_err());
        assert!(Symbol::new("with space").is_err());
    }

    #[test]
    fn test_symbol_compares_by_canonical_value() {
        let a = Symbol::new("RequestData").unwrap();
        let b = Symbol::new("request_data").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "request_data");
        assert_eq!(format!("{a:?}"), "Symbol(request_data)");
    }

    #[test]
    fn test_symbol_serde() {
        let sym = Symbol::new("PingPong").unwrap();
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"ping_pong\"");

        let back: Symbol = serde_json::from_str("\"PingPong\"").unwrap();
        assert_eq!(back, sym);

        assert!(serde_json::from_str::<Symbol>("\"not valid\"").is_err());
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalized_output_is_canonical(raw in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
            let out = normalize(&raw);
            prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert!(!out.contains("__"));
            prop_assert!(validate_ident(&out).is_ok());
        }
    }
}
