//! Payload types carried by messages.
//!
//! A payload is a basic type, a list of a basic type, or a tuple of payloads.
//! Tuples nest arbitrarily; lists only hold basic elements, which the
//! [`PayloadType::List`] variant encodes directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::NonEmptyVec;

/// The four basic payload kinds.
///
/// The surface keyword for [`BasicKind::Binary`] is `string`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Binary,
    Number,
    Unit,
    Boolean,
}

impl BasicKind {
    pub const ALL: [BasicKind; 4] = [
        BasicKind::Binary,
        BasicKind::Number,
        BasicKind::Unit,
        BasicKind::Boolean,
    ];

    /// Look up the kind named by a surface keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(BasicKind::Binary),
            "number" => Some(BasicKind::Number),
            "unit" => Some(BasicKind::Unit),
            "boolean" => Some(BasicKind::Boolean),
            _ => None,
        }
    }

    /// The surface keyword for this kind.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            BasicKind::Binary => "string",
            BasicKind::Number => "number",
            BasicKind::Unit => "unit",
            BasicKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Shape of the data carried by a message.
///
/// # Examples
///
/// ```
/// use sesh_types::{BasicKind, PayloadType};
///
/// let pair = PayloadType::tuple(vec![
///     PayloadType::basic(BasicKind::Binary),
///     PayloadType::list(BasicKind::Boolean),
/// ])
/// .unwrap();
///
/// assert_eq!(pair.to_string(), "(string, boolean[])");
/// assert_eq!(pair.depth(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum PayloadType {
    Basic(BasicKind),
    List(BasicKind),
    Tuple(NonEmptyVec<PayloadType>),
}

impl PayloadType {
    #[must_use]
    pub fn basic(kind: BasicKind) -> Self {
        PayloadType::Basic(kind)
    }

    #[must_use]
    pub fn list(element: BasicKind) -> Self {
        PayloadType::List(element)
    }

    /// Build a tuple; fails when `elements` is empty.
    pub fn tuple(elements: Vec<PayloadType>) -> Result<Self, crate::NonEmptyError> {
        NonEmptyVec::new(elements).map(PayloadType::Tuple)
    }

    /// Element type of a list, as a payload.
    #[must_use]
    pub fn list_element(&self) -> Option<PayloadType> {
        match self {
            PayloadType::List(kind) => Some(PayloadType::Basic(*kind)),
            _ => None,
        }
    }

    /// Structural depth: a basic type is 1, a list 2, a tuple one more than
    /// its deepest element.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            PayloadType::Basic(_) => 1,
            PayloadType::List(_) => 2,
            PayloadType::Tuple(elements) => {
                1 + elements.iter().map(PayloadType::depth).max().unwrap_or(0)
            }
        }
    }

    #[must_use]
    pub fn is_basic(&self) -> bool {
        matches!(self, PayloadType::Basic(_))
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, PayloadType::List(_))
    }

    #[must_use]
    pub fn is_tuple(&self) -> bool {
        matches!(self, PayloadType::Tuple(_))
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadType::Basic(kind) => write!(f, "{kind}"),
            PayloadType::List(kind) => write!(f, "{kind}[]"),
            PayloadType::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}
