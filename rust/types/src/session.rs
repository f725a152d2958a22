//! Session types as seen by a single participant.
//!
//! A [`SessionNode`] says whether the role is about to send or receive, the
//! labelled alternatives it may take, and what follows each alternative.
//!
//! - `SessionNode::End` ↔ surface `end`
//! - `SessionNode::Receive` ↔ `&role:{...}` (external choice)
//! - `SessionNode::Send` ↔ `+role:{...}` (internal choice)
//! - `SessionNode::NamedHandler` ↔ a bare identifier

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{NonEmptyVec, PayloadType, Symbol};

/// One labelled alternative inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    pub label: Symbol,
    pub payload: PayloadType,
    pub continuation: Box<SessionNode>,
}

impl Branch {
    #[must_use]
    pub fn new(label: Symbol, payload: PayloadType, continuation: SessionNode) -> Self {
        Self {
            label,
            payload,
            continuation: Box::new(continuation),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}).{}", self.label, self.payload, self.continuation)
    }
}

/// Session type for one role.
///
/// # Examples
///
/// ```
/// use sesh_types::{BasicKind, Branch, PayloadType, SessionNode, Symbol};
///
/// let st = SessionNode::send(
///     Symbol::new("Client").unwrap(),
///     Branch::new(
///         Symbol::new("Request").unwrap(),
///         PayloadType::basic(BasicKind::Binary),
///         SessionNode::End,
///     ),
/// );
///
/// assert_eq!(st.to_string(), "+client:{request(string).end}");
/// assert_eq!(st.depth(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionNode {
    /// Protocol termination
    End,
    /// External choice: wait for one of the offered messages
    Receive {
        from: Symbol,
        branches: NonEmptyVec<Branch>,
    },
    /// Internal choice: pick and send one of the messages
    Send {
        to: Symbol,
        branches: NonEmptyVec<Branch>,
    },
    /// Leaf handing control to an out-of-band handler
    NamedHandler { handler: Symbol },
}

impl SessionNode {
    /// Create a send with one branch
    #[must_use]
    pub fn send(to: Symbol, branch: Branch) -> Self {
        SessionNode::Send {
            to,
            branches: NonEmptyVec::singleton(branch),
        }
    }

    /// Create a send with several branches
    pub fn send_choice(to: Symbol, branches: Vec<Branch>) -> Result<Self, crate::NonEmptyError> {
        Ok(SessionNode::Send {
            to,
            branches: NonEmptyVec::new(branches)?,
        })
    }

    /// Create a receive with one branch
    #[must_use]
    pub fn receive(from: Symbol, branch: Branch) -> Self {
        SessionNode::Receive {
            from,
            branches: NonEmptyVec::singleton(branch),
        }
    }

    /// Create a receive with several branches
    pub fn receive_choice(
        from: Symbol,
        branches: Vec<Branch>,
    ) -> Result<Self, crate::NonEmptyError> {
        Ok(SessionNode::Receive {
            from,
            branches: NonEmptyVec::new(branches)?,
        })
    }

    #[must_use]
    pub fn handler(handler: Symbol) -> Self {
        SessionNode::NamedHandler { handler }
    }

    /// Branches of a choice, empty for leaves.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        match self {
            SessionNode::Send { branches, .. } | SessionNode::Receive { branches, .. } => {
                branches.as_slice()
            }
            SessionNode::End | SessionNode::NamedHandler { .. } => &[],
        }
    }

    /// Number of nested choices on the longest path.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            SessionNode::End | SessionNode::NamedHandler { .. } => 0,
            SessionNode::Send { branches, .. } | SessionNode::Receive { branches, .. } => {
                1 + branches
                    .iter()
                    .map(|b| b.continuation.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Labels of the top-level choice, in surface order.
    #[must_use]
    pub fn labels(&self) -> Vec<&Symbol> {
        self.branches().iter().map(|b| &b.label).collect()
    }

    /// Every role this session type talks to, sorted.
    #[must_use]
    pub fn partners(&self) -> Vec<Symbol> {
        let mut result = BTreeSet::new();
        self.collect_partners(&mut result);
        result.into_iter().collect()
    }

    fn collect_partners(&self, partners: &mut BTreeSet<Symbol>) {
        match self {
            SessionNode::End | SessionNode::NamedHandler { .. } => {}
            SessionNode::Send { to: role, branches }
            | SessionNode::Receive {
                from: role,
                branches,
            } => {
                partners.insert(role.clone());
                for branch in branches {
                    branch.continuation.collect_partners(partners);
                }
            }
        }
    }

    /// Named handlers reachable from this node, sorted.
    #[must_use]
    pub fn handlers(&self) -> Vec<Symbol> {
        let mut result = BTreeSet::new();
        self.collect_handlers(&mut result);
        result.into_iter().collect()
    }

    fn collect_handlers(&self, handlers: &mut BTreeSet<Symbol>) {
        match self {
            SessionNode::End => {}
            SessionNode::NamedHandler { handler } => {
                handlers.insert(handler.clone());
            }
            SessionNode::Send { branches, .. } | SessionNode::Receive { branches, .. } => {
                for branch in branches {
                    branch.continuation.collect_handlers(handlers);
                }
            }
        }
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, SessionNode::End)
    }

    #[must_use]
    pub fn is_send(&self) -> bool {
        matches!(self, SessionNode::Send { .. })
    }

    #[must_use]
    pub fn is_receive(&self) -> bool {
        matches!(self, SessionNode::Receive { .. })
    }

    #[must_use]
    pub fn is_handler(&self) -> bool {
        matches!(self, SessionNode::NamedHandler { .. })
    }
}

fn write_branches(f: &mut fmt::Formatter<'_>, branches: &NonEmptyVec<Branch>) -> fmt::Result {
    f.write_str("{")?;
    for (i, branch) in branches.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{branch}")?;
    }
    f.write_str("}")
}

impl fmt::Display for SessionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionNode::End => f.write_str("end"),
            SessionNode::Receive { from, branches } => {
                write!(f, "&{from}:")?;
                write_branches(f, branches)
            }
            SessionNode::Send { to, branches } => {
                write!(f, "+{to}:")?;
                write_branches(f, branches)
            }
            SessionNode::NamedHandler { handler } => write!(f, "{handler}"),
        }
    }
}
