//! Action kinds known to the background dispatch table.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of actions the background listener answers.
///
/// Wire names are matched exactly (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    /// Look up icon URLs for a site by its domain name.
    FetchIconByDomain,
}

impl ActionKind {
    /// Every kind, for exhaustiveness checks.
    pub const ALL: &'static [ActionKind] = &[ActionKind::FetchIconByDomain];

    /// Wire name of this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::FetchIconByDomain => "fetch-icon-by-domain",
        }
    }

    /// Exact-match lookup of a wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire name that is not an [`ActionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| UnknownAction(s.to_string()))
    }
}
