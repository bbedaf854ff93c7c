// src/filters/traits.rs
use crate::types::{StateRef, Token};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Outcome of a token filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterVerdict {
    /// Keep extending the current token
    Accept,
    /// Stop growing the current token
    Halt,
}

impl FilterVerdict {
    pub fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn is_halt(self) -> bool {
        matches!(self, Self::Halt)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Halt => "halt",
        }
    }
}

impl fmt::Display for FilterVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a growing multi-word token may be extended
pub trait TokenFilter: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// `previous` is the token before this extension, if any
    fn check(
        &self,
        token: &Token,
        is_revision: bool,
        previous: Option<&Token>,
        state: StateRef<'_>,
    ) -> FilterVerdict;
}
