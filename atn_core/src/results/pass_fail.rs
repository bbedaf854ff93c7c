// src/results/pass_fail.rs
//! Tri-state outcome of a rule-step test

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a rule-step test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassFail {
    /// Test applied and accepted
    Pass,
    /// Test applied and rejected
    Fail,
    /// Test did not apply; does not block the match
    NotApplicable,
}

impl PassFail {
    /// PASS when `accept`, otherwise FAIL
    pub fn from_accept(accept: bool) -> Self {
        if accept {
            PassFail::Pass
        } else {
            PassFail::Fail
        }
    }

    /// NOT_APPLICABLE when both flags are set, PASS when only `accept` is,
    /// otherwise FAIL
    pub fn from_flags(accept: bool, not_applicable: bool) -> Self {
        match (accept, not_applicable) {
            (true, true) => PassFail::NotApplicable,
            (true, false) => PassFail::Pass,
            (false, _) => PassFail::Fail,
        }
    }

    /// True for PASS and NOT_APPLICABLE
    pub fn accept(&self) -> bool {
        matches!(self, PassFail::Pass | PassFail::NotApplicable)
    }

    /// True only for PASS
    pub fn conditional_accept(&self) -> bool {
        matches!(self, PassFail::Pass)
    }

    /// Swap PASS and FAIL; NOT_APPLICABLE is unchanged
    pub fn reverse(&self) -> Self {
        match self {
            PassFail::Pass => PassFail::Fail,
            PassFail::Fail => PassFail::Pass,
            PassFail::NotApplicable => PassFail::NotApplicable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PassFail::Pass => "PASS",
            PassFail::Fail => "FAIL",
            PassFail::NotApplicable => "NOT_APPLICABLE",
        }
    }
}

impl fmt::Display for PassFail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for PassFail {
    fn from(accept: bool) -> Self {
        PassFail::from_accept(accept)
    }
}
