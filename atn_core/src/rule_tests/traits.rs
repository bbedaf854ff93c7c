// src/rule_tests/traits.rs
use crate::results::PassFail;
use crate::types::{StateRef, Token};
use std::fmt::Debug;

/// Predicate applied after classification to accept, reject or abstain on
/// a candidate match
///
/// Implementations must not mutate the token or the state tree and must not
/// keep per-call state; one instance is shared by every search branch.
pub trait RuleStepTest: Send + Sync + Debug {
    /// Name for diagnostics
    fn name(&self) -> &str;

    fn accept(&self, token: &Token, state: StateRef<'_>) -> PassFail;
}
