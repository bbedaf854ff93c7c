// src/results/match_result.rs
//! Classification outcome: whether a token matched and whether it is consumed
//!
//! Two forms exist. `FrozenMatch` is used only for the shared canonical
//! TRUE/FALSE values and has no mutators. `WorkingMatch` is owned by the call
//! that built it and can be updated in place. `MatchResult` selects between
//! them at construction time.

use super::error::ResultError;
use atn_support::log_error;
use atn_support::logging::codes;
use std::ptr;

/// Immutable result, only reachable through the canonical statics
#[derive(Debug, PartialEq, Eq)]
pub struct FrozenMatch {
    matched: bool,
    consume: bool,
}

static CANONICAL_TRUE: FrozenMatch = FrozenMatch {
    matched: true,
    consume: false,
};

static CANONICAL_FALSE: FrozenMatch = FrozenMatch {
    matched: false,
    consume: false,
};

impl FrozenMatch {
    /// Shared instance for `matched` (consume is always false)
    pub fn instance(matched: bool) -> &'static FrozenMatch {
        if matched {
            &CANONICAL_TRUE
        } else {
            &CANONICAL_FALSE
        }
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    pub fn consume(&self) -> bool {
        self.consume
    }
}

/// Mutable result owned by a single classification call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingMatch {
    matched: bool,
    consume: bool,
}

impl WorkingMatch {
    pub fn new(matched: bool, consume: bool) -> Self {
        Self { matched, consume }
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    pub fn consume(&self) -> bool {
        self.consume
    }

    pub fn set_matched(&mut self, matched: bool) {
        self.matched = matched;
    }

    pub fn set_consume(&mut self, consume: bool) {
        self.consume = consume;
    }
}

/// Result of context-aware classification
#[derive(Debug, Clone, Copy)]
pub enum MatchResult {
    Canonical(&'static FrozenMatch),
    Working(WorkingMatch),
}

impl MatchResult {
    /// Shared immutable TRUE/FALSE with `consume = false`
    pub fn canonical(matched: bool) -> Self {
        MatchResult::Canonical(FrozenMatch::instance(matched))
    }

    /// Fresh mutable result with `consume = matched`
    pub fn new(matched: bool) -> Self {
        MatchResult::Working(WorkingMatch::new(matched, matched))
    }

    /// Fresh mutable result with both flags given
    pub fn with_consume(matched: bool, consume: bool) -> Self {
        MatchResult::Working(WorkingMatch::new(matched, consume))
    }

    pub fn matched(&self) -> bool {
        match self {
            MatchResult::Canonical(frozen) => frozen.matched(),
            MatchResult::Working(working) => working.matched(),
        }
    }

    pub fn consume(&self) -> bool {
        match self {
            MatchResult::Canonical(frozen) => frozen.consume(),
            MatchResult::Working(working) => working.consume(),
        }
    }

    pub fn is_mutable(&self) -> bool {
        matches!(self, MatchResult::Working(_))
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, MatchResult::Canonical(_))
    }

    /// Update `matched`; canonical results reject the write
    pub fn set_matched(&mut self, matched: bool) -> Result<(), ResultError> {
        match self {
            MatchResult::Working(working) => {
                working.set_matched(matched);
                Ok(())
            }
            MatchResult::Canonical(_) => Err(illegal_mutation("matched")),
        }
    }

    /// Update `consume`; canonical results reject the write
    pub fn set_consume(&mut self, consume: bool) -> Result<(), ResultError> {
        match self {
            MatchResult::Working(working) => {
                working.set_consume(consume);
                Ok(())
            }
            MatchResult::Canonical(_) => Err(illegal_mutation("consume")),
        }
    }

    /// Mutable copy with the same flags, for callers that need to adjust a
    /// canonical outcome
    pub fn to_working(&self) -> WorkingMatch {
        WorkingMatch::new(self.matched(), self.consume())
    }

    /// Whether both results refer to the same canonical instance
    pub fn is_same_instance(&self, other: &MatchResult) -> bool {
        match (self, other) {
            (MatchResult::Canonical(a), MatchResult::Canonical(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl PartialEq for MatchResult {
    fn eq(&self, other: &Self) -> bool {
        self.matched() == other.matched()
            && self.consume() == other.consume()
            && self.is_mutable() == other.is_mutable()
    }
}

impl Eq for MatchResult {}

impl From<WorkingMatch> for MatchResult {
    fn from(working: WorkingMatch) -> Self {
        MatchResult::Working(working)
    }
}

fn illegal_mutation(field: &'static str) -> ResultError {
    log_error!(
        codes::rule_tests::ILLEGAL_MUTATION,
        "Attempted to mutate a canonical match result",
        "field" => field
    );
    ResultError::IllegalMutation { field }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_canonical_identity() {
        for b in [true, false] {
            let first = MatchResult::canonical(b);
            let second = MatchResult::canonical(b);
            assert!(first.is_same_instance(&second));
            assert!(ptr::eq(FrozenMatch::instance(b), FrozenMatch::instance(b)));
        }
        assert!(!MatchResult::canonical(true).is_same_instance(&MatchResult::canonical(false)));
    }

    #[test]
    fn test_canonical_never_consumes() {
        assert!(MatchResult::canonical(true).matched());
        assert!(!MatchResult::canonical(true).consume());
        assert!(!MatchResult::canonical(false).matched());
        assert!(!MatchResult::canonical(false).consume());
        assert!(!MatchResult::canonical(true).is_mutable());
    }

    #[test]
    fn test_single_flag_construction() {
        let hit = MatchResult::new(true);
        assert!(hit.matched());
        assert!(hit.consume());
        assert!(hit.is_mutable());

        let miss = MatchResult::new(false);
        assert!(!miss.matched());
        assert!(!miss.consume());
    }

    #[test]
    fn test_two_flag_construction() {
        let result = MatchResult::with_consume(true, false);
        assert!(result.matched());
        assert!(!result.consume());
        assert!(result.is_mutable());
    }

    #[test]
    fn test_canonical_mutation_is_rejected() {
        let mut canonical = MatchResult::canonical(true);

        assert_matches!(
            canonical.set_matched(false),
            Err(ResultError::IllegalMutation { field: "matched" })
        );
        assert_matches!(
            canonical.set_consume(true),
            Err(ResultError::IllegalMutation { field: "consume" })
        );

        // The shared instance is untouched.
        assert!(MatchResult::canonical(true).matched());
        assert!(!MatchResult::canonical(true).consume());
    }

    #[test]
    fn test_working_mutation_is_visible() {
        let mut result = MatchResult::new(true);

        result.set_consume(false).unwrap();
        assert!(result.matched());
        assert!(!result.consume());

        result.set_matched(false).unwrap();
        assert!(!result.matched());
    }

    #[test]
    fn test_to_working_detaches_from_canonical() {
        let mut working: MatchResult = MatchResult::canonical(true).to_working().into();
        working.set_consume(true).unwrap();

        assert!(working.consume());
        assert!(!working.is_same_instance(&MatchResult::canonical(true)));
    }
}
