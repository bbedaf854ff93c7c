// src/classify/traits.rs
use crate::results::MatchResult;
use crate::types::{FeatureMap, StateRef, Token};
use std::fmt::Debug;

/// Decides whether a token satisfies a category
///
/// Two entry points exist. [`classify_text`](TokenClassifier::classify_text)
/// works on raw text alone and returns `None` for "no match", which is
/// distinct from `Some(empty map)` ("matched, no features").
/// [`classify`](TokenClassifier::classify) additionally receives the search
/// state; the provided implementation ignores it and defers to the token path.
///
/// Implementations are shared across search branches and must not keep
/// per-call state.
pub trait TokenClassifier: Send + Sync + Debug {
    /// Name for diagnostics
    fn name(&self) -> &str;

    /// Longest token (in words) this classifier can match; 0 is unbounded
    fn max_word_count(&self) -> usize {
        0
    }

    /// Context-free classification of raw text
    fn classify_text(&self, text: &str) -> Option<FeatureMap>;

    /// Classification of a token without search-state context
    ///
    /// Defaults to the token text; classifiers that look at delimiters
    /// override this.
    fn classify_token(&self, token: &Token) -> Option<FeatureMap> {
        self.classify_text(token.text())
    }

    /// Context-aware classification
    ///
    /// A match yields a fresh result that consumes the token; a miss yields
    /// the canonical FALSE.
    fn classify(&self, token: &Token, _state: StateRef<'_>) -> MatchResult {
        if self.classify_token(token).is_some() {
            MatchResult::new(true)
        } else {
            MatchResult::canonical(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateTree;

    #[derive(Debug)]
    struct DigitsOnly;

    impl TokenClassifier for DigitsOnly {
        fn name(&self) -> &str {
            "digits"
        }

        fn classify_text(&self, text: &str) -> Option<FeatureMap> {
            if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                Some(FeatureMap::new())
            } else {
                None
            }
        }
    }

    #[test]
    fn test_default_classify_defers_to_text() {
        let mut tree = StateTree::new();
        let root = tree.add_root("number", false);
        let state = tree.get(root).unwrap();

        let hit = DigitsOnly.classify(&Token::new("42"), state);
        assert!(hit.matched());
        assert!(hit.consume());
        assert!(hit.is_mutable());

        let miss = DigitsOnly.classify(&Token::new("4x"), state);
        assert!(!miss.matched());
        assert!(miss.is_same_instance(&MatchResult::canonical(false)));
    }

    #[test]
    fn test_absent_versus_empty() {
        assert_eq!(DigitsOnly.classify_text("7"), Some(FeatureMap::new()));
        assert_eq!(DigitsOnly.classify_text("seven"), None);
        assert_eq!(DigitsOnly.max_word_count(), 0);
    }
}
