// src/classify/configured.rs
use super::traits::TokenClassifier;
use crate::results::MatchResult;
use crate::types::{FeatureMap, StateRef, Token};
use atn_support::log_debug;
use atn_support::logging::codes;

/// A loaded classifier with its id and diagnostic flag
#[derive(Debug)]
pub struct ConfiguredClassifier {
    id: String,
    verbose: bool,
    inner: Box<dyn TokenClassifier>,
}

impl ConfiguredClassifier {
    pub fn new(id: impl Into<String>, inner: Box<dyn TokenClassifier>) -> Self {
        Self {
            id: id.into(),
            verbose: false,
            inner,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn trace(&self, text: &str, matched: bool) {
        if self.verbose {
            log_debug!(
                code = codes::classification::CLASSIFIER_OUTCOME,
                "Classifier evaluated",
                "id" => self.id,
                "classifier" => self.inner.name(),
                "text" => text,
                "matched" => matched
            );
        }
    }
}

impl TokenClassifier for ConfiguredClassifier {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn max_word_count(&self) -> usize {
        self.inner.max_word_count()
    }

    fn classify_text(&self, text: &str) -> Option<FeatureMap> {
        let result = self.inner.classify_text(text);
        self.trace(text, result.is_some());
        result
    }

    fn classify_token(&self, token: &Token) -> Option<FeatureMap> {
        let result = self.inner.classify_token(token);
        self.trace(token.text(), result.is_some());
        result
    }

    fn classify(&self, token: &Token, state: StateRef<'_>) -> MatchResult {
        let result = self.inner.classify(token, state);
        self.trace(token.text(), result.matched());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RegexClassifier;
    use crate::config::RegexDefinition;
    use crate::types::StateTree;

    #[test]
    fn test_delegates_to_inner() {
        let inner = RegexClassifier::new("number", &[RegexDefinition::new("[0-9]+")]).unwrap();
        let classifier = ConfiguredClassifier::new("7", Box::new(inner)).with_verbose(true);

        let mut tree = StateTree::new();
        let root = tree.add_root("number", false);

        assert_eq!(classifier.id(), "7");
        assert_eq!(classifier.name(), "number");
        assert!(classifier.classify(&Token::new("12"), tree.get(root).unwrap()).matched());
        assert!(classifier.classify_text("twelve").is_none());
    }
}
