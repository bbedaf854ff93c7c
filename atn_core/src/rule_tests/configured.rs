// src/rule_tests/configured.rs
use super::traits::RuleStepTest;
use crate::results::PassFail;
use crate::types::{StateRef, Token};
use atn_support::log_debug;
use atn_support::logging::codes;

/// A loaded rule-step test with its id and diagnostic flag
#[derive(Debug)]
pub struct ConfiguredTest {
    id: String,
    verbose: bool,
    inner: Box<dyn RuleStepTest>,
}

impl ConfiguredTest {
    pub fn new(id: impl Into<String>, inner: Box<dyn RuleStepTest>) -> Self {
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
}

impl RuleStepTest for ConfiguredTest {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn accept(&self, token: &Token, state: StateRef<'_>) -> PassFail {
        let outcome = self.inner.accept(token, state);

        if self.verbose {
            log_debug!(
                code = codes::rule_tests::TEST_OUTCOME,
                "Rule step test evaluated",
                "id" => self.id,
                "test" => self.inner.name(),
                "token" => token.text(),
                "state" => state.category(),
                "outcome" => outcome
            );
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_tests::{ClusterTest, NegatedTest};
    use crate::types::StateTree;

    #[test]
    fn test_delegates_to_inner() {
        let mut tree = StateTree::new();
        let parent = tree.add_root("c", true);
        let child = tree.add_child(parent, "c", true).unwrap();
        let state = tree.get(child).unwrap();

        let plain = ConfiguredTest::new("0", Box::new(ClusterTest::new()));
        let negated = ConfiguredTest::new("1", Box::new(NegatedTest::new(Box::new(ClusterTest::new()))))
            .with_verbose(true);

        assert_eq!(plain.id(), "0");
        assert_eq!(plain.accept(&Token::new("x"), state), PassFail::Pass);
        assert!(negated.is_verbose());
        assert_eq!(negated.name(), "!cluster");
        assert_eq!(negated.accept(&Token::new("x"), state), PassFail::Fail);
    }
}
