// src/rule_tests/negate.rs
use super::traits::RuleStepTest;
use crate::results::PassFail;
use crate::types::{StateRef, Token};

/// Reverses the wrapped test's outcome (NOT_APPLICABLE stays as is)
#[derive(Debug)]
pub struct NegatedTest {
    name: String,
    inner: Box<dyn RuleStepTest>,
}

impl NegatedTest {
    pub fn new(inner: Box<dyn RuleStepTest>) -> Self {
        let name = format!("!{}", inner.name());
        Self { name, inner }
    }

    pub fn inner(&self) -> &dyn RuleStepTest {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn RuleStepTest> {
        self.inner
    }
}

impl RuleStepTest for NegatedTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&self, token: &Token, state: StateRef<'_>) -> PassFail {
        self.inner.accept(token, state).reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateTree;

    #[derive(Debug)]
    struct Fixed(PassFail);

    impl RuleStepTest for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn accept(&self, _token: &Token, _state: StateRef<'_>) -> PassFail {
            self.0
        }
    }

    #[test]
    fn test_negation_follows_reversal() {
        let mut tree = StateTree::new();
        let root = tree.add_root("c", true);
        let state = tree.get(root).unwrap();
        let token = Token::new("x");

        for value in [PassFail::Pass, PassFail::Fail, PassFail::NotApplicable] {
            let negated = NegatedTest::new(Box::new(Fixed(value)));
            assert_eq!(negated.accept(&token, state), value.reverse());
        }
    }

    #[test]
    fn test_double_negation_restores() {
        let mut tree = StateTree::new();
        let root = tree.add_root("c", true);
        let twice = NegatedTest::new(Box::new(NegatedTest::new(Box::new(Fixed(PassFail::Pass)))));

        assert_eq!(twice.name(), "!!fixed");
        assert_eq!(
            twice.accept(&Token::new("x"), tree.get(root).unwrap()),
            PassFail::Pass
        );
        assert_eq!(twice.into_inner().name(), "!fixed");
    }
}
