// src/rule_tests/token_test.rs
//! Token-content test
//!
//! A token is "classified" when any configured check recognises it: a term
//! list, a regex, or a feature the token already carries. A nested delimiter
//! test only applies to classified tokens.

use super::delim::DelimTest;
use super::traits::RuleStepTest;
use crate::classify::{RegexClassifier, TermsClassifier, TokenClassifier};
use crate::config::{ComponentConfig, ConfigError};
use crate::results::PassFail;
use crate::types::{StateRef, Token};

#[derive(Debug, Default)]
pub struct TokenTest {
    name: String,
    terms: Option<TermsClassifier>,
    regexes: Option<RegexClassifier>,
    features: Vec<String>,
    delim: Option<DelimTest>,
}

impl TokenTest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_terms(mut self, terms: TermsClassifier) -> Self {
        self.terms = Some(terms);
        self
    }

    pub fn with_regexes(mut self, regexes: RegexClassifier) -> Self {
        self.regexes = Some(regexes);
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    pub fn with_delim(mut self, delim: DelimTest) -> Self {
        self.delim = Some(delim);
        self
    }

    pub fn from_config(config: &ComponentConfig) -> Result<Option<Self>, ConfigError> {
        let test = Self {
            name: config.display_name().to_string(),
            terms: TermsClassifier::from_config(config)?,
            regexes: RegexClassifier::from_config(config)?,
            features: config.features.clone(),
            delim: config.delim.as_ref().map(DelimTest::from_section).transpose()?.flatten(),
        };

        Ok(if test.is_empty() { None } else { Some(test) })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_none() && self.regexes.is_none() && self.features.is_empty()
    }

    fn classified(&self, token: &Token) -> bool {
        if let Some(terms) = &self.terms {
            if terms.classify_token(token).is_some() {
                return true;
            }
        }
        if let Some(regexes) = &self.regexes {
            if regexes.classify_token(token).is_some() {
                return true;
            }
        }
        self.features.iter().any(|feature| token.has_feature(feature))
    }
}

impl RuleStepTest for TokenTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&self, token: &Token, _state: StateRef<'_>) -> PassFail {
        if !self.classified(token) {
            return PassFail::Fail;
        }

        match &self.delim {
            Some(delim) => delim.check(token),
            None => PassFail::Pass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DelimFlags, RegexDefinition, TermEntry, TermsSection};
    use crate::types::StateTree;

    fn months() -> TermsClassifier {
        let section = TermsSection {
            terms: vec![TermEntry::Plain("may".into()), TermEntry::Plain("june".into())],
            ..TermsSection::default()
        };
        TermsClassifier::new("months", &[section], &[])
    }

    fn evaluate(test: &TokenTest, token: &Token) -> PassFail {
        let mut tree = StateTree::new();
        let root = tree.add_root("month", false);
        test.accept(token, tree.get(root).unwrap())
    }

    #[test]
    fn test_terms_and_features() {
        let test = TokenTest::new("month").with_terms(months()).with_feature("month");

        assert_eq!(evaluate(&test, &Token::new("May")), PassFail::Pass);
        assert_eq!(
            evaluate(&test, &Token::new("5").with_feature("month", "5")),
            PassFail::Pass
        );
        assert_eq!(evaluate(&test, &Token::new("Tuesday")), PassFail::Fail);
    }

    #[test]
    fn test_regex_check() {
        let regexes = RegexClassifier::new("digits", &[RegexDefinition::new("[0-9]{4}")]).unwrap();
        let test = TokenTest::new("year").with_regexes(regexes);

        assert_eq!(evaluate(&test, &Token::new("1999")), PassFail::Pass);
        assert_eq!(evaluate(&test, &Token::new("99")), PassFail::Fail);
    }

    #[test]
    fn test_delim_applies_only_when_classified() {
        let delim = DelimTest::new(DelimFlags {
            require_post: true,
            ..DelimFlags::default()
        });
        let test = TokenTest::new("month").with_terms(months()).with_delim(delim);

        assert_eq!(
            evaluate(&test, &Token::new("May").with_delims("", ",")),
            PassFail::Pass
        );
        assert_eq!(evaluate(&test, &Token::new("May")), PassFail::Fail);
        assert_eq!(
            evaluate(&test, &Token::new("Friday").with_delims("", ",")),
            PassFail::Fail
        );
    }

    #[test]
    fn test_from_config() {
        let config: ComponentConfig = toml::from_str(
            r#"
            type = "token"
            id = "month-test"
            features = ["month"]

            [delim]
            checkPost = true
            "#,
        )
        .unwrap();
        let test = TokenTest::from_config(&config).unwrap().unwrap();

        assert_eq!(test.name(), "month-test");
        assert_eq!(
            evaluate(&test, &Token::new("x").with_feature("month", "1").with_delims("", ".")),
            PassFail::Pass
        );

        let empty = ComponentConfig::new("token");
        assert!(TokenTest::from_config(&empty).unwrap().is_none());
    }
}
