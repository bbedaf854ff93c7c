// src/filters/contiguous.rs
//! Filter that keeps a multi-word token contiguous
//!
//! The candidate must match the whole-token pattern, and once a previous
//! token exists the configured delimiter test must accept the candidate.
//! Either check failing halts extension.

use super::traits::{FilterVerdict, TokenFilter};
use crate::config::{ComponentConfig, ConfigError};
use crate::rule_tests::DelimTest;
use crate::types::{StateRef, Token};
use regex::Regex;

#[derive(Debug, Default)]
pub struct ContiguousTokenFilter {
    name: String,
    pattern: Option<Regex>,
    delim: Option<DelimTest>,
}

impl ContiguousTokenFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Require the whole token text to match `pattern`
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    pub fn with_delim(mut self, delim: DelimTest) -> Self {
        self.delim = Some(delim);
        self
    }

    pub fn from_config(config: &ComponentConfig) -> Result<Option<Self>, ConfigError> {
        let mut filter = Self::new(config.display_name());
        if let Some(pattern) = &config.pattern {
            filter = filter.with_pattern(pattern)?;
        }
        filter.delim = config.delim.as_ref().map(DelimTest::from_section).transpose()?.flatten();

        Ok(if filter.is_empty() { None } else { Some(filter) })
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.delim.is_none()
    }
}

impl TokenFilter for ContiguousTokenFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(
        &self,
        token: &Token,
        _is_revision: bool,
        previous: Option<&Token>,
        _state: StateRef<'_>,
    ) -> FilterVerdict {
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(token.text()) {
                return FilterVerdict::Halt;
            }
        }

        if let (Some(delim), Some(_)) = (&self.delim, previous) {
            if !delim.check(token).accept() {
                return FilterVerdict::Halt;
            }
        }

        FilterVerdict::Accept
    }
}
