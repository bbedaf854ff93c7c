// src/filters/configured.rs
use super::traits::{FilterVerdict, TokenFilter};
use crate::types::{StateRef, Token};
use atn_support::log_debug;
use atn_support::logging::codes;

/// A loaded token filter with its id and diagnostic flag
#[derive(Debug)]
pub struct ConfiguredFilter {
    id: String,
    verbose: bool,
    inner: Box<dyn TokenFilter>,
}

impl ConfiguredFilter {
    pub fn new(id: impl Into<String>, inner: Box<dyn TokenFilter>) -> Self {
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

impl TokenFilter for ConfiguredFilter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn check(
        &self,
        token: &Token,
        is_revision: bool,
        previous: Option<&Token>,
        state: StateRef<'_>,
    ) -> FilterVerdict {
        let verdict = self.inner.check(token, is_revision, previous, state);

        if self.verbose {
            log_debug!(
                code = codes::filters::FILTER_VERDICT,
                "Token filter evaluated",
                "id" => self.id,
                "filter" => self.inner.name(),
                "token" => token.text(),
                "revision" => is_revision,
                "verdict" => verdict
            );
        }

        verdict
    }
}
