// src/rule_tests/cluster.rs
//! Clustering constraint for categories that can repeat at several grammar
//! levels
//!
//! The nearest matched ancestor decides: a different category always
//! passes, the same category passes only when it is the immediate parent.
//! An unmatched level between two same-category matches fragments the run
//! and fails. With no matched ancestor at all the test passes.

use super::traits::RuleStepTest;
use crate::config::{ComponentConfig, ConfigError};
use crate::results::PassFail;
use crate::types::{StateRef, Token};

#[derive(Debug, Clone, Default)]
pub struct ClusterTest;

impl ClusterTest {
    pub fn new() -> Self {
        Self
    }

    /// Takes no attributes, so it is never empty
    pub fn from_config(_config: &ComponentConfig) -> Result<Option<Self>, ConfigError> {
        Ok(Some(Self))
    }
}

impl RuleStepTest for ClusterTest {
    fn name(&self) -> &str {
        "cluster"
    }

    fn accept(&self, _token: &Token, state: StateRef<'_>) -> PassFail {
        let category = state.category();

        for (distance, ancestor) in (1..).zip(state.ancestors()) {
            if !ancestor.is_matched() {
                continue;
            }
            return if ancestor.category() != category {
                PassFail::Pass
            } else {
                PassFail::from_accept(distance == 1)
            };
        }

        PassFail::Pass
    }
}
