//! # ATN Probe
//!
//! Evaluates a loaded component set against a JSON fixture of tokens and
//! search states, producing a plain-text report.
//!
//! Fixture shape:
//!
//! ```json
//! {
//!   "states": [
//!     {"category": "date"},
//!     {"category": "month", "matched": true, "parent": 0}
//!   ],
//!   "cases": [
//!     {"name": "may", "token": {"text": "May", "post_delim": ","}, "state": 1}
//!   ]
//! }
//! ```

use atn_core::classify::TokenClassifier;
use atn_core::config::ConfigError;
use atn_core::filters::TokenFilter;
use atn_core::rule_tests::RuleStepTest;
use atn_core::types::{FeatureMap, StateError, StateRef, StateTree, Token};
use atn_core::ComponentSet;
use serde::Deserialize;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to read fixture '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture decode error: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("Fixture state error: {0}")]
    State(#[from] StateError),

    #[error("Fixture state {state} must refer to an earlier parent, got {parent}")]
    ForwardParent { state: usize, parent: usize },

    #[error("Failed to write report: {0}")]
    Report(#[from] fmt::Error),
}

// ============================================================================
// Fixture model
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureState {
    pub category: String,
    #[serde(default)]
    pub matched: bool,
    #[serde(default)]
    pub parent: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    pub token: Token,
    /// Index into the fixture's states
    pub state: usize,
    #[serde(default)]
    pub previous: Option<Token>,
    #[serde(default)]
    pub revision: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub states: Vec<FixtureState>,
    #[serde(default)]
    pub cases: Vec<FixtureCase>,
}

impl Fixture {
    pub fn from_json_str(text: &str) -> Result<Self, ProbeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProbeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Build the state tree; parents must precede their children
    pub fn build_tree(&self) -> Result<StateTree, ProbeError> {
        let mut tree = StateTree::new();
        for (index, state) in self.states.iter().enumerate() {
            match state.parent {
                None => {
                    tree.add_root(state.category.clone(), state.matched);
                }
                Some(parent) if parent >= index => {
                    return Err(ProbeError::ForwardParent { state: index, parent });
                }
                Some(parent) => {
                    let parent_id = tree.state(parent)?.id();
                    tree.add_child(parent_id, state.category.clone(), state.matched)?;
                }
            }
        }
        Ok(tree)
    }
}

// ============================================================================
// Report
// ============================================================================

/// Evaluate every component against every fixture case
pub fn run_probe(set: &ComponentSet, fixture: &Fixture) -> Result<String, ProbeError> {
    let tree = fixture.build_tree()?;
    let mut report = String::new();

    for case in &fixture.cases {
        let state = tree.state(case.state)?;
        write_case(&mut report, set, case, state)?;
    }

    Ok(report)
}

fn write_case(
    report: &mut String,
    set: &ComponentSet,
    case: &FixtureCase,
    state: StateRef<'_>,
) -> fmt::Result {
    let token = &case.token;
    writeln!(
        report,
        "case {}: \"{}\" at {} ({})",
        case.name,
        token.text(),
        state.id(),
        state.category()
    )?;

    for classifier in &set.classifiers {
        let outcome = classifier.classify(token, state);
        let detail = if outcome.matched() {
            format_features(&classifier.classify_token(token).unwrap_or_default())
        } else {
            "no match".to_string()
        };
        writeln!(report, "  classifier {} ({}): {}", classifier.id(), classifier.name(), detail)?;
    }

    for test in &set.tests {
        let outcome = test.accept(token, state);
        writeln!(report, "  test {} ({}): {}", test.id(), test.name(), outcome)?;
    }

    for filter in &set.filters {
        let verdict = filter.check(token, case.revision, case.previous.as_ref(), state);
        writeln!(report, "  filter {} ({}): {}", filter.id(), filter.name(), verdict)?;
    }

    Ok(())
}

fn format_features(features: &FeatureMap) -> String {
    if features.is_empty() {
        return "matched".to_string();
    }
    let pairs: Vec<String> = features.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("matched {{{}}}", pairs.join(", "))
}
