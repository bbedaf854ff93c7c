// src/generation/mod.rs
//! Text generation driven by grammar rules
//!
//! A generator is called as the grammar is walked: `start_rule` when a rule
//! is entered, `generate_step` for each step, `end_rule` with the subtrees
//! produced under the rule. `tree_to_text` renders the finished tree.

use serde::{Deserialize, Serialize};

/// Generated tree: rule nodes with text-bearing leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenTree {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GenTree>,
}

impl GenTree {
    pub fn leaf(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn node(label: impl Into<String>, children: Vec<GenTree>) -> Self {
        Self {
            label: label.into(),
            text: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaves in left-to-right order
    pub fn leaves(&self) -> Vec<&GenTree> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a GenTree>) {
        if self.is_leaf() {
            leaves.push(self);
        } else {
            for child in &self.children {
                child.collect_leaves(leaves);
            }
        }
    }
}

/// Produces text while a grammar of rules `R` and steps `S` is walked
pub trait TextGenerator<R, S> {
    fn start_rule(&mut self, rule: &R);

    /// Text for one step, or `None` to emit nothing
    fn generate_step(&mut self, step: &S) -> Option<String>;

    fn end_rule(&mut self, rule: &R, children: &[GenTree]);

    /// Leaf texts joined with single spaces
    fn tree_to_text(&self, tree: &GenTree) -> String {
        tree.leaves()
            .into_iter()
            .filter_map(|leaf| leaf.text.as_deref())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
