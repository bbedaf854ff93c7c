// src/types/state.rs
//! Search-state tree as an index arena
//!
//! The search driver appends nodes as it explores; the matching core only
//! reads them through [`StateRef`]. A node's parent is always added before
//! the node itself, so ancestor walks terminate.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("State {0} does not exist")]
    UnknownState(StateId),
}

/// One partial-parse attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNode {
    parent: Option<StateId>,
    matched: bool,
    category: String,
}

impl StateNode {
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, Default)]
pub struct StateTree {
    nodes: Vec<StateNode>,
}

impl StateTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a parent
    pub fn add_root(&mut self, category: impl Into<String>, matched: bool) -> StateId {
        self.push(None, category.into(), matched)
    }

    /// Add a node below an existing one
    pub fn add_child(
        &mut self,
        parent: StateId,
        category: impl Into<String>,
        matched: bool,
    ) -> Result<StateId, StateError> {
        if parent.0 >= self.nodes.len() {
            return Err(StateError::UnknownState(parent));
        }
        Ok(self.push(Some(parent), category.into(), matched))
    }

    fn push(&mut self, parent: Option<StateId>, category: String, matched: bool) -> StateId {
        let id = StateId(self.nodes.len());
        self.nodes.push(StateNode {
            parent,
            matched,
            category,
        });
        id
    }

    /// Driver-side update of the matched flag
    pub fn set_matched(&mut self, id: StateId, matched: bool) -> Result<(), StateError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(StateError::UnknownState(id))?;
        node.matched = matched;
        Ok(())
    }

    pub fn get(&self, id: StateId) -> Option<StateRef<'_>> {
        if id.0 < self.nodes.len() {
            Some(StateRef { tree: self, id })
        } else {
            None
        }
    }

    /// Look up by raw index (fixtures refer to nodes by position)
    pub fn state(&self, index: usize) -> Result<StateRef<'_>, StateError> {
        self.get(StateId(index))
            .ok_or(StateError::UnknownState(StateId(index)))
    }

    pub fn node(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Read-only cursor into a [`StateTree`]
#[derive(Clone, Copy)]
pub struct StateRef<'a> {
    tree: &'a StateTree,
    id: StateId,
}

impl<'a> StateRef<'a> {
    fn node(&self) -> &'a StateNode {
        // A StateRef is only created for an index inside the arena and
        // nodes are never removed.
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn parent(&self) -> Option<StateRef<'a>> {
        self.node().parent.map(|id| StateRef {
            tree: self.tree,
            id,
        })
    }

    pub fn is_matched(&self) -> bool {
        self.node().matched
    }

    pub fn category(&self) -> &'a str {
        &self.node().category
    }

    /// Ancestors from the parent up to the root (self excluded)
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }
}

impl fmt::Debug for StateRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRef")
            .field("id", &self.id)
            .field("category", &self.category())
            .field("matched", &self.is_matched())
            .finish()
    }
}

pub struct Ancestors<'a> {
    next: Option<StateRef<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = StateRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
