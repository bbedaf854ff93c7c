//! Token and search-state model consumed by the matching core

pub mod state;
pub mod token;

pub use state::{Ancestors, StateError, StateId, StateNode, StateRef, StateTree};
pub use token::{FeatureMap, Token};
