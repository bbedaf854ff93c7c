// src/results/error.rs
use thiserror::Error;

/// Errors from result value operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    /// Write to a canonical shared result. This is a usage bug in the
    /// caller, never an ordinary match failure.
    #[error("Illegal mutation of canonical match result field '{field}'")]
    IllegalMutation { field: &'static str },
}
