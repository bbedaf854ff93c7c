//! Result values shared by classifiers, tests and filters

pub mod error;
pub mod match_result;
pub mod pass_fail;

pub use error::ResultError;
pub use match_result::{FrozenMatch, MatchResult, WorkingMatch};
pub use pass_fail::PassFail;
