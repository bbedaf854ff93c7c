//! Rule-step tests: predicates evaluated on a candidate match after
//! classification

pub mod cluster;
pub mod configured;
pub mod delim;
pub mod negate;
pub mod token_test;
pub mod traits;

pub use cluster::ClusterTest;
pub use configured::ConfiguredTest;
pub use delim::{DelimRules, DelimTest};
pub use negate::NegatedTest;
pub use token_test::TokenTest;
pub use traits::RuleStepTest;
