//! Token filters gating multi-word token extension

pub mod configured;
pub mod contiguous;
pub mod traits;

pub use configured::ConfiguredFilter;
pub use contiguous::ContiguousTokenFilter;
pub use traits::{FilterVerdict, TokenFilter};
