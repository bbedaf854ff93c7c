//! Runtime configuration for the ATN workspace
//!
//! Preferences are read from `ATN_*` environment variables and then passed
//! explicitly to the components that need them.

pub mod runtime;
pub mod verbosity;

pub use runtime::{LoadPreferences, LoggingPreferences, RuntimeConfig};
pub use verbosity::{reset_verbose_load, set_verbose_load, verbose_load};
