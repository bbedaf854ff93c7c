//! Ambient support shared by the ATN matching core: structured logging,
//! runtime preferences and the process-wide load-verbosity toggle.

pub mod config;
#[macro_use]
pub mod logging;

pub use config::{LoadPreferences, LoggingPreferences};
pub use logging::{Code, LogEvent, LogLevel};
