// RUNTIME PREFERENCES

use crate::config::verbosity;
use crate::logging::events::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::STRUCTURED_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

/// Preferences consulted while components are constructed from
/// declarative configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadPreferences {
    /// Report registry and component loading progress
    pub verbose_load: bool,
}

impl LoadPreferences {
    pub fn quiet() -> Self {
        Self {
            verbose_load: false,
        }
    }

    pub fn verbose() -> Self {
        Self { verbose_load: true }
    }

    pub fn with_verbose_load(mut self, verbose_load: bool) -> Self {
        self.verbose_load = verbose_load;
        self
    }
}

impl Default for LoadPreferences {
    /// Seeded from the process-wide load-verbosity toggle
    fn default() -> Self {
        Self {
            verbose_load: verbosity::verbose_load(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub logging: LoggingPreferences,
    pub load: LoadPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const LOG_LEVEL: &str = "ATN_LOG_LEVEL";
    pub const STRUCTURED_LOGGING: &str = "ATN_STRUCTURED_LOGGING";
    pub const QUIET_LOAD: &str = "ATN_QUIET_LOAD";
}
