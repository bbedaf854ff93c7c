//! Logging configuration access
//!
//! Preferences are installed once per process; until then every accessor
//! falls back to the environment-derived defaults.

use super::events::LogLevel;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences (first call wins)
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Current preferences, or the defaults when none were installed
pub fn get_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Minimum level used when building the global service
pub fn get_min_log_level() -> LogLevel {
    get_preferences().min_log_level
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_preferences().use_structured_logging
}

/// Human-readable summary for diagnostics output
pub fn get_config_summary() -> String {
    let preferences = get_preferences();
    format!(
        "=== Logging Configuration ===\nMin level: {}\nStructured: {}\nInstalled: {}\n",
        preferences.min_log_level,
        preferences.use_structured_logging,
        RUNTIME_PREFERENCES.get().is_some()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary();
        assert!(summary.contains("Min level:"));
        assert!(summary.contains("Structured:"));
    }
}
