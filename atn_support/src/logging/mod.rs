//! Global logging module for the ATN workspace
//!
//! Provides a process-wide logging service behind a `OnceLock` and the
//! macro interface used by the core. Logging before initialization is a
//! silent no-op, so library code never has to check.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};
use thiserror::Error;

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, FacadeLogger, Logger, LoggingService, MemoryLogger, StructuredLogger,
};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Global logger already initialized")]
    AlreadyInitialized,
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the runtime preferences
pub fn init_global_logging() -> Result<(), LoggingError> {
    let logging_service = Arc::new(service::create_configured_service());
    install(logging_service)
}

/// Initialize with a custom service (facade forwarding, tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), LoggingError> {
    install(service)
}

fn install(service: Arc<LoggingService>) -> Result<(), LoggingError> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether a debug event would reach a logger; lets callers skip
/// building context strings on hot paths.
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

/// Log error with context (used by `log_error!`)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::error(code, message), context);
}

/// Log success with context (used by `log_success!`)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Log warning with context (used by `log_warning!`)
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(event, context);
}

/// Log info with context (used by `log_info!`)
pub fn log_info_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::info_with_code(code, message),
        None => LogEvent::info(message),
    };
    dispatch(event, context);
}

/// Log debug with context (used by `log_debug!`)
pub fn log_debug_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::debug_with_code(code, message),
        None => LogEvent::debug(message),
    };
    dispatch(event, context);
}

/// Error logging that falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    if let Some(logger) = try_get_global_logger() {
        diagnostics.push_str(&format!("Active level: {}\n", logger.min_level()));
    }
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}
