//! Logging service and logger implementations

use super::codes::Code;
use super::events::{LogEvent, LogLevel};
use crate::config::runtime::LoggingPreferences;
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service: a logger plus a minimum level
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create a service from runtime preferences
    pub fn with_preferences(preferences: &LoggingPreferences) -> Self {
        let min_level = preferences.min_log_level;
        let logger: Arc<dyn Logger> = if preferences.use_structured_logging {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Plain text logger writing to stdout/stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.level {
                LogLevel::Error => eprintln!("{}", event.format()),
                _ => println!("{}", event.format()),
            }
        }
    }
}

/// JSON-lines logger
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            let line = event.format_json().unwrap_or_else(|_| event.format());
            match event.level {
                LogLevel::Error => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }
    }
}

/// Forwards events to the `log` facade so a host binary can render them
/// with whatever backend it installed (e.g. `env_logger`).
pub struct FacadeLogger {
    target: &'static str,
}

impl FacadeLogger {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for FacadeLogger {
    fn default() -> Self {
        Self::new("atn")
    }
}

impl Logger for FacadeLogger {
    fn log(&self, event: &LogEvent) {
        log::log!(
            target: self.target,
            event.level.to_facade_level(),
            "{}",
            event.format()
        );
    }
}

/// In-memory logger for tests
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    // A poisoned lock still holds a usable event list.
    fn events(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events().clone()
    }

    pub fn clear(&self) {
        self.events().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.is_error())
            .cloned()
            .collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_event_with_code(&self, code: Code) -> bool {
        self.events().iter().any(|e| e.code == code)
    }

    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.category() == category)
            .cloned()
            .collect()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.events().push(event.clone());
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Create logging service from the current runtime preferences
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_preferences(&super::config::get_preferences())
}

/// Create a service that forwards to the `log` facade
pub fn create_facade_service(min_level: LogLevel) -> LoggingService {
    LoggingService::new(Arc::new(FacadeLogger::default()), min_level)
}

/// Create testing logger (memory-based, all events captured)
pub fn create_test_logger() -> Arc<MemoryLogger> {
    Arc::new(MemoryLogger::new())
}
