//! Event type carried through the logging service

use super::codes::{self, Code};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Parse a level name as written in environment variables
    pub fn parse(level: &str) -> Option<Self> {
        match level.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Equivalent level on the `log` facade
    pub fn to_facade_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn build(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            context: BTreeMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(error_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Error, error_code, message)
    }

    /// Create a new warning event without a specific code
    pub fn warning(message: &str) -> Self {
        Self::build(LogLevel::Warning, Code::new("W000"), message)
    }

    /// Create warning with specific code
    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Warning, warning_code, message)
    }

    /// Create a new info event without a specific code
    pub fn info(message: &str) -> Self {
        Self::build(LogLevel::Info, Code::new("I000"), message)
    }

    /// Create info with specific code
    pub fn info_with_code(info_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Info, info_code, message)
    }

    /// Create a success event (info with success code)
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Info, success_code, message)
    }

    /// Create a debug event without a specific code
    pub fn debug(message: &str) -> Self {
        Self::build(LogLevel::Debug, Code::new("D000"), message)
    }

    /// Create debug with specific code
    pub fn debug_with_code(debug_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Debug, debug_code, message)
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    /// Severity from the code registry
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    /// Category from the code registry
    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    /// Single-line display form
    pub fn format(&self) -> String {
        let mut output = format!(
            "[{}] {} - {}",
            self.level.as_str(),
            self.code.as_str(),
            self.message
        );

        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            output.push_str(&format!(" ({})", pairs.join(", ")));
        }

        output
    }

    /// Multi-line form with code metadata
    pub fn format_detailed(&self) -> String {
        let mut output = format!(
            "[{}] {} - {}",
            self.level.as_str(),
            self.code.as_str(),
            self.message
        );

        output.push_str(&format!("\n  Category: {}", self.category()));
        output.push_str(&format!("\n  Severity: {}", self.severity()));

        let description = self.description();
        if description != "Unknown code" {
            output.push_str(&format!("\n  Description: {}", description));
        }

        if self.is_error() {
            output.push_str(&format!(
                "\n  Recommended action: {}",
                codes::get_action(self.code.as_str())
            ));
        }

        if !self.context.is_empty() {
            output.push_str("\n  Context:");
            for (key, value) in &self.context {
                output.push_str(&format!("\n    {}: {}", key, value));
            }
        }

        output
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}
