//! Logging macros using `Code` types with `Display` context values
//!
//! Context pairs are written `"key" => value`; values only need `Display`.

// ============================================================================
// ERROR / SUCCESS
// ============================================================================

/// Log error with a code
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, context_refs)
        }
    };
}

/// Log success with a code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// WARNING / INFO
// ============================================================================

/// Log warning, optionally with `code = ...` first
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr) => {
        $crate::logging::log_warning_with_context(Some($code), $message, vec![])
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_warning_with_context(Some($code), $message, context_refs)
        }
    };

    ($message:expr) => {
        $crate::logging::log_warning_with_context(None, $message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_warning_with_context(None, $message, context_refs)
        }
    };
}

/// Log informational message, optionally with `code = ...` first
#[macro_export]
macro_rules! log_info {
    (code = $code:expr, $message:expr) => {
        $crate::logging::log_info_with_context(Some($code), $message, vec![])
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context(Some($code), $message, context_refs)
        }
    };

    ($message:expr) => {
        $crate::logging::log_info_with_context(None, $message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context(None, $message, context_refs)
        }
    };
}

// ============================================================================
// DEBUG
// ============================================================================

/// Log debug message; context is only formatted when debug output is live
#[macro_export]
macro_rules! log_debug {
    (code = $code:expr, $message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context(Some($code), $message, vec![])
        }
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::debug_enabled() {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context(Some($code), $message, context_refs)
        }
    };

    ($message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context(None, $message, vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::debug_enabled() {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context(None, $message, context_refs)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[test]
    fn test_macros_expand_without_logger() {
        log_error!(codes::config::INVALID_PATTERN, "bad pattern", "pattern" => "[0-9");
        log_success!(codes::success::REGISTRY_READY, "ready", "tests" => 3);
        log_warning!("plain warning");
        log_warning!(code = codes::config::EMPTY_COMPONENT, "skipped", "id" => 4);
        log_info!("plain info", "count" => 2usize);
        log_info!(code = codes::orchestration::PASS_CURTAILED, "curtailed");
        log_debug!("debug", "flag" => true);
        log_debug!(code = codes::rule_tests::TEST_OUTCOME, "outcome", "result" => "PASS");
    }
}
