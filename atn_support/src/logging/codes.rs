//! Log codes and their classification metadata
//!
//! Every event carries a `Code`. Codes are grouped by the component family
//! that emits them, and each code has one metadata entry describing its
//! category and severity.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Severity attached to a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata for a single code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl CodeMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Component configuration codes
pub mod config {
    use super::Code;

    pub const UNKNOWN_COMPONENT_TYPE: Code = Code::new("E010");
    pub const DUPLICATE_REGISTRATION: Code = Code::new("E011");
    pub const INVALID_PATTERN: Code = Code::new("E012");
    pub const INVALID_ATTRIBUTE: Code = Code::new("E013");
    pub const DOCUMENT_DECODE_FAILURE: Code = Code::new("E014");
    pub const EMPTY_COMPONENT: Code = Code::new("W015");
}

/// Token classification codes
pub mod classification {
    use super::Code;

    pub const CLASSIFIER_OUTCOME: Code = Code::new("D020");
}

/// Rule-step test codes
pub mod rule_tests {
    use super::Code;

    pub const TEST_OUTCOME: Code = Code::new("D030");
    pub const ILLEGAL_MUTATION: Code = Code::new("E031");
}

/// Token filter codes
pub mod filters {
    use super::Code;

    pub const FILTER_VERDICT: Code = Code::new("D040");
}

/// Multi-pass orchestration codes
pub mod orchestration {
    use super::Code;

    pub const PASS_FAILED: Code = Code::new("E050");
    pub const PASS_CURTAILED: Code = Code::new("I051");
    pub const SEQUENCE_CANCELLED: Code = Code::new("I052");
    pub const PASS_STARTED: Code = Code::new("D053");
    pub const UNKNOWN_PARSER: Code = Code::new("E054");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const REGISTRY_READY: Code = Code::new("I010");
    pub const COMPONENT_LOADED: Code = Code::new("I011");
    pub const COMPONENT_SET_LOADED: Code = Code::new("I012");
    pub const MULTI_PASS_COMPLETE: Code = Code::new("I055");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static CODE_REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();

fn get_code_registry() -> &'static HashMap<&'static str, CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        let entries = [
            CodeMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                "Internal invariant violated",
                "File a bug report with the failing input",
            ),
            CodeMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                "Logging or runtime initialization failed",
                "Check environment variables and initialization order",
            ),
            CodeMetadata::new(
                "E010",
                "Configuration",
                Severity::High,
                "Component type is not registered",
                "Register a constructor for the type or fix the type name",
            ),
            CodeMetadata::new(
                "E011",
                "Configuration",
                Severity::High,
                "Component type registered twice",
                "Remove the duplicate registration",
            ),
            CodeMetadata::new(
                "E012",
                "Configuration",
                Severity::High,
                "Regular expression failed to compile",
                "Fix the pattern in the component configuration",
            ),
            CodeMetadata::new(
                "E013",
                "Configuration",
                Severity::Medium,
                "Component attribute has an invalid value",
                "Check the attribute type against the component documentation",
            ),
            CodeMetadata::new(
                "E014",
                "Configuration",
                Severity::High,
                "Configuration document could not be decoded",
                "Validate the TOML or JSON syntax of the document",
            ),
            CodeMetadata::new(
                "W015",
                "Configuration",
                Severity::Low,
                "Component has no effective configuration and was skipped",
                "Add terms, patterns or flags, or remove the component",
            ),
            CodeMetadata::new(
                "D020",
                "Classification",
                Severity::Low,
                "Classifier evaluation outcome",
                "None",
            ),
            CodeMetadata::new(
                "D030",
                "RuleStepTest",
                Severity::Low,
                "Rule-step test evaluation outcome",
                "None",
            ),
            CodeMetadata::new(
                "E031",
                "RuleStepTest",
                Severity::Critical,
                "Attempted to mutate a canonical match result",
                "Construct a working match result before mutating it",
            ),
            CodeMetadata::new(
                "D040",
                "TokenFilter",
                Severity::Low,
                "Token filter verdict",
                "None",
            ),
            CodeMetadata::new(
                "E050",
                "Orchestration",
                Severity::High,
                "Parse execution failed during a pass",
                "Inspect the executor error attached to the event",
            ),
            CodeMetadata::new(
                "I051",
                "Orchestration",
                Severity::Low,
                "Pass curtailed by its input reconfiguration",
                "None",
            ),
            CodeMetadata::new(
                "I052",
                "Orchestration",
                Severity::Low,
                "Pass sequence stopped by cancellation",
                "None",
            ),
            CodeMetadata::new(
                "D053",
                "Orchestration",
                Severity::Low,
                "Pass started",
                "None",
            ),
            CodeMetadata::new(
                "E054",
                "Orchestration",
                Severity::Medium,
                "Pass names a parser that is not in the catalog",
                "Declare the parser or fix the pass configuration",
            ),
            CodeMetadata::new(
                "I001",
                "Success",
                Severity::Low,
                "Logging initialized",
                "None",
            ),
            CodeMetadata::new(
                "I010",
                "Success",
                Severity::Low,
                "Component registry ready",
                "None",
            ),
            CodeMetadata::new(
                "I011",
                "Success",
                Severity::Low,
                "Component loaded",
                "None",
            ),
            CodeMetadata::new(
                "I012",
                "Success",
                Severity::Low,
                "Component document loaded",
                "None",
            ),
            CodeMetadata::new(
                "I055",
                "Success",
                Severity::Low,
                "Multi-pass sequence completed",
                "None",
            ),
        ];

        entries.into_iter().map(|m| (m.code, m)).collect()
    })
}

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// Get metadata for a code
pub fn get_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_code_registry().get(code)
}

/// Get severity for a code (unknown codes are `Low`)
pub fn get_severity(code: &str) -> Severity {
    get_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Low)
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map(|m| m.category).unwrap_or("General")
}

/// Get description for a code
pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown code")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}
