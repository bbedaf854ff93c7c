// src/strategies/registry.rs
//! Component registry mapping declared type names to constructors
//!
//! Each protocol (rule-step tests, classifiers, token filters) has its own
//! namespace. A constructor returns `Ok(None)` when the configuration it is
//! given carries nothing to evaluate.

use crate::classify::{RegexClassifier, TermsClassifier, TokenClassifier};
use crate::config::{ComponentConfig, ConfigError};
use crate::filters::{ContiguousTokenFilter, TokenFilter};
use crate::rule_tests::{ClusterTest, DelimTest, RuleStepTest, TokenTest};
use atn_support::{log_error, log_success};
use atn_support::logging::codes;
use atn_support::LoadPreferences;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

pub type ComponentResult<T> = Result<Option<Box<T>>, ConfigError>;

pub type TestConstructor = Box<dyn Fn(&ComponentConfig) -> ComponentResult<dyn RuleStepTest> + Send + Sync>;
pub type ClassifierConstructor =
    Box<dyn Fn(&ComponentConfig) -> ComponentResult<dyn TokenClassifier> + Send + Sync>;
pub type FilterConstructor = Box<dyn Fn(&ComponentConfig) -> ComponentResult<dyn TokenFilter> + Send + Sync>;

const TEST_PROTOCOL: &str = "test";
const CLASSIFIER_PROTOCOL: &str = "classifier";
const FILTER_PROTOCOL: &str = "filter";

/// Registry of component constructors by protocol and type name
pub struct ComponentRegistry {
    tests: HashMap<String, TestConstructor>,
    classifiers: HashMap<String, ClassifierConstructor>,
    filters: HashMap<String, FilterConstructor>,
    metadata: RegistryMetadata,
}

#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    pub created_at: DateTime<Utc>,
    pub last_registration: Option<DateTime<Utc>>,
    pub total_registrations: usize,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tests: HashMap::new(),
            classifiers: HashMap::new(),
            filters: HashMap::new(),
            metadata: RegistryMetadata {
                created_at: Utc::now(),
                last_registration: None,
                total_registrations: 0,
            },
        }
    }

    /// Registry holding the built-in component types
    pub fn with_builtins(preferences: LoadPreferences) -> Self {
        let mut registry = Self::new();

        if let Err(e) = registry.register_builtins() {
            log_error!(
                codes::system::INITIALIZATION_FAILURE,
                "Failed to register built-in components",
                "error" => e
            );
        }

        if preferences.verbose_load {
            log_success!(
                codes::success::REGISTRY_READY,
                "Component registry initialized",
                "tests" => registry.tests.len(),
                "classifiers" => registry.classifiers.len(),
                "filters" => registry.filters.len()
            );
        }

        registry
    }

    fn register_builtins(&mut self) -> Result<(), ConfigError> {
        self.register_test("cluster", |config| {
            Ok(ClusterTest::from_config(config)?.map(|t| Box::new(t) as Box<dyn RuleStepTest>))
        })?;
        self.register_test("delim", |config| {
            Ok(DelimTest::from_config(config)?.map(|t| Box::new(t) as Box<dyn RuleStepTest>))
        })?;
        self.register_test("token", |config| {
            Ok(TokenTest::from_config(config)?.map(|t| Box::new(t) as Box<dyn RuleStepTest>))
        })?;

        self.register_classifier("terms", |config| {
            Ok(TermsClassifier::from_config(config)?.map(|c| Box::new(c) as Box<dyn TokenClassifier>))
        })?;
        self.register_classifier("regex", |config| {
            Ok(RegexClassifier::from_config(config)?.map(|c| Box::new(c) as Box<dyn TokenClassifier>))
        })?;

        self.register_filter("contiguous", |config| {
            Ok(ContiguousTokenFilter::from_config(config)?.map(|f| Box::new(f) as Box<dyn TokenFilter>))
        })?;

        Ok(())
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn register_test<F>(&mut self, kind: impl Into<String>, constructor: F) -> Result<(), ConfigError>
    where
        F: Fn(&ComponentConfig) -> ComponentResult<dyn RuleStepTest> + Send + Sync + 'static,
    {
        let kind = kind.into();
        if self.tests.contains_key(&kind) {
            return Err(ConfigError::DuplicateRegistration {
                protocol: TEST_PROTOCOL,
                kind,
            });
        }
        self.tests.insert(kind, Box::new(constructor));
        self.touch();
        Ok(())
    }

    pub fn register_classifier<F>(&mut self, kind: impl Into<String>, constructor: F) -> Result<(), ConfigError>
    where
        F: Fn(&ComponentConfig) -> ComponentResult<dyn TokenClassifier> + Send + Sync + 'static,
    {
        let kind = kind.into();
        if self.classifiers.contains_key(&kind) {
            return Err(ConfigError::DuplicateRegistration {
                protocol: CLASSIFIER_PROTOCOL,
                kind,
            });
        }
        self.classifiers.insert(kind, Box::new(constructor));
        self.touch();
        Ok(())
    }

    pub fn register_filter<F>(&mut self, kind: impl Into<String>, constructor: F) -> Result<(), ConfigError>
    where
        F: Fn(&ComponentConfig) -> ComponentResult<dyn TokenFilter> + Send + Sync + 'static,
    {
        let kind = kind.into();
        if self.filters.contains_key(&kind) {
            return Err(ConfigError::DuplicateRegistration {
                protocol: FILTER_PROTOCOL,
                kind,
            });
        }
        self.filters.insert(kind, Box::new(constructor));
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.metadata.total_registrations += 1;
        self.metadata.last_registration = Some(Utc::now());
    }

    // ========================================================================
    // Lookup and construction
    // ========================================================================

    pub fn has_test(&self, kind: &str) -> bool {
        self.tests.contains_key(kind)
    }

    pub fn has_classifier(&self, kind: &str) -> bool {
        self.classifiers.contains_key(kind)
    }

    pub fn has_filter(&self, kind: &str) -> bool {
        self.filters.contains_key(kind)
    }

    pub fn test_types(&self) -> Vec<&str> {
        sorted_keys(&self.tests)
    }

    pub fn classifier_types(&self) -> Vec<&str> {
        sorted_keys(&self.classifiers)
    }

    pub fn filter_types(&self) -> Vec<&str> {
        sorted_keys(&self.filters)
    }

    pub fn build_test(&self, config: &ComponentConfig) -> ComponentResult<dyn RuleStepTest> {
        let constructor = self
            .tests
            .get(&config.kind)
            .ok_or_else(|| unknown(TEST_PROTOCOL, config))?;
        constructor(config)
    }

    pub fn build_classifier(&self, config: &ComponentConfig) -> ComponentResult<dyn TokenClassifier> {
        let constructor = self
            .classifiers
            .get(&config.kind)
            .ok_or_else(|| unknown(CLASSIFIER_PROTOCOL, config))?;
        constructor(config)
    }

    pub fn build_filter(&self, config: &ComponentConfig) -> ComponentResult<dyn TokenFilter> {
        let constructor = self
            .filters
            .get(&config.kind)
            .ok_or_else(|| unknown(FILTER_PROTOCOL, config))?;
        constructor(config)
    }

    pub fn metadata(&self) -> &RegistryMetadata {
        &self.metadata
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("tests", &self.test_types())
            .field("classifiers", &self.classifier_types())
            .field("filters", &self.filter_types())
            .field("metadata", &self.metadata)
            .finish()
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

fn unknown(protocol: &'static str, config: &ComponentConfig) -> ConfigError {
    ConfigError::UnknownComponentType {
        protocol,
        kind: config.kind.clone(),
    }
}

// ============================================================================
// Registry Builder
// ============================================================================

/// Builder for registries with custom component types
#[derive(Debug)]
pub struct RegistryBuilder {
    registry: ComponentRegistry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: ComponentRegistry::new(),
        }
    }

    /// Start from the built-in component types
    pub fn with_builtins(preferences: LoadPreferences) -> Self {
        Self {
            registry: ComponentRegistry::with_builtins(preferences),
        }
    }

    pub fn add_test<F>(mut self, kind: impl Into<String>, constructor: F) -> Result<Self, ConfigError>
    where
        F: Fn(&ComponentConfig) -> ComponentResult<dyn RuleStepTest> + Send + Sync + 'static,
    {
        self.registry.register_test(kind, constructor)?;
        Ok(self)
    }

    pub fn add_classifier<F>(mut self, kind: impl Into<String>, constructor: F) -> Result<Self, ConfigError>
    where
        F: Fn(&ComponentConfig) -> ComponentResult<dyn TokenClassifier> + Send + Sync + 'static,
    {
        self.registry.register_classifier(kind, constructor)?;
        Ok(self)
    }

    pub fn add_filter<F>(mut self, kind: impl Into<String>, constructor: F) -> Result<Self, ConfigError>
    where
        F: Fn(&ComponentConfig) -> ComponentResult<dyn TokenFilter> + Send + Sync + 'static,
    {
        self.registry.register_filter(kind, constructor)?;
        Ok(self)
    }

    pub fn build(self) -> ComponentRegistry {
        self.registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builtins_registered() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());

        assert_eq!(registry.test_types(), vec!["cluster", "delim", "token"]);
        assert_eq!(registry.classifier_types(), vec!["regex", "terms"]);
        assert_eq!(registry.filter_types(), vec!["contiguous"]);
        assert_eq!(registry.metadata().total_registrations, 6);
    }

    #[test]
    fn test_unknown_type() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let config = ComponentConfig::new("nonexistent");

        assert_matches!(
            registry.build_test(&config),
            Err(ConfigError::UnknownComponentType { protocol: "test", .. })
        );
        // Namespaces are separate.
        assert_matches!(
            registry.build_classifier(&ComponentConfig::new("cluster")),
            Err(ConfigError::UnknownComponentType { protocol: "classifier", .. })
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let result =
            RegistryBuilder::with_builtins(LoadPreferences::quiet()).add_test("cluster", |_| Ok(None));

        assert_matches!(
            result,
            Err(ConfigError::DuplicateRegistration { protocol: "test", ref kind }) if kind == "cluster"
        );
    }

    #[test]
    fn test_custom_constructor() {
        let registry = RegistryBuilder::new()
            .add_test("always", |_| Ok(Some(Box::new(ClusterTest::new()) as Box<dyn RuleStepTest>)))
            .unwrap()
            .build();

        assert!(registry.has_test("always"));
        assert!(!registry.has_test("cluster"));
        let built = registry.build_test(&ComponentConfig::new("always")).unwrap();
        assert_eq!(built.map(|t| t.name().to_string()), Some("cluster".to_string()));
    }

    #[test]
    fn test_empty_config_builds_nothing() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());

        assert!(registry.build_test(&ComponentConfig::new("delim")).unwrap().is_none());
        assert!(registry
            .build_classifier(&ComponentConfig::new("terms"))
            .unwrap()
            .is_none());
    }
}
