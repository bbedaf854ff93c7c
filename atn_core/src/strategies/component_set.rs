// src/strategies/component_set.rs
//! Loading a whole component document
//!
//! ```toml
//! [[tests]]
//! type = "cluster"
//!
//! [[classifiers]]
//! type = "terms"
//! id = "month"
//! [[classifiers.terms]]
//! terms = ["may", "june"]
//!
//! [[passes]]
//! parser = "dates"
//! ```

use super::loader::ComponentLoader;
use super::registry::ComponentRegistry;
use crate::classify::ConfiguredClassifier;
use crate::config::{ComponentConfig, ConfigError};
use crate::filters::ConfiguredFilter;
use crate::orchestration::PassConfig;
use crate::rule_tests::ConfiguredTest;
use atn_support::logging::codes;
use atn_support::{log_success, LoadPreferences};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serde model of a component document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    #[serde(default)]
    pub tests: Vec<ComponentConfig>,
    #[serde(default)]
    pub classifiers: Vec<ComponentConfig>,
    #[serde(default)]
    pub filters: Vec<ComponentConfig>,
    #[serde(default)]
    pub passes: Vec<PassConfig>,
}

impl ComponentDocument {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a `.toml` or `.json` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Components built from one document, in declaration order
#[derive(Debug, Default)]
pub struct ComponentSet {
    pub tests: Vec<ConfiguredTest>,
    pub classifiers: Vec<ConfiguredClassifier>,
    pub filters: Vec<ConfiguredFilter>,
    pub passes: Vec<PassConfig>,
}

impl ComponentSet {
    /// Build every component; empty ones are skipped
    pub fn from_document(
        document: &ComponentDocument,
        registry: &ComponentRegistry,
        preferences: LoadPreferences,
    ) -> Result<Self, ConfigError> {
        let mut loader = ComponentLoader::with_preferences(registry, preferences);
        let mut set = Self {
            passes: document.passes.clone(),
            ..Self::default()
        };

        for config in &document.tests {
            set.tests.extend(loader.load_test(config)?);
        }
        for config in &document.classifiers {
            set.classifiers.extend(loader.load_classifier(config)?);
        }
        for config in &document.filters {
            set.filters.extend(loader.load_filter(config)?);
        }

        if preferences.verbose_load {
            log_success!(
                codes::success::COMPONENT_SET_LOADED,
                "Component set loaded",
                "tests" => set.tests.len(),
                "classifiers" => set.classifiers.len(),
                "filters" => set.filters.len(),
                "passes" => set.passes.len()
            );
        }

        Ok(set)
    }

    pub fn from_toml_str(
        text: &str,
        registry: &ComponentRegistry,
        preferences: LoadPreferences,
    ) -> Result<Self, ConfigError> {
        Self::from_document(&ComponentDocument::from_toml_str(text)?, registry, preferences)
    }

    pub fn from_json_str(
        text: &str,
        registry: &ComponentRegistry,
        preferences: LoadPreferences,
    ) -> Result<Self, ConfigError> {
        Self::from_document(&ComponentDocument::from_json_str(text)?, registry, preferences)
    }

    pub fn from_path(
        path: impl AsRef<Path>,
        registry: &ComponentRegistry,
        preferences: LoadPreferences,
    ) -> Result<Self, ConfigError> {
        Self::from_document(&ComponentDocument::from_path(path)?, registry, preferences)
    }

    pub fn test(&self, id: &str) -> Option<&ConfiguredTest> {
        self.tests.iter().find(|t| t.id() == id)
    }

    pub fn classifier(&self, id: &str) -> Option<&ConfiguredClassifier> {
        self.classifiers.iter().find(|c| c.id() == id)
    }

    pub fn filter(&self, id: &str) -> Option<&ConfiguredFilter> {
        self.filters.iter().find(|f| f.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.classifiers.is_empty() && self.filters.is_empty()
    }
}
