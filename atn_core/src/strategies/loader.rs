// src/strategies/loader.rs
//! Builds configured components from declarative entries
//!
//! The loader wraps registry constructors with the cross-cutting concerns:
//! default ids, the `verbose` diagnostic flag and `reverse` negation.

use super::registry::ComponentRegistry;
use crate::classify::ConfiguredClassifier;
use crate::config::{ComponentConfig, ConfigError, DelimFlags};
use crate::filters::ConfiguredFilter;
use crate::rule_tests::{ConfiguredTest, NegatedTest, RuleStepTest};
use atn_support::logging::codes;
use atn_support::{log_success, log_warning, LoadPreferences};

#[derive(Debug)]
pub struct ComponentLoader<'r> {
    registry: &'r ComponentRegistry,
    preferences: LoadPreferences,
    next_id: u64,
}

impl<'r> ComponentLoader<'r> {
    pub fn with_preferences(registry: &'r ComponentRegistry, preferences: LoadPreferences) -> Self {
        Self {
            registry,
            preferences,
            next_id: 0,
        }
    }

    pub fn registry(&self) -> &'r ComponentRegistry {
        self.registry
    }

    pub fn preferences(&self) -> LoadPreferences {
        self.preferences
    }

    pub fn load_test(&mut self, config: &ComponentConfig) -> Result<Option<ConfiguredTest>, ConfigError> {
        let Some(test) = self.registry.build_test(config)? else {
            reject_unrecognised("test", config)?;
            self.report_empty("test", config);
            return Ok(None);
        };

        let test: Box<dyn RuleStepTest> = if config.reverse {
            Box::new(NegatedTest::new(test))
        } else {
            test
        };

        let id = self.assign_id(config);
        self.report_loaded("test", &id, config);
        Ok(Some(ConfiguredTest::new(id, test).with_verbose(config.verbose)))
    }

    pub fn load_classifier(
        &mut self,
        config: &ComponentConfig,
    ) -> Result<Option<ConfiguredClassifier>, ConfigError> {
        reject_reverse("classifier", config)?;
        let Some(classifier) = self.registry.build_classifier(config)? else {
            reject_unrecognised("classifier", config)?;
            self.report_empty("classifier", config);
            return Ok(None);
        };

        let id = self.assign_id(config);
        self.report_loaded("classifier", &id, config);
        Ok(Some(
            ConfiguredClassifier::new(id, classifier).with_verbose(config.verbose),
        ))
    }

    pub fn load_filter(&mut self, config: &ComponentConfig) -> Result<Option<ConfiguredFilter>, ConfigError> {
        reject_reverse("filter", config)?;
        let Some(filter) = self.registry.build_filter(config)? else {
            reject_unrecognised("filter", config)?;
            self.report_empty("filter", config);
            return Ok(None);
        };

        let id = self.assign_id(config);
        self.report_loaded("filter", &id, config);
        Ok(Some(ConfiguredFilter::new(id, filter).with_verbose(config.verbose)))
    }

    /// Explicit id, otherwise the next counter value
    fn assign_id(&mut self, config: &ComponentConfig) -> String {
        match &config.id {
            Some(id) => id.clone(),
            None => {
                let id = self.next_id;
                self.next_id += 1;
                id.to_string()
            }
        }
    }

    fn report_empty(&self, protocol: &str, config: &ComponentConfig) {
        if self.preferences.verbose_load {
            log_warning!(
                code = codes::config::EMPTY_COMPONENT,
                "Component has nothing to evaluate and was skipped",
                "protocol" => protocol,
                "type" => config.kind,
                "name" => config.display_name()
            );
        }
    }

    fn report_loaded(&self, protocol: &str, id: &str, config: &ComponentConfig) {
        if self.preferences.verbose_load {
            log_success!(
                codes::success::COMPONENT_LOADED,
                "Component loaded",
                "protocol" => protocol,
                "type" => config.kind,
                "id" => id,
                "reverse" => config.reverse
            );
        }
    }
}

/// An empty component with leftover attributes was most likely misspelt
fn reject_unrecognised(protocol: &str, config: &ComponentConfig) -> Result<(), ConfigError> {
    let unrecognised = config
        .attributes
        .keys()
        .find(|key| !DelimFlags::ATTRIBUTES.contains(&key.as_str()));

    match unrecognised {
        Some(key) => Err(ConfigError::invalid_attribute(
            key.clone(),
            format!("not recognised by {} type '{}'", protocol, config.kind),
        )),
        None => Ok(()),
    }
}

fn reject_reverse(protocol: &str, config: &ComponentConfig) -> Result<(), ConfigError> {
    if config.reverse {
        return Err(ConfigError::invalid_attribute(
            "reverse",
            format!("only rule-step tests can be reversed, not a {}", protocol),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TokenClassifier;
    use crate::results::PassFail;
    use crate::types::{StateTree, Token};
    use assert_matches::assert_matches;

    fn quiet(registry: &ComponentRegistry) -> ComponentLoader<'_> {
        ComponentLoader::with_preferences(registry, LoadPreferences::quiet())
    }

    #[test]
    fn test_default_ids_count_up() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let mut loader = quiet(&registry);

        let first = loader.load_test(&ComponentConfig::new("cluster")).unwrap().unwrap();
        let named = loader
            .load_test(&ComponentConfig::new("cluster").with_id("named"))
            .unwrap()
            .unwrap();
        let second = loader.load_test(&ComponentConfig::new("cluster")).unwrap().unwrap();

        assert_eq!(first.id(), "0");
        assert_eq!(named.id(), "named");
        assert_eq!(second.id(), "1");
    }

    #[test]
    fn test_counter_is_per_loader() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let config = ComponentConfig::new("cluster");

        let a = quiet(&registry).load_test(&config).unwrap().unwrap();
        let b = quiet(&registry).load_test(&config).unwrap().unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_reverse_wraps_test() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let mut loader = quiet(&registry);
        let config = ComponentConfig {
            reverse: true,
            ..ComponentConfig::new("delim").with_attribute("checkPre", serde_json::json!(true))
        };
        let test = loader.load_test(&config).unwrap().unwrap();

        let mut tree = StateTree::new();
        let root = tree.add_root("x", false);
        let state = tree.get(root).unwrap();

        assert_eq!(test.name(), "!delim");
        assert_eq!(test.accept(&Token::new("a").with_delims(",", ""), state), PassFail::Fail);
        assert_eq!(test.accept(&Token::new("a"), state), PassFail::Pass);
    }

    #[test]
    fn test_reverse_rejected_for_classifiers() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let config = ComponentConfig {
            reverse: true,
            ..ComponentConfig::new("regex")
        };

        assert_matches!(
            quiet(&registry).load_classifier(&config),
            Err(ConfigError::InvalidAttribute { ref attribute, .. }) if attribute == "reverse"
        );
    }

    #[test]
    fn test_empty_component_skipped_without_consuming_id() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let mut loader = ComponentLoader::with_preferences(&registry, LoadPreferences::verbose());

        assert!(loader.load_classifier(&ComponentConfig::new("terms")).unwrap().is_none());
        assert!(loader.load_filter(&ComponentConfig::new("contiguous")).unwrap().is_none());

        let config: ComponentConfig = toml::from_str(
            r#"
            type = "regex"
            verbose = true

            [[regexes]]
            pattern = "[0-9]+"
            "#,
        )
        .unwrap();
        let classifier = loader.load_classifier(&config).unwrap().unwrap();

        assert_eq!(classifier.id(), "0");
        assert!(classifier.is_verbose());
        assert!(classifier.classify_text("42").is_some());
    }

    #[test]
    fn test_misspelt_attribute_on_empty_component() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        let config = ComponentConfig::new("delim").with_attribute("requirepost", serde_json::json!(true));

        assert_matches!(
            quiet(&registry).load_test(&config),
            Err(ConfigError::InvalidAttribute { ref attribute, .. }) if attribute == "requirepost"
        );

        // Known flags explicitly switched off still leave an absent test.
        let switched_off = ComponentConfig::new("delim").with_attribute("checkPre", serde_json::json!(false));
        assert!(quiet(&registry).load_test(&switched_off).unwrap().is_none());
    }

    #[test]
    fn test_unknown_type_propagates() {
        let registry = ComponentRegistry::with_builtins(LoadPreferences::quiet());
        assert_matches!(
            quiet(&registry).load_filter(&ComponentConfig::new("fancy")),
            Err(ConfigError::UnknownComponentType { .. })
        );
    }
}
