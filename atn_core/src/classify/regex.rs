// src/classify/regex.rs
//! Regular-expression classifier

use super::traits::TokenClassifier;
use crate::config::{ComponentConfig, ConfigError, MatchType, RegexDefinition};
use crate::types::{FeatureMap, Token};
use regex::{Regex, RegexBuilder};

/// One compiled regex definition
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    reverse: bool,
    ldelim: bool,
    rdelim: bool,
    empty_result: bool,
    groups: Vec<(usize, String)>,
}

impl RegexMatcher {
    /// Compile a definition; with no `groups`, group 0 is reported under
    /// `default_feature`
    pub fn new(definition: &RegexDefinition, default_feature: &str) -> Result<Self, ConfigError> {
        // Anchoring keeps capture group numbers unchanged.
        let source = match definition.match_type {
            MatchType::Matches => format!("^(?:{})$", definition.pattern),
            MatchType::LookingAt => format!("^(?:{})", definition.pattern),
            MatchType::Find => definition.pattern.clone(),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(definition.case_insensitive)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: definition.pattern.clone(),
                source,
            })?;

        let mut groups = definition.group_features()?;
        if groups.is_empty() {
            groups.push((0, default_feature.to_string()));
        }

        Ok(Self {
            regex,
            reverse: definition.reverse,
            ldelim: definition.ldelim,
            rdelim: definition.rdelim,
            empty_result: definition.empty_result,
            groups,
        })
    }

    /// Match raw text
    pub fn match_text(&self, text: &str) -> Option<FeatureMap> {
        if text.is_empty() {
            return self.empty_result.then(FeatureMap::new);
        }

        match (self.regex.captures(text), self.reverse) {
            (Some(captures), false) => {
                let mut features = FeatureMap::new();
                for (group, feature) in &self.groups {
                    if let Some(value) = captures.get(*group) {
                        features.insert(feature.clone(), value.as_str().to_string());
                    }
                }
                Some(features)
            }
            (None, true) => Some(FeatureMap::new()),
            _ => None,
        }
    }

    /// Match a token, including its delimiters when configured
    pub fn match_token(&self, token: &Token) -> Option<FeatureMap> {
        if !(self.ldelim || self.rdelim) {
            return self.match_text(token.text());
        }

        let mut text = String::new();
        if self.ldelim {
            text.push_str(token.pre_delim());
        }
        text.push_str(token.text());
        if self.rdelim {
            text.push_str(token.post_delim());
        }
        self.match_text(&text)
    }
}

/// Classifies with the first matching definition
#[derive(Debug, Clone)]
pub struct RegexClassifier {
    name: String,
    matchers: Vec<RegexMatcher>,
}

impl RegexClassifier {
    pub fn new(name: impl Into<String>, definitions: &[RegexDefinition]) -> Result<Self, ConfigError> {
        let name = name.into();
        let matchers = definitions
            .iter()
            .map(|definition| RegexMatcher::new(definition, &name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, matchers })
    }

    /// Build from a component's `regexes`; `None` when there are none
    pub fn from_config(config: &ComponentConfig) -> Result<Option<Self>, ConfigError> {
        if config.regexes.is_empty() {
            return Ok(None);
        }
        Self::new(config.display_name(), &config.regexes).map(Some)
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl TokenClassifier for RegexClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify_text(&self, text: &str) -> Option<FeatureMap> {
        self.matchers.iter().find_map(|m| m.match_text(text))
    }

    fn classify_token(&self, token: &Token) -> Option<FeatureMap> {
        self.matchers.iter().find_map(|m| m.match_token(token))
    }
}
