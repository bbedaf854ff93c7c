// src/classify/terms.rs
//! Term-list classifier
//!
//! Matches the whole token text against configured terms. Stopword sections
//! are consulted first and veto a match.

use super::traits::TokenClassifier;
use crate::config::{ComponentConfig, ConfigError, TermsSection};
use crate::types::FeatureMap;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TermSet {
    case_sensitive: bool,
    class_feature: Option<String>,
    collective: FeatureMap,
    /// Normalized term -> (configured text, per-term attributes)
    terms: HashMap<String, (String, FeatureMap)>,
}

impl TermSet {
    fn from_section(section: &TermsSection) -> Self {
        let mut terms = HashMap::with_capacity(section.terms.len());
        for entry in &section.terms {
            let attributes = entry.attributes().cloned().unwrap_or_default();
            terms.insert(
                normalize(entry.text(), section.case_sensitive),
                (entry.text().to_string(), attributes),
            );
        }

        Self {
            case_sensitive: section.case_sensitive,
            class_feature: section.class_feature.clone(),
            collective: section.attributes.clone(),
            terms,
        }
    }

    fn lookup(&self, text: &str) -> Option<FeatureMap> {
        let (term, attributes) = self.terms.get(&normalize(text, self.case_sensitive))?;

        let mut features = self.collective.clone();
        features.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(class_feature) = &self.class_feature {
            features.insert(class_feature.clone(), term.clone());
        }
        Some(features)
    }

    fn max_word_count(&self) -> usize {
        self.terms
            .values()
            .map(|(term, _)| term.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }

    fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn normalize(text: &str, case_sensitive: bool) -> String {
    let trimmed = text.trim();
    if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

#[derive(Debug, Clone)]
pub struct TermsClassifier {
    name: String,
    sections: Vec<TermSet>,
    stopwords: Vec<TermSet>,
    max_word_count: usize,
}

impl TermsClassifier {
    pub fn new(name: impl Into<String>, sections: &[TermsSection], stopwords: &[TermsSection]) -> Self {
        let sections: Vec<TermSet> = sections
            .iter()
            .map(TermSet::from_section)
            .filter(|set| !set.is_empty())
            .collect();
        let stopwords: Vec<TermSet> = stopwords
            .iter()
            .map(TermSet::from_section)
            .filter(|set| !set.is_empty())
            .collect();
        let max_word_count = sections
            .iter()
            .map(TermSet::max_word_count)
            .max()
            .unwrap_or(0);

        Self {
            name: name.into(),
            sections,
            stopwords,
            max_word_count,
        }
    }

    /// Build from a component's `terms`/`stopwords` sections; `None` when
    /// there are no terms
    pub fn from_config(config: &ComponentConfig) -> Result<Option<Self>, ConfigError> {
        let classifier = Self::new(config.display_name(), &config.terms, &config.stopwords);
        Ok(if classifier.is_empty() {
            None
        } else {
            Some(classifier)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn is_stopword(&self, text: &str) -> bool {
        self.stopwords.iter().any(|set| set.lookup(text).is_some())
    }
}

impl TokenClassifier for TermsClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_word_count(&self) -> usize {
        self.max_word_count
    }

    fn classify_text(&self, text: &str) -> Option<FeatureMap> {
        if self.is_stopword(text) {
            return None;
        }
        self.sections.iter().find_map(|set| set.lookup(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TermEntry;
    use std::collections::BTreeMap;

    fn section(terms: &[&str], case_sensitive: bool) -> TermsSection {
        TermsSection {
            case_sensitive,
            terms: terms.iter().map(|t| TermEntry::Plain(t.to_string())).collect(),
            ..TermsSection::default()
        }
    }

    #[test]
    fn test_case_insensitive_default() {
        let classifier = TermsClassifier::new("months", &[section(&["May", "June"], false)], &[]);

        assert!(classifier.classify_text("may").is_some());
        assert!(classifier.classify_text(" JUNE ").is_some());
        assert!(classifier.classify_text("July").is_none());
    }

    #[test]
    fn test_case_sensitive_section() {
        let classifier = TermsClassifier::new("months", &[section(&["May"], true)], &[]);

        assert!(classifier.classify_text("May").is_some());
        assert!(classifier.classify_text("may").is_none());
    }

    #[test]
    fn test_features_union() {
        let mut collective = BTreeMap::new();
        collective.insert("kind".to_string(), "month".to_string());
        let mut own = BTreeMap::new();
        own.insert("days".to_string(), "30".to_string());

        let terms = TermsSection {
            case_sensitive: false,
            class_feature: Some("month".to_string()),
            attributes: collective,
            terms: vec![
                TermEntry::Plain("May".to_string()),
                TermEntry::Detailed {
                    text: "June".to_string(),
                    attributes: own,
                },
            ],
        };
        let classifier = TermsClassifier::new("months", &[terms], &[]);

        let june = classifier.classify_text("june").unwrap();
        assert_eq!(june.get("kind").map(String::as_str), Some("month"));
        assert_eq!(june.get("days").map(String::as_str), Some("30"));
        assert_eq!(june.get("month").map(String::as_str), Some("June"));

        let may = classifier.classify_text("MAY").unwrap();
        assert!(!may.contains_key("days"));
    }

    #[test]
    fn test_matched_without_features_is_empty_map() {
        let classifier = TermsClassifier::new("words", &[section(&["of"], false)], &[]);
        assert_eq!(classifier.classify_text("of"), Some(FeatureMap::new()));
    }

    #[test]
    fn test_stopwords_veto() {
        let classifier = TermsClassifier::new(
            "names",
            &[section(&["Will", "Grace"], false)],
            &[section(&["will"], false)],
        );

        assert!(classifier.is_stopword("WILL"));
        assert!(classifier.classify_text("Will").is_none());
        assert!(classifier.classify_text("Grace").is_some());
    }

    #[test]
    fn test_max_word_count() {
        let classifier = TermsClassifier::new("cities", &[section(&["New York", "Salt Lake City", "Provo"], false)], &[]);
        assert_eq!(classifier.max_word_count(), 3);
    }

    #[test]
    fn test_empty_config_is_absent() {
        let config = ComponentConfig::new("terms");
        assert!(TermsClassifier::from_config(&config).unwrap().is_none());
    }
}
