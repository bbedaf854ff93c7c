// src/types/token.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keyed features attached to a token or produced by a classifier
pub type FeatureMap = BTreeMap<String, String>;

/// A token as seen by the matching core: its text, the raw delimiter text
/// on either side, and a feature store owned by the search driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    text: String,
    #[serde(default)]
    pre_delim: String,
    #[serde(default)]
    post_delim: String,
    #[serde(default)]
    features: FeatureMap,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the delimiter text before and after the token
    pub fn with_delims(mut self, pre_delim: impl Into<String>, post_delim: impl Into<String>) -> Self {
        self.pre_delim = pre_delim.into();
        self.post_delim = post_delim.into();
        self
    }

    pub fn with_feature(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_feature(key, value);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pre_delim(&self) -> &str {
        &self.pre_delim
    }

    pub fn post_delim(&self) -> &str {
        &self.post_delim
    }

    /// Delimiter before the token is non-blank
    pub fn has_delim_before(&self) -> bool {
        !self.pre_delim.trim().is_empty()
    }

    /// Delimiter after the token is non-blank
    pub fn has_delim_after(&self) -> bool {
        !self.post_delim.trim().is_empty()
    }

    /// Number of whitespace-separated words in the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn feature(&self, key: &str) -> Option<&str> {
        self.features.get(key).map(String::as_str)
    }

    pub fn has_feature(&self, key: &str) -> bool {
        self.features.contains_key(key)
    }

    pub fn set_feature(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.features.insert(key.into(), value.into());
    }

    pub fn features(&self) -> &FeatureMap {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_presence_ignores_whitespace() {
        let token = Token::new("May").with_delims("  ", ", ");
        assert!(!token.has_delim_before());
        assert!(token.has_delim_after());
    }

    #[test]
    fn test_features() {
        let mut token = Token::new("12").with_feature("number", "12");
        token.set_feature("kind", "day");

        assert_eq!(token.feature("number"), Some("12"));
        assert!(token.has_feature("kind"));
        assert_eq!(token.features().len(), 2);
        assert_eq!(token.feature("missing"), None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let token: Token = serde_json::from_str(r#"{"text": "New York", "post_delim": "-"}"#).unwrap();

        assert_eq!(token.text(), "New York");
        assert_eq!(token.pre_delim(), "");
        assert_eq!(token.word_count(), 2);
        assert!(token.has_delim_after());
    }
}
