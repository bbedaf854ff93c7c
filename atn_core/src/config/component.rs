// src/config/component.rs
//! Serde model for one declaratively configured component
//!
//! The same shape serves tests, classifiers and filters; each constructor
//! reads the sections it understands. Unrecognised keys are kept in
//! `attributes` so custom constructors can read them.

use super::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Attributes = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Registered type name, e.g. `cluster` or `terms`
    #[serde(rename = "type")]
    pub kind: String,

    /// Defaults to the loader's counter when absent
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub verbose: bool,

    /// Wrap the constructed test in the negation combinator
    #[serde(default)]
    pub reverse: bool,

    #[serde(default)]
    pub terms: Vec<TermsSection>,

    #[serde(default)]
    pub stopwords: Vec<TermsSection>,

    #[serde(default)]
    pub regexes: Vec<RegexDefinition>,

    /// Nested delimiter test section
    #[serde(default)]
    pub delim: Option<DelimSection>,

    /// Whole-token pattern (contiguous filters)
    #[serde(default)]
    pub pattern: Option<String>,

    /// Token feature names that classify a token (token tests)
    #[serde(default)]
    pub features: Vec<String>,

    #[serde(flatten)]
    pub attributes: Attributes,
}

impl ComponentConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Name used for diagnostics: the id when set, otherwise the type
    pub fn display_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.kind)
    }

    /// Boolean attribute with a default
    pub fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.attributes.get(key) {
            None => Ok(default),
            Some(serde_json::Value::Bool(value)) => Ok(*value),
            Some(serde_json::Value::String(value)) => match value.to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ConfigError::invalid_attribute(key, format!("expected boolean, got '{}'", value))),
            },
            Some(other) => Err(ConfigError::invalid_attribute(
                key,
                format!("expected boolean, got {}", other),
            )),
        }
    }

    /// Decode the free-form attributes into a typed section
    pub fn attributes_as<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| ConfigError::invalid_attribute(self.kind.clone(), e.to_string()))
    }
}

// ============================================================================
// TERM LISTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsSection {
    #[serde(default)]
    pub case_sensitive: bool,

    /// Feature that receives the matched term
    #[serde(default)]
    pub class_feature: Option<String>,

    /// Attributes shared by every term in the section
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub terms: Vec<TermEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermEntry {
    Plain(String),
    Detailed {
        text: String,
        #[serde(default)]
        attributes: BTreeMap<String, String>,
    },
}

impl TermEntry {
    pub fn text(&self) -> &str {
        match self {
            TermEntry::Plain(text) => text,
            TermEntry::Detailed { text, .. } => text,
        }
    }

    pub fn attributes(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            TermEntry::Plain(_) => None,
            TermEntry::Detailed { attributes, .. } => Some(attributes),
        }
    }
}

// ============================================================================
// REGULAR EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Whole text
    #[default]
    Matches,
    /// Prefix of the text
    LookingAt,
    /// Anywhere in the text
    Find,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegexDefinition {
    pub pattern: String,

    #[serde(default, rename = "type")]
    pub match_type: MatchType,

    #[serde(default)]
    pub case_insensitive: bool,

    /// Succeed when the pattern fails
    #[serde(default)]
    pub reverse: bool,

    /// Prefix the token's pre-delimiter before matching
    #[serde(default)]
    pub ldelim: bool,

    /// Append the token's post-delimiter before matching
    #[serde(default)]
    pub rdelim: bool,

    /// Outcome for empty text
    #[serde(default)]
    pub empty_result: bool,

    /// Capture group number to feature name
    #[serde(default)]
    pub groups: BTreeMap<String, String>,
}

impl RegexDefinition {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Parse group keys; `group1` and `1` are both accepted
    pub fn group_features(&self) -> Result<Vec<(usize, String)>, ConfigError> {
        self.groups
            .iter()
            .map(|(key, feature)| {
                let number = key.strip_prefix("group").unwrap_or(key);
                number
                    .parse::<usize>()
                    .map(|n| (n, feature.clone()))
                    .map_err(|_| {
                        ConfigError::invalid_attribute(
                            format!("groups.{}", key),
                            "group key must be a capture group number",
                        )
                    })
            })
            .collect()
    }
}

// ============================================================================
// DELIMITER FLAGS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelimFlags {
    pub check_pre: bool,
    pub check_post: bool,
    pub require_pre: bool,
    pub require_post: bool,
}

impl DelimFlags {
    /// Names under which the flags may appear as top-level attributes
    pub const ATTRIBUTES: [&'static str; 4] = ["checkPre", "checkPost", "requirePre", "requirePost"];

    /// No flag set: the test would have nothing to examine
    pub fn is_empty(&self) -> bool {
        !(self.check_pre || self.check_post || self.require_pre || self.require_post)
    }

    /// Flags set in either operand
    pub fn union(self, other: Self) -> Self {
        Self {
            check_pre: self.check_pre || other.check_pre,
            check_post: self.check_post || other.check_post,
            require_pre: self.require_pre || other.require_pre,
            require_post: self.require_post || other.require_post,
        }
    }
}

/// Nested `delim` section: presence flags plus string rules for each side
///
/// ```toml
/// [delim]
/// requirePost = true
///
/// [delim.post]
/// disallowAll = true
/// allow = [{ text = ",", type = "exact" }, "-"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimSection {
    #[serde(flatten)]
    pub flags: DelimFlags,

    /// Rules for the raw text before the token
    pub pre: Option<DelimRulesConfig>,

    /// Rules for the raw text after the token
    pub post: Option<DelimRulesConfig>,
}

impl DelimSection {
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.pre.is_none() && self.post.is_none()
    }
}

/// Allow, disallow and require lists for one side's delimiter text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelimRulesConfig {
    /// Every delimiter passes unless disallowed
    #[serde(alias = "allowall")]
    pub allow_all: bool,

    /// Every non-blank delimiter fails unless allowed
    #[serde(alias = "disallowall")]
    pub disallow_all: bool,

    pub allow: Vec<DelimPattern>,

    pub disallow: Vec<DelimPattern>,

    /// At least one must match for the side to pass
    pub require: Vec<DelimPattern>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimMatch {
    /// Pattern text occurs anywhere in the delimiter
    #[default]
    Substr,
    /// Pattern text equals the whole delimiter
    Exact,
}

/// Delimiter text to look for; a bare string is a substring match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelimPattern {
    Plain(String),
    Detailed {
        text: String,
        #[serde(default, rename = "type")]
        match_type: DelimMatch,
    },
}

impl DelimPattern {
    pub fn exact(text: impl Into<String>) -> Self {
        DelimPattern::Detailed {
            text: text.into(),
            match_type: DelimMatch::Exact,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            DelimPattern::Plain(text) => text,
            DelimPattern::Detailed { text, .. } => text,
        }
    }

    pub fn match_type(&self) -> DelimMatch {
        match self {
            DelimPattern::Plain(_) => DelimMatch::Substr,
            DelimPattern::Detailed { match_type, .. } => *match_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_toml_component() {
        let config: ComponentConfig = toml::from_str(
            r#"
            type = "delim"
            id = "spaced"
            reverse = true
            checkPre = true
            requirePost = true
            "#,
        )
        .unwrap();

        assert_eq!(config.kind, "delim");
        assert_eq!(config.display_name(), "spaced");
        assert!(config.reverse);
        assert!(config.flag("checkPre", false).unwrap());
        assert!(!config.flag("checkPost", false).unwrap());

        let flags: DelimFlags = config.attributes_as().unwrap();
        assert!(flags.check_pre);
        assert!(flags.require_post);
        assert!(!flags.check_post);
    }

    #[test]
    fn test_string_flag() {
        let config = ComponentConfig::new("delim").with_attribute("requirePost", serde_json::json!("TRUE"));
        assert!(config.flag("requirePost", false).unwrap());
    }

    #[test]
    fn test_invalid_flag() {
        let config = ComponentConfig::new("delim").with_attribute("checkPre", serde_json::json!(3));
        assert_matches!(
            config.flag("checkPre", false),
            Err(ConfigError::InvalidAttribute { .. })
        );
    }

    #[test]
    fn test_terms_and_regexes() {
        let config: ComponentConfig = serde_json::from_str(
            r#"{
                "type": "terms",
                "terms": [{
                    "caseSensitive": true,
                    "classFeature": "month",
                    "attributes": {"kind": "date"},
                    "terms": ["May", {"text": "June", "attributes": {"days": "30"}}]
                }],
                "regexes": [{"pattern": "(\\d+)", "type": "lookingat", "groups": {"group1": "number"}}]
            }"#,
        )
        .unwrap();

        let section = &config.terms[0];
        assert!(section.case_sensitive);
        assert_eq!(section.terms[0].text(), "May");
        assert_eq!(
            section.terms[1].attributes().and_then(|a| a.get("days")),
            Some(&"30".to_string())
        );

        let regex = &config.regexes[0];
        assert_eq!(regex.match_type, MatchType::LookingAt);
        assert_eq!(regex.group_features().unwrap(), vec![(1, "number".to_string())]);
    }

    #[test]
    fn test_bad_group_key() {
        let mut regex = RegexDefinition::new("x");
        regex.groups.insert("first".to_string(), "f".to_string());
        assert_matches!(regex.group_features(), Err(ConfigError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_delim_flags_empty() {
        assert!(DelimFlags::default().is_empty());
        assert!(!DelimFlags {
            require_pre: true,
            ..DelimFlags::default()
        }
        .is_empty());
    }

    #[test]
    fn test_delim_section_with_rules() {
        let config: ComponentConfig = toml::from_str(
            r#"
            type = "token"

            [delim]
            requirePost = true

            [delim.post]
            disallowAll = true
            allow = [{ text = ", ", type = "exact" }, "-"]
            require = [","]
            "#,
        )
        .unwrap();

        let section = config.delim.unwrap();
        assert!(section.flags.require_post);
        assert!(section.pre.is_none());

        let post = section.post.unwrap();
        assert!(post.disallow_all);
        assert!(!post.allow_all);
        assert_eq!(post.allow[0].text(), ", ");
        assert_eq!(post.allow[0].match_type(), DelimMatch::Exact);
        assert_eq!(post.allow[1].match_type(), DelimMatch::Substr);
        assert_eq!(post.require, vec![DelimPattern::Plain(",".to_string())]);
    }

    #[test]
    fn test_flag_union() {
        let pre = DelimFlags {
            check_pre: true,
            ..DelimFlags::default()
        };
        let post = DelimFlags {
            require_post: true,
            ..DelimFlags::default()
        };
        let both = pre.union(post);

        assert!(both.check_pre && both.require_post);
        assert!(!both.check_post && !both.require_pre);
    }
}
