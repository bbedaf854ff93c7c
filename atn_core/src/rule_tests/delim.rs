// src/rule_tests/delim.rs
//! Delimiter constraint
//!
//! Two layers, both optional. The presence flags come first. A side is
//! examined when it is checked or required. An unexamined side counts as
//! present for the require rules but never satisfies the "some delimiter"
//! rule:
//!
//! 1. required-before missing: FAIL
//! 2. required-after missing: FAIL
//! 3. no examined side has a delimiter: FAIL
//!
//! Then each side's string rules ([`DelimRules`]) are applied to the raw,
//! untrimmed delimiter text. Every configured side must accept.

use super::traits::RuleStepTest;
use crate::config::{
    ComponentConfig, ConfigError, DelimFlags, DelimMatch, DelimPattern, DelimRulesConfig, DelimSection,
};
use crate::results::PassFail;
use crate::types::{StateRef, Token};

// ============================================================================
// String rules
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct DelimString {
    text: String,
    allowed: bool,
    exact: bool,
}

impl DelimString {
    fn new(pattern: &DelimPattern, allowed: bool) -> Self {
        Self {
            text: pattern.text().to_string(),
            allowed,
            exact: pattern.match_type() == DelimMatch::Exact,
        }
    }

    fn matches(&self, delim: &str) -> bool {
        if self.exact {
            delim == self.text
        } else {
            self.occurs_in(delim)
        }
    }

    fn occurs_in(&self, delim: &str) -> bool {
        delim.contains(self.text.as_str())
    }
}

/// Allow, disallow and require rules for one side's delimiter text
///
/// `require` patterns are alternatives: one match is enough. Blank text
/// passes the allow/disallow lists. Otherwise the default (allow all or
/// disallow all) holds unless a listed pattern flips it. The first exact
/// pattern that equals the text settles the outcome, and an exact pattern
/// that only occurs inside the text means no flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimRules {
    allow_all: bool,
    strings: Vec<DelimString>,
    required: Vec<DelimString>,
}

impl Default for DelimRules {
    fn default() -> Self {
        Self {
            allow_all: true,
            strings: Vec::new(),
            required: Vec::new(),
        }
    }
}

impl DelimRules {
    /// Without an explicit default, `allow` entries imply disallow-all and
    /// `disallow` entries alone imply allow-all
    pub fn from_config(config: &DelimRulesConfig) -> Result<Self, ConfigError> {
        if config.allow_all && config.disallow_all {
            return Err(ConfigError::invalid_attribute(
                "allowAll",
                "cannot be combined with disallowAll",
            ));
        }

        let allow_all = config.allow_all || (!config.disallow_all && config.allow.is_empty());
        let strings = config
            .allow
            .iter()
            .map(|p| DelimString::new(p, true))
            .chain(config.disallow.iter().map(|p| DelimString::new(p, false)))
            .collect();
        let required = config.require.iter().map(|p| DelimString::new(p, true)).collect();

        Ok(Self {
            allow_all,
            strings,
            required,
        })
    }

    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn disallow_all() -> Self {
        Self {
            allow_all: false,
            ..Self::default()
        }
    }

    pub fn allow(mut self, pattern: DelimPattern) -> Self {
        self.strings.push(DelimString::new(&pattern, true));
        self
    }

    pub fn disallow(mut self, pattern: DelimPattern) -> Self {
        self.strings.push(DelimString::new(&pattern, false));
        self
    }

    pub fn require(mut self, pattern: DelimPattern) -> Self {
        self.required.push(DelimString::new(&pattern, true));
        self
    }

    /// Accepts every delimiter
    pub fn is_empty(&self) -> bool {
        self.allow_all && self.strings.is_empty() && self.required.is_empty()
    }

    pub fn accepts(&self, delim: &str) -> bool {
        if !self.required.is_empty() && !self.required.iter().any(|r| r.matches(delim)) {
            return false;
        }
        if delim.trim().is_empty() {
            return true;
        }

        let mut flipped = false;
        for string in &self.strings {
            if string.matches(delim) {
                if string.allowed != self.allow_all {
                    flipped = true;
                }
                if string.exact {
                    break;
                }
            } else if string.exact && string.occurs_in(delim) {
                flipped = false;
                break;
            }
        }

        self.allow_all != flipped
    }
}

fn side_rules(config: Option<&DelimRulesConfig>) -> Result<Option<DelimRules>, ConfigError> {
    Ok(config
        .map(DelimRules::from_config)
        .transpose()?
        .filter(|rules| !rules.is_empty()))
}

// ============================================================================
// Test
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimTest {
    flags: DelimFlags,
    pre: Option<DelimRules>,
    post: Option<DelimRules>,
}

impl DelimTest {
    pub fn new(flags: DelimFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn with_pre_rules(mut self, rules: DelimRules) -> Self {
        self.pre = Some(rules);
        self
    }

    pub fn with_post_rules(mut self, rules: DelimRules) -> Self {
        self.post = Some(rules);
        self
    }

    /// Build from the top-level `checkPre`/`checkPost`/`requirePre`/`requirePost`
    /// attributes merged with a nested `delim` section; `None` when nothing
    /// is configured
    pub fn from_config(config: &ComponentConfig) -> Result<Option<Self>, ConfigError> {
        let flags = DelimFlags {
            check_pre: config.flag("checkPre", false)?,
            check_post: config.flag("checkPost", false)?,
            require_pre: config.flag("requirePre", false)?,
            require_post: config.flag("requirePost", false)?,
        };

        let section = config.delim.clone().unwrap_or_default();
        Self::from_section(&DelimSection {
            flags: flags.union(section.flags),
            ..section
        })
    }

    /// `None` when the section configures nothing
    pub fn from_section(section: &DelimSection) -> Result<Option<Self>, ConfigError> {
        let test = Self {
            flags: section.flags,
            pre: side_rules(section.pre.as_ref())?,
            post: side_rules(section.post.as_ref())?,
        };
        Ok((!test.is_empty()).then_some(test))
    }

    /// `None` when no flag is set
    pub fn from_flags(flags: DelimFlags) -> Option<Self> {
        (!flags.is_empty()).then(|| Self::new(flags))
    }

    pub fn flags(&self) -> DelimFlags {
        self.flags
    }

    pub fn pre_rules(&self) -> Option<&DelimRules> {
        self.pre.as_ref()
    }

    pub fn post_rules(&self) -> Option<&DelimRules> {
        self.post.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.pre.is_none() && self.post.is_none()
    }

    /// Delimiter-only evaluation, shared with the token filters
    pub fn check(&self, token: &Token) -> PassFail {
        if self.is_empty() {
            return PassFail::Fail;
        }
        if !self.flags.is_empty() && !self.presence_holds(token) {
            return PassFail::Fail;
        }

        let pre_ok = self.pre.as_ref().map_or(true, |r| r.accepts(token.pre_delim()));
        let post_ok = self.post.as_ref().map_or(true, |r| r.accepts(token.post_delim()));
        PassFail::from_accept(pre_ok && post_ok)
    }

    fn presence_holds(&self, token: &Token) -> bool {
        let DelimFlags {
            check_pre,
            check_post,
            require_pre,
            require_post,
        } = self.flags;

        let examine_pre = check_pre || require_pre;
        let examine_post = check_post || require_post;

        if require_pre && !token.has_delim_before() {
            return false;
        }
        if require_post && !token.has_delim_after() {
            return false;
        }

        (examine_pre && token.has_delim_before()) || (examine_post && token.has_delim_after())
    }
}

impl RuleStepTest for DelimTest {
    fn name(&self) -> &str {
        "delim"
    }

    fn accept(&self, token: &Token, _state: StateRef<'_>) -> PassFail {
        self.check(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn token(pre: &str, post: &str) -> Token {
        Token::new("x").with_delims(pre, post)
    }

    fn checked(require_pre: bool, require_post: bool) -> DelimTest {
        DelimTest::new(DelimFlags {
            check_pre: true,
            check_post: true,
            require_pre,
            require_post,
        })
    }

    fn substr(text: &str) -> DelimPattern {
        DelimPattern::Plain(text.to_string())
    }

    #[test]
    fn test_truth_table_with_both_sides_checked() {
        // No delimiters and nothing required.
        assert_eq!(checked(false, false).check(&token("", "")), PassFail::Fail);

        // Only the pre delimiter present.
        assert_eq!(checked(false, false).check(&token(",", "")), PassFail::Pass);
        assert_eq!(checked(true, false).check(&token(",", "")), PassFail::Pass);
        assert_eq!(checked(false, true).check(&token(",", "")), PassFail::Fail);
        assert_eq!(checked(true, true).check(&token(",", "")), PassFail::Fail);

        // Required pre delimiter missing always fails.
        for require_post in [false, true] {
            for post in ["", ";"] {
                assert_eq!(checked(true, require_post).check(&token("", post)), PassFail::Fail);
            }
        }

        assert_eq!(checked(true, true).check(&token("(", ")")), PassFail::Pass);
    }

    #[test]
    fn test_whitespace_is_not_a_delimiter() {
        assert_eq!(checked(false, false).check(&token("  ", "\t")), PassFail::Fail);
    }

    #[test]
    fn test_unexamined_side_is_ignored() {
        let pre_only = DelimTest::new(DelimFlags {
            check_pre: true,
            ..DelimFlags::default()
        });

        assert_eq!(pre_only.check(&token("", "-")), PassFail::Fail);
        assert_eq!(pre_only.check(&token("-", "")), PassFail::Pass);
    }

    #[test]
    fn test_require_without_check_examines_side() {
        let require_post = DelimTest::new(DelimFlags {
            require_post: true,
            ..DelimFlags::default()
        });

        assert_eq!(require_post.check(&token("", ".")), PassFail::Pass);
        assert_eq!(require_post.check(&token(",", "")), PassFail::Fail);
    }

    #[test]
    fn test_no_flags_is_absent() {
        assert!(DelimTest::from_flags(DelimFlags::default()).is_none());
        assert!(DelimTest::from_config(&ComponentConfig::new("delim"))
            .unwrap()
            .is_none());
        // Evaluated directly, an all-false test has nothing to find.
        assert_eq!(DelimTest::default().check(&token(",", ",")), PassFail::Fail);
    }

    #[test]
    fn test_from_config_flags() {
        let config = ComponentConfig::new("delim")
            .with_attribute("checkPost", serde_json::json!(true))
            .with_attribute("requirePre", serde_json::json!("true"));
        let test = DelimTest::from_config(&config).unwrap().unwrap();

        assert!(test.flags().check_post);
        assert!(test.flags().require_pre);
        assert!(!test.flags().check_pre);
    }

    #[test]
    fn test_from_config_merges_nested_section() {
        let config: ComponentConfig = toml::from_str(
            r#"
            type = "delim"
            checkPre = true

            [delim]
            requirePost = true
            "#,
        )
        .unwrap();
        let test = DelimTest::from_config(&config).unwrap().unwrap();

        assert!(test.flags().check_pre);
        assert!(test.flags().require_post);
        assert_eq!(test.check(&token("", ",")), PassFail::Pass);
        assert_eq!(test.check(&token(",", "")), PassFail::Fail);
    }

    #[test]
    fn test_disallow_all_then_allow_exact() {
        let rules = DelimRules::disallow_all().allow(DelimPattern::exact(", "));

        assert!(rules.accepts(", "));
        assert!(!rules.accepts(","));
        // Exact pattern inside longer text settles on the default.
        assert!(!rules.accepts(", -"));
        assert!(!rules.accepts(";"));
        assert!(rules.accepts("  "));
        assert!(rules.accepts(""));
    }

    #[test]
    fn test_allow_all_then_disallow_substr() {
        let rules = DelimRules::allow_all().disallow(substr("-"));

        assert!(!rules.accepts("-"));
        assert!(!rules.accepts(" - "));
        assert!(rules.accepts(", "));
    }

    #[test]
    fn test_untrimmed_text_is_compared() {
        let rules = DelimRules::disallow_all().allow(DelimPattern::exact(","));

        assert!(rules.accepts(","));
        assert!(!rules.accepts(", "));
    }

    #[test]
    fn test_require_any_of() {
        let rules = DelimRules::allow_all().require(substr(",")).require(DelimPattern::exact(";"));

        assert!(rules.accepts(", "));
        assert!(rules.accepts(";"));
        assert!(!rules.accepts("; "));
        assert!(!rules.accepts(""));
    }

    #[test]
    fn test_implied_defaults() {
        let allow_only = DelimRulesConfig {
            allow: vec![substr(",")],
            ..DelimRulesConfig::default()
        };
        let rules = DelimRules::from_config(&allow_only).unwrap();
        assert!(rules.accepts(","));
        assert!(!rules.accepts("-"));

        let disallow_only = DelimRulesConfig {
            disallow: vec![substr(",")],
            ..DelimRulesConfig::default()
        };
        let rules = DelimRules::from_config(&disallow_only).unwrap();
        assert!(!rules.accepts(","));
        assert!(rules.accepts("-"));

        let disallow_everything = DelimRulesConfig {
            disallow_all: true,
            ..DelimRulesConfig::default()
        };
        let rules = DelimRules::from_config(&disallow_everything).unwrap();
        assert!(!rules.is_empty());
        assert!(!rules.accepts("-"));
        assert!(rules.accepts(" "));
    }

    #[test]
    fn test_conflicting_defaults_rejected() {
        let config = DelimRulesConfig {
            allow_all: true,
            disallow_all: true,
            ..DelimRulesConfig::default()
        };
        assert_matches!(
            DelimRules::from_config(&config),
            Err(ConfigError::InvalidAttribute { ref attribute, .. }) if attribute == "allowAll"
        );
    }

    #[test]
    fn test_rules_applied_after_presence_flags() {
        let test = DelimTest::new(DelimFlags {
            require_post: true,
            ..DelimFlags::default()
        })
        .with_post_rules(DelimRules::disallow_all().allow(substr(",")));

        assert_eq!(test.check(&token("", ", ")), PassFail::Pass);
        assert_eq!(test.check(&token("", "-")), PassFail::Fail);
        // Presence failure wins before any rule runs.
        assert_eq!(test.check(&token("", "")), PassFail::Fail);
    }

    #[test]
    fn test_rules_only_section() {
        let config: ComponentConfig = toml::from_str(
            r#"
            type = "delim"

            [delim.pre]
            disallow = ["("]
            "#,
        )
        .unwrap();
        let test = DelimTest::from_config(&config).unwrap().unwrap();

        assert!(test.flags().is_empty());
        assert!(test.pre_rules().is_some());
        assert_eq!(test.check(&token(" (", "")), PassFail::Fail);
        assert_eq!(test.check(&token(", ", "")), PassFail::Pass);
        assert_eq!(test.check(&token("", "")), PassFail::Pass);
    }

    #[test]
    fn test_permissive_section_is_absent() {
        let section = DelimSection {
            post: Some(DelimRulesConfig {
                allow_all: true,
                ..DelimRulesConfig::default()
            }),
            ..DelimSection::default()
        };
        assert!(DelimTest::from_section(&section).unwrap().is_none());
    }
}
