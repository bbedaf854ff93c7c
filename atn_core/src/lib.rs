//! # ATN Core - decision core of an ATN grammar parser
//!
//! Decides at each search step whether a token fits the category expected
//! at a state (classification), whether auxiliary constraints veto the match
//! (rule-step tests), whether a multi-word token may keep growing (token
//! filters), and runs parser configurations in sequence over one input
//! (multi-pass orchestration).

pub mod classify;
pub mod config;
pub mod filters;
pub mod generation;
pub mod orchestration;
pub mod results;
pub mod rule_tests;
pub mod strategies;
pub mod types;

// Convenience re-exports
pub use config::{ComponentConfig, ConfigError};
pub use results::{MatchResult, PassFail};
pub use strategies::{ComponentRegistry, ComponentSet};
pub use types::{StateRef, StateTree, Token};

pub mod prelude {
    pub use crate::classify::{ConfiguredClassifier, RegexClassifier, TermsClassifier, TokenClassifier};

    pub use crate::config::{
        ComponentConfig, ConfigError, DelimFlags, DelimPattern, DelimSection, RegexDefinition, TermsSection,
    };

    pub use crate::filters::{ConfiguredFilter, ContiguousTokenFilter, FilterVerdict, TokenFilter};

    pub use crate::generation::{GenTree, TextGenerator};

    pub use crate::orchestration::{
        CancellationFlag, InputDecision, InputOptions, InputSource, MultiParseSettings,
        OrchestrationError, ParseExecutor, ParseRequest, ParseSettings, PassConfig, Reconfigure,
        ReconfigureStrategy,
    };

    pub use crate::results::{MatchResult, PassFail};

    pub use crate::rule_tests::{
        ClusterTest, ConfiguredTest, DelimRules, DelimTest, NegatedTest, RuleStepTest, TokenTest,
    };

    pub use crate::strategies::{ComponentDocument, ComponentLoader, ComponentRegistry, ComponentSet, RegistryBuilder};

    pub use crate::types::{FeatureMap, StateId, StateRef, StateTree, Token};
}
