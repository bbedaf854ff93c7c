//! Declarative component configuration

pub mod component;
pub mod error;

pub use component::{
    Attributes, ComponentConfig, DelimFlags, DelimMatch, DelimPattern, DelimRulesConfig, DelimSection,
    MatchType, RegexDefinition, TermEntry, TermsSection,
};
pub use error::ConfigError;
