//! Token classification protocol and built-in classifiers

pub mod configured;
pub mod regex;
pub mod terms;
pub mod traits;

pub use self::configured::ConfiguredClassifier;
pub use self::regex::{RegexClassifier, RegexMatcher};
pub use self::terms::TermsClassifier;
pub use self::traits::TokenClassifier;
