// src/orchestration/error.rs
use atn_support::logging::codes;
use atn_support::Code;
use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("Pass {pass} using parser '{parser_id}' failed: {source}")]
    PassFailed {
        pass: usize,
        parser_id: String,
        #[source]
        source: BoxedError,
    },

    #[error("Pass {pass} refers to unknown parser '{parser_id}'")]
    UnknownParser { pass: usize, parser_id: String },
}

impl OrchestrationError {
    pub fn code(&self) -> Code {
        match self {
            OrchestrationError::PassFailed { .. } => codes::orchestration::PASS_FAILED,
            OrchestrationError::UnknownParser { .. } => codes::orchestration::UNKNOWN_PARSER,
        }
    }
}
