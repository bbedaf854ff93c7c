// src/orchestration/settings.rs
//! One parse pass: reconfigure the input, then hand it to the executor

use super::cancel::CancellationFlag;
use super::error::OrchestrationError;
use super::input::{InputOptions, InputSource};
use atn_support::logging::codes;
use atn_support::{log_debug, log_error, log_info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a pass runs after reconfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDecision {
    Proceed,
    /// Skip this pass and keep the prior output
    Curtail,
}

/// Prepares the input for a pass given the output accumulated so far
pub trait Reconfigure<S, O>: Send + Sync {
    fn reconfigure(&self, input: &mut S, prior: Option<&O>) -> InputDecision;
}

impl<S, O, F> Reconfigure<S, O> for F
where
    F: Fn(&mut S, Option<&O>) -> InputDecision + Send + Sync,
{
    fn reconfigure(&self, input: &mut S, prior: Option<&O>) -> InputDecision {
        self(input, prior)
    }
}

/// Built-in reconfiguration strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconfigureStrategy {
    /// Use the input as it stands
    #[default]
    Initial,
    /// Rewind the input
    Reset,
    /// Widen the input, curtailing when it cannot be widened
    Broaden,
}

impl<S: InputSource, O> Reconfigure<S, O> for ReconfigureStrategy {
    fn reconfigure(&self, input: &mut S, _prior: Option<&O>) -> InputDecision {
        match self {
            ReconfigureStrategy::Initial => InputDecision::Proceed,
            ReconfigureStrategy::Reset => {
                input.reset();
                InputDecision::Proceed
            }
            ReconfigureStrategy::Broaden => {
                if input.broaden() {
                    InputDecision::Proceed
                } else {
                    InputDecision::Curtail
                }
            }
        }
    }
}

// ============================================================================
// Execution collaborator
// ============================================================================

/// Everything one pass hands to the executor
#[derive(Debug)]
pub struct ParseRequest<'a, S, O> {
    pub input: &'a mut S,
    pub parser_id: &'a str,
    pub flow: &'a [String],
    pub prior_output: Option<O>,
    pub options: &'a InputOptions,
    /// Checked by the executor at whatever granularity it chooses
    pub cancel: &'a CancellationFlag,
}

/// Runs one parser configuration over an input
pub trait ParseExecutor<S, O> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(&self, request: ParseRequest<'_, S, O>) -> Result<O, Self::Error>;
}

// ============================================================================
// Parse Settings
// ============================================================================

pub struct ParseSettings<S, O> {
    parser_id: String,
    flow: Vec<String>,
    reconfigure: Box<dyn Reconfigure<S, O>>,
}

impl<S: InputSource, O> ParseSettings<S, O> {
    /// Pass that uses the input as it stands
    pub fn new(parser_id: impl Into<String>, flow: Vec<String>) -> Self {
        Self::with_strategy(parser_id, flow, ReconfigureStrategy::Initial)
    }

    pub fn with_strategy(parser_id: impl Into<String>, flow: Vec<String>, strategy: ReconfigureStrategy) -> Self {
        Self::with_reconfigure(parser_id, flow, strategy)
    }
}

impl<S, O> ParseSettings<S, O> {
    pub fn with_reconfigure<R>(parser_id: impl Into<String>, flow: Vec<String>, reconfigure: R) -> Self
    where
        R: Reconfigure<S, O> + 'static,
    {
        Self {
            parser_id: parser_id.into(),
            flow,
            reconfigure: Box::new(reconfigure),
        }
    }

    pub fn parser_id(&self) -> &str {
        &self.parser_id
    }

    pub fn flow(&self) -> &[String] {
        &self.flow
    }

    /// Run this pass on its own
    ///
    /// Returns the executor's output, or `prior` unchanged when
    /// reconfiguration curtails the pass.
    pub fn parse<E>(
        &self,
        input: &mut S,
        prior: Option<O>,
        options: &InputOptions,
        cancel: &CancellationFlag,
        executor: &E,
    ) -> Result<Option<O>, OrchestrationError>
    where
        E: ParseExecutor<S, O>,
    {
        self.run_pass(1, input, prior, options, cancel, executor)
    }

    pub(crate) fn run_pass<E>(
        &self,
        pass: usize,
        input: &mut S,
        prior: Option<O>,
        options: &InputOptions,
        cancel: &CancellationFlag,
        executor: &E,
    ) -> Result<Option<O>, OrchestrationError>
    where
        E: ParseExecutor<S, O>,
    {
        if self.reconfigure.reconfigure(input, prior.as_ref()) == InputDecision::Curtail {
            log_info!(
                code = codes::orchestration::PASS_CURTAILED,
                "Pass curtailed by input reconfiguration",
                "pass" => pass,
                "parser" => self.parser_id
            );
            return Ok(prior);
        }

        log_debug!(
            code = codes::orchestration::PASS_STARTED,
            "Starting parse pass",
            "pass" => pass,
            "parser" => self.parser_id,
            "flow" => self.flow.join(",")
        );

        let request = ParseRequest {
            input,
            parser_id: &self.parser_id,
            flow: &self.flow,
            prior_output: prior,
            options,
            cancel,
        };

        match executor.execute(request) {
            Ok(output) => Ok(Some(output)),
            Err(e) => {
                log_error!(
                    codes::orchestration::PASS_FAILED,
                    "Parse pass failed",
                    "pass" => pass,
                    "parser" => self.parser_id,
                    "error" => e
                );
                Err(OrchestrationError::PassFailed {
                    pass,
                    parser_id: self.parser_id.clone(),
                    source: Box::new(e),
                })
            }
        }
    }
}

impl<S, O> fmt::Debug for ParseSettings<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseSettings")
            .field("parser_id", &self.parser_id)
            .field("flow", &self.flow)
            .finish_non_exhaustive()
    }
}
