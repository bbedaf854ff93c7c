// src/orchestration/multi.rs
//! Sequential multi-pass parsing over one shared output
//!
//! Passes run in order and each sees the output accumulated by the passes
//! before it. A curtailed pass leaves the output unchanged and later passes
//! still run. The cancellation flag is consulted before each pass starts;
//! once it is set no further pass is issued and the accumulated output is
//! returned.

use super::cancel::CancellationFlag;
use super::error::OrchestrationError;
use super::input::{InputOptions, InputSource};
use super::settings::{ParseExecutor, ParseSettings, ReconfigureStrategy};
use atn_support::logging::codes;
use atn_support::{log_error, log_info, log_success};
use serde::{Deserialize, Serialize};

/// Declarative description of one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassConfig {
    /// Parser configuration id handed to the executor
    pub parser: String,

    #[serde(default)]
    pub flow: Vec<String>,

    #[serde(default)]
    pub strategy: ReconfigureStrategy,
}

impl PassConfig {
    pub fn new(parser: impl Into<String>) -> Self {
        Self {
            parser: parser.into(),
            flow: Vec::new(),
            strategy: ReconfigureStrategy::default(),
        }
    }

    pub fn with_flow(mut self, flow: Vec<String>) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_strategy(mut self, strategy: ReconfigureStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Ordered passes; appended during setup and read-only afterwards
#[derive(Debug)]
pub struct MultiParseSettings<S, O> {
    passes: Vec<ParseSettings<S, O>>,
}

impl<S, O> Default for MultiParseSettings<S, O> {
    fn default() -> Self {
        Self { passes: Vec::new() }
    }
}

impl<S: InputSource, O> MultiParseSettings<S, O> {
    /// Build passes from declarative entries; the first pass always takes
    /// the input as it stands
    pub fn from_configs(configs: &[PassConfig]) -> Self {
        let mut settings = Self::new();
        for (index, config) in configs.iter().enumerate() {
            let strategy = if index == 0 {
                ReconfigureStrategy::Initial
            } else {
                config.strategy
            };
            settings.add(ParseSettings::with_strategy(
                config.parser.clone(),
                config.flow.clone(),
                strategy,
            ));
        }
        settings
    }
}

impl<S, O> MultiParseSettings<S, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, settings: ParseSettings<S, O>) -> &mut Self {
        self.passes.push(settings);
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseSettings<S, O>> {
        self.passes.iter()
    }

    /// Check every pass names a known parser configuration
    pub fn validate_catalog(&self, known: &[&str]) -> Result<(), OrchestrationError> {
        for (index, pass) in self.passes.iter().enumerate() {
            if !known.contains(&pass.parser_id()) {
                let error = OrchestrationError::UnknownParser {
                    pass: index + 1,
                    parser_id: pass.parser_id().to_string(),
                };
                log_error!(error.code(), "Unknown parser configuration", "pass" => index + 1, "parser" => pass.parser_id());
                return Err(error);
            }
        }
        Ok(())
    }

    /// Run every pass in order, threading the output through
    pub fn parse<E>(
        &self,
        input: &mut S,
        initial: Option<O>,
        options: &InputOptions,
        cancel: &CancellationFlag,
        executor: &E,
    ) -> Result<Option<O>, OrchestrationError>
    where
        E: ParseExecutor<S, O>,
    {
        let mut output = initial;
        let mut completed = 0;

        for (index, pass) in self.passes.iter().enumerate() {
            if cancel.is_cancelled() {
                log_info!(
                    code = codes::orchestration::SEQUENCE_CANCELLED,
                    "Multi-pass parse cancelled",
                    "completed" => completed,
                    "remaining" => self.passes.len() - index
                );
                return Ok(output);
            }

            output = pass.run_pass(index + 1, input, output, options, cancel, executor)?;
            completed += 1;
        }

        log_success!(
            codes::success::MULTI_PASS_COMPLETE,
            "Multi-pass parse complete",
            "passes" => completed
        );

        Ok(output)
    }
}
