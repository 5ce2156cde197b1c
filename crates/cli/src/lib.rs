//! `smilefetch`: resolve compound names against PubChem and write an
//! annotated XLSX report.
//!
//! The binary is a thin shell over [`pipeline::run`]; everything it needs is
//! exposed here so the integration tests can drive it against a mock server.

pub mod exit_codes;
pub mod pipeline;
pub mod pubchem;

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_INPUT_READ, EXIT_OUTPUT_WRITE, EXIT_USAGE};

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_READ, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT_WRITE, message: msg.into(), hint: None }
    }

    pub fn config(err: smilefetch_config::ConfigError) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: err.to_string(),
            hint: Some(format!(
                "check {} or pass --config",
                smilefetch_config::Settings::config_path().display()
            )),
        }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
