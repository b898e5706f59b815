//! Compiler error type.

use schemaforge_core::{EmissionError, LoadError, ValidationIssue};
use thiserror::Error;

/// Errors that abort a compiler run. No artifacts are produced on any of them.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A descriptor could not be read or parsed.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A table failed validation. Only the first invalid table is reported.
    #[error("table '{table}' is invalid: {}", join_issues(.issues))]
    Validation {
        /// The offending table.
        table: String,
        /// Every issue found in that table.
        issues: Vec<ValidationIssue>,
    },

    /// One or more tables could not be emitted.
    #[error("{} emission error(s): {}", .0.len(), join_errors(.0))]
    Emission(Vec<EmissionError>),

    /// The codegen configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}

impl CompileError {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        CompileError::Config(message.into())
    }

    /// Emission errors carried by this error, if any.
    pub fn emission_errors(&self) -> &[EmissionError] {
        match self {
            CompileError::Emission(errors) => errors,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_errors(errors: &[EmissionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
