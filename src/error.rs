//! Error types for pattern compilation, file resolution and extraction.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Invalid regexp pattern '{pattern}': {message}")]
    Syntax { pattern: String, message: String },

    #[error("No group with name '{0}' declared in pattern")]
    UnknownGroup(String),
}

impl PatternError {
    pub(crate) fn syntax(pattern: &str, message: impl Into<String>) -> Self {
        PatternError::Syntax {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Multiple files match with the given pattern: {} ({})", path.display(), matches.join(", "))]
    Ambiguous { path: PathBuf, matches: Vec<String> },

    #[error("Invalid file specifier '{specifier}': {message}")]
    InvalidGlob { specifier: String, message: String },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Error reading file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Error launching command '{command}': {message}")]
    Command { command: String, message: String },

    #[error("Error during command execution: '{command}' exited with {}", exit_code.map(|c| c.to_string()).unwrap_or_else(|| "no exit code".to_string()))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("Error parsing {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Extractor configuration mismatch: expected {expected}, got {actual}")]
    ConfigMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Extractor #{index} ({kind}) failed")]
    Extractor {
        index: usize,
        kind: &'static str,
        #[source]
        source: ExtractionError,
    },

    #[error("No extractor registered for strategy '{0}'")]
    UnknownStrategy(String),
}
