//! ProcessRunner trait definition

use crate::expand::Environment;
use anyhow::Result;
use std::path::PathBuf;

/// Everything needed to launch one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    pub argv: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Environment,
}

impl ProcessInvocation {
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process did not run to completion (e.g. killed by a signal)
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn completed(&self) -> bool {
        self.exit_code.is_some()
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Launches a process, waits for it, and returns its captured output.
///
/// Timeouts and cancellation are the implementation's business; whatever error it
/// returns is treated as fatal by the caller.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &ProcessInvocation) -> Result<ProcessOutput>;
}
