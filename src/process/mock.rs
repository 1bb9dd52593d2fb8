use super::{ProcessInvocation, ProcessOutput, ProcessRunner};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Canned responses keyed by the space-joined argv; records every invocation.
#[derive(Default)]
pub struct MockProcessRunner {
    responses: RwLock<HashMap<String, ProcessOutput>>,
    invocations: RwLock<Vec<ProcessInvocation>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, command_line: &str, exit_code: i32, stdout: &str) {
        self.add_output(
            command_line,
            ProcessOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    pub fn add_output(&self, command_line: &str, output: ProcessOutput) {
        self.responses
            .write()
            .unwrap()
            .insert(command_line.to_string(), output);
    }

    pub fn invocations(&self) -> Vec<ProcessInvocation> {
        self.invocations.read().unwrap().clone()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(&self, invocation: &ProcessInvocation) -> Result<ProcessOutput> {
        self.invocations.write().unwrap().push(invocation.clone());

        let key = invocation.command_line();
        self.responses
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow!("No such command: {}", key))
    }
}
