use super::{ProcessInvocation, ProcessOutput, ProcessRunner};
use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands with `std::process::Command`, inheriting the current process
/// environment and overlaying the invocation's entries on top.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &ProcessInvocation) -> Result<ProcessOutput> {
        let Some((program, args)) = invocation.argv.split_first() else {
            bail!("Empty command line");
        };

        debug!(
            program = %program,
            args = ?args,
            cwd = %invocation.working_dir.display(),
            "Launching process"
        );

        let output = Command::new(program)
            .args(args)
            .current_dir(&invocation.working_dir)
            .envs(invocation.env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to launch {:?}", program))?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::expand::Environment;
    use tempfile::TempDir;

    fn invocation(argv: &[&str], dir: &TempDir, env: Environment) -> ProcessInvocation {
        ProcessInvocation {
            argv: argv.iter().map(|s| s.to_string()).collect(),
            working_dir: dir.path().to_path_buf(),
            env,
        }
    }

    #[test]
    fn test_captures_stdout_and_env() {
        let dir = TempDir::new().unwrap();
        let env = Environment::new().with("VAREXTRACT_TEST_VALUE", "hello");
        let output = SystemProcessRunner::new()
            .run(&invocation(
                &["sh", "-c", "echo $VAREXTRACT_TEST_VALUE"],
                &dir,
                env,
            ))
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn test_runs_in_working_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let output = SystemProcessRunner::new()
            .run(&invocation(&["ls"], &dir, Environment::new()))
            .unwrap();

        assert!(output.stdout.contains("marker.txt"));
    }

    #[test]
    fn test_non_zero_exit_code_reported() {
        let dir = TempDir::new().unwrap();
        let output = SystemProcessRunner::new()
            .run(&invocation(&["sh", "-c", "exit 3"], &dir, Environment::new()))
            .unwrap();

        assert_eq!(output.exit_code, Some(3));
    }

    #[test]
    fn test_missing_program_is_error() {
        let dir = TempDir::new().unwrap();
        let result = SystemProcessRunner::new().run(&invocation(
            &["definitely-not-a-real-program-xyz"],
            &dir,
            Environment::new(),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_argv_is_error() {
        let dir = TempDir::new().unwrap();
        let result = SystemProcessRunner::new().run(&invocation(&[], &dir, Environment::new()));
        assert!(result.is_err());
    }
}
