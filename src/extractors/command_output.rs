//! Variables from the first regex match in a command's standard output

use super::config::{non_blank, CommandOutputConfig, COMMAND_OUTPUT};
use super::{ExtractionContext, Extractor, ExtractorConfig};
use crate::audit::AuditLog;
use crate::error::ExtractionError;
use crate::pattern::NamedPattern;
use crate::process::{tokenize, ProcessInvocation};
use crate::Variables;
use std::time::Instant;
use tracing::debug;

pub struct CommandOutputExtractor {
    config: CommandOutputConfig,
}

impl CommandOutputExtractor {
    pub fn new(config: CommandOutputConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: ExtractorConfig) -> Result<Box<dyn Extractor>, ExtractionError> {
        match config {
            ExtractorConfig::CommandOutput(c) => Ok(Box::new(Self::new(c))),
            other => Err(ExtractionError::ConfigMismatch {
                expected: COMMAND_OUTPUT,
                actual: other.kind(),
            }),
        }
    }

    fn command_error(&self, message: impl Into<String>) -> ExtractionError {
        ExtractionError::Command {
            command: self.config.command.clone(),
            message: message.into(),
        }
    }
}

impl Extractor for CommandOutputExtractor {
    fn kind(&self) -> &'static str {
        COMMAND_OUTPUT
    }

    fn extract_variables(
        &self,
        ctx: &ExtractionContext<'_>,
        audit: &mut AuditLog,
    ) -> Result<Variables, ExtractionError> {
        let config = &self.config;
        audit.info(format!(
            "Extracting variables from command output: {}",
            config.command
        ));

        let argv = tokenize(&config.command).map_err(|e| self.command_error(e.to_string()))?;
        if argv.is_empty() {
            return Err(self.command_error("empty command"));
        }

        let working_dir = match non_blank(config.workdir.as_deref()) {
            Some(dir) => {
                let dir = ctx.resolve_path(dir);
                audit.info(format!(
                    "Executed from working directory: {}",
                    dir.display()
                ));
                dir
            }
            None => ctx.root.to_path_buf(),
        };

        // Fail on a bad pattern before spawning anything.
        let pattern = NamedPattern::compile(&config.pattern, config.flags())?;

        let invocation = ProcessInvocation {
            argv,
            working_dir,
            env: ctx.environment.clone(),
        };
        let start = Instant::now();
        let output = ctx
            .runner
            .run(&invocation)
            .map_err(|e| self.command_error(format!("{:#}", e)))?;
        debug!(
            command = %invocation.command_line(),
            exit_code = ?output.exit_code,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Command finished"
        );

        for line in output.stdout.lines() {
            audit.info(line);
        }

        if !output.success() {
            return Err(ExtractionError::CommandFailed {
                command: config.command.clone(),
                exit_code: output.exit_code,
            });
        }

        let mut matcher = pattern.matcher(&output.stdout);
        if matcher.find() {
            Ok(matcher.named_groups())
        } else {
            audit.warn(format!(
                "No match in command output for pattern: {}",
                config.pattern
            ));
            Ok(Variables::new())
        }
    }
}
