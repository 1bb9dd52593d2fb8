use super::sink::VariableSink;
use crate::audit::AuditLog;
use crate::error::PipelineError;
use crate::expand::{ConfigExpander, Environment};
use crate::extractors::{ExtractionContext, ExtractorConfig, ExtractorRegistry};
use crate::fs::FileSystem;
use crate::process::ProcessRunner;
use crate::Variables;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs a list of extractor configurations against one workspace.
pub struct ExtractionPipeline {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn ProcessRunner>,
    registry: ExtractorRegistry,
}

impl ExtractionPipeline {
    pub fn new(root: PathBuf, fs: Arc<dyn FileSystem>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            root,
            fs,
            runner,
            registry: ExtractorRegistry::with_defaults(),
        }
    }

    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Run every configuration in order and publish the merged variables.
    ///
    /// The first failure aborts the run. Audit lines gathered up to that point are
    /// still handed to the sink, but nothing is published.
    pub fn run(
        &self,
        configs: &[ExtractorConfig],
        environment: &Environment,
        sink: &mut dyn VariableSink,
    ) -> Result<Variables, PipelineError> {
        let start = Instant::now();
        info!(
            "Starting variable extraction for: {} ({} extractor(s))",
            self.root.display(),
            configs.len()
        );

        let mut audit = AuditLog::new();
        let variables = match self.run_extractors(configs, environment, &mut audit) {
            Ok(variables) => variables,
            Err(err) => {
                warn!(error = ?err, "Variable extraction aborted");
                flush(&mut audit, sink);
                return Err(err);
            }
        };

        audit.info("Extracted variables:");
        for (name, value) in &variables {
            audit.info(format!("{} = {}", name, value));
        }
        flush(&mut audit, sink);
        sink.publish(&variables);

        info!(
            "Extraction complete: {} variable(s) in {:?}",
            variables.len(),
            start.elapsed()
        );
        Ok(variables)
    }

    fn run_extractors(
        &self,
        configs: &[ExtractorConfig],
        environment: &Environment,
        audit: &mut AuditLog,
    ) -> Result<Variables, PipelineError> {
        let expander = ConfigExpander::new(environment);
        let ctx = ExtractionContext {
            root: &self.root,
            fs: self.fs.as_ref(),
            runner: self.runner.as_ref(),
            environment,
        };

        let mut merged = Variables::new();
        for (index, config) in configs.iter().enumerate() {
            let config = expander.expand(config);
            let kind = config.kind();
            info!("Extractor #{}: {}", index, kind);

            let wrap = |source| PipelineError::Extractor {
                index,
                kind,
                source,
            };
            let extractor = self
                .registry
                .create(config)
                .ok_or_else(|| PipelineError::UnknownStrategy(kind.to_string()))?
                .map_err(wrap)?;

            let step_start = Instant::now();
            let variables = extractor.extract_variables(&ctx, audit).map_err(wrap)?;
            debug!(
                "Extractor #{} produced {} variable(s) in {:?}",
                index,
                variables.len(),
                step_start.elapsed()
            );

            for (name, value) in variables {
                if let Some(previous) = merged.insert(name.clone(), value) {
                    debug!("Variable {} overrides earlier value '{}'", name, previous);
                }
            }
        }

        Ok(merged)
    }
}

fn flush(audit: &mut AuditLog, sink: &mut dyn VariableSink) {
    for line in audit.drain() {
        sink.audit(&line);
    }
}
