//! Subcommand handlers. Each returns the process exit code.

use super::commands::{ExtractArgs, ValidateArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::{ExtractorSpec, VarExtractConfig};
use crate::expand::{ConfigExpander, Environment};
use crate::fs::RealFileSystem;
use crate::pattern::NamedPattern;
use crate::pipeline::{ExtractionPipeline, VariableSink};
use crate::process::SystemProcessRunner;
use crate::Variables;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Prints audit lines to stderr unless quiet; stdout is left for the variables.
pub struct ConsoleSink {
    quiet: bool,
    published: Option<usize>,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            published: None,
        }
    }

    /// Number of variables published, `None` until a run succeeds
    pub fn published(&self) -> Option<usize> {
        self.published
    }
}

impl VariableSink for ConsoleSink {
    fn audit(&mut self, line: &str) {
        if !self.quiet {
            eprintln!("{}", line);
        }
    }

    fn publish(&mut self, variables: &Variables) {
        debug!("Publishing {} variable(s)", variables.len());
        self.published = Some(variables.len());
    }
}

pub fn handle_extract(args: &ExtractArgs, quiet: bool) -> i32 {
    match run_extract(args, quiet) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_validate(args: &ValidateArgs, quiet: bool) -> i32 {
    match run_validate(args) {
        Ok(count) => {
            if !quiet {
                println!("{}: {} extractor(s) OK", args.config.display(), count);
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn build_environment(inherit: bool, overrides: &[(String, String)]) -> Environment {
    let mut environment = if inherit {
        Environment::from_process()
    } else {
        Environment::new()
    };
    environment.extend(overrides.iter().cloned());
    environment
}

fn run_extract(args: &ExtractArgs, quiet: bool) -> Result<()> {
    let host = VarExtractConfig::default();
    host.validate().context("Invalid VAREXTRACT_* configuration")?;

    let root: PathBuf = args.root.clone().unwrap_or_else(|| host.root.clone());
    let format: OutputFormat = match args.format {
        Some(arg) => arg.into(),
        None => host.output_format()?,
    };
    let spec = ExtractorSpec::load(&args.config)?;
    let environment = build_environment(!args.clean_env, &args.env);

    info!(
        "Running {} extractor(s) from {} in {}",
        spec.extractors.len(),
        args.config.display(),
        root.display()
    );

    let pipeline = ExtractionPipeline::new(
        root,
        Arc::new(RealFileSystem::new()),
        Arc::new(SystemProcessRunner::new()),
    );
    let mut sink = ConsoleSink::new(quiet);
    let variables = pipeline
        .run(&spec.extractors, &environment, &mut sink)
        .context("Variable extraction failed")?;

    let text = OutputFormatter::new(format).format(&variables)?;
    match &args.output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => print!("{}", text),
    }

    Ok(())
}

fn run_validate(args: &ValidateArgs) -> Result<usize> {
    let spec = ExtractorSpec::load(&args.config)?;
    let environment = build_environment(!args.clean_env, &args.env);
    let expander = ConfigExpander::new(&environment);

    for (index, config) in spec.extractors.iter().enumerate() {
        let config = expander.expand(config);
        if let Some(pattern) = config.pattern() {
            NamedPattern::compile(pattern, config.flags())
                .with_context(|| format!("Extractor #{} ({})", index, config.kind()))?;
        }
        debug!("Extractor #{} ({}) is valid", index, config.kind());
    }

    Ok(spec.extractors.len())
}
