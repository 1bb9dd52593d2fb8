//! varextract - build variable extraction from workspace artifacts
//!
//! An ordered list of extractors is run against a workspace. Each one reads a single
//! source (the name of a file picked by a wildcard, a file's content, a command's
//! output, or a `.properties` file) and turns it into named variables, usually
//! through a regular expression with named capture groups. The results are merged,
//! later extractors winning, and handed to a [`VariableSink`] together with an audit
//! trail.
//!
//! # Core Concepts
//!
//! - **Named patterns**: [`NamedPattern`] accepts `(?<name>...)` groups and reports
//!   every declared group on a match, in declaration order
//! - **File resolution**: [`FileResolver`] turns `dist/*.zip` style specifiers into
//!   exactly one file name
//! - **Placeholders**: `${name}` / `$name` references in extractor settings are
//!   expanded from an [`Environment`] before each extractor runs
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use varextract::{
//!     CollectingSink, Environment, ExtractionPipeline, ExtractorConfig, FileNameConfig,
//!     RealFileSystem, SystemProcessRunner,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = ExtractionPipeline::new(
//!     PathBuf::from("/build/checkout"),
//!     Arc::new(RealFileSystem::new()),
//!     Arc::new(SystemProcessRunner::new()),
//! );
//! let configs = vec![ExtractorConfig::FileName(FileNameConfig::new("target/*.jar"))];
//!
//! let mut sink = CollectingSink::new();
//! let variables = pipeline.run(&configs, &Environment::from_process(), &mut sink)?;
//! println!("VERSION = {:?}", variables.get("VERSION"));
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod expand;
pub mod extractors;
pub mod fs;
pub mod pattern;
pub mod pipeline;
pub mod process;
pub mod resolver;
pub mod util;

pub use audit::{AuditLog, AUDIT_TAG};
pub use config::{ConfigError, ExtractorSpec, SpecFormat, VarExtractConfig};
pub use error::{ExtractionError, PatternError, PipelineError, ResolveError};
pub use expand::{ConfigExpander, Environment};
pub use extractors::{
    CommandOutputConfig, ExtractionContext, Extractor, ExtractorConfig, ExtractorRegistry,
    FileContentConfig, FileNameConfig, PropertiesFileConfig,
};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use pattern::{NamedMatcher, NamedPattern, PatternFlags};
pub use pipeline::{CollectingSink, ExtractionPipeline, VariableSink};
pub use process::{MockProcessRunner, ProcessRunner, SystemProcessRunner};
pub use resolver::FileResolver;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Extracted variables, in the order they were first produced.
pub type Variables = indexmap::IndexMap<String, String>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
