//! Configuration management for varextract
//!
//! Host settings come from environment variables with defaults; the extractor list
//! comes from a spec document in YAML, JSON or TOML.
//!
//! # Environment Variables
//!
//! - `VAREXTRACT_ROOT`: Workspace root - default: current directory
//! - `VAREXTRACT_LOG_LEVEL`: Logging level - default: "info"
//! - `VAREXTRACT_FORMAT`: Output format (properties|shell|json|yaml) - default: "properties"
//!
//! # Spec documents
//!
//! ```yaml
//! extractors:
//!   - type: file-name
//!     file: "target/*.jar"
//!   - type: properties-file
//!     file: gradle.properties
//!     restrictedNames: "version, group"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use varextract::{ExtractorSpec, VarExtractConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VarExtractConfig::default();
//! config.validate()?;
//!
//! let spec = ExtractorSpec::load(std::path::Path::new("varextract.yaml"))?;
//! println!("{} extractor(s) in {}", spec.extractors.len(), config.root.display());
//! # Ok(())
//! # }
//! ```

use crate::cli::output::OutputFormat;
use crate::extractors::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_FORMAT: &str = "properties";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to read spec file {}: {source}", path.display())]
    SpecRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse spec file {}: {message}", path.display())]
    SpecParse { path: PathBuf, message: String },

    #[error("Unsupported spec file extension: {} (expected .yaml, .yml, .json or .toml)", .0.display())]
    UnsupportedSpecFormat(PathBuf),
}

/// Host settings for a varextract run.
#[derive(Debug, Clone)]
pub struct VarExtractConfig {
    /// Workspace root that relative paths are anchored at
    pub root: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Output format name
    pub format: String,
}

impl Default for VarExtractConfig {
    /// Loads from `VAREXTRACT_*` environment variables, falling back to defaults.
    fn default() -> Self {
        let root = env::var("VAREXTRACT_ROOT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let log_level = env::var("VAREXTRACT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let format = env::var("VAREXTRACT_FORMAT")
            .unwrap_or_else(|_| DEFAULT_FORMAT.to_string())
            .to_lowercase();

        Self {
            root,
            log_level,
            format,
        }
    }
}

impl VarExtractConfig {
    /// Checks the log level and output format names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        self.output_format()?;
        Ok(())
    }

    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.format
            .parse::<OutputFormat>()
            .map_err(ConfigError::ValidationFailed)
    }
}

impl fmt::Display for VarExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "varextract Configuration:")?;
        writeln!(f, "  Root: {}", self.root.display())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Format: {}", self.format)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
    Toml,
}

impl SpecFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SpecFormat::Yaml),
            "json" => Some(SpecFormat::Json),
            "toml" => Some(SpecFormat::Toml),
            _ => None,
        }
    }
}

/// Ordered list of extractors to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorSpec {
    #[serde(default)]
    pub extractors: Vec<ExtractorConfig>,
}

impl ExtractorSpec {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = SpecFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedSpecFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::SpecRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format).map_err(|message| ConfigError::SpecParse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str, format: SpecFormat) -> Result<Self, String> {
        match format {
            SpecFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            SpecFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            SpecFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}
