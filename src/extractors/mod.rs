// Variable extraction strategies
//
// Each strategy reads one kind of build artifact (a file name, a file's content,
// a command's output, a properties file) and turns it into named variables.
// Configurations arrive already placeholder-expanded; see `crate::expand`.

pub mod command_output;
pub mod config;
pub mod file_content;
pub mod file_name;
pub mod properties;
pub mod properties_file;
pub mod registry;

pub use command_output::CommandOutputExtractor;
pub use config::{
    CommandOutputConfig, ExtractorConfig, FileContentConfig, FileNameConfig,
    PropertiesFileConfig,
};
pub use file_content::FileContentExtractor;
pub use file_name::FileNameExtractor;
pub use properties_file::PropertiesFileExtractor;
pub use registry::{ExtractorFactory, ExtractorRegistry};

use crate::audit::AuditLog;
use crate::error::ExtractionError;
use crate::expand::Environment;
use crate::fs::FileSystem;
use crate::pattern::{NamedPattern, PatternFlags};
use crate::process::ProcessRunner;
use crate::Variables;
use std::path::{Path, PathBuf};

/// Collaborators available to an extractor while it runs.
pub struct ExtractionContext<'a> {
    pub root: &'a Path,
    pub fs: &'a dyn FileSystem,
    pub runner: &'a dyn ProcessRunner,
    pub environment: &'a Environment,
}

impl<'a> ExtractionContext<'a> {
    /// Absolute paths are kept, relative ones are anchored at the workspace root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

pub trait Extractor: Send + Sync {
    /// Strategy tag, matching [`ExtractorConfig::kind`]
    fn kind(&self) -> &'static str;

    fn extract_variables(
        &self,
        ctx: &ExtractionContext<'_>,
        audit: &mut AuditLog,
    ) -> Result<Variables, ExtractionError>;
}

/// Compile `raw` and return the named groups of its first match in `text`.
///
/// A missing match yields an empty set and an audit warning naming `source`.
pub(crate) fn first_match(
    raw: &str,
    flags: PatternFlags,
    text: &str,
    source: &str,
    audit: &mut AuditLog,
) -> Result<Variables, ExtractionError> {
    let pattern = NamedPattern::compile(raw, flags)?;
    let mut matcher = pattern.matcher(text);

    if matcher.find() {
        Ok(matcher.named_groups())
    } else {
        audit.warn(format!("No match in {} for pattern: {}", source, raw));
        Ok(Variables::new())
    }
}
