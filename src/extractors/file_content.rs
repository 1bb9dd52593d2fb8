//! Variables from the first regex match in a file's content

use super::config::{FileContentConfig, FILE_CONTENT};
use super::{first_match, ExtractionContext, Extractor, ExtractorConfig};
use crate::audit::AuditLog;
use crate::error::ExtractionError;
use crate::Variables;
use tracing::debug;

pub struct FileContentExtractor {
    config: FileContentConfig,
}

impl FileContentExtractor {
    pub fn new(config: FileContentConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: ExtractorConfig) -> Result<Box<dyn Extractor>, ExtractionError> {
        match config {
            ExtractorConfig::FileContent(c) => Ok(Box::new(Self::new(c))),
            other => Err(ExtractionError::ConfigMismatch {
                expected: FILE_CONTENT,
                actual: other.kind(),
            }),
        }
    }
}

impl Extractor for FileContentExtractor {
    fn kind(&self) -> &'static str {
        FILE_CONTENT
    }

    fn extract_variables(
        &self,
        ctx: &ExtractionContext<'_>,
        audit: &mut AuditLog,
    ) -> Result<Variables, ExtractionError> {
        let config = &self.config;
        audit.info(format!(
            "Extracting variables from file content: {}",
            config.file
        ));

        let path = ctx.resolve_path(config.file.trim());
        let content = ctx
            .fs
            .read_to_string(&path)
            .map_err(|source| ExtractionError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = content.len(), "Read file content");

        first_match(
            &config.pattern,
            config.flags(),
            &content,
            "file content",
            audit,
        )
    }
}
