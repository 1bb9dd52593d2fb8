//! Variables from the name of a single file picked by a wildcard specifier

use super::config::{non_blank, FileNameConfig, FILE_NAME};
use super::{first_match, ExtractionContext, Extractor, ExtractorConfig};
use crate::audit::AuditLog;
use crate::error::ExtractionError;
use crate::resolver::FileResolver;
use crate::Variables;
use tracing::debug;

pub struct FileNameExtractor {
    config: FileNameConfig,
}

impl FileNameExtractor {
    pub fn new(config: FileNameConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: ExtractorConfig) -> Result<Box<dyn Extractor>, ExtractionError> {
        match config {
            ExtractorConfig::FileName(c) => Ok(Box::new(Self::new(c))),
            other => Err(ExtractionError::ConfigMismatch {
                expected: FILE_NAME,
                actual: other.kind(),
            }),
        }
    }

    pub fn config(&self) -> &FileNameConfig {
        &self.config
    }
}

impl Extractor for FileNameExtractor {
    fn kind(&self) -> &'static str {
        FILE_NAME
    }

    fn extract_variables(
        &self,
        ctx: &ExtractionContext<'_>,
        audit: &mut AuditLog,
    ) -> Result<Variables, ExtractionError> {
        let config = &self.config;
        audit.info(format!("Extracting variables from file name: {}", config.file));

        let base_dir = match non_blank(config.base_dir.as_deref()) {
            Some(dir) => ctx.resolve_path(dir),
            None => ctx.root.to_path_buf(),
        };

        let file_name = FileResolver::new(ctx.fs).resolve(&base_dir, config.file.trim())?;
        debug!(file = %file_name, "Resolved file name");

        first_match(
            &config.pattern,
            config.flags(),
            &file_name,
            &format!("file name '{}'", file_name),
            audit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::expand::Environment;
    use crate::fs::MockFileSystem;
    use crate::process::MockProcessRunner;
    use std::path::Path;

    fn run(fs: &MockFileSystem, config: FileNameConfig) -> Result<Variables, ExtractionError> {
        let runner = MockProcessRunner::new();
        let env = Environment::new();
        let ctx = ExtractionContext {
            root: Path::new("/ws"),
            fs,
            runner: &runner,
            environment: &env,
        };
        FileNameExtractor::new(config).extract_variables(&ctx, &mut AuditLog::new())
    }

    fn workspace() -> MockFileSystem {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file("dist/build-4.2.0.20240101.zip", "");
        fs.add_file("dist/notes.txt", "");
        fs
    }

    #[test]
    fn test_default_pattern_on_resolved_name() {
        let fs = workspace();
        let vars = run(&fs, FileNameConfig::new("dist/build-*.zip")).unwrap();

        assert_eq!(vars["NAME"], "build");
        assert_eq!(vars["VERSION"], "4.2.0");
        assert_eq!(vars["TIMESTAMP"], "20240101");
        assert_eq!(vars["FILEEXT"], "zip");
    }

    #[test]
    fn test_base_dir_relative_to_root() {
        let fs = workspace();
        let config = FileNameConfig {
            base_dir: Some("dist".to_string()),
            ..FileNameConfig::new("*.zip")
        };
        let vars = run(&fs, config).unwrap();
        assert_eq!(vars["VERSION"], "4.2.0");
    }

    #[test]
    fn test_blank_base_dir_means_root() {
        let fs = workspace();
        let config = FileNameConfig {
            base_dir: Some("   ".to_string()),
            ..FileNameConfig::new("dist/*.zip")
        };
        assert!(run(&fs, config).is_ok());
    }

    #[test]
    fn test_no_match_is_empty() {
        let fs = workspace();
        let vars = run(&fs, FileNameConfig::new("dist/notes.txt")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_ignore_case() {
        let fs = workspace();
        let config = FileNameConfig {
            pattern: r"BUILD-(?<V>[\d.]+)\.ZIP".to_string(),
            ignore_case: true,
            ..FileNameConfig::new("dist/*.zip")
        };
        let vars = run(&fs, config).unwrap();
        assert_eq!(vars["V"], "4.2.0.20240101");
    }

    #[test]
    fn test_ambiguous_specifier_fails() {
        let fs = workspace();
        let err = run(&fs, FileNameConfig::new("dist/*")).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Resolve(ResolveError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_missing_file_fails() {
        let fs = workspace();
        let err = run(&fs, FileNameConfig::new("dist/*.tar.gz")).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Resolve(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_other_kinds() {
        let config = ExtractorConfig::PropertiesFile(Default::default());
        assert!(matches!(
            FileNameExtractor::from_config(config),
            Err(ExtractionError::ConfigMismatch { .. })
        ));
    }
}
