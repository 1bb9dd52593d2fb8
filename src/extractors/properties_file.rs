//! Variables taken verbatim from a `.properties` file

use super::config::{PropertiesFileConfig, PROPERTIES_FILE};
use super::properties::parse_properties;
use super::{ExtractionContext, Extractor, ExtractorConfig};
use crate::audit::AuditLog;
use crate::error::ExtractionError;
use crate::Variables;
use tracing::debug;

pub struct PropertiesFileExtractor {
    config: PropertiesFileConfig,
}

impl PropertiesFileExtractor {
    pub fn new(config: PropertiesFileConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: ExtractorConfig) -> Result<Box<dyn Extractor>, ExtractionError> {
        match config {
            ExtractorConfig::PropertiesFile(c) => Ok(Box::new(Self::new(c))),
            other => Err(ExtractionError::ConfigMismatch {
                expected: PROPERTIES_FILE,
                actual: other.kind(),
            }),
        }
    }
}

impl Extractor for PropertiesFileExtractor {
    fn kind(&self) -> &'static str {
        PROPERTIES_FILE
    }

    fn extract_variables(
        &self,
        ctx: &ExtractionContext<'_>,
        audit: &mut AuditLog,
    ) -> Result<Variables, ExtractionError> {
        audit.info(format!(
            "Extracting variables from properties file: {}",
            self.config.file
        ));

        let path = ctx.resolve_path(self.config.file.trim());
        let bytes = ctx
            .fs
            .read_bytes(&path)
            .map_err(|source| ExtractionError::Io {
                path: path.clone(),
                source,
            })?;
        let content = decode_latin1(&bytes);

        let properties = parse_properties(&content).map_err(|e| ExtractionError::Parse {
            path: path.clone(),
            line: e.line,
            message: e.message,
        })?;

        let names = self.config.restricted_names();
        if names.is_empty() {
            return Ok(properties);
        }

        let selected: Variables = properties
            .into_iter()
            .filter(|(key, _)| names.contains(key))
            .collect();
        debug!(
            path = %path.display(),
            requested = names.len(),
            selected = selected.len(),
            "Applied property name restriction"
        );
        Ok(selected)
    }
}

/// `.properties` files are ISO-8859-1; anything else goes through `\uXXXX` escapes.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::Environment;
    use crate::fs::MockFileSystem;
    use crate::process::MockProcessRunner;
    use std::path::Path;

    fn run(fs: &MockFileSystem, config: PropertiesFileConfig) -> Result<Variables, ExtractionError> {
        let runner = MockProcessRunner::new();
        let env = Environment::new();
        let ctx = ExtractionContext {
            root: Path::new("/ws"),
            fs,
            runner: &runner,
            environment: &env,
        };
        PropertiesFileExtractor::new(config).extract_variables(&ctx, &mut AuditLog::new())
    }

    fn config(file: &str, restrict_to: Option<&str>) -> PropertiesFileConfig {
        PropertiesFileConfig {
            file: file.to_string(),
            restrict_to: restrict_to.map(str::to_string),
        }
    }

    #[test]
    fn test_all_properties() {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file("build.properties", "a=1\nb=2\nc=3");

        let vars = run(&fs, config("build.properties", None)).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars["b"], "2");
    }

    #[test]
    fn test_file_is_decoded_as_latin1() {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file_bytes("build.properties", b"author=Ren\xe9\ncity=K\xf6ln\n");

        let vars = run(&fs, config("build.properties", None)).unwrap();
        assert_eq!(vars["author"], "René");
        assert_eq!(vars["city"], "Köln");
    }

    #[test]
    fn test_restricted_names() {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file("build.properties", "a=1\nb=2\nc=3");

        let vars = run(&fs, config("build.properties", Some("c, a"))).unwrap();
        let entries: Vec<(&str, &str)> = vars
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(entries, vec![("a", "1"), ("c", "3")]);
    }

    #[test]
    fn test_blank_restriction_means_everything() {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file("build.properties", "a=1\nb=2");

        let vars = run(&fs, config("build.properties", Some("  "))).unwrap();
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_unknown_restricted_name_is_skipped() {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file("build.properties", "a=1");

        let vars = run(&fs, config("build.properties", Some("a, zzz"))).unwrap();
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let fs = MockFileSystem::with_root("/ws".into());
        assert!(matches!(
            run(&fs, config("gone.properties", None)).unwrap_err(),
            ExtractionError::Io { .. }
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let fs = MockFileSystem::with_root("/ws".into());
        fs.add_file("bad.properties", "ok=1\nbad=\\uZZZZ");

        match run(&fs, config("bad.properties", None)).unwrap_err() {
            ExtractionError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Parse, got {:?}", other),
        }
    }
}
