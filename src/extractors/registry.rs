//! Extractor registry
//!
//! Maps a strategy tag to the factory that builds its extractor, so hosts can add
//! strategies without touching the pipeline.

use super::config::{COMMAND_OUTPUT, FILE_CONTENT, FILE_NAME, PROPERTIES_FILE};
use super::{
    CommandOutputExtractor, Extractor, ExtractorConfig, FileContentExtractor, FileNameExtractor,
    PropertiesFileExtractor,
};
use crate::error::ExtractionError;
use std::collections::HashMap;

pub type ExtractorFactory = fn(ExtractorConfig) -> Result<Box<dyn Extractor>, ExtractionError>;

#[derive(Clone)]
pub struct ExtractorRegistry {
    factories: HashMap<&'static str, ExtractorFactory>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(FILE_NAME, FileNameExtractor::from_config);
        registry.register(FILE_CONTENT, FileContentExtractor::from_config);
        registry.register(COMMAND_OUTPUT, CommandOutputExtractor::from_config);
        registry.register(PROPERTIES_FILE, PropertiesFileExtractor::from_config);
        registry
    }

    /// Registering a kind twice replaces the earlier factory.
    pub fn register(&mut self, kind: &'static str, factory: ExtractorFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn factory(&self, kind: &str) -> Option<&ExtractorFactory> {
        self.factories.get(kind)
    }

    /// Build the extractor for `config`, or `None` if its kind is not registered
    pub fn create(
        &self,
        config: ExtractorConfig,
    ) -> Option<Result<Box<dyn Extractor>, ExtractionError>> {
        self.factory(config.kind()).map(|factory| factory(config))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{FileNameConfig, PropertiesFileConfig};

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        for kind in [COMMAND_OUTPUT, FILE_CONTENT, FILE_NAME, PROPERTIES_FILE] {
            assert!(registry.factory(kind).is_some(), "missing {}", kind);
        }
        assert!(registry.factory("unknown").is_none());
    }

    #[test]
    fn test_create_builds_matching_extractor() {
        let registry = ExtractorRegistry::with_defaults();
        let extractor = registry
            .create(ExtractorConfig::FileName(FileNameConfig::new("*.zip")))
            .unwrap()
            .unwrap();
        assert_eq!(extractor.kind(), FILE_NAME);
    }

    #[test]
    fn test_unregistered_kind() {
        let registry = ExtractorRegistry::new();
        assert!(registry.factory(FILE_NAME).is_none());
        assert!(registry
            .create(ExtractorConfig::PropertiesFile(PropertiesFileConfig::default()))
            .is_none());
    }

    #[test]
    fn test_register_replaces_factory() {
        let mut registry = ExtractorRegistry::with_defaults();
        registry.register(FILE_NAME, FileContentExtractor::from_config);

        let result = registry
            .create(ExtractorConfig::FileName(FileNameConfig::new("*.zip")))
            .unwrap();
        assert!(matches!(
            result,
            Err(ExtractionError::ConfigMismatch {
                expected: FILE_CONTENT,
                actual: FILE_NAME,
            })
        ));
    }
}
