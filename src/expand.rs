//! Environment and placeholder expansion
//!
//! Configuration strings may reference environment entries as `${NAME}` or `$NAME`.
//! References to unknown names are left untouched, and expanded values are not
//! scanned again.

use crate::extractors::ExtractorConfig;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z0-9_.]+)\}|([A-Za-z0-9_]+))").expect("valid regex")
    })
}

/// Ordered key/value environment supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    vars: IndexMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace `${NAME}` and `$NAME` references with their values.
    pub fn expand(&self, input: &str) -> String {
        if !input.contains('$') {
            return input.to_string();
        }

        placeholder_regex()
            .replace_all(input, |caps: &Captures| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    pub fn expand_opt(&self, input: Option<&str>) -> Option<String> {
        input.map(|s| self.expand(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Extend<(String, String)> for Environment {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.vars.extend(iter);
    }
}

/// Expands every string field of an extractor configuration before it runs.
pub struct ConfigExpander<'a> {
    environment: &'a Environment,
}

impl<'a> ConfigExpander<'a> {
    pub fn new(environment: &'a Environment) -> Self {
        Self { environment }
    }

    pub fn expand(&self, config: &ExtractorConfig) -> ExtractorConfig {
        let env = self.environment;
        let mut expanded = config.clone();

        match &mut expanded {
            ExtractorConfig::FileName(c) => {
                c.file = env.expand(&c.file);
                c.pattern = env.expand(&c.pattern);
                c.base_dir = env.expand_opt(c.base_dir.as_deref());
            }
            ExtractorConfig::FileContent(c) => {
                c.file = env.expand(&c.file);
                c.pattern = env.expand(&c.pattern);
            }
            ExtractorConfig::CommandOutput(c) => {
                c.command = env.expand(&c.command);
                c.pattern = env.expand(&c.pattern);
                c.workdir = env.expand_opt(c.workdir.as_deref());
            }
            ExtractorConfig::PropertiesFile(c) => {
                c.file = env.expand(&c.file);
                c.restrict_to = env.expand_opt(c.restrict_to.as_deref());
            }
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{
        CommandOutputConfig, FileContentConfig, FileNameConfig, PropertiesFileConfig,
    };

    fn env() -> Environment {
        Environment::new()
            .with("WORKSPACE", "/ws")
            .with("BUILD_NUMBER", "42")
            .with("app.name", "demo")
    }

    #[test]
    fn test_expand_braced_and_bare() {
        let env = env();
        assert_eq!(env.expand("${WORKSPACE}/out"), "/ws/out");
        assert_eq!(env.expand("build-$BUILD_NUMBER.log"), "build-42.log");
        assert_eq!(env.expand("${app.name}"), "demo");
    }

    #[test]
    fn test_unknown_references_left_verbatim() {
        let env = env();
        assert_eq!(env.expand("${MISSING}/x"), "${MISSING}/x");
        assert_eq!(env.expand("(?<V>\\d+)$"), "(?<V>\\d+)$");
        assert_eq!(env.expand("cost $5"), "cost $5");
    }

    #[test]
    fn test_expansion_is_single_pass() {
        let env = Environment::new().with("A", "$B").with("B", "nested");
        assert_eq!(env.expand("$A"), "$B");
    }

    #[test]
    fn test_environment_preserves_order_and_overrides() {
        let mut env = Environment::new().with("B", "1").with("A", "2");
        env.insert("B", "3");
        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(env.get("B"), Some("3"));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_config_expander_expands_all_string_fields() {
        let env = env();
        let expander = ConfigExpander::new(&env);

        let config = ExtractorConfig::FileName(FileNameConfig {
            file: "app-$BUILD_NUMBER-*.zip".to_string(),
            pattern: "(?<B>${BUILD_NUMBER})".to_string(),
            base_dir: Some("${WORKSPACE}/dist".to_string()),
            ignore_case: true,
        });
        match expander.expand(&config) {
            ExtractorConfig::FileName(c) => {
                assert_eq!(c.file, "app-42-*.zip");
                assert_eq!(c.pattern, "(?<B>42)");
                assert_eq!(c.base_dir.as_deref(), Some("/ws/dist"));
                assert!(c.ignore_case);
            }
            other => panic!("unexpected {:?}", other),
        }

        let config = ExtractorConfig::CommandOutput(CommandOutputConfig {
            command: "echo ${BUILD_NUMBER}".to_string(),
            workdir: Some("$WORKSPACE".to_string()),
            ..CommandOutputConfig::default()
        });
        match expander.expand(&config) {
            ExtractorConfig::CommandOutput(c) => {
                assert_eq!(c.command, "echo 42");
                assert_eq!(c.workdir.as_deref(), Some("/ws"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let config = ExtractorConfig::FileContent(FileContentConfig {
            file: "${WORKSPACE}/pom.xml".to_string(),
            ..FileContentConfig::default()
        });
        match expander.expand(&config) {
            ExtractorConfig::FileContent(c) => assert_eq!(c.file, "/ws/pom.xml"),
            other => panic!("unexpected {:?}", other),
        }

        let config = ExtractorConfig::PropertiesFile(PropertiesFileConfig {
            file: "$WORKSPACE/build.properties".to_string(),
            restrict_to: Some("${app.name}, other".to_string()),
        });
        match expander.expand(&config) {
            ExtractorConfig::PropertiesFile(c) => {
                assert_eq!(c.file, "/ws/build.properties");
                assert_eq!(c.restrict_to.as_deref(), Some("demo, other"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_expander_leaves_original_untouched() {
        let env = env();
        let config = ExtractorConfig::FileContent(FileContentConfig {
            file: "$WORKSPACE/pom.xml".to_string(),
            ..FileContentConfig::default()
        });
        let _ = ConfigExpander::new(&env).expand(&config);
        match config {
            ExtractorConfig::FileContent(c) => assert_eq!(c.file, "$WORKSPACE/pom.xml"),
            _ => unreachable!(),
        }
    }
}
