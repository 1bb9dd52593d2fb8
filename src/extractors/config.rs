//! Extractor configuration as supplied by the host

use crate::pattern::PatternFlags;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_NAME_PATTERN: &str =
    r"(?<NAME>\w+)-(?<VERSION>.+)\.(?<TIMESTAMP>.+)\.(?<FILEEXT>\w+)";
pub const DEFAULT_FILE_CONTENT_PATTERN: &str = r"<version>(?<VERSION>.+?)</version>";

pub const DEFAULT_IGNORE_CASE: bool = false;
pub const DEFAULT_COMMENTS: bool = true;
pub const DEFAULT_MULTILINE: bool = false;
pub const DEFAULT_DOTALL: bool = true;

pub const FILE_NAME: &str = "file-name";
pub const FILE_CONTENT: &str = "file-content";
pub const COMMAND_OUTPUT: &str = "command-output";
pub const PROPERTIES_FILE: &str = "properties-file";

fn default_file_name_pattern() -> String {
    DEFAULT_FILE_NAME_PATTERN.to_string()
}

fn default_file_content_pattern() -> String {
    DEFAULT_FILE_CONTENT_PATTERN.to_string()
}

fn default_comments() -> bool {
    DEFAULT_COMMENTS
}

fn default_dotall() -> bool {
    DEFAULT_DOTALL
}

/// One configured extraction step, tagged by strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExtractorConfig {
    FileName(FileNameConfig),
    FileContent(FileContentConfig),
    CommandOutput(CommandOutputConfig),
    PropertiesFile(PropertiesFileConfig),
}

impl ExtractorConfig {
    /// Strategy tag used for registry lookup and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractorConfig::FileName(_) => FILE_NAME,
            ExtractorConfig::FileContent(_) => FILE_CONTENT,
            ExtractorConfig::CommandOutput(_) => COMMAND_OUTPUT,
            ExtractorConfig::PropertiesFile(_) => PROPERTIES_FILE,
        }
    }

    /// Regex source, for strategies that have one.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            ExtractorConfig::FileName(c) => Some(&c.pattern),
            ExtractorConfig::FileContent(c) => Some(&c.pattern),
            ExtractorConfig::CommandOutput(c) => Some(&c.pattern),
            ExtractorConfig::PropertiesFile(_) => None,
        }
    }

    pub fn flags(&self) -> PatternFlags {
        match self {
            ExtractorConfig::FileName(c) => c.flags(),
            ExtractorConfig::FileContent(c) => c.flags(),
            ExtractorConfig::CommandOutput(c) => c.flags(),
            ExtractorConfig::PropertiesFile(_) => PatternFlags::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNameConfig {
    /// File specifier, may contain `*`, `?` and `**`
    pub file: String,
    #[serde(default = "default_file_name_pattern")]
    pub pattern: String,
    #[serde(default, alias = "baseDir", skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,
    #[serde(default, alias = "ignoreCase")]
    pub ignore_case: bool,
}

impl FileNameConfig {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            pattern: default_file_name_pattern(),
            base_dir: None,
            ignore_case: DEFAULT_IGNORE_CASE,
        }
    }

    pub fn flags(&self) -> PatternFlags {
        PatternFlags::new().ignore_case(self.ignore_case)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContentConfig {
    /// Absolute or workspace-relative path
    pub file: String,
    #[serde(default = "default_file_content_pattern")]
    pub pattern: String,
    #[serde(default, alias = "ignoreCase")]
    pub ignore_case: bool,
    #[serde(default = "default_comments")]
    pub comments: bool,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default = "default_dotall")]
    pub dotall: bool,
}

impl Default for FileContentConfig {
    fn default() -> Self {
        Self {
            file: String::new(),
            pattern: default_file_content_pattern(),
            ignore_case: DEFAULT_IGNORE_CASE,
            comments: DEFAULT_COMMENTS,
            multiline: DEFAULT_MULTILINE,
            dotall: DEFAULT_DOTALL,
        }
    }
}

impl FileContentConfig {
    pub fn flags(&self) -> PatternFlags {
        PatternFlags {
            ignore_case: self.ignore_case,
            comments: self.comments,
            multiline: self.multiline,
            dotall: self.dotall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutputConfig {
    pub command: String,
    pub pattern: String,
    /// Absolute or workspace-relative; blank means the workspace root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
    #[serde(default, alias = "ignoreCase")]
    pub ignore_case: bool,
    #[serde(default = "default_comments")]
    pub comments: bool,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default = "default_dotall")]
    pub dotall: bool,
}

impl Default for CommandOutputConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            pattern: String::new(),
            workdir: None,
            ignore_case: DEFAULT_IGNORE_CASE,
            comments: DEFAULT_COMMENTS,
            multiline: DEFAULT_MULTILINE,
            dotall: DEFAULT_DOTALL,
        }
    }
}

impl CommandOutputConfig {
    pub fn flags(&self) -> PatternFlags {
        PatternFlags {
            ignore_case: self.ignore_case,
            comments: self.comments,
            multiline: self.multiline,
            dotall: self.dotall,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesFileConfig {
    #[serde(alias = "propertiesFile")]
    pub file: String,
    /// Comma-separated property names; empty means every property
    #[serde(
        default,
        alias = "restrictedNames",
        skip_serializing_if = "Option::is_none"
    )]
    pub restrict_to: Option<String>,
}

impl PropertiesFileConfig {
    pub fn restricted_names(&self) -> Vec<String> {
        self.restrict_to
            .as_deref()
            .map(parse_name_list)
            .unwrap_or_default()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Treat blank optional settings as unset.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
