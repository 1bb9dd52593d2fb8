//! Output formatting for extracted variables
//!
//! # Example
//!
//! ```
//! use varextract::cli::output::{OutputFormat, OutputFormatter};
//! use varextract::Variables;
//!
//! let mut vars = Variables::new();
//! vars.insert("VERSION".to_string(), "1.2.3".to_string());
//!
//! let text = OutputFormatter::new(OutputFormat::Shell).format(&vars).unwrap();
//! assert_eq!(text, "export VERSION='1.2.3'\n");
//! ```

use crate::Variables;
use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `NAME=value`, escaped like a `.properties` file
    Properties,
    /// `export NAME='value'`, ready to `eval`
    Shell,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "properties" => Ok(OutputFormat::Properties),
            "shell" | "sh" => Ok(OutputFormat::Shell),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!(
                "Invalid output format: {}. Valid options: properties, shell, json, yaml",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Properties => "properties",
            OutputFormat::Shell => "shell",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, variables: &Variables) -> Result<String> {
        match self.format {
            OutputFormat::Properties => Ok(format_properties(variables)),
            OutputFormat::Shell => Ok(format_shell(variables)),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(variables)
                    .context("Failed to serialize variables to JSON")?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(variables).context("Failed to serialize variables to YAML")
            }
        }
    }
}

fn format_properties(variables: &Variables) -> String {
    variables
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}\n",
                escape_property(name, true),
                escape_property(value, false)
            )
        })
        .collect()
}

fn escape_property(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

fn format_shell(variables: &Variables) -> String {
    variables
        .iter()
        .map(|(name, value)| {
            format!(
                "export {}='{}'\n",
                shell_name(name),
                value.replace('\'', r"'\''")
            )
        })
        .collect()
}

/// Map a variable name onto `[A-Za-z_][A-Za-z0-9_]*`.
fn shell_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
