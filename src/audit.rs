//! Line-oriented audit log handed to the sink alongside the variables.

use tracing::{debug, warn};

/// Fixed tag prefixed to every audit line.
pub const AUDIT_TAG: &str = "[variables-extractor]";

/// Collects audit lines for one pipeline run and mirrors them to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct AuditLog {
    lines: Vec<String>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        debug!(target: "varextract::audit", "{}", message);
        self.lines.push(format!("{} {}", AUDIT_TAG, message));
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        warn!(target: "varextract::audit", "{}", message);
        self.lines.push(format!("{} <WARNING> {}", AUDIT_TAG, message));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.lines.drain(..)
    }
}
