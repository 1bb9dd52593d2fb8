//! Destinations for extracted variables and their audit trail

use crate::Variables;

/// Receives the audit lines of a run and, on success, the merged variables.
pub trait VariableSink {
    fn audit(&mut self, line: &str);

    fn publish(&mut self, variables: &Variables);
}

/// Keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub audit_lines: Vec<String>,
    pub published: Option<Variables>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VariableSink for CollectingSink {
    fn audit(&mut self, line: &str) {
        self.audit_lines.push(line.to_string());
    }

    fn publish(&mut self, variables: &Variables) {
        self.published = Some(variables.clone());
    }
}
