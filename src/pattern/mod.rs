//! Regular expressions with named capture groups
//!
//! Patterns are written with `(?<NAME>...)` groups (the `(?P<NAME>...)` spelling is
//! accepted too). Compilation rewrites every named group into a plain numbered
//! group and remembers which index belongs to which name, so lookups by name never
//! depend on the underlying engine's own naming rules.
//!
//! ```
//! use varextract::pattern::{NamedPattern, PatternFlags};
//!
//! let pattern = NamedPattern::compile(
//!     r"(?<NAME>\w+)-(?<VERSION>.+)\.(?<TIMESTAMP>.+)\.(?<FILEEXT>\w+)",
//!     PatternFlags::default(),
//! )
//! .unwrap();
//!
//! let mut matcher = pattern.matcher("build-4.2.0.20240101.zip");
//! assert!(matcher.find());
//! assert_eq!(matcher.named_groups()["VERSION"], "4.2.0");
//! ```

mod matcher;
mod named;

pub use matcher::NamedMatcher;
pub use named::NamedPattern;

use serde::{Deserialize, Serialize};

/// Regex behaviour switches shared by the pattern-based extractors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternFlags {
    /// Case-insensitive matching
    pub ignore_case: bool,
    /// Free-spacing mode: whitespace and `#` comments in the pattern are ignored
    pub comments: bool,
    /// `^` and `$` match at line boundaries
    pub multiline: bool,
    /// `.` also matches `\n`
    pub dotall: bool,
}

impl PatternFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    pub fn comments(mut self, yes: bool) -> Self {
        self.comments = yes;
        self
    }

    pub fn multiline(mut self, yes: bool) -> Self {
        self.multiline = yes;
        self
    }

    pub fn dotall(mut self, yes: bool) -> Self {
        self.dotall = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_builder() {
        let flags = PatternFlags::new().comments(true).dotall(true);
        assert!(!flags.ignore_case);
        assert!(flags.comments);
        assert!(!flags.multiline);
        assert!(flags.dotall);
    }

    #[test]
    fn test_flags_default_all_off() {
        assert_eq!(
            PatternFlags::default(),
            PatternFlags {
                ignore_case: false,
                comments: false,
                multiline: false,
                dotall: false,
            }
        );
    }
}
