use super::NamedPattern;
use crate::error::PatternError;
use crate::Variables;
use regex::Captures;

/// Matching state for one [`NamedPattern`] against one input text.
///
/// The first [`find`](Self::find) locates the leftmost match; later calls continue
/// after the previous one. Accessors describe the most recent successful match.
pub struct NamedMatcher<'p, 't> {
    pattern: &'p NamedPattern,
    text: &'t str,
    captures: Option<Captures<'t>>,
    next_start: usize,
}

impl<'p, 't> NamedMatcher<'p, 't> {
    pub(crate) fn new(pattern: &'p NamedPattern, text: &'t str) -> Self {
        Self {
            pattern,
            text,
            captures: None,
            next_start: 0,
        }
    }

    pub fn pattern(&self) -> &'p NamedPattern {
        self.pattern
    }

    /// Look for the next match. Returns `false` when there is none; that is not an error.
    pub fn find(&mut self) -> bool {
        self.captures = None;
        if self.next_start > self.text.len() {
            return false;
        }

        let Some(captures) = self.pattern.regex().captures_at(self.text, self.next_start) else {
            self.next_start = self.text.len() + 1;
            return false;
        };

        let (start, end) = match captures.get(0) {
            Some(m) => (m.start(), m.end()),
            None => return false,
        };

        // An empty match must not be found again at the same offset.
        self.next_start = if start == end {
            end + self.text[end..].chars().next().map_or(1, char::len_utf8)
        } else {
            end
        };
        self.captures = Some(captures);
        true
    }

    pub fn matched(&self) -> bool {
        self.captures.is_some()
    }

    /// Every declared name mapped to its captured text.
    ///
    /// Groups that did not take part in the match map to an empty string. Without a
    /// current match the result is empty.
    pub fn named_groups(&self) -> Variables {
        let Some(captures) = &self.captures else {
            return Variables::new();
        };

        self.pattern
            .groups()
            .iter()
            .map(|(name, idx)| {
                let value = captures.get(*idx).map_or("", |m| m.as_str());
                (name.clone(), value.to_string())
            })
            .collect()
    }

    /// Captured text of each named group, in declaration order.
    pub fn ordered_groups(&self) -> Vec<Option<&'t str>> {
        match &self.captures {
            Some(captures) => self
                .pattern
                .groups()
                .iter()
                .map(|(_, idx)| captures.get(*idx).map(|m| m.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn group(&self, name: &str) -> Result<Option<&'t str>, PatternError> {
        let idx = self.index_of(name)?;
        Ok(self
            .captures
            .as_ref()
            .and_then(|c| c.get(idx))
            .map(|m| m.as_str()))
    }

    pub fn start(&self, name: &str) -> Result<Option<usize>, PatternError> {
        let idx = self.index_of(name)?;
        Ok(self
            .captures
            .as_ref()
            .and_then(|c| c.get(idx))
            .map(|m| m.start()))
    }

    pub fn end(&self, name: &str) -> Result<Option<usize>, PatternError> {
        let idx = self.index_of(name)?;
        Ok(self
            .captures
            .as_ref()
            .and_then(|c| c.get(idx))
            .map(|m| m.end()))
    }

    fn index_of(&self, name: &str) -> Result<usize, PatternError> {
        self.pattern
            .group_index(name)
            .ok_or_else(|| PatternError::UnknownGroup(name.to_string()))
    }
}
