use super::{NamedMatcher, PatternFlags};
use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A compiled pattern plus the declaration-ordered list of its named groups.
#[derive(Clone)]
pub struct NamedPattern {
    raw: String,
    flags: PatternFlags,
    regex: Regex,
    groups: Vec<(String, usize)>,
}

impl NamedPattern {
    /// Compile `raw`, rejecting malformed or duplicated group names.
    pub fn compile(raw: &str, flags: PatternFlags) -> Result<Self, PatternError> {
        let (rewritten, groups, group_count) = rewrite_named_groups(raw, flags.comments)?;

        let regex = RegexBuilder::new(&rewritten)
            .case_insensitive(flags.ignore_case)
            .ignore_whitespace(flags.comments)
            .multi_line(flags.multiline)
            .dot_matches_new_line(flags.dotall)
            .build()
            .map_err(|e| PatternError::syntax(raw, e.to_string()))?;

        if regex.captures_len() != group_count + 1 {
            return Err(PatternError::syntax(
                raw,
                "capture groups could not be numbered reliably",
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
            flags,
            regex,
            groups,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Declared group names, in order of first occurrence.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Numbered group backing `name`.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, idx)| *idx)
    }

    pub(crate) fn groups(&self) -> &[(String, usize)] {
        &self.groups
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn matcher<'p, 't>(&'p self, text: &'t str) -> NamedMatcher<'p, 't> {
        NamedMatcher::new(self, text)
    }
}

impl PartialEq for NamedPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.flags == other.flags
    }
}

impl Eq for NamedPattern {}

impl fmt::Debug for NamedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedPattern")
            .field("raw", &self.raw)
            .field("flags", &self.flags)
            .field("groups", &self.groups)
            .finish()
    }
}

impl fmt::Display for NamedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Strip names from `(?<name>` / `(?P<name>` groups and number every capturing group.
///
/// Free-spacing mode starts from `comments` and follows inline `(?x)` / `(?-x)` flags,
/// scoped to the group they appear in.
fn rewrite_named_groups(
    raw: &str,
    comments: bool,
) -> Result<(String, Vec<(String, usize)>, usize), PatternError> {
    let mut out = String::with_capacity(raw.len());
    let mut groups: Vec<(String, usize)> = Vec::new();
    let mut group_count = 0usize;
    let mut class_depth = 0usize;
    let mut comments = comments;
    // Free-spacing state to restore when each open group closes.
    let mut scopes: Vec<bool> = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                out.push(ch);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                class_depth += 1;
                out.push(ch);
                copy_class_prefix(&mut chars, &mut out);
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(ch);
            }
            _ if class_depth > 0 => out.push(ch),
            '#' if comments => {
                out.push(ch);
                for c in chars.by_ref() {
                    out.push(c);
                    if c == '\n' {
                        break;
                    }
                }
            }
            ')' => {
                if let Some(outer) = scopes.pop() {
                    comments = outer;
                }
                out.push(ch);
            }
            '(' => {
                scopes.push(comments);
                if chars.peek() != Some(&'?') {
                    group_count += 1;
                    out.push(ch);
                    continue;
                }

                if let Some((free_spacing, closed)) = inline_flags(&chars) {
                    out.push(ch);
                    for c in chars.by_ref() {
                        out.push(c);
                        if c == ')' || c == ':' {
                            break;
                        }
                    }
                    if let Some(enabled) = free_spacing {
                        comments = enabled;
                    }
                    // `(?x)` applies to the rest of the enclosing group.
                    if closed {
                        scopes.pop();
                    }
                    continue;
                }

                let lookahead: String = chars.clone().take(3).collect();
                let name_follows = lookahead.starts_with("?P<")
                    || (lookahead.starts_with("?<")
                        && !lookahead.starts_with("?<=")
                        && !lookahead.starts_with("?<!"));

                if !name_follows {
                    out.push(ch);
                    continue;
                }

                let skip = if lookahead.starts_with("?P<") { 3 } else { 2 };
                for _ in 0..skip {
                    chars.next();
                }

                let name = read_group_name(&mut chars, raw)?;
                if groups.iter().any(|(existing, _)| *existing == name) {
                    return Err(PatternError::syntax(
                        raw,
                        format!("duplicate group name '{}'", name),
                    ));
                }

                group_count += 1;
                groups.push((name, group_count));
                out.push('(');
            }
            _ => out.push(ch),
        }
    }

    Ok((out, groups, group_count))
}

/// Recognise `?flags)` or `?flags:` right after an opening paren.
///
/// Returns the free-spacing setting the flags request (if any) and whether the group
/// closes immediately.
fn inline_flags(chars: &Peekable<Chars<'_>>) -> Option<(Option<bool>, bool)> {
    let mut ahead = chars.clone();
    ahead.next().filter(|c| *c == '?')?;

    let mut negated = false;
    let mut free_spacing = None;
    loop {
        match ahead.next()? {
            ')' => return Some((free_spacing, true)),
            ':' => return Some((free_spacing, false)),
            '-' => negated = true,
            'x' => free_spacing = Some(!negated),
            c if c.is_ascii_alphabetic() => {}
            _ => return None,
        }
    }
}

/// A `]` right after `[` or `[^` is a literal member, not the end of the class.
fn copy_class_prefix(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    if chars.peek() == Some(&'^') {
        out.push('^');
        chars.next();
    }
    if chars.peek() == Some(&']') {
        out.push(']');
        chars.next();
    }
}

fn read_group_name(chars: &mut Peekable<Chars<'_>>, raw: &str) -> Result<String, PatternError> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('>') => break,
            Some(c) => name.push(c),
            None => {
                return Err(PatternError::syntax(
                    raw,
                    format!("unterminated group name '{}'", name),
                ))
            }
        }
    }

    if !is_valid_group_name(&name) {
        return Err(PatternError::syntax(
            raw,
            format!(
                "invalid group name '{}': names must match [A-Za-z][A-Za-z0-9]*",
                name
            ),
        ));
    }

    Ok(name)
}

fn is_valid_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}
