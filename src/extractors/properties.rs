//! `.properties` file parsing
//!
//! Follows the `java.util.Properties` text format: `#`/`!` comment lines,
//! `key=value`, `key:value` or `key value` pairs, backslash line continuation and
//! the `\t \n \r \f \uXXXX` escapes (UTF-16 surrogate pairs are combined). Unlike
//! `java.util.Properties` the result keeps file order.

use crate::Variables;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

/// A logical line (continuations joined) and the physical line it started on.
struct LogicalLine {
    number: usize,
    chars: Vec<char>,
}

pub fn parse_properties(content: &str) -> Result<Variables, PropertiesError> {
    let mut properties = Variables::new();

    for line in logical_lines(content) {
        let (raw_key, raw_value) = split_key_value(&line.chars);
        let key = unescape(raw_key, line.number)?;
        let value = unescape(raw_value, line.number)?;
        properties.insert(key, value);
    }

    Ok(properties)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn physical_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest);
                rest = "";
            }
        }
    }
    lines
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(chars: &[char]) -> bool {
    chars.iter().rev().take_while(|c| **c == '\\').count() % 2 == 1
}

fn logical_lines(content: &str) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut current: Option<LogicalLine> = None;

    for (idx, physical) in physical_lines(content).into_iter().enumerate() {
        let mut chars: Vec<char> = physical.chars().skip_while(|c| is_blank(*c)).collect();

        match current.as_mut() {
            Some(open) => {
                let more = continues(&chars);
                if more {
                    chars.pop();
                }
                open.chars.extend(chars);
                if !more {
                    result.extend(current.take());
                }
            }
            None => {
                if chars.is_empty() || chars[0] == '#' || chars[0] == '!' {
                    continue;
                }
                let more = continues(&chars);
                if more {
                    chars.pop();
                }
                let line = LogicalLine {
                    number: idx + 1,
                    chars,
                };
                if more {
                    current = Some(line);
                } else {
                    result.push(line);
                }
            }
        }
    }

    // A continuation on the last line simply ends the entry.
    result.extend(current);
    result
}

fn split_key_value(chars: &[char]) -> (&[char], &[char]) {
    let mut key_end = chars.len();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => i += 1,
        }
    }
    let key_end = key_end.min(chars.len());

    let mut value_start = key_end;
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
        while value_start < chars.len() && is_blank(chars[value_start]) {
            value_start += 1;
        }
    }

    (&chars[..key_end], &chars[value_start..])
}

fn unescape(chars: &[char], line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match iter.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_utf16_unit(&mut iter, line)?;
                let units = if (0xD800..0xDC00).contains(&unit) {
                    let low = match (iter.next(), iter.next()) {
                        (Some('\\'), Some('u')) => read_utf16_unit(&mut iter, line)?,
                        _ => return Err(unpaired_surrogate(unit, line)),
                    };
                    vec![unit, low]
                } else {
                    vec![unit]
                };
                for decoded in char::decode_utf16(units) {
                    let c = decoded.map_err(|e| unpaired_surrogate(e.unpaired_surrogate(), line))?;
                    out.push(c);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_utf16_unit(
    iter: &mut impl Iterator<Item = char>,
    line: usize,
) -> Result<u16, PropertiesError> {
    let hex: String = iter.take(4).collect();
    (hex.len() == 4)
        .then(|| u16::from_str_radix(&hex, 16).ok())
        .flatten()
        .ok_or_else(|| PropertiesError {
            line,
            message: format!("Malformed \\uxxxx encoding: \\u{}", hex),
        })
}

fn unpaired_surrogate(unit: u16, line: usize) -> PropertiesError {
    PropertiesError {
        line,
        message: format!("Unpaired surrogate in \\uxxxx encoding: \\u{:04X}", unit),
    }
}
