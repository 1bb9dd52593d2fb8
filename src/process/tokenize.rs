//! Shell-like command line splitting

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("Unterminated {0} quote")]
    UnterminatedQuote(char),

    #[error("Trailing backslash")]
    TrailingBackslash,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    Single,
    Double,
}

/// Split `line` into arguments the way a POSIX shell would, without expanding anything.
///
/// Whitespace separates arguments; single quotes are literal; inside double quotes
/// a backslash only escapes `"`, `\`, `$` and `` ` ``; outside quotes a backslash
/// escapes any character. `''` and `""` produce an empty argument.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut state = State::Unquoted;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Unquoted => match ch {
                c if c.is_whitespace() => {
                    if in_token {
                        args.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                '\'' => {
                    state = State::Single;
                    in_token = true;
                }
                '"' => {
                    state = State::Double;
                    in_token = true;
                }
                '\\' => {
                    let escaped = chars.next().ok_or(TokenizeError::TrailingBackslash)?;
                    current.push(escaped);
                    in_token = true;
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
            State::Single => match ch {
                '\'' => state = State::Unquoted,
                c => current.push(c),
            },
            State::Double => match ch {
                '"' => state = State::Unquoted,
                '\\' => match chars.peek() {
                    Some(&next) if matches!(next, '"' | '\\' | '$' | '`') => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                },
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single => return Err(TokenizeError::UnterminatedQuote('\'')),
        State::Double => return Err(TokenizeError::UnterminatedQuote('"')),
        State::Unquoted => {}
    }

    if in_token {
        args.push(current);
    }

    Ok(args)
}
