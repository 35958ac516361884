//! Shell glob-like filename matching, compiled to a regular expression.
//!
//! Supported pattern features:
//! - any character except `?`, `*`, `[`, or `\` is matched literally
//! - `?` matches any single character except a slash (`/`)
//! - `*` matches any sequence of zero or more characters without a slash
//! - a backslash makes the next character literal
//! - a `[...]` character class supports ranges, negation if the very first
//!   character is `!`, backslash-escaping, and matching a `]` character if
//!   it is the very first character possibly after the `!` one
//!
//! Since patterns are only ever applied to basenames, the slash exclusion in
//! `*` and `?` is belt-and-braces rather than load-bearing. The produced
//! regex is anchored at both ends; case folding is applied later, when the
//! regex is compiled.

use std::fmt;

/// Error type for glob pattern translation
#[derive(Debug, PartialEq, Eq)]
pub enum GlobError {
    /// Bare escape at the end of the pattern
    BareEscape,
    /// An unclosed character class
    UnclosedClass,
    /// A range where the start character is after the end one
    ReversedRange(char, char),
}

impl fmt::Display for GlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BareEscape => write!(f, "Bare escape at the end of the pattern"),
            Self::UnclosedClass => write!(f, "Unclosed character class"),
            Self::ReversedRange(start, end) => {
                write!(f, "Reversed range: {start} > {end}")
            }
        }
    }
}

impl std::error::Error for GlobError {}

/// Append `chr` matched literally, escaping regex metacharacters.
fn push_literal(out: &mut String, chr: char) {
    if "\\.+*?()|[]{}^$".contains(chr) {
        out.push('\\');
    }
    out.push(chr);
}

/// Append `chr` as a character-class member, escaping what a class treats
/// specially.
fn push_class_char(out: &mut String, chr: char) {
    if "\\]^-".contains(chr) {
        out.push('\\');
    }
    out.push(chr);
}

/// Translate one `[...]` class, the leading `[` already consumed.
fn class_to_regex<I>(chars: &mut I) -> Result<String, GlobError>
where
    I: Iterator<Item = char>,
{
    let mut body = String::new();
    let mut negated = false;
    // Candidate start of a range, already appended to `body`.
    let mut prev: Option<char> = None;
    let mut empty = true;

    loop {
        let Some(chr) = chars.next() else {
            return Err(GlobError::UnclosedClass);
        };

        if empty && !negated && chr == '!' {
            negated = true;
            continue;
        }

        if chr == ']' && !empty {
            break;
        }

        if chr == '-' && let Some(start) = prev.take() {
            match chars.next() {
                None => return Err(GlobError::UnclosedClass),
                Some(']') => {
                    // A trailing dash is a literal: `[a-]` matches `a` and `-`.
                    push_class_char(&mut body, '-');
                    break;
                }
                Some(end_raw) => {
                    let end = if end_raw == '\\' {
                        chars.next().ok_or(GlobError::UnclosedClass)?
                    } else {
                        end_raw
                    };
                    if start > end {
                        return Err(GlobError::ReversedRange(start, end));
                    }
                    body.push('-');
                    push_class_char(&mut body, end);
                    continue;
                }
            }
        }

        let literal = if chr == '\\' {
            chars.next().ok_or(GlobError::UnclosedClass)?
        } else {
            chr
        };
        push_class_char(&mut body, literal);
        prev = Some(literal);
        empty = false;
    }

    let caret = if negated { "^" } else { "" };
    Ok(format!("[{caret}{body}]"))
}

/// Translate a shell glob-like pattern into an anchored regex pattern.
///
/// See the module-level documentation for the features supported.
///
/// # Errors
/// [`GlobError`] on syntax errors in the pattern.
pub fn glob_to_regex(pattern: &str) -> Result<String, GlobError> {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');

    let mut chars = pattern.chars();
    while let Some(chr) = chars.next() {
        match chr {
            '?' => out.push_str("[^/]"),
            '*' => out.push_str("[^/]*"),
            '[' => out.push_str(&class_to_regex(&mut chars)?),
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut out, escaped),
                None => return Err(GlobError::BareEscape),
            },
            other => push_literal(&mut out, other),
        }
    }

    out.push('$');
    Ok(out)
}
