// ── Serial number parsing ──
//
// Turns free-form slash-command text into exactly one validated serial.
// Chat clients wrap pasted values in emphasis, code spans, or strike-
// through, so markup is removed before tokenizing.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Inline markup characters removed wherever they appear.
const MARKUP_CHARS: [char; 4] = ['*', '_', '`', '~'];

/// Wrapper pairs collapsed after character stripping, longest first.
const WRAPPER_PAIRS: [&str; 4] = ["**", "*", "_", "`"];

const SERIAL_LEN: usize = 8;
const SERIAL_PREFIX: &str = "92";

/// A controller serial: eight ASCII digits starting with `92`.
///
/// Only constructed through [`normalize`] or [`FromStr`], so holding one
/// means the format check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber(String);

impl SerialNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(token: &str) -> bool {
        token.len() == SERIAL_LEN
            && token.starts_with(SERIAL_PREFIX)
            && token.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SerialNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SerialNumber {
    type Err = ValidationError;

    /// Strict parse of a single bare token. No markup stripping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(ValidationError::InvalidFormat)
        }
    }
}

/// Extract exactly one serial from raw command text.
///
/// Empty input is checked before markup is removed, so text made only of
/// markup (e.g. `**`) reports `InvalidFormat`, not `EmptyInput`.
pub fn normalize(raw: &str) -> Result<SerialNumber, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let cleaned = strip_markup(trimmed);
    let mut tokens = cleaned.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    if tokens.next().is_some() {
        return Err(ValidationError::MultipleValues);
    }

    first.parse()
}

fn strip_markup(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect();
    WRAPPER_PAIRS
        .iter()
        .fold(stripped, |acc, delim| unwrap_pairs(&acc, delim))
}

/// Replace each `{delim}inner{delim}` with `inner`, pairing left to right.
fn unwrap_pairs(text: &str, delim: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(delim) {
        let after = &rest[open + delim.len()..];
        let Some(close) = after.find(delim) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&after[..close]);
        rest = &after[close + delim.len()..];
    }
    out.push_str(rest);
    out
}
