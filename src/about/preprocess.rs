//! Line-level cleanup of raw metadata text.
//!
//! The grammar is deliberately tolerant: anything that cannot be read as a
//! `name: value` line or as an indented continuation of one is dropped with
//! an IGNORED warning instead of failing the whole file.

use tracing::debug;

use crate::about::names::check_invalid_chars_in_field_name;
use crate::models::{Code, Message};

/// One line of raw input with its 0-based position. `text` keeps the line
/// terminator, if any, so warnings can quote the line exactly.
#[derive(Debug, Clone, Copy)]
pub struct RawLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> RawLine<'a> {
    /// The line without its `\n` or `\r\n` terminator.
    pub fn content(&self) -> &'a str {
        self.text.trim_end_matches(|c: char| c == '\n' || c == '\r')
    }
}

/// How a raw line is handled by [`pre_process`].
#[derive(Debug, PartialEq)]
pub enum LineKind<'a> {
    /// Starts a new field; `key` has the spaces before the colon removed.
    Field { key: &'a str, value: &'a str },
    /// Indented line extending the previous field.
    Continuation,
    /// Empty or whitespace-only.
    Blank,
    /// Cannot be kept; carries the warning to report.
    Garbage(Message),
}

fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

/// Decide whether an indented line can be attached to the previous field.
///
/// Returns `None` when the previous emitted line was a field or a
/// continuation, and for whitespace-only lines, which are always dropped
/// silently (including at the very end of the input).
pub fn check_line_continuation(line: &str, previous_ok: bool) -> Option<Message> {
    if previous_ok || line.trim().is_empty() {
        return None;
    }
    Some(Message::new(
        Code::Ignored,
        "",
        line,
        "Continuation line without a preceding field. Line ignored.",
    ))
}

/// Classify a single line given whether the previous kept line was a field
/// or a continuation.
pub fn classify_line(line: RawLine<'_>, previous_ok: bool) -> LineKind<'_> {
    let raw = line.text;
    let text = line.content();
    if text.trim().is_empty() {
        return LineKind::Blank;
    }

    if is_indented(text) {
        return match check_line_continuation(raw, previous_ok) {
            None => LineKind::Continuation,
            Some(warning) => LineKind::Garbage(warning),
        };
    }

    let Some((raw_key, value)) = text.split_once(':') else {
        return LineKind::Garbage(Message::new(
            Code::Ignored,
            "",
            raw,
            format!("Line {} has no field name and value. Line ignored.", line.number + 1),
        ));
    };

    let key = raw_key.trim_end();
    if key.is_empty() {
        return LineKind::Garbage(Message::new(
            Code::Ignored,
            "",
            raw,
            format!("Line {} has an empty field name. Line ignored.", line.number + 1),
        ));
    }

    match check_invalid_chars_in_field_name(key, raw) {
        (_, Some(warning)) => LineKind::Garbage(warning),
        (_, None) => LineKind::Field { key, value },
    }
}

/// Clean raw metadata text.
///
/// Returns the cleaned text, where every kept field is written as
/// `key: value` followed by its continuation lines verbatim, and one IGNORED
/// warning per dropped line in input order. A warning quotes the dropped line
/// as written, terminator included. Blank lines are dropped without
/// a warning and do not interrupt a field. Running this again on its own
/// output yields the same text and no warnings.
pub fn pre_process(raw: &str) -> (String, Vec<Message>) {
    let mut cleaned = String::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut previous_ok = false;

    for (number, text) in raw.split_inclusive('\n').enumerate() {
        let line = RawLine { number, text };
        match classify_line(line, previous_ok) {
            LineKind::Field { key, value } => {
                let value = value.trim();
                cleaned.push_str(key);
                cleaned.push(':');
                if !value.is_empty() {
                    cleaned.push(' ');
                    cleaned.push_str(value);
                }
                cleaned.push('\n');
                previous_ok = true;
            }
            LineKind::Continuation => {
                cleaned.push_str(text.trim_end());
                cleaned.push('\n');
                previous_ok = true;
            }
            LineKind::Blank => {}
            LineKind::Garbage(warning) => {
                debug!(line = number + 1, text = line.content(), "ignoring line");
                warnings.push(warning);
                previous_ok = false;
            }
        }
    }

    (cleaned, warnings)
}
