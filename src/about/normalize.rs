use crate::about::schema::AboutFields;
use crate::models::{Code, Findings, Message};

/// A field as read from cleaned text, before names are normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub name: String,
    pub raw_value: String,
    /// 0-based line of the cleaned text where the field starts.
    pub source_line: usize,
}

/// Split pre-processed text into field entries.
///
/// Expects the output of [`pre_process`](crate::about::preprocess::pre_process):
/// every line is either `key: value` or an indented continuation. Continuation
/// lines are appended to the current value after a newline, leading
/// whitespace included.
pub fn parse_fields(cleaned: &str) -> Vec<FieldEntry> {
    let mut entries: Vec<FieldEntry> = Vec::new();

    for (source_line, line) in cleaned.lines().enumerate() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(current) = entries.last_mut() {
                current.raw_value.push('\n');
                current.raw_value.push_str(line.trim_end());
            }
            continue;
        }

        if let Some((name, value)) = line.split_once(':') {
            entries.push(FieldEntry {
                name: name.trim_end().to_string(),
                raw_value: value.trim().to_string(),
                source_line,
            });
        }
    }

    entries
}

/// Lower-case names and fold duplicates into the canonical field map.
///
/// The first occurrence of a name wins; each later one is reported as an
/// IGNORED warning carrying that later value.
pub fn normalize(entries: Vec<FieldEntry>) -> (AboutFields, Findings) {
    let mut fields = AboutFields::new();
    let mut findings = Findings::new();

    for entry in entries {
        let name = entry.name.to_lowercase();
        if !fields.insert_first(name.clone(), entry.raw_value.clone()) {
            findings.warn(Message::new(
                Code::Ignored,
                name,
                entry.raw_value,
                "Duplicated field name. Only the first occurrence is kept.",
            ));
        }
    }

    (fields, findings)
}
