use std::path::Path;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::about::record::AboutRecord;
use crate::collector::AboutCollector;

/// Placeholder syntax: `{{ field_name }}`.
const PLACEHOLDER: &str = r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}";

/// Value substituted for `token` in one record.
///
/// `license_text` and `notice_text` prefer the referenced text files and
/// fall back to the inline field of the same name.
fn token_value(record: &AboutRecord, token: &str) -> String {
    let token = token.to_lowercase();
    let from_file = match token.as_str() {
        "about_file" => return record.file_path.display().to_string(),
        "license_text" => record.license_text(),
        "notice_text" => record.notice_text(),
        _ => String::new(),
    };
    if !from_file.is_empty() {
        return from_file;
    }
    record.validated_fields.get(&token).to_string()
}

/// Render `template` once per record and concatenate the results in record
/// order. Unknown placeholders render as empty strings.
pub fn render(template: &str, records: &[AboutRecord]) -> Result<String> {
    let placeholder = Regex::new(PLACEHOLDER)?;
    let mut output = String::new();
    for record in records {
        let rendered = placeholder.replace_all(template, |caps: &Captures| token_value(record, &caps[1]));
        output.push_str(&rendered);
    }
    Ok(output)
}

impl AboutCollector {
    /// Render the attribution template at `template_path` over all records.
    pub fn generate_attribution(&self, template_path: &Path) -> Result<String> {
        let template = std::fs::read_to_string(template_path)
            .with_context(|| format!("reading template {}", template_path.display()))?;
        render(&template, &self.records)
    }
}
