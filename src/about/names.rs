use crate::models::{Code, Message};

/// Extension of metadata files, matched case-insensitively.
pub const ABOUT_EXTENSION: &str = ".about";

fn is_field_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_file_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Return every character of `name` that is not allowed in a field name, in
/// order of appearance and with duplicates kept.
///
/// When anything is invalid an IGNORED warning carrying the whole `line` is
/// returned alongside, since such a line cannot be kept.
pub fn check_invalid_chars_in_field_name(name: &str, line: &str) -> (Vec<char>, Option<Message>) {
    let invalid: Vec<char> = name.chars().filter(|c| !is_field_name_char(*c)).collect();
    if invalid.is_empty() {
        return (invalid, None);
    }

    let listed: String = invalid.iter().collect();
    let warning = Message::new(
        Code::Ignored,
        name,
        line,
        format!("Field name contains invalid characters: '{listed}'. Line ignored."),
    );
    (invalid, Some(warning))
}

/// Return the characters of a file's base name that are not portable.
///
/// Only the text after the last `/` is checked, so a path ending in `/`
/// has nothing to report.
pub fn invalid_chars_in_about_file_name(name: &str) -> Vec<char> {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.chars().filter(|c| !is_file_name_char(*c)).collect()
}

/// `true` when `name` ends with the metadata extension, in any case.
pub fn is_about_file(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(ABOUT_EXTENSION)
}

/// Last `/`-separated component of `path`, ignoring surrounding whitespace
/// and trailing slashes. Backslashes are not treated as separators.
pub fn resource_name(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    let tail = trimmed.rsplit('/').next().unwrap_or(trimmed);
    tail.trim().to_string()
}
