use std::collections::BTreeMap;

use serde::Serialize;

/// Fields every metadata file must carry with a non-empty value.
pub const MANDATORY_FIELDS: &[&str] = &["name", "version"];

/// Every other field the format defines, in report column order.
pub const OPTIONAL_FIELDS: &[&str] = &[
    "about_resource",
    "spec_version",
    "date",
    "description",
    "description_file",
    "home_url",
    "download_url",
    "readme",
    "readme_file",
    "install",
    "install_file",
    "changelog",
    "changelog_file",
    "news",
    "news_file",
    "news_url",
    "notes",
    "notes_file",
    "contact",
    "owner",
    "author",
    "author_file",
    "copyright",
    "copyright_file",
    "notice",
    "notice_file",
    "notice_url",
    "license_text",
    "license_text_file",
    "license_url",
    "license_spdx",
    "redistribute",
    "attribute",
    "track_changes",
    "vcs_tool",
    "vcs_repository",
    "vcs_path",
    "vcs_tag",
    "vcs_branch",
    "vcs_revision",
    "checksum_sha1",
    "checksum_md5",
    "checksum_sha256",
    "dje_component",
    "dje_license",
    "dje_organization",
    "dje_license_name",
];

/// Yes/no flag fields.
pub const FLAG_FIELDS: &[&str] = &["redistribute", "attribute", "track_changes"];

/// Field naming a notice text file; `notice_text_file` is accepted as the
/// older spelling of `notice_file`.
pub const NOTICE_TEXT_FILE_FIELDS: &[&str] = &["notice_text_file", "notice_file"];

pub const LICENSE_TEXT_FILE_FIELD: &str = "license_text_file";

pub fn is_known_field(name: &str) -> bool {
    MANDATORY_FIELDS.contains(&name) || OPTIONAL_FIELDS.contains(&name) || name == "notice_text_file"
}

pub fn is_file_field(name: &str) -> bool {
    name.ends_with("_file")
}

pub fn is_url_field(name: &str) -> bool {
    name.ends_with("_url")
}

/// Normalized field values of one metadata file.
///
/// Names are lower-case and unique. Lookups of absent fields yield an empty
/// string, so callers never need to distinguish "missing" from "empty"
/// unless they ask with [`AboutFields::contains`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AboutFields(BTreeMap<String, String>);

impl AboutFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field unless it is already present. Returns `false` for a
    /// duplicate, leaving the first value in place.
    pub fn insert_first(&mut self, name: String, value: String) -> bool {
        if self.0.contains_key(&name) {
            return false;
        }
        self.0.insert(name, value);
        true
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Value of the field when present and not blank.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
