use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::about::normalize::{normalize, parse_fields};
use crate::about::preprocess::pre_process;
use crate::about::schema::{AboutFields, LICENSE_TEXT_FILE_FIELD, NOTICE_TEXT_FILE_FIELDS};
use crate::models::{Code, Findings, Message};
use crate::validate::{validate, ValidationContext};

/// Validated contents of one metadata file.
///
/// Built eagerly by [`AboutRecord::from_path`]; nothing changes afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AboutRecord {
    /// Path exactly as given by the caller.
    pub file_path: PathBuf,
    pub validated_fields: AboutFields,
    pub about_resource: Option<String>,
    pub errors: Vec<Message>,
    pub warnings: Vec<Message>,
}

impl AboutRecord {
    /// Read and validate the metadata file at `path`.
    ///
    /// A file that cannot be read yields a record with a single FILE error
    /// rather than an `Err`.
    pub fn from_path(path: &Path, ctx: &ValidationContext<'_>) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_text(path, &text, ctx),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read metadata file");
                let mut findings = Findings::new();
                findings.error(Message::new(
                    Code::File,
                    "",
                    path.display().to_string(),
                    format!("Cannot read metadata file: {err}"),
                ));
                Self::assemble(path, AboutFields::new(), findings)
            }
        }
    }

    /// Build a record from already loaded `text`; referenced files are still
    /// resolved relative to `path`.
    pub fn from_text(path: &Path, text: &str, ctx: &ValidationContext<'_>) -> Self {
        let (cleaned, ignored) = pre_process(text);
        let (fields, duplicates) = normalize(parse_fields(&cleaned));

        let mut findings = Findings::new();
        for warning in ignored {
            findings.warn(warning);
        }
        findings.extend(duplicates);
        findings.extend(validate(&fields, path, ctx));

        debug!(
            path = %path.display(),
            fields = fields.len(),
            errors = findings.errors.len(),
            warnings = findings.warnings.len(),
            "validated metadata file"
        );

        Self::assemble(path, fields, findings)
    }

    fn assemble(path: &Path, fields: AboutFields, findings: Findings) -> Self {
        let about_resource = fields.non_empty("about_resource").map(|r| r.trim().to_string());
        Self {
            file_path: path.to_path_buf(),
            validated_fields: fields,
            about_resource,
            errors: findings.errors,
            warnings: findings.warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Directory the metadata file lives in; referenced files resolve from here.
    pub fn base_dir(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Location of the described resource, relative when the metadata file
    /// path is relative.
    pub fn about_resource_path(&self) -> Option<PathBuf> {
        self.about_resource
            .as_deref()
            .map(|resource| self.base_dir().join(resource))
    }

    /// Content of the file named by `license_text_file`, or an empty string.
    pub fn license_text(&self) -> String {
        self.read_referenced(&[LICENSE_TEXT_FILE_FIELD])
    }

    /// Content of the file named by `notice_text_file` (or `notice_file`),
    /// or an empty string.
    pub fn notice_text(&self) -> String {
        self.read_referenced(NOTICE_TEXT_FILE_FIELDS)
    }

    /// First referenced file among `field_names` that can be read. Bytes that
    /// are not UTF-8 are replaced, not dropped. A missing or unreadable file
    /// collapses to an empty string.
    fn read_referenced(&self, field_names: &[&str]) -> String {
        field_names
            .iter()
            .filter_map(|name| self.validated_fields.non_empty(name))
            .find_map(|file| std::fs::read(self.base_dir().join(file.trim())).ok())
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}
