//! Semantic checks over the normalized fields of one metadata file.
//!
//! Every rule returns its own [`Findings`]; [`validate`] runs all of them in
//! a fixed order and concatenates the results, so identical input always
//! yields identical error and warning lists.

pub mod url;

use std::path::Path;

use chrono::NaiveDate;

use crate::about::names::invalid_chars_in_about_file_name;
use crate::about::schema::{
    is_file_field, is_known_field, is_url_field, AboutFields, FLAG_FIELDS, MANDATORY_FIELDS,
};
use crate::license::expression::license_ids;
use crate::license::spdx::{SpdxMatch, SpdxTable};
use crate::models::{Code, Findings, Message};
use self::url::{check_url, is_well_formed, Reachability};

/// Accepted `date` formats.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

const FLAG_VALUES: &[&str] = &["yes", "y", "true", "x", "no", "n", "false"];

/// Collaborators and switches used during validation.
pub struct ValidationContext<'a> {
    pub spdx: &'a SpdxTable,
    /// Probe URLs over the network in addition to checking their form.
    pub use_network: bool,
    pub probe: &'a dyn Reachability,
}

/// Run every rule over `fields` of the metadata file at `about_path`.
///
/// Referenced files are resolved relative to the directory of `about_path`.
pub fn validate(fields: &AboutFields, about_path: &Path, ctx: &ValidationContext<'_>) -> Findings {
    let base_dir = about_path.parent().unwrap_or_else(|| Path::new(""));

    let mut findings = Findings::new();
    findings.extend(check_mandatory(fields));
    findings.extend(check_about_resource(fields, about_path, base_dir));
    findings.extend(check_file_fields(fields, base_dir));
    findings.extend(check_ascii(fields));
    findings.extend(check_spdx(fields, ctx.spdx));
    findings.extend(check_date(fields));
    findings.extend(check_urls(fields, ctx.use_network, ctx.probe));
    findings.extend(check_flags(fields));
    findings.extend(check_unknown_fields(fields));
    findings
}

pub fn check_mandatory(fields: &AboutFields) -> Findings {
    let mut findings = Findings::new();
    for name in MANDATORY_FIELDS {
        if fields.non_empty(name).is_none() {
            findings.error(Message::new(
                Code::Value,
                *name,
                fields.get(name),
                "Mandatory field is missing or empty.",
            ));
        }
    }
    findings
}

/// The described resource must exist next to the metadata file. The field
/// itself is optional.
pub fn check_about_resource(fields: &AboutFields, about_path: &Path, base_dir: &Path) -> Findings {
    let mut findings = Findings::new();

    let file_name = about_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let invalid = invalid_chars_in_about_file_name(&file_name);
    if !invalid.is_empty() {
        let listed: String = invalid.iter().collect();
        findings.warn(Message::new(
            Code::File,
            "",
            file_name,
            format!("Metadata file name contains non-portable characters: '{listed}'."),
        ));
    }

    if let Some(resource) = fields.non_empty("about_resource") {
        let resource = resource.trim();
        if !base_dir.join(resource).exists() {
            findings.error(Message::new(
                Code::File,
                "about_resource",
                resource,
                "File referenced by about_resource does not exist.",
            ));
        }
    }

    findings
}

pub fn check_file_fields(fields: &AboutFields, base_dir: &Path) -> Findings {
    let mut findings = Findings::new();
    for (name, value) in fields.iter() {
        if !is_file_field(name) || value.trim().is_empty() {
            continue;
        }
        if !base_dir.join(value.trim()).exists() {
            findings.warn(Message::new(
                Code::Value,
                name,
                value,
                "Referenced file does not exist.",
            ));
        }
    }
    findings
}

/// Flags the first field whose name or value is not plain ASCII.
pub fn check_ascii(fields: &AboutFields) -> Findings {
    let mut findings = Findings::new();
    if let Some((name, value)) = fields
        .iter()
        .find(|(name, value)| !name.is_ascii() || !value.is_ascii())
    {
        findings.error(Message::new(
            Code::Ascii,
            name,
            value,
            "Field name or value contains non-ASCII characters.",
        ));
    }
    findings
}

pub fn check_spdx(fields: &AboutFields, table: &SpdxTable) -> Findings {
    let mut findings = Findings::new();
    let Some(expr) = fields.non_empty("license_spdx") else {
        return findings;
    };

    for id in license_ids(expr) {
        match table.lookup(id) {
            SpdxMatch::Exact => {}
            SpdxMatch::WrongCase(canonical) => findings.warn(Message::new(
                Code::Spdx,
                "license_spdx",
                id,
                format!("SPDX license identifier should be spelled '{canonical}'."),
            )),
            SpdxMatch::Unknown => findings.error(Message::new(
                Code::Spdx,
                "license_spdx",
                id,
                "Unknown SPDX license identifier.",
            )),
        }
    }
    findings
}

pub fn check_date(fields: &AboutFields) -> Findings {
    let mut findings = Findings::new();
    let Some(date) = fields.non_empty("date") else {
        return findings;
    };

    let date = date.trim();
    if !DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(date, format).is_ok())
    {
        findings.warn(Message::new(
            Code::Date,
            "date",
            date,
            "Unsupported date format, use YYYY-MM-DD.",
        ));
    }
    findings
}

pub fn check_urls(fields: &AboutFields, use_network: bool, probe: &dyn Reachability) -> Findings {
    let mut findings = Findings::new();
    for (name, value) in fields.iter() {
        if !is_url_field(name) || value.trim().is_empty() {
            continue;
        }
        if check_url(value, use_network, probe) {
            continue;
        }
        let message = if is_well_formed(value) {
            Message::new(Code::Network, name, value, "URL is not reachable.")
        } else {
            Message::new(
                Code::Url,
                name,
                value,
                "URL must start with http:// or https:// followed by a host.",
            )
        };
        findings.warn(message);
    }
    findings
}

pub fn check_flags(fields: &AboutFields) -> Findings {
    let mut findings = Findings::new();
    for name in FLAG_FIELDS {
        let Some(value) = fields.non_empty(name) else {
            continue;
        };
        let normalized = value.trim().to_lowercase();
        if !FLAG_VALUES.contains(&normalized.as_str()) {
            findings.warn(Message::new(
                Code::Value,
                *name,
                value,
                "Flag value must be yes or no.",
            ));
        }
    }
    findings
}

/// Fields outside the schema are kept but reported.
pub fn check_unknown_fields(fields: &AboutFields) -> Findings {
    let mut findings = Findings::new();
    for (name, value) in fields.iter() {
        if !is_known_field(name) {
            findings.warn(Message::new(Code::Unknown, name, value, "Unknown field."));
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    use super::url::Offline;

    fn fields(pairs: &[(&str, &str)]) -> AboutFields {
        let mut fields = AboutFields::new();
        for (k, v) in pairs {
            fields.insert_first(k.to_string(), v.to_string());
        }
        fields
    }

    fn codes(messages: &[Message]) -> Vec<(Code, &str)> {
        messages
            .iter()
            .map(|m| (m.code, m.field_name.as_str()))
            .collect()
    }

    #[test]
    fn test_missing_mandatory_fields_in_order() {
        let findings = check_mandatory(&fields(&[("home_url", "http://x.org")]));
        assert_eq!(
            codes(&findings.errors),
            vec![(Code::Value, "name"), (Code::Value, "version")]
        );

        let findings = check_mandatory(&fields(&[("name", ""), ("version", "  ")]));
        assert_eq!(findings.errors.len(), 2);
    }

    #[test]
    fn test_about_resource() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("about_resource.c"), "").unwrap();
        let about = dir.path().join("about_resource.c.ABOUT");

        let present = fields(&[("about_resource", "about_resource.c")]);
        assert!(check_about_resource(&present, &about, dir.path()).is_empty());

        let missing = fields(&[("about_resource", "nowhere.c")]);
        let findings = check_about_resource(&missing, &about, dir.path());
        assert_eq!(codes(&findings.errors), vec![(Code::File, "about_resource")]);

        assert!(check_about_resource(&fields(&[]), &about, dir.path()).is_empty());
    }

    #[test]
    fn test_about_file_name_with_odd_characters_warns() {
        let dir = TempDir::new().unwrap();
        let about = dir.path().join("my component.ABOUT");
        let findings = check_about_resource(&fields(&[]), &about, dir.path());
        assert!(findings.errors.is_empty());
        assert_eq!(codes(&findings.warnings), vec![(Code::File, "")]);
    }

    #[test]
    fn test_optional_file_field_missing_is_a_warning() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("httpd.LICENSE"), "text").unwrap();
        let findings = check_file_fields(
            &fields(&[
                ("license_text_file", "httpd.LICENSE"),
                ("notice_file", "httpd.NOTICE"),
            ]),
            dir.path(),
        );
        assert!(findings.errors.is_empty());
        assert_eq!(codes(&findings.warnings), vec![(Code::Value, "notice_file")]);
    }

    #[test]
    fn test_ascii_reports_once() {
        assert!(check_ascii(&fields(&[("name", "abc"), ("notes", "!!! 123")])).is_empty());
        let findings = check_ascii(&fields(&[("name", "測試"), ("notes", "über")]));
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.errors[0].code, Code::Ascii);
    }

    #[test]
    fn test_spdx() {
        let table = SpdxTable::default();
        assert!(check_spdx(&fields(&[("license_spdx", "Apache-2.0 or MIT")]), &table).is_empty());

        let findings = check_spdx(&fields(&[("license_spdx", "Something and SomeOtherThings")]), &table);
        assert_eq!(findings.errors.len(), 2);
        assert!(findings.errors.iter().all(|m| m.code == Code::Spdx));

        let findings = check_spdx(&fields(&[("license_spdx", "apache-2.0")]), &table);
        assert!(findings.errors.is_empty());
        assert_eq!(codes(&findings.warnings), vec![(Code::Spdx, "license_spdx")]);
    }

    #[test]
    fn test_date() {
        assert!(check_date(&fields(&[("date", "2012-08-21")])).is_empty());
        assert!(check_date(&fields(&[])).is_empty());
        let findings = check_date(&fields(&[("date", "08/21/2012")]));
        assert_eq!(codes(&findings.warnings), vec![(Code::Date, "date")]);
    }

    #[test]
    fn test_urls_without_network() {
        let findings = check_urls(
            &fields(&[
                ("home_url", "http://httpd.apache.org"),
                ("download_url", "archive.apache.org/httpd.tar.gz"),
                ("notice_url", ""),
            ]),
            false,
            &Offline,
        );
        assert!(findings.errors.is_empty());
        assert_eq!(codes(&findings.warnings), vec![(Code::Url, "download_url")]);
    }

    struct NothingReachable;

    impl Reachability for NothingReachable {
        fn network_available(&self) -> bool {
            true
        }

        fn is_reachable(&self, _url: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_unreachable_url_is_a_network_warning() {
        let findings = check_urls(
            &fields(&[
                ("home_url", "http://httpd.apache.org"),
                ("download_url", "archive.apache.org/httpd.tar.gz"),
            ]),
            true,
            &NothingReachable,
        );
        assert!(findings.errors.is_empty());
        assert_eq!(
            codes(&findings.warnings),
            vec![(Code::Url, "download_url"), (Code::Network, "home_url")]
        );
    }

    #[test]
    fn test_flags_and_unknown_fields() {
        let f = fields(&[("redistribute", "Yes"), ("attribute", "maybe"), ("my_field", "x")]);
        assert_eq!(codes(&check_flags(&f).warnings), vec![(Code::Value, "attribute")]);
        assert_eq!(
            codes(&check_unknown_fields(&f).warnings),
            vec![(Code::Unknown, "my_field")]
        );
    }

    #[test]
    fn test_validate_runs_every_rule_in_order() {
        let dir = TempDir::new().unwrap();
        let about = dir.path().join("component.ABOUT");
        let f = fields(&[
            ("about_resource", "missing.c"),
            ("license_spdx", "Nope"),
            ("date", "yesterday"),
        ]);
        let table = SpdxTable::default();
        let ctx = ValidationContext { spdx: &table, use_network: false, probe: &Offline };

        let findings = validate(&f, &about, &ctx);
        assert_eq!(
            codes(&findings.errors),
            vec![
                (Code::Value, "name"),
                (Code::Value, "version"),
                (Code::File, "about_resource"),
                (Code::Spdx, "license_spdx"),
            ]
        );
        assert_eq!(codes(&findings.warnings), vec![(Code::Date, "date")]);
    }
}
