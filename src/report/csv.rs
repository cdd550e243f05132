use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::about::record::AboutRecord;
use crate::collector::AboutCollector;
use crate::models::Message;

/// Column order of the CSV inventory.
pub const CSV_COLUMNS: &[&str] = &[
    "about_file",
    "name",
    "version",
    "about_resource",
    "about_resource_path",
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
    "warnings",
    "errors",
];

fn join_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn row(record: &AboutRecord) -> Vec<String> {
    CSV_COLUMNS
        .iter()
        .map(|column| match *column {
            "about_file" => record.file_path.display().to_string(),
            "about_resource_path" => record
                .about_resource_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "warnings" => join_messages(&record.warnings),
            "errors" => join_messages(&record.errors),
            field => record.validated_fields.get(field).to_string(),
        })
        .collect()
}

/// Write the header and one row per record to `writer`.
pub fn write_csv<W: Write>(collector: &AboutCollector, writer: W) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(CSV_COLUMNS)?;
    for record in &collector.records {
        csv.write_record(row(record))?;
    }
    csv.flush()?;
    Ok(())
}

impl AboutCollector {
    /// Write the CSV inventory of all records to `output`.
    pub fn write_to_csv(&self, output: &Path) -> Result<()> {
        let file = std::fs::File::create(output)
            .with_context(|| format!("creating {}", output.display()))?;
        write_csv(self, file).with_context(|| format!("writing {}", output.display()))
    }
}
