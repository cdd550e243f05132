use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::about::names::is_about_file;
use crate::about::record::AboutRecord;
use crate::models::{CollectedMessage, Message};
use crate::validate::ValidationContext;

/// Find metadata files under `root`.
///
/// A metadata file is returned as is. A directory is walked recursively and
/// every metadata file in it is returned sorted by path component (`Path`
/// ordering), so `a/b.ABOUT` sorts before `a-b.ABOUT` even though `-` is a
/// smaller byte than `/`. The order is stable across runs. Paths keep the
/// caller's `root` prefix, so relative input gives relative output. Any
/// other file yields nothing. A missing or unreadable root is an error.
pub fn collect_about_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("cannot access {}", root.display()))?;

    if metadata.is_file() {
        let name = root.to_string_lossy();
        return Ok(if is_about_file(&name) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    if !metadata.is_dir() {
        bail!("{} is neither a file nor a directory", root.display());
    }
    std::fs::read_dir(root).with_context(|| format!("cannot read directory {}", root.display()))?;

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_about_file(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    debug!(root = %root.display(), count = paths.len(), "collected metadata files");
    Ok(paths)
}

/// All metadata files found under one root, validated.
#[derive(Debug, Serialize)]
pub struct AboutCollector {
    pub root: PathBuf,
    pub records: Vec<AboutRecord>,
    pub errors: Vec<CollectedMessage>,
    pub warnings: Vec<CollectedMessage>,
}

impl AboutCollector {
    /// Discover and validate every metadata file under `root`.
    pub fn new(root: &Path, ctx: &ValidationContext<'_>) -> Result<Self> {
        let paths = collect_about_files(root)?;
        Ok(Self::from_paths(root, &paths, ctx, |_| {}))
    }

    /// Validate already discovered `paths`, calling `on_record` after each
    /// file.
    pub fn from_paths(
        root: &Path,
        paths: &[PathBuf],
        ctx: &ValidationContext<'_>,
        mut on_record: impl FnMut(&AboutRecord),
    ) -> Self {
        let records = paths
            .iter()
            .map(|path| {
                let record = AboutRecord::from_path(path, ctx);
                on_record(&record);
                record
            })
            .collect();
        Self::from_records(root, records)
    }

    /// Aggregate already built records, in the given order.
    pub fn from_records(root: &Path, records: Vec<AboutRecord>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for record in &records {
            let about_file = record.file_path.display().to_string();
            errors.extend(tag(&about_file, &record.errors));
            warnings.extend(tag(&about_file, &record.warnings));
        }

        info!(
            files = records.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "collection complete"
        );

        Self {
            root: root.to_path_buf(),
            records,
            errors,
            warnings,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn tag<'a>(about_file: &'a str, messages: &'a [Message]) -> impl Iterator<Item = CollectedMessage> + 'a {
    messages.iter().map(move |message| CollectedMessage {
        about_file: about_file.to_string(),
        message: message.clone(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    use crate::license::spdx::SpdxTable;
    use crate::models::Code;
    use crate::validate::url::Offline;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let date_dir = dir.path().join("DateTest");
        fs::create_dir_all(date_dir.join("nested")).unwrap();
        fs::write(
            date_dir.join("supported_date_format.ABOUT"),
            "name: a\nversion: 1\ndate: 2013-01-02\n",
        )
        .unwrap();
        fs::write(
            date_dir.join("non-supported_date_format.ABOUT"),
            "name: b\nversion: 1\ndate: 01/02/2013\n",
        )
        .unwrap();
        fs::write(date_dir.join("nested").join("deep.about"), "version: 2\n").unwrap();
        fs::write(date_dir.join("README.txt"), "not metadata").unwrap();
        dir
    }

    #[test]
    fn test_collect_about_files_on_dir_is_sorted_and_prefixed() {
        let dir = tree();
        let root = dir.path().join("DateTest");
        let result = collect_about_files(&root).unwrap();
        assert_eq!(
            result,
            vec![
                root.join("nested").join("deep.about"),
                root.join("non-supported_date_format.ABOUT"),
                root.join("supported_date_format.ABOUT"),
            ]
        );
    }

    #[test]
    fn test_sort_is_by_path_component() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a").join("b.ABOUT"), "").unwrap();
        fs::write(dir.path().join("a-b.ABOUT"), "").unwrap();
        fs::write(dir.path().join("a.b.ABOUT"), "").unwrap();

        let result = collect_about_files(dir.path()).unwrap();
        assert_eq!(
            result,
            vec![
                dir.path().join("a").join("b.ABOUT"),
                dir.path().join("a-b.ABOUT"),
                dir.path().join("a.b.ABOUT"),
            ]
        );
    }

    #[test]
    fn test_from_paths_keeps_the_given_order() {
        let dir = tree();
        let root = dir.path().join("DateTest");
        let mut paths = collect_about_files(&root).unwrap();
        paths.reverse();

        let table = SpdxTable::default();
        let ctx = ValidationContext { spdx: &table, use_network: false, probe: &Offline };
        let mut seen = 0;
        let collector = AboutCollector::from_paths(&root, &paths, &ctx, |_| seen += 1);
        assert_eq!(seen, 3);
        let order: Vec<&PathBuf> = collector.records.iter().map(|r| &r.file_path).collect();
        assert_eq!(order, paths.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_collect_about_files_on_file() {
        let dir = tree();
        let file = dir.path().join("DateTest").join("supported_date_format.ABOUT");
        assert_eq!(collect_about_files(&file).unwrap(), vec![file.clone()]);

        let other = dir.path().join("DateTest").join("README.txt");
        assert!(collect_about_files(&other).unwrap().is_empty());
    }

    #[test]
    fn test_collect_does_not_resolve_the_root() {
        let dir = tree();
        let root = dir.path().join("DateTest").join("nested").join("..");
        let result = collect_about_files(&root).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|p| p.starts_with(&root)));
        assert_eq!(result[0], root.join("nested").join("deep.about"));
    }

    /// A scratch tree under the package root, addressed relative to it.
    /// Tests run with the package root as working directory.
    pub(crate) fn relative_tree() -> (TempDir, PathBuf) {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let dir = tempfile::tempdir_in(manifest_dir).unwrap();
        let relative = dir.path().strip_prefix(manifest_dir).unwrap().to_path_buf();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("a.ABOUT"), "name: a\nversion: 1\n").unwrap();
        fs::write(dir.path().join("b.ABOUT"), "version: 1\n").unwrap();
        (dir, relative)
    }

    #[test]
    fn test_relative_root_gives_relative_paths() {
        let (_dir, root) = relative_tree();
        assert!(root.is_relative());

        let result = collect_about_files(&root).unwrap();
        assert_eq!(result, vec![root.join("b.ABOUT"), root.join("sub").join("a.ABOUT")]);
        assert!(result.iter().all(|p| p.is_relative() && p.starts_with(&root)));

        let table = SpdxTable::default();
        let ctx = ValidationContext { spdx: &table, use_network: false, probe: &Offline };
        let collector = AboutCollector::new(&root, &ctx).unwrap();
        assert_eq!(collector.errors.len(), 1);
        assert_eq!(collector.errors[0].about_file, root.join("b.ABOUT").display().to_string());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(collect_about_files(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_collector_aggregates_record_messages() {
        let dir = tree();
        let table = SpdxTable::default();
        let ctx = ValidationContext { spdx: &table, use_network: false, probe: &Offline };
        let collector = AboutCollector::new(&dir.path().join("DateTest"), &ctx).unwrap();

        assert_eq!(collector.records.len(), 3);
        let own_errors: usize = collector.records.iter().map(|r| r.errors.len()).sum();
        assert_eq!(collector.errors.len(), own_errors);
        assert_eq!(collector.errors.len(), 1);
        assert_eq!(collector.errors[0].message.field_name, "name");
        assert!(collector.errors[0].about_file.ends_with("deep.about"));

        assert_eq!(collector.warnings.len(), 1);
        assert_eq!(collector.warnings[0].message.code, Code::Date);
        assert!(collector.warnings[0]
            .about_file
            .ends_with("non-supported_date_format.ABOUT"));
    }
}
