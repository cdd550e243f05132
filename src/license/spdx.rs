use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Identifiers known without loading an external list.
const BUILTIN_IDS: &[&str] = &[
    "0BSD",
    "AFL-3.0",
    "AGPL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "APSL-2.0",
    "Apache-1.0",
    "Apache-1.1",
    "Apache-2.0",
    "Artistic-1.0",
    "Artistic-2.0",
    "BlueOak-1.0.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-4-Clause",
    "BSL-1.0",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "CPL-1.0",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.1",
    "EUPL-1.2",
    "GPL-1.0",
    "GPL-2.0",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "ISC",
    "LGPL-2.0",
    "LGPL-2.0-only",
    "LGPL-2.0-or-later",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MIT",
    "MIT-0",
    "MPL-1.1",
    "MPL-2.0",
    "MS-PL",
    "MS-RL",
    "NCSA",
    "OpenSSL",
    "OSL-3.0",
    "PHP-3.01",
    "PostgreSQL",
    "PSF-2.0",
    "Python-2.0",
    "Ruby",
    "Unlicense",
    "UPL-1.0",
    "W3C",
    "WTFPL",
    "X11",
    "Zlib",
    "ZPL-2.1",
];

/// Result of looking an identifier up in an [`SpdxTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum SpdxMatch<'a> {
    Exact,
    /// Known, but spelled with different case; carries the canonical spelling.
    WrongCase(&'a str),
    Unknown,
}

/// Set of known SPDX license identifiers.
#[derive(Debug, Clone)]
pub struct SpdxTable {
    ids: HashSet<String>,
    by_lowercase: HashMap<String, String>,
}

/// Subset of the SPDX `licenses.json` document.
#[derive(Debug, Deserialize)]
struct SpdxLicenseList {
    licenses: Vec<SpdxLicense>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxLicense {
    license_id: String,
}

impl SpdxTable {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: HashSet<String> = ids.into_iter().map(Into::into).collect();
        let by_lowercase = ids.iter().map(|id| (id.to_lowercase(), id.clone())).collect();
        Self { ids, by_lowercase }
    }

    /// Load identifiers from either the SPDX `licenses.json` format or a
    /// plain text file with one identifier per line (`#` starts a comment).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading SPDX license list {}", path.display()))?;

        if content.trim_start().starts_with('{') {
            let list: SpdxLicenseList = serde_json::from_str(&content)
                .with_context(|| format!("parsing SPDX license list {}", path.display()))?;
            return Ok(Self::from_ids(list.licenses.into_iter().map(|l| l.license_id)));
        }

        Ok(Self::from_ids(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        ))
    }

    pub fn lookup(&self, id: &str) -> SpdxMatch<'_> {
        let id = id.trim();
        if self.ids.contains(id) {
            return SpdxMatch::Exact;
        }
        match self.by_lowercase.get(&id.to_lowercase()) {
            Some(canonical) => SpdxMatch::WrongCase(canonical),
            None => SpdxMatch::Unknown,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl Default for SpdxTable {
    fn default() -> Self {
        Self::from_ids(BUILTIN_IDS.iter().copied())
    }
}
