use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::spdx::SpdxTable;

/// Root configuration structure, deserialized from `.about-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How metadata files are validated.
#[derive(Debug, Deserialize)]
pub struct ValidationConfig {
    /// Probe URL fields over the network. Defaults to `false`.
    #[serde(default)]
    pub check_urls: bool,
    /// Timeout for each network probe, in seconds.
    #[serde(default = "default_network_timeout")]
    pub network_timeout_secs: u64,
    /// SPDX license list to use instead of the built-in one: the SPDX
    /// `licenses.json` document or a text file with one identifier per line.
    /// Relative paths resolve against the config file's directory.
    pub spdx_list: Option<PathBuf>,
}

fn default_network_timeout() -> u64 {
    10
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            check_urls: false,
            network_timeout_secs: default_network_timeout(),
            spdx_list: None,
        }
    }
}

/// Default output locations; CLI flags take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub csv: Option<PathBuf>,
}

impl Config {
    /// SPDX table named by `spdx_list`, or the built-in one.
    pub fn spdx_table(&self) -> Result<SpdxTable> {
        match &self.validation.spdx_list {
            Some(path) => SpdxTable::load(path),
            None => Ok(SpdxTable::default()),
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let mut config: Config =
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;

    if let (Some(list), Some(dir)) = (&config.validation.spdx_list, path.parent()) {
        if list.is_relative() {
            config.validation.spdx_list = Some(dir.join(list));
        }
    }
    Ok(config)
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<scan_root>/.about-checkr/config.toml` (the root itself when it is a directory,
///    its parent otherwise)
/// 3. `~/.config/about-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(scan_root: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_dir = if scan_root.is_dir() {
        scan_root
    } else {
        scan_root.parent().unwrap_or_else(|| Path::new(""))
    };
    let project_config = project_dir.join(".about-checkr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("about-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}
