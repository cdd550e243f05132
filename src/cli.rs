use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "about-checkr",
    about = "Validate ABOUT component metadata files and report on them",
    version
)]
pub struct Cli {
    /// ABOUT file or directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Write a CSV inventory of all ABOUT files
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Render an attribution document from this template
    #[arg(long, value_name = "TEMPLATE")]
    pub attribution: Option<PathBuf>,

    /// Where to write the attribution document [default: stdout]
    #[arg(long, value_name = "FILE", requires = "attribution")]
    pub attribution_out: Option<PathBuf>,

    /// Check that URL fields are reachable over the network
    #[arg(long)]
    pub check_urls: bool,

    /// Config file [default: <path>/.about-checkr/config.toml, fallback ~/.config/about-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Also list valid files and log debug details
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
