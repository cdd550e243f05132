//! `about-checkr` — validate ABOUT component metadata files and report on them.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging ([`logging`]).
//! 2. Load config ([`config::load_config`]) and the SPDX table ([`license`]).
//! 3. Discover ABOUT files and validate each one ([`collector`], [`about`], [`validate`]).
//! 4. Write the requested outputs: CSV inventory, attribution document ([`report`]).
//! 5. Render the terminal or JSON report.
//! 6. Exit `0` (clean) or `1` (at least one file has errors).

mod about;
mod cli;
mod collector;
mod config;
mod license;
mod logging;
mod models;
mod report;
mod validate;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cli::{Cli, ReportFormat};
use collector::{collect_about_files, AboutCollector};
use config::load_config;
use validate::url::{HttpProbe, Offline, Reachability};
use validate::ValidationContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    // Paths stay exactly as given; outputs report them relative when they were relative.
    let path = cli.path.clone();

    let config = load_config(&path, cli.config.as_deref())?;
    let spdx = config.spdx_table()?;
    info!(identifiers = spdx.len(), "loaded SPDX table");

    let check_urls = cli.check_urls || config.validation.check_urls;
    let http_probe;
    let probe: &dyn Reachability = if check_urls {
        http_probe = HttpProbe::new(Duration::from_secs(config.validation.network_timeout_secs))?;
        if !http_probe.network_available() && !cli.quiet {
            eprintln!(
                "  {} no network connection; URLs are only checked for well-formedness",
                "!".yellow()
            );
        }
        &http_probe
    } else {
        &Offline
    };

    let ctx = ValidationContext {
        spdx: &spdx,
        use_network: check_urls,
        probe,
    };

    let paths = collect_about_files(&path)?;
    if paths.is_empty() {
        eprintln!("No ABOUT files found in {}", path.display());
        std::process::exit(1);
    }

    let pb = progress_bar(paths.len(), cli.quiet)?;
    let collector = AboutCollector::from_paths(&path, &paths, &ctx, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if let Some(csv_path) = cli.csv.as_ref().or(config.output.csv.as_ref()) {
        collector.write_to_csv(csv_path)?;
        if !cli.quiet {
            eprintln!("  {} wrote {}", "→".cyan(), csv_path.display());
        }
    }

    if let Some(template) = &cli.attribution {
        let rendered = collector.generate_attribution(template)?;
        match &cli.attribution_out {
            Some(out) => {
                std::fs::write(out, rendered)
                    .with_context(|| format!("writing {}", out.display()))?;
                if !cli.quiet {
                    eprintln!("  {} wrote {}", "→".cyan(), out.display());
                }
            }
            None => print!("{}", rendered),
        }
    }

    match cli.report {
        ReportFormat::Terminal => {
            // Attribution on stdout is the output in that case; keep it clean.
            if cli.attribution.is_none() || cli.attribution_out.is_some() {
                report::terminal::render(&collector, cli.verbose, cli.quiet)?;
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&collector)?);
        }
    }

    if collector.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn progress_bar(len: usize, quiet: bool) -> Result<Option<ProgressBar>> {
    if quiet {
        return Ok(None);
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(Some(pb))
}
