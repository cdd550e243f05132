use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::about::names::resource_name;
use crate::collector::AboutCollector;
use crate::models::{CollectedMessage, Code};

/// Render a colored terminal report.
pub fn render(collector: &AboutCollector, verbose: bool, quiet: bool) -> Result<()> {
    let total = collector.records.len();
    let valid_count = collector.records.iter().filter(|r| r.is_valid()).count();
    let invalid_count = total - valid_count;
    let error_count = collector.errors.len();
    let warning_count = collector.warnings.len();

    if quiet {
        println!(
            "Files: {}  Valid: {}  Errors: {}  Warnings: {}",
            total,
            valid_count.to_string().green(),
            error_count.to_string().red(),
            warning_count.to_string().yellow(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "about-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", collector.root.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("ABOUT files        : {:>4}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Valid           : {:>4}", "✓".green(), valid_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Invalid         : {:>4}", "✗".red(), invalid_count)
    );
    println!(
        " │  {:<48} │",
        format!(
            "   Errors {:>4}  Warnings {:>4}  {}",
            error_count,
            warning_count,
            summarize_codes(&collector.errors)
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Files with errors:\n", "[ERROR]".red().bold());
        render_table(&collector.errors, Color::Red);
        println!();
    }

    if warning_count > 0 {
        println!(" {} Warnings:\n", "[WARN]".yellow().bold());
        render_table(&collector.warnings, Color::Yellow);
        println!();
    }

    if verbose && valid_count > 0 {
        println!(" {} Valid files:\n", "[PASS]".green().bold());
        for record in collector.records.iter().filter(|r| r.is_valid()) {
            match record.about_resource.as_deref().map(resource_name) {
                Some(resource) if !resource.is_empty() => println!(
                    "   {} {} → {}",
                    "✓".green(),
                    record.file_path.display(),
                    resource
                ),
                _ => println!("   {} {}", "✓".green(), record.file_path.display()),
            }
        }
        println!();
    }

    Ok(())
}

fn render_table(messages: &[CollectedMessage], color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Code").add_attribute(Attribute::Bold),
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
            Cell::new("Message").add_attribute(Attribute::Bold),
        ]);

    for collected in messages {
        let message = &collected.message;
        table.add_row(vec![
            Cell::new(&collected.about_file),
            Cell::new(message.code.to_string()).fg(color),
            Cell::new(&message.field_name),
            Cell::new(truncate(&message.field_value, 40)),
            Cell::new(&message.message),
        ]);
    }

    println!("{}", table);
}

fn truncate(value: &str, max: usize) -> String {
    let first_line = value.lines().next().unwrap_or("");
    if first_line.chars().count() <= max && !value.contains('\n') {
        return first_line.to_string();
    }
    let mut short: String = first_line.chars().take(max).collect();
    short.push('…');
    short
}

/// Up to three most frequent codes, e.g. `[VALUE (3), SPDX (1)]`.
fn summarize_codes(messages: &[CollectedMessage]) -> String {
    let mut counts: std::collections::HashMap<Code, usize> = std::collections::HashMap::new();
    for collected in messages {
        *counts.entry(collected.message.code).or_insert(0) += 1;
    }

    let mut pairs: Vec<(Code, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_string().cmp(&b.0.to_string())));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(code, cnt)| format!("{} ({})", code, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;

    fn collected(code: Code) -> CollectedMessage {
        CollectedMessage {
            about_file: "a.ABOUT".to_string(),
            message: Message::new(code, "name", "", "x"),
        }
    }

    #[test]
    fn test_summarize_codes() {
        let messages = vec![
            collected(Code::Spdx),
            collected(Code::Value),
            collected(Code::Value),
        ];
        assert_eq!(summarize_codes(&messages), "[VALUE (2), SPDX (1)]");
        assert_eq!(summarize_codes(&[]), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("first\nsecond", 10), "first…");
        assert_eq!(truncate("abcdefghijkl", 4), "abcd…");
    }
}
