//! Colored console presentation.

use std::path::Path;

use crossterm::style::Stylize;

use dirscribe_core::{ListSummary, TOP_EXTENSIONS};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print a red error line on stderr.
pub fn error(message: &str) {
    eprintln!("{}", format!("✗ Error: {message}").red());
}

/// Print the banner naming the directory being scanned.
pub fn banner(root: &Path) {
    println!("{}", rule().cyan());
    println!(
        "{} {}",
        "✓ Scanning directory:".green(),
        root.display().to_string().yellow()
    );
    println!("{}", rule().cyan());
    println!();
}

/// Print a section heading.
pub fn section(title: &str) {
    println!();
    println!("{}", rule().magenta());
    println!("{}", title.magenta());
    println!("{}", rule().magenta());
}

/// Report a written output file.
pub fn saved(what: &str, path: &Path, bytes: u64) {
    println!(
        "{} {} ({} bytes, {})",
        format!("✓ {what} saved to:").green(),
        path.display().to_string().yellow(),
        group_digits(bytes),
        humansize::format_size(bytes, humansize::BINARY)
    );
}

/// Report entries that were skipped during a phase.
pub fn skipped(count: usize) {
    if count > 0 {
        println!(
            "{}",
            format!("! {count} entries could not be processed (see log)").yellow()
        );
    }
}

/// Print the listing statistics.
pub fn summary(summary: &ListSummary) {
    section("Statistics");
    println!(
        "{} {}",
        "Total files:".cyan(),
        group_digits(summary.file_count).yellow()
    );
    println!(
        "{} {} bytes ({} MB)",
        "Total size:".cyan(),
        group_digits(summary.total_size).yellow(),
        format!("{:.2}", summary.total_size_mib()).yellow()
    );

    println!();
    println!(
        "{}",
        format!("File types (top {TOP_EXTENSIONS}):").cyan()
    );
    for (extension, count) in summary.extensions.top(TOP_EXTENSIONS) {
        println!(
            "  {}: {} files",
            format!("{extension:20}").yellow(),
            group_digits(count)
        );
    }
}

/// Print the closing line.
pub fn done() {
    println!();
    println!("{}", rule().green());
    println!("{}", "✓ Scan complete!".green());
    println!("{}", rule().green());
}

/// Format a number with comma thousands separators.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
