//! dirscribe - inventory a directory tree as JSON.
//!
//! Usage:
//!   dirscribe [PATH]                 Write file_tree.json and file_list.json
//!   dirscribe [PATH] -o PREFIX       Write PREFIX_tree.json and PREFIX_list.json
//!   dirscribe [PATH] --tree-only     Only write the nested tree
//!   dirscribe [PATH] --list-only     Only write the flat list and its statistics
//!   dirscribe --help                 Show help

mod console;
mod progress;

use std::io::IsTerminal;
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dirscribe_core::{ListSummary, ScanConfig, to_json_string, write_json};
use dirscribe_scan::{EntryCounter, FlatLister, LogObserver, TreeBuilder};

use crate::progress::ProgressBar;

#[derive(Parser)]
#[command(
    name = "dirscribe",
    version,
    about = "Recursively scan a directory and export its contents as JSON",
    long_about = "dirscribe walks a directory tree and writes two JSON documents: a nested \
                  tree (<PREFIX>_tree.json) and a flat list of files (<PREFIX>_list.json).\n\n\
                  Examples:\n  \
                  dirscribe                        scan the current directory\n  \
                  dirscribe ~/Documents            scan a home-relative directory\n  \
                  dirscribe . --output myfiles     write myfiles_tree.json and myfiles_list.json"
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output file name prefix
    #[arg(short, long, default_value = "file")]
    output: String,

    /// Only write the tree structure
    #[arg(long)]
    tree_only: bool,

    /// Only write the flat file list
    #[arg(long)]
    list_only: bool,

    /// Show debug logging and echo the JSON documents to stdout
    #[arg(short, long)]
    verbose: bool,

    /// Do not show progress bars
    #[arg(long)]
    no_progress: bool,

    /// Skip entries whose name starts with a dot
    #[arg(long)]
    skip_hidden: bool,

    /// Stop descending into directories reached again through a symlink
    #[arg(long)]
    detect_cycles: bool,
}

/// Which documents to produce and where.
struct OutputConfig {
    prefix: String,
    tree: bool,
    list: bool,
    verbose: bool,
    progress: bool,
}

impl OutputConfig {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            prefix: cli.output.clone(),
            tree: !cli.list_only,
            list: !cli.tree_only,
            verbose: cli.verbose,
            progress: !cli.no_progress && std::io::stderr().is_terminal(),
        }
    }

    fn tree_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_tree.json", self.prefix))
    }

    fn list_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_list.json", self.prefix))
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = resolve_path(&cli.path)?;
    if let Err(message) = validate_root(&root) {
        console::error(&message);
        return Ok(ExitCode::FAILURE);
    }

    let config = ScanConfig::builder()
        .root(&root)
        .include_hidden(!cli.skip_hidden)
        .detect_cycles(cli.detect_cycles)
        .build()?;
    let output = OutputConfig::from_cli(&cli);

    console::banner(&root);
    tracing::info!(root = %root.display(), "starting scan");

    if output.tree {
        run_tree(&config, &output)?;
    }

    if output.list {
        run_list(&config, &output)?;
    }

    console::done();
    tracing::info!("all phases finished");

    Ok(ExitCode::SUCCESS)
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the tree form and write it out.
fn run_tree(config: &ScanConfig, output: &OutputConfig) -> Result<()> {
    console::section("Tree structure");
    tracing::info!("building tree");

    let mut progress = if output.progress {
        let total = EntryCounter::new(config).count(&config.root, &mut LogObserver);
        // The root itself is visited too
        ProgressBar::new("Building tree", "entries", total + 1)
    } else {
        ProgressBar::hidden()
    };

    let tree = TreeBuilder::new(config).build(&config.root, &mut progress);
    progress.finish();

    if output.verbose {
        println!("{}", to_json_string(&tree)?);
    }

    let path = output.tree_path();
    let bytes = write_json(&path, &tree)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    console::saved("Tree structure", &path, bytes);
    tracing::info!(path = %path.display(), bytes, "tree saved");

    Ok(())
}

/// Build the flat list, write it out and print its statistics.
fn run_list(config: &ScanConfig, output: &OutputConfig) -> Result<()> {
    console::section("Flat file list");
    tracing::info!("building flat list");

    let mut progress = if output.progress {
        let total = EntryCounter::new(config).count_files(&config.root, &mut LogObserver);
        ProgressBar::new("Listing files", "files", total)
    } else {
        ProgressBar::hidden()
    };

    let listing = FlatLister::new(config).list(&config.root, &mut progress);
    progress.finish();

    if listing.has_errors() {
        tracing::warn!(errors = listing.errors.len(), "some files could not be listed");
    }

    if output.verbose {
        println!("{}", to_json_string(&listing.records)?);
    }

    let path = output.list_path();
    let bytes = write_json(&path, &listing.records)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    console::saved("File list", &path, bytes);
    console::skipped(listing.errors.len());
    tracing::info!(path = %path.display(), bytes, "file list saved");

    let summary = ListSummary::from_records(&listing.records);
    console::summary(&summary);
    tracing::info!(
        files = summary.file_count,
        total_size = summary.total_size,
        "listing complete"
    );

    Ok(())
}

/// Expand `~`, make the path absolute and normalize it without touching symlinks.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path);
    let absolute = std::path::absolute(&expanded)
        .wrap_err_with(|| format!("Invalid path: {}", path.display()))?;
    Ok(normalize(&absolute))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn validate_root(root: &Path) -> Result<(), String> {
    if !root.exists() {
        return Err(format!("Path does not exist: {}", root.display()));
    }
    if !root.is_dir() {
        return Err(format!("Not a directory: {}", root.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
        assert_eq!(expand_tilde(Path::new("a~b")), PathBuf::from("a~b"));
    }

    #[test]
    fn test_output_modes() {
        let cli = Cli::parse_from(["dirscribe", "--tree-only", "-o", "snap"]);
        let output = OutputConfig::from_cli(&cli);

        assert!(output.tree);
        assert!(!output.list);
        assert_eq!(output.tree_path(), PathBuf::from("snap_tree.json"));
        assert_eq!(output.list_path(), PathBuf::from("snap_list.json"));
    }

    #[test]
    fn test_validate_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("f");
        std::fs::write(&file, "x").unwrap();

        assert!(validate_root(temp.path()).is_ok());
        assert!(validate_root(&file).unwrap_err().contains("Not a directory"));
        assert!(
            validate_root(&temp.path().join("missing"))
                .unwrap_err()
                .contains("does not exist")
        );
    }
}
