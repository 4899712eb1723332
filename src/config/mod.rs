pub mod cli;
pub mod package;
pub mod tree_config;

pub use tree_config::TreeConfig;

#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "filetreer")]
#[command(about = "Generate an ASCII or Markdown file tree of a directory")]
#[command(version)]
pub struct CliConfig {
    /// Directory holding filetreer_config.json (defaults to the executable's directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Scan a directory and print its tree
    Generate(GenerateArgs),
    /// Inspect or reset the saved settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the saved settings as JSON
    Show,
    /// Overwrite the saved settings with defaults
    Reset,
    /// Print the ignore list, one pattern per line
    Ignore,
}

/// 數量上限；`None` 代表不限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(pub Option<usize>);

pub fn parse_limit(value: &str) -> std::result::Result<Limit, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("unlimited") || value.eq_ignore_ascii_case("none") {
        return Ok(Limit(None));
    }
    value
        .parse::<usize>()
        .map(|n| Limit(Some(n)))
        .map_err(|_| format!("expected a number or 'unlimited', got '{}'", value))
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Directory to scan
    pub path: PathBuf,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum depth, or 'unlimited'
    #[arg(long, value_parser = parse_limit)]
    pub max_depth: Option<Limit>,

    /// Maximum entries shown per directory, or 'unlimited'
    #[arg(long, value_parser = parse_limit)]
    pub max_items: Option<Limit>,

    /// Apply the per-level limit to the root directory too
    #[arg(long, overrides_with = "no_limit_root")]
    pub limit_root: bool,

    #[arg(long, overrides_with = "limit_root")]
    pub no_limit_root: bool,

    /// Include entries whose name starts with '.'
    #[arg(long, overrides_with = "hide_hidden")]
    pub show_hidden: bool,

    #[arg(long, overrides_with = "show_hidden")]
    pub hide_hidden: bool,

    /// Extra ignore pattern (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Replace the ignore list with the patterns in FILE (gitignore-like)
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Do not ask for confirmation when a setting is unlimited
    #[arg(short, long)]
    pub yes: bool,

    /// Save the tree to <PATH>/filetree.txt
    #[arg(long)]
    pub save: bool,

    /// Save the tree to FILE
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not print the tree to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Persist the effective settings
    #[arg(long)]
    pub save_config: bool,

    /// Log CPU and memory usage around the scan
    #[arg(long)]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl GenerateArgs {
    /// 將命令列覆寫套用到設定上
    pub fn apply_to(&self, config: &mut TreeConfig) -> Result<()> {
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(Limit(depth)) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(Limit(items)) = self.max_items {
            // 至少為 1
            config.max_items_per_level = items.map(|n| n.max(1));
        }
        if self.limit_root {
            config.unlimit_root_items = false;
        } else if self.no_limit_root {
            config.unlimit_root_items = true;
        }
        if self.show_hidden {
            config.ignore_hidden = false;
        } else if self.hide_hidden {
            config.ignore_hidden = true;
        }
        if let Some(file) = &self.ignore_file {
            let text = std::fs::read_to_string(file)?;
            config.set_ignore_patterns_from_str(&text);
        }
        for pattern in &self.ignore {
            if !config.ignore_patterns.contains(pattern) {
                config.ignore_patterns.push(pattern.clone());
            }
        }
        Ok(())
    }
}
