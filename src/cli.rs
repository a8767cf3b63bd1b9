//! CLI definitions for sniff-info
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be checked by tests without running the binary.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, ValueEnum};

use crate::matcher::MatchStrategy;
use crate::render::OutputFormat;

/// Help colors: bold green section titles, red errors.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Parse a report size, which must be at least 1.
fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(e) => Err(e.to_string()),
    }
}

/// Report to produce from the reconstructed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// List the operations with the largest responses
    Sort,
    /// Sum operation counts and traffic per collection
    Aggregate,
}

#[derive(Parser, Debug)]
#[command(name = "sniff-info")]
#[command(about = "Find the heaviest database operations in a mongosniff capture")]
#[command(
    long_about = "sniff-info - Find the heaviest database operations in a mongosniff capture.

Reads the text output of mongosniff, pairs every request with its response,
and reports either the operations with the largest responses or the traffic
per collection.

EXAMPLES:
    sniff-info capture.log sort                          Top 10 operations by response size
    sniff-info capture.log sort --limit 25               Top 25 operations
    sniff-info capture.log aggregate                     Traffic per collection
    sniff-info capture.log aggregate --format json       Same, as JSON
    sniff-info capture.log sort --collection shop.orders Only one collection

CONFIGURATION:
    Defaults for --limit, --format and --strategy can be set in
    ~/.config/sniff-info/config.toml under [report] and [matcher]."
)]
#[command(version, styles = build_cli_styles())]
pub struct Cli {
    /// Path to the mongosniff capture file
    #[arg(help = "Path to the mongosniff capture file")]
    pub file: PathBuf,

    /// Report to produce
    #[arg(value_enum, help = "Report to produce")]
    pub mode: Mode,

    /// Only inspect operations for a particular collection
    #[arg(long, help = "Only inspect operations for a particular collection")]
    pub collection: Option<String>,

    /// Number of operations listed in sort mode
    #[arg(
        long,
        short = 'n',
        value_parser = parse_limit,
        help = "Number of operations listed in sort mode [default: 10]"
    )]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, help = "Output format [default: text]")]
    pub format: Option<OutputFormat>,

    /// Matcher implementation
    #[arg(long, value_enum, help = "Request/response matcher [default: indexed]")]
    pub strategy: Option<MatchStrategy>,

    /// Alternate config file
    #[arg(long, help = "Read settings from this config file")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    /// Suppress progress notices and warnings
    #[arg(short, long, conflicts_with = "verbose", help = "Suppress progress notices")]
    pub quiet: bool,
}
