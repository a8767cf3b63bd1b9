//! Command handlers for the sniff-info CLI.
//!
//! Each submodule handles one report mode. Settings resolution and capture
//! loading are shared here.

pub mod aggregate;
pub mod sort;

use std::io;

use anyhow::{Context, Result};

use sniff_info::cli::Cli;
use sniff_info::diagnostics::{ConsoleDiagnostics, Diagnostics};
use sniff_info::pipeline::analyze_file;
use sniff_info::render::OutputFormat;
use sniff_info::report::DEFAULT_TOP_LIMIT;
use sniff_info::{Config, MatchStrategy, Operation};

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub limit: usize,
    pub format: OutputFormat,
    pub strategy: MatchStrategy,
}

impl Settings {
    /// Resolve settings.
    ///
    /// Priority order:
    /// 1. CLI argument (explicit user intent)
    /// 2. Config file
    /// 3. Built-in default
    pub fn resolve(
        limit: Option<usize>,
        format: Option<OutputFormat>,
        strategy: Option<MatchStrategy>,
        config: &Config,
    ) -> Self {
        Self {
            limit: limit.unwrap_or(config.report.limit),
            format: format.unwrap_or(config.report.format),
            strategy: strategy.unwrap_or(config.matcher.strategy),
        }
    }

    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        Self::resolve(cli.limit, cli.format, cli.strategy, config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOP_LIMIT,
            format: OutputFormat::default(),
            strategy: MatchStrategy::default(),
        }
    }
}

/// Load the config file named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Pick where progress notices go.
///
/// Text reports share stdout with their notices; JSON keeps stdout clean
/// and sends notices to stderr.
fn diagnostics_for(quiet: bool, format: OutputFormat) -> Box<dyn Diagnostics> {
    match (quiet, format) {
        (true, _) => Box::new(ConsoleDiagnostics::quiet()),
        (false, OutputFormat::Text) => Box::new(ConsoleDiagnostics::new()),
        (false, OutputFormat::Json) => Box::new(ConsoleDiagnostics::with_writer(io::stderr())),
    }
}

/// Parse the capture and reconstruct its operations.
pub fn load_operations(cli: &Cli, settings: &Settings) -> Result<Vec<Operation>> {
    let mut diagnostics = diagnostics_for(cli.quiet, settings.format);
    analyze_file(&cli.file, settings.strategy, diagnostics.as_mut())
        .with_context(|| format!("Failed to analyze capture: {}", cli.file.display()))
}

/// Print a rendered report.
pub fn emit(rendered: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", rendered),
        OutputFormat::Json => println!("{}", rendered),
    }
}
