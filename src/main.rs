//! sniff-info - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use sniff_info::cli::{Cli, Mode};

fn main() -> Result<()> {
    let cli = Cli::parse();
    sniff_info::logging::init(cli.verbose, cli.quiet);

    match cli.mode {
        Mode::Sort => commands::sort::handle(&cli),
        Mode::Aggregate => commands::aggregate::handle(&cli),
    }
}
