//! Aggregate command handler

use anyhow::{Context, Result};

use sniff_info::cli::Cli;
use sniff_info::render::render_aggregates;
use sniff_info::report::{aggregate_by_collection, filter_by_collection};

use super::{emit, load_config, load_operations, Settings};

/// Sum operation counts and traffic per collection.
///
/// Collections are listed by outbound traffic, largest first.
pub fn handle(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let settings = Settings::from_cli(cli, &config);

    let ops = load_operations(cli, &settings)?;
    let filtered = filter_by_collection(&ops, cli.collection.as_deref());
    let records = aggregate_by_collection(filtered);

    let rendered =
        render_aggregates(&records, settings.format).context("Failed to serialize report")?;
    emit(&rendered, settings.format);
    Ok(())
}
