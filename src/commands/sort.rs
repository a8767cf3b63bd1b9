//! Sort command handler

use anyhow::{Context, Result};

use sniff_info::cli::Cli;
use sniff_info::render::render_top;
use sniff_info::report::{filter_by_collection, top_by_size_out};

use super::{emit, load_config, load_operations, Settings};

/// List the operations with the largest responses.
///
/// Shows collection, request/response sizes, client, the reply summary,
/// and the request payload of each operation.
pub fn handle(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let settings = Settings::from_cli(cli, &config);

    let ops = load_operations(cli, &settings)?;
    let filtered = filter_by_collection(&ops, cli.collection.as_deref());
    let top = top_by_size_out(filtered, settings.limit);

    let rendered = render_top(&top, settings.format).context("Failed to serialize report")?;
    emit(&rendered, settings.format);
    Ok(())
}
