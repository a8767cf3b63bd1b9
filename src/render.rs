//! Rendering reports for the terminal.

use humansize::{format_size, DECIMAL};
use serde::Deserialize;

use crate::capture::{AggregateRecord, Operation};

/// Prefix the sniffer puts in front of a response summary line.
const REPLY_PREFIX: &str = "reply ";

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One labelled block per entry
    #[default]
    Text,
    /// A JSON array
    Json,
}

/// Human-readable byte count, e.g. `72.34 kB`.
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// First response line without surrounding whitespace and the reply prefix.
pub fn reply_summary(data_out: &[String]) -> &str {
    let first = data_out.first().map(|line| line.trim()).unwrap_or_default();
    first.strip_prefix(REPLY_PREFIX).unwrap_or(first)
}

/// Request payload on a single line.
pub fn query_summary(data_in: &[String]) -> String {
    data_in
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

fn size_line(size_in: u64, size_out: u64) -> String {
    format!(
        "Size: {} (in) / {} (out)",
        format_bytes(size_in),
        format_bytes(size_out)
    )
}

/// Text block for one operation of the size report.
pub fn render_operation(op: &Operation) -> String {
    [
        format!("Collection: {}", op.collection),
        size_line(op.size_in, op.size_out),
        format!("Client: {}", op.client),
        format!("Reply: {}", reply_summary(&op.data_out)),
        format!("Query: {}", query_summary(&op.data_in)),
    ]
    .join("\n")
}

/// Text block for one collection of the aggregate report.
pub fn render_aggregate(record: &AggregateRecord) -> String {
    [
        format!("Collection: {}", record.collection),
        format!("Ops Count: {}", record.ops_count),
        size_line(record.total_size_in, record.total_size_out),
    ]
    .join("\n")
}

/// Render the size report. Empty input renders as an empty string in text
/// format and as `[]` in JSON.
pub fn render_top(ops: &[&Operation], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(blocks(ops.iter().map(|op| render_operation(op)))),
        OutputFormat::Json => serde_json::to_string_pretty(ops),
    }
}

/// Render the aggregate report.
pub fn render_aggregates(
    records: &[AggregateRecord],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(blocks(records.iter().map(render_aggregate))),
        OutputFormat::Json => serde_json::to_string_pretty(records),
    }
}

/// Each block followed by a blank line.
fn blocks(rendered: impl Iterator<Item = String>) -> String {
    rendered.map(|block| format!("{}\n\n", block)).collect()
}
