//! The batch analysis pipeline: capture, match, report unmatched requests.

use std::io::BufRead;
use std::path::Path;

use crate::capture::{Capture, CaptureError, Operation};
use crate::diagnostics::Diagnostics;
use crate::matcher::MatchStrategy;

/// Load a capture file and reconstruct its operations.
///
/// Unmatched requests are passed to `diagnostics` and left out of the result.
pub fn analyze_file<P: AsRef<Path>>(
    path: P,
    strategy: MatchStrategy,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Vec<Operation>, CaptureError> {
    diagnostics.notice("Gathering data");
    let capture = Capture::parse(path)?;
    Ok(reconstruct(&capture, strategy, diagnostics))
}

/// Same as [`analyze_file`] for an already opened capture.
pub fn analyze_reader<R: BufRead>(
    reader: R,
    strategy: MatchStrategy,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Vec<Operation>, CaptureError> {
    diagnostics.notice("Gathering data");
    let capture = Capture::parse_reader(reader)?;
    Ok(reconstruct(&capture, strategy, diagnostics))
}

fn reconstruct(
    capture: &Capture,
    strategy: MatchStrategy,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<Operation> {
    let outcome = strategy.run(&capture.fragments);
    for input in &outcome.unmatched {
        diagnostics.unmatched(input);
    }
    diagnostics.notice("Data gathered, analyzing...\n");
    outcome.operations
}
