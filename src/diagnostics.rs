//! Progress and notice reporting for an analysis run.
//!
//! The capture, matcher, and report modules never print. Whatever the user
//! should see while a run is in progress goes through a [`Diagnostics`]
//! implementation handed to the pipeline.

use std::io::{self, Write};

use crate::matcher::UnmatchedInput;

/// Receiver of progress notices and non-fatal findings.
pub trait Diagnostics {
    /// A progress message, e.g. that parsing has started.
    fn notice(&mut self, message: &str);

    /// A request for which no response was found.
    fn unmatched(&mut self, input: &UnmatchedInput);
}

/// Human-readable description of an unmatched request.
pub fn describe_unmatched(input: &UnmatchedInput) -> String {
    let fragment = &input.fragment;
    format!(
        "Match for an input not found (line {}): {} {} {} {} {} bytes",
        fragment.line,
        fragment.client,
        fragment.direction().marker(),
        fragment.server,
        fragment.collection().unwrap_or_default(),
        fragment.byte_size
    )
}

/// Writes notices to a stream, stdout by default.
pub struct ConsoleDiagnostics<W: Write = io::Stdout> {
    out: W,
    /// Whether to show output (disabled for quiet mode)
    show_output: bool,
}

impl ConsoleDiagnostics {
    /// Report to stdout, the same stream the report goes to.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Report nothing.
    pub fn quiet() -> Self {
        Self {
            out: io::stdout(),
            show_output: false,
        }
    }
}

impl Default for ConsoleDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleDiagnostics<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            show_output: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if self.show_output {
            let _ = writeln!(self.out, "{}", line);
        }
    }
}

impl<W: Write> Diagnostics for ConsoleDiagnostics<W> {
    fn notice(&mut self, message: &str) {
        self.write_line(message);
    }

    fn unmatched(&mut self, input: &UnmatchedInput) {
        let description = describe_unmatched(input);
        self.write_line(&description);
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    pub notices: Vec<String>,
    pub unmatched: Vec<UnmatchedInput>,
}

impl Diagnostics for CollectedDiagnostics {
    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn unmatched(&mut self, input: &UnmatchedInput) {
        self.unmatched.push(input.clone());
    }
}
