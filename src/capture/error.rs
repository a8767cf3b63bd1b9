//! Capture parsing errors.
//!
//! Every variant is fatal for the run. Requests without a response are not
//! errors; see [`crate::matcher::UnmatchedInput`].

use std::path::PathBuf;

/// A header line that cannot be turned into a fragment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed header on line {line}: expected '-->>' or '<<--', found '{marker}'")]
    MalformedHeader { line: usize, marker: String },

    #[error("Invalid byte size on line {line}: '{value}' is not a non-negative integer")]
    InvalidSize { line: usize, value: String },

    #[error("Malformed header on line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },
}

impl ParseError {
    /// Line number of the offending header.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedHeader { line, .. }
            | ParseError::InvalidSize { line, .. }
            | ParseError::MissingField { line, .. } => *line,
        }
    }
}

/// Errors that can occur while loading a capture.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to open capture file: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
