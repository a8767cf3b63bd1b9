//! Loading captures from files, readers, and strings.
//!
//! # Example
//!
//! ```no_run
//! use sniff_info::Capture;
//!
//! // Parse from file path
//! let capture = Capture::parse("mongosniff.log")?;
//!
//! // Parse from string
//! let content = "a:1 -->> b:2 shop.orders 170 bytes\n  query: {}";
//! let capture = Capture::parse_str(content)?;
//! # Ok::<(), sniff_info::capture::CaptureError>(())
//! ```

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::error::CaptureError;
use super::tokenizer::blocks;
use super::types::Fragment;

/// Every fragment of a capture, in stream order.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    pub fragments: Vec<Fragment>,
}

impl Capture {
    /// Parse a capture from a filesystem path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| CaptureError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a capture from any buffered reader.
    ///
    /// Stops at the first unreadable line or malformed header.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, CaptureError> {
        let mut fragments = Vec::new();
        for block in blocks(reader) {
            let fragment = Fragment::from_block(&block?).map_err(|err| {
                debug!(line = err.line(), "rejecting capture at malformed header");
                err
            })?;
            fragments.push(fragment);
        }

        let capture = Capture { fragments };
        debug!(
            fragments = capture.len(),
            inbound = capture.fragments.iter().filter(|f| f.is_inbound()).count(),
            "capture parsed"
        );

        Ok(capture)
    }

    /// Parse a capture held in memory.
    pub fn parse_str(content: &str) -> Result<Self, CaptureError> {
        Self::parse_reader(content.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
