//! Splitting a capture into record blocks.
//!
//! A block starts at a header line and runs up to, but not including, the
//! next header line. Lines seen before the first header form a leading block
//! of their own. Blocks are produced lazily so a capture is never held in
//! memory as raw text.

use std::io::{self, BufRead};
use std::mem;

use tracing::trace;

use super::error::CaptureError;
use super::types::{CURSOR_CLEANUP_MARKER, INBOUND_MARKER, OUTBOUND_MARKER};

/// Check whether a line starts a new record block.
pub fn is_header_line(line: &str) -> bool {
    line.contains(INBOUND_MARKER) || line.contains(OUTBOUND_MARKER)
}

/// The raw lines of one record, header first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// 1-based line number of the first line.
    pub line: usize,
    pub lines: Vec<String>,
}

impl RawBlock {
    pub fn header(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    pub fn payload(&self) -> &[String] {
        self.lines.get(1..).unwrap_or_default()
    }

    /// Whether the block carries anything worth reporting.
    ///
    /// A header without payload and cursor cleanup requests are not.
    pub fn is_reportable(&self) -> bool {
        match self.lines.get(1) {
            Some(first_payload) => !first_payload.contains(CURSOR_CLEANUP_MARKER),
            None => false,
        }
    }
}

/// Iterator over the reportable blocks of a capture.
///
/// Stops after the first read error.
pub struct Blocks<L> {
    lines: L,
    current: Vec<String>,
    start: usize,
    line_no: usize,
    finished: bool,
}

impl<L> Blocks<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: L) -> Self {
        Self {
            lines,
            current: Vec::new(),
            start: 1,
            line_no: 0,
            finished: false,
        }
    }

    fn take_block(&mut self) -> RawBlock {
        RawBlock {
            line: self.start,
            lines: mem::take(&mut self.current),
        }
    }

    /// Next block, reportable or not.
    fn next_raw(&mut self) -> Option<Result<RawBlock, CaptureError>> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_no += 1;

                    let flushed = if is_header_line(&line) && !self.current.is_empty() {
                        Some(self.take_block())
                    } else {
                        None
                    };

                    if self.current.is_empty() {
                        self.start = self.line_no;
                    }
                    self.current.push(line);

                    if let Some(block) = flushed {
                        return Some(Ok(block));
                    }
                }
                Some(Err(source)) => {
                    self.finished = true;
                    return Some(Err(CaptureError::Read {
                        line: self.line_no + 1,
                        source,
                    }));
                }
                None => {
                    self.finished = true;
                    if self.current.is_empty() {
                        return None;
                    }
                    return Some(Ok(self.take_block()));
                }
            }
        }
    }
}

impl<L> Iterator for Blocks<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    type Item = Result<RawBlock, CaptureError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_raw()? {
                Ok(block) if !block.is_reportable() => {
                    trace!(line = block.line, lines = block.lines.len(), "dropping block");
                }
                other => return Some(other),
            }
        }
    }
}

/// Lines of a reader, decoded lossily.
///
/// Both `\n` and `\r\n` endings are stripped. Bytes that are not valid
/// UTF-8 become U+FFFD instead of failing the read.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Split the lines of a buffered reader into reportable blocks.
pub fn blocks<R: BufRead>(reader: R) -> Blocks<LossyLines<R>> {
    Blocks::new(LossyLines::new(reader))
}
