//! mongosniff capture parser
//!
//! This module turns the text output of a passive wire-protocol sniffer into
//! typed request and response fragments.
//!
//! # Structure
//!
//! - `tokenizer` - Splitting the line stream into record blocks
//! - `parser` - Parsing a block's header into a [`Fragment`]
//! - `reader` - Loading a whole capture from a file, reader, or string
//! - `types` - Fragments, operations, and aggregate records

mod error;
mod parser;
mod reader;
pub mod tokenizer;
mod types;

pub use error::{CaptureError, ParseError};
pub use reader::Capture;
pub use tokenizer::{is_header_line, RawBlock};
pub use types::{
    AggregateRecord, Direction, Endpoint, Fragment, FragmentKind, Operation,
    CURSOR_CLEANUP_MARKER, INBOUND_MARKER, OUTBOUND_MARKER,
};
