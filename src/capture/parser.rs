//! Turning record blocks into fragments.
//!
//! Header layouts, after collapsing whitespace runs:
//!
//! ```text
//! inbound:  <client> -->> <server> <collection> <size> bytes ...
//! outbound: <server> <<-- <client> <size> bytes ...
//! ```

use super::error::ParseError;
use super::tokenizer::RawBlock;
use super::types::{Direction, Endpoint, Fragment, FragmentKind};

/// Header tokens with positional access that reports what is missing.
struct HeaderTokens<'a> {
    tokens: Vec<&'a str>,
    line: usize,
}

impl<'a> HeaderTokens<'a> {
    fn new(header: &'a str, line: usize) -> Self {
        Self {
            tokens: header.split_whitespace().collect(),
            line,
        }
    }

    fn get(&self, index: usize, field: &'static str) -> Result<&'a str, ParseError> {
        self.tokens
            .get(index)
            .copied()
            .ok_or(ParseError::MissingField {
                line: self.line,
                field,
            })
    }

    fn size(&self, index: usize) -> Result<u64, ParseError> {
        let value = self.get(index, "byte size")?;
        value.parse().map_err(|_| ParseError::InvalidSize {
            line: self.line,
            value: value.to_string(),
        })
    }
}

impl Fragment {
    /// Parse a header line and its payload into a fragment.
    ///
    /// `line` is the header's line number, used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The second token is not exactly `-->>` or `<<--`
    /// - The header ends before the byte size
    /// - The byte size is not a non-negative integer
    pub fn parse(header: &str, payload: &[String], line: usize) -> Result<Self, ParseError> {
        let tokens = HeaderTokens::new(header, line);

        let marker = tokens.get(1, "direction marker")?;
        let direction =
            Direction::from_marker(marker).ok_or_else(|| ParseError::MalformedHeader {
                line,
                marker: marker.to_string(),
            })?;

        let fragment = match direction {
            Direction::Inbound => Fragment {
                client: Endpoint::new(tokens.get(0, "client endpoint")?),
                server: Endpoint::new(tokens.get(2, "server endpoint")?),
                kind: FragmentKind::Inbound {
                    collection: tokens.get(3, "collection")?.to_string(),
                },
                byte_size: tokens.size(4)?,
                payload: payload.to_vec(),
                line,
            },
            Direction::Outbound => Fragment {
                server: Endpoint::new(tokens.get(0, "server endpoint")?),
                client: Endpoint::new(tokens.get(2, "client endpoint")?),
                kind: FragmentKind::Outbound,
                byte_size: tokens.size(3)?,
                payload: payload.to_vec(),
                line,
            },
        };

        Ok(fragment)
    }

    /// Parse a record block produced by the tokenizer.
    pub fn from_block(block: &RawBlock) -> Result<Self, ParseError> {
        Self::parse(block.header(), block.payload(), block.line)
    }
}
