//! Type definitions for mongosniff captures.
//!
//! A capture is a plain-text stream in which every exchange with the database
//! server is written as a header line followed by the payload lines that
//! belong to it. Requests and responses are written as separate blocks and
//! may interleave freely on the wire.
//!
//! # Format
//!
//! ```text
//! 10.87.0.247:57754  -->> 10.0.3.197:27017 shop.orders  170 bytes  id:afbc0f18   2948337432
//!         query: { status: "open" }  ntoreturn: 0 ntoskip: 0
//! 10.0.3.197:27017  <<--  10.87.0.247:57754   72336 bytes  id:14a63c90  346438800 - 2948337432
//!         reply n:101 cursorId: 0
//! ```
//!
//! The first line of each pair is an inbound request (`-->>`), the second an
//! outbound response (`<<--`).

use std::fmt;

use serde::Serialize;

// ============================================================================
// Markers
// ============================================================================

/// Directional marker of a request sent by a client to the server.
pub const INBOUND_MARKER: &str = "-->>";

/// Directional marker of a response sent by the server to a client.
pub const OUTBOUND_MARKER: &str = "<<--";

/// Payload text identifying an administrative cursor cleanup request.
///
/// Blocks carrying it have no reportable payload and are dropped.
pub const CURSOR_CLEANUP_MARKER: &str = "killCursors";

// ============================================================================
// Endpoints
// ============================================================================

/// Network peer address as written in the capture, e.g. `10.0.3.197:27017`.
///
/// Endpoints are opaque: they are compared verbatim and never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

// ============================================================================
// Fragments
// ============================================================================

/// Direction of a fragment relative to the database server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Request from a client (`-->>`).
    Inbound,
    /// Response from the server (`<<--`).
    Outbound,
}

impl Direction {
    /// Map a header marker token onto a direction.
    ///
    /// Returns `None` for anything but the two exact marker symbols.
    pub fn from_marker(token: &str) -> Option<Self> {
        match token {
            INBOUND_MARKER => Some(Direction::Inbound),
            OUTBOUND_MARKER => Some(Direction::Outbound),
            _ => None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Inbound => INBOUND_MARKER,
            Direction::Outbound => OUTBOUND_MARKER,
        }
    }
}

/// Direction-specific part of a fragment.
///
/// Only requests name the collection they target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    Inbound { collection: String },
    Outbound,
}

/// One side (request or response) of a captured exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub client: Endpoint,
    pub server: Endpoint,
    /// Payload size declared in the header.
    pub byte_size: u64,
    /// Lines following the header, unmodified.
    pub payload: Vec<String>,
    /// 1-based line number of the header in the capture.
    pub line: usize,
}

impl Fragment {
    pub fn direction(&self) -> Direction {
        match self.kind {
            FragmentKind::Inbound { .. } => Direction::Inbound,
            FragmentKind::Outbound => Direction::Outbound,
        }
    }

    pub fn is_inbound(&self) -> bool {
        self.direction() == Direction::Inbound
    }

    /// Collection targeted by a request; `None` for responses.
    pub fn collection(&self) -> Option<&str> {
        match &self.kind {
            FragmentKind::Inbound { collection } => Some(collection),
            FragmentKind::Outbound => None,
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

/// A reconstructed request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub client: Endpoint,
    pub server: Endpoint,
    pub collection: String,
    pub size_in: u64,
    pub size_out: u64,
    pub data_in: Vec<String>,
    pub data_out: Vec<String>,
}

impl Operation {
    /// Build an operation from a request and the fragment matched to it.
    ///
    /// Returns `None` when `request` is not an inbound fragment.
    pub fn from_pair(request: &Fragment, response: &Fragment) -> Option<Self> {
        let collection = request.collection()?;
        Some(Self {
            client: request.client.clone(),
            server: request.server.clone(),
            collection: collection.to_string(),
            size_in: request.byte_size,
            size_out: response.byte_size,
            data_in: request.payload.clone(),
            data_out: response.payload.clone(),
        })
    }
}

/// Per-collection traffic totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRecord {
    pub collection: String,
    pub ops_count: usize,
    pub total_size_in: u64,
    pub total_size_out: u64,
}

impl AggregateRecord {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ops_count: 0,
            total_size_in: 0,
            total_size_out: 0,
        }
    }

    /// Fold one operation into the totals.
    ///
    /// Totals saturate at `u64::MAX`.
    pub fn add(&mut self, op: &Operation) {
        self.ops_count += 1;
        self.total_size_in = self.total_size_in.saturating_add(op.size_in);
        self.total_size_out = self.total_size_out.saturating_add(op.size_out);
    }
}
