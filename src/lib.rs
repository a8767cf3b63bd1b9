//! sniff-info library
//!
//! Reconstructs database operations from mongosniff captures and reports
//! where the traffic goes.

pub mod capture;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod logging;
pub mod matcher;
pub mod pipeline;
pub mod render;
pub mod report;

pub use capture::{AggregateRecord, Capture, Fragment, Operation};
pub use config::Config;
pub use diagnostics::{CollectedDiagnostics, ConsoleDiagnostics, Diagnostics};
pub use matcher::{MatchOutcome, MatchStrategy, UnmatchedInput};
