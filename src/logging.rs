//! Diagnostic logging to stderr.
//!
//! Reports go to stdout, so log output never mixes with them.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

/// Map `-q` / `-v` flags onto a log level.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8, quiet: bool) {
    let _ = fmt()
        .with_max_level(level_for(verbosity, quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
