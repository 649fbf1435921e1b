//! Logging setup shared by the harness binaries.

use clap_verbosity_flag::Level;

/// Map the `-v` flag count to a tracing level. The default (no flag)
/// only surfaces errors; every `-v` step reveals one more level.
pub fn verbose_level_to_trace(level: Option<Level>) -> &'static tracing::Level {
    match level {
        Some(Level::Error) => &tracing::Level::WARN,
        Some(Level::Warn) => &tracing::Level::INFO,
        Some(Level::Info) => &tracing::Level::DEBUG,
        Some(Level::Debug) => &tracing::Level::TRACE,
        Some(Level::Trace) => &tracing::Level::TRACE,
        None => &tracing::Level::ERROR,
    }
}

/// Install the global subscriber. Logs go to stderr; stdout is reserved
/// for test-failure reports.
pub fn logging_setup(level: &tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(*level)
        .with_writer(std::io::stderr)
        .init();
}
