mod commands;
mod config;
mod ops;
mod reports;

use eyre::Result;
use tracing_subscriber::{EnvFilter, fmt::time::FormatTime};

/// A timer that prints nothing, keeping log lines short.
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(&self, _w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logging is opt-in through JAKT_LOG, e.g. `JAKT_LOG=debug`.
    if let Ok(filter) = EnvFilter::try_from_env("JAKT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_timer(NoTimestamp)
            .with_writer(std::io::stderr)
            .init();
    }

    commands::run(std::env::args_os())
}
