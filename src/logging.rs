//! Run log: every event becomes one `[timestamp zone] message` line, appended
//! to the log file and mirrored to stdout.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use chrono_tz::Tz;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::config::Config;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Current wall-clock time in `tz`, e.g. `2025-06-01 09:30:00 CEST`.
pub fn timestamp(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Bracketed zoned timestamp prefix for log lines.
#[derive(Clone, Copy, Debug)]
pub struct ZonedTimer(pub Tz);

impl FormatTime for ZonedTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", timestamp(self.0))
    }
}

/// Install the global subscriber. Call once, from the binary.
pub fn init(config: &Config) -> Result<()> {
    init_with(&config.log_file, config.timezone, config.debug)
}

pub fn init_with(log_file: &Path, tz: Tz, debug: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("open log file {}", log_file.display()))?;

    // RUST_LOG may tune other targets, but the run log itself is never silenced.
    let level = if debug { "debug" } else { "info" };
    let floor = format!("whm_disk_monitor={level}")
        .parse::<Directive>()
        .context("build log filter")?;
    let filter = EnvFilter::new(std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default())
        .add_directive(floor);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout.and(Mutex::new(file)))
        .with_timer(ZonedTimer(tz))
        .with_ansi(false)
        .with_level(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_carries_zone_abbreviation() {
        let ts = timestamp(chrono_tz::UTC);
        assert_eq!(ts.len(), "2025-01-01 00:00:00 UTC".len());
        assert!(ts.ends_with(" UTC"));
    }
}
