//! Minimal stderr logger for the CLI.
//!
//! Library crates only emit through the `log` facade; this is the one place a
//! sink is installed.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable consulted when no `-v`/`-q` flag is given
pub const LOG_ENV: &str = "GEM_CASCADE_LOG";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parse `error|warn|info|debug|trace|off`, case-insensitive
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

/// Level from the command-line flags, falling back to [`LOG_ENV`], then `warn`
pub fn resolve_level(verbose: u8, quiet: bool, env: Option<&str>) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => env.and_then(parse_level).unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Only the first call has any effect.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
