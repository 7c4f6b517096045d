use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes `log` records from the library to stderr, so stdout stays reserved
/// for command output.
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
        let label = match record.level() {
            Level::Error => "error".red(),
            Level::Warn => "warning".yellow(),
            Level::Info => "info".normal(),
            Level::Debug | Level::Trace => "debug".dimmed(),
        };
        eprintln!("{}: {}", label, record.args());
    }

    fn flush(&self) {}
}

/// Installs the stderr logger. Warnings always show; `verbose` adds info and
/// debug records.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Only fails if a logger is already installed, which leaves that one in place.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
