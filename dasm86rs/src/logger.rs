//! A logger that prints log records as assembly comments
//!
//! Debug output goes to stdout prefixed with `; `, so that verbose output mixed
//! in with decoded instructions still assembles. Warnings and errors go to
//! stderr.

use anyhow::{anyhow, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CommentLogger;

static LOGGER: CommentLogger = CommentLogger;

impl Log for CommentLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error | Level::Warn => eprintln!("; {}: {}", record.level(), record.args()),
            _ => println!("; {}", record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn level_for(verbose: bool) -> LevelFilter {
    match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Warn,
    }
}

/// Install the logger. Can only be called once per process.
pub fn init(verbose: bool) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow!("Failed to install logger: {e}"))?;
    log::set_max_level(level_for(verbose));
    Ok(())
}
