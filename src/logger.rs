// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

use std::env;

use colored::Colorize;
use log::Level;
use log::LevelFilter;
use log::Metadata;
use log::Record;

struct SimpleLogger;

static LOGGER: SimpleLogger = SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level_str = match record.level() {
                Level::Error => "[ERROR]".red(),
                Level::Warn => "[WARN]".yellow(),
                Level::Info => "[INFO]".blue(),
                Level::Debug => "[DEBUG]".white(),
                Level::Trace => "[TRACE]".black(),
            };
            match record.level() {
                Level::Error | Level::Warn => eprintln!("{level_str} {}", record.args()),
                _ => println!("{level_str} {}", record.args()),
            }
        }
    }

    fn flush(&self) {}
}

fn level_from_env() -> LevelFilter {
    match env::var("RUST_LOG") {
        Ok(env_log) => match env_log.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        },
        Err(_) => LevelFilter::Info,
    }
}

/// Install the logger. `verbose` raises the level to at least debug.
pub fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let mut max_log_level = level_from_env();
    if verbose && max_log_level < LevelFilter::Debug {
        max_log_level = LevelFilter::Debug;
    }

    log::set_logger(&LOGGER).map(|()| log::set_max_level(max_log_level))
}
