//! Console and file logger for simulation runs.
//!
//! This module implements the [`log`] crate's logging facade, writing log
//! messages to the console and, optionally, to a file.
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use purepursuit::fs::logger;
//! use log::{info, LevelFilter};
//!
//! logger::init_with_file(LevelFilter::Debug, "pursuit.log").expect("Logger init failed");
//! info!("Simulation started");
//! ```
//!
//! # Log Output
//!
//! Each line holds the level, the time since the logger was installed, the
//! target (module path) and the message:
//!
//! ```text
//! INFO [2s 123ms] purepursuit::motion::sim - Run finished after 324 steps
//! DEBUG [2s 124ms] purepursuit::motion::pursuit - No forward intersection from (-8, 10), falling back to (0, 0)
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, OnceLock},
    time::{Duration, Instant},
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// A logger writing to the console and an optional file.
pub struct SimLogger {
    started:     Instant,
    /// `None` when no file was requested or it could not be opened.
    file_writer: Mutex<Option<BufWriter<File>>>,
}

impl SimLogger {
    fn new(file: Option<&Path>) -> Self {
        let file_writer = file.and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .ok()
                .map(BufWriter::new)
        });

        Self {
            started:     Instant::now(),
            file_writer: Mutex::new(file_writer),
        }
    }

    fn elapsed(&self) -> FormattedDuration {
        // Millisecond resolution keeps the lines short.
        let millis = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        format_duration(Duration::from_millis(millis))
    }
}

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_line = format!(
                "{} [{}] {} - {}\n",
                record.level(),
                self.elapsed(),
                record.target(),
                record.args()
            );

            print!("{}", log_line);

            if let Ok(mut writer_guard) = self.file_writer.lock() {
                if let Some(ref mut writer) = *writer_guard {
                    let _ = writer.write_all(log_line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<SimLogger> = OnceLock::new();

fn install(logger: SimLogger, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| logger);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Installs a console-only logger.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> { install(SimLogger::new(None), level) }

/// Installs a logger that also writes to `path` (created or truncated).
///
/// If the file cannot be opened, logging continues on the console only.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init_with_file<P: AsRef<Path>>(level: LevelFilter, path: P) -> Result<(), SetLoggerError> {
    install(SimLogger::new(Some(path.as_ref())), level)
}
