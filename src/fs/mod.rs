//! Filesystem utilities.
//!
//! # Logging
//!
//! The `logger` submodule provides a logger that writes to the console and,
//! when asked, to a file, so a long run can be inspected afterwards.
//!
//! # Example
//!
//! ```ignore
//! use purepursuit::fs::logger;
//! use log::{info, LevelFilter};
//!
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//! info!("Scenario loaded");
//! ```

/// Console and file logging.
pub mod logger;
