//! Log processing for actiontail
//!
//! This crate provides locating, tailing, parsing, filtering and rendering of
//! Action Logger records.

mod dispatch;
mod error;
mod filter;
mod format;
mod locator;
mod lookup;
mod parser;
mod tailer;

pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use filter::EventFilter;
pub use format::EventFormatter;
pub use locator::find_newest_file;
pub use lookup::Lookups;
pub use parser::LogParser;
pub use tailer::{DEFAULT_POLL_INTERVAL, LogTailer};

// Re-export types used in our public API
pub use actiontail_types::LogEvent;
