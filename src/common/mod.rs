//! Common utilities shared by the interactive and scripted front-ends

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, ErrorKind, Result};

/// Format a timestamp the way reports and headers display it
/// (`YYYY-MM-DD HH:MM:SS`, UTC).
pub fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
