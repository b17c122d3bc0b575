//! Shared helpers and constants.

use chrono::{SecondsFormat, Utc};

pub const APP_NAME: &str = "nullchan_backend";

/// Current UTC time as a fixed-width RFC 3339 string (microsecond precision).
/// The fixed width keeps lexicographic and chronological order identical, so
/// the store can sort on the raw column.
pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn print_banner() {
    println!("nullchan backend v{}", env!("CARGO_PKG_VERSION"));
}
