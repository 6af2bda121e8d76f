//! Output formatting helpers.
//!
//! Records go to stdout as JSON lines; status messages and cursors go to
//! stderr so output can be piped.

use std::fmt::Display;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: impl Display) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as one line of JSON, or pretty-printed.
pub fn record<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Print the cursor that continues an enumeration.
pub fn next_cursor(cursor: impl Display) {
    eprintln!("{}: {}", "Next cursor".dimmed(), cursor);
}
