//! Validated dataset loading
//!
//! The loaders never fail on a bad row: each field is validated
//! individually and rows that do not parse are dropped with a warning
//! tally. Only I/O and top-level format failures are errors.

mod graph_json;
mod points_csv;

pub use graph_json::read_graph_json;
pub use points_csv::read_points_csv;

use thiserror::Error;

/// Fixed date format for temporal fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Data loading errors
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a `#rrggbb` color string, tolerating a missing `#` prefix.
/// Anything else maps to `None` rather than an error.
pub(crate) fn parse_colour(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}
