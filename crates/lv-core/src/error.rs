//! Engine error types

use thiserror::Error;

/// Errors surfaced by the engine core.
///
/// Malformed records and degenerate domains are recovered locally and
/// never appear here; the caller only ever sees conditions it must act
/// on, such as a dataset with nothing left to display.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No valid records remained after filtering. Scale construction
    /// refuses to produce a NaN domain; dependent views render nothing.
    #[error("dataset contains no valid records")]
    EmptyDataset,
}
