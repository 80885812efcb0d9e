//! Errors raised by the replay command.
//!
//! The screen itself never fails; only reading and writing intent scripts can.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    /// Reading the script or writing a view failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A script line is not a valid intent.
    #[error("line {line}: invalid intent: {source}")]
    InvalidIntent {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    /// A view could not be encoded as JSON.
    #[error("failed to encode view: {0}")]
    Encode(#[source] serde_json::Error),
}
