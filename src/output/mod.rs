//! Serialization of the reconstructed target.
//!
//! Output layout: the header line, one blank line, then the sequence split
//! into physical lines by the original [`LineLayout`](crate::core::types::LineLayout).

use thiserror::Error;

pub mod writer;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    LayoutMismatch(String),
}
