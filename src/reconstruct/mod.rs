//! Replay of the edit script and the overlay passes.
//!
//! - [`ReconstructionEngine`]: copies reference runs and literal bases into the raw target
//! - [`OverlayPipeline`]: restores special characters, N runs and lowercase, in that order
//! - [`ReconstructionSession`]: owns every input for one invocation and runs both stages
//!
//! ## Algorithm
//!
//! 1. Copy `initial_run_length + K` bases from `initial_offset`.
//! 2. For each mismatch record: emit its literal bases (the reference cursor
//!    does not move), jump the cursor by `offset_from_prev`, then copy
//!    `continue_for + K` bases.
//! 3. Insert special characters, insert N runs, lowercase ranges.
//!
//! `K` is [`ANCHOR_LENGTH`](crate::core::types::ANCHOR_LENGTH).
//!
//! ## Example
//!
//! ```rust
//! use hirgc_decompress::core::reference::ReferenceStore;
//! use hirgc_decompress::parsing::compressed::parse_compressed_text;
//! use hirgc_decompress::reconstruct::{ReconstructionConfig, ReconstructionSession};
//!
//! let reference = ReferenceStore::from_sequence(b"ACGTACGTACGTACGTACGTACGT");
//! let compressed = parse_compressed_text(">t\n\n2 20 1\n1 0 4\n0\n0 0 \n0 0\n").unwrap();
//!
//! let session = ReconstructionSession::new(reference, compressed, ReconstructionConfig::default());
//! let result = session.run().unwrap();
//! assert_eq!(result.sequence, b"acgtACGTACGTACGTACGT");
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::parsing::ParseError;

pub mod engine;
pub mod overlay;
pub mod session;

pub use engine::ReconstructionEngine;
pub use overlay::OverlayPipeline;
pub use session::{Reconstruction, ReconstructionConfig, ReconstructionSession, ReconstructionSummary};

/// Failures while replaying or overlaying. All of them mean the compressed
/// file is corrupt or does not belong to the reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("record {record}: reference cursor moved to {position}, outside a reference of {reference_len} bases")]
    CursorOutOfBounds {
        record: usize,
        position: i128,
        reference_len: usize,
    },

    #[error("record {record}: copying {length} bases from reference position {start} runs past the end ({reference_len} bases)")]
    CopyOutOfBounds {
        record: usize,
        start: usize,
        length: usize,
        reference_len: usize,
    },

    #[error("record {record}: negative copy length {length}")]
    NegativeCopyLength { record: usize, length: i64 },

    #[error("{what} at position {position} lies beyond a sequence of {len} characters")]
    OverlayOutOfBounds {
        what: &'static str,
        position: usize,
        len: usize,
    },

    #[error("reconstructed sequence exceeds the maximum supported length of {limit} bases")]
    SequenceTooLong { limit: usize },
}

/// Any failure of a session, labeled with the file it came from.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to read {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to reconstruct target from {}", path.display())]
    Reconstruct {
        path: PathBuf,
        #[source]
        source: ReconstructError,
    },
}
