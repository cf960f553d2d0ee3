//! # hirgc-decompress
//!
//! A library for reconstructing genome sequences from HIRGC reference-based
//! compressed files.
//!
//! A HIRGC compressed file describes a target sequence almost entirely as
//! copies from a reference genome, with short literal runs where the two
//! disagree. Information the compressor strips before matching is stored
//! separately and restored afterwards:
//!
//! - **Special characters**: anything outside `ACGTN` (IUPAC codes and the like)
//! - **N runs**: stretches of unknown bases
//! - **Case**: lowercase (soft-masked) ranges
//! - **Layout**: the original header and line lengths
//!
//! ## Example
//!
//! ```rust,no_run
//! use hirgc_decompress::reconstruct::session::reconstruct_files;
//! use hirgc_decompress::reconstruct::ReconstructionConfig;
//! use hirgc_decompress::output::writer::write_sequence_to_path;
//! use std::path::Path;
//!
//! let result = reconstruct_files(
//!     Path::new("hg38_chr21.fa"),
//!     Path::new("chr21.hirgc"),
//!     ReconstructionConfig::default(),
//! )
//! .unwrap();
//!
//! println!("{} bases, md5 {}", result.summary.final_length, result.summary.md5);
//! write_sequence_to_path(
//!     Path::new("chr21.fa"),
//!     &result.header,
//!     &result.sequence,
//!     &result.line_layout,
//! )
//! .unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Reference store, metadata model and edit script types
//! - [`parsing`]: Parsers for reference files and compressed target files
//! - [`reconstruct`]: Replay engine, overlay passes and session orchestration
//! - [`output`]: Line-layout preserving writer
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod reconstruct;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::metadata::Metadata;
pub use core::reference::ReferenceStore;
pub use core::types::*;
pub use parsing::compressed::CompressedTarget;
pub use reconstruct::{
    Reconstruction, ReconstructionConfig, ReconstructionSession, ReconstructError, SessionError,
};
