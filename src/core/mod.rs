//! Core data types for reference-relative sequence reconstruction.
//!
//! - [`ReferenceStore`](reference::ReferenceStore): the cleaned reference sequence
//! - [`Metadata`](metadata::Metadata): everything the compressed file's header describes
//! - [`EditScript`](types::EditScript) / [`Mismatch`](types::Mismatch): the replay instructions
//! - [`RangeList`](types::RangeList), [`SpecialChars`](types::SpecialChars),
//!   [`LineLayout`](types::LineLayout): overlay and output layout descriptions
//!
//! ## Coordinate spaces
//!
//! | Space | Meaning |
//! |-------|---------|
//! | reference | index into the cleaned reference |
//! | raw output | index into the replayed ACGT-only target |
//! | final output | index after special characters and N runs are inserted |
//!
//! Special character positions are raw-output indices shifted by the
//! insertions before them. N ranges are defined after special characters are
//! back in place, lowercase ranges over the final sequence.

pub mod metadata;
pub mod reference;
pub mod types;
