//! The three overlay passes, always applied in this order:
//!
//! 1. **Special characters**: single characters inserted at cumulative positions
//! 2. **N ranges**: runs of `N` inserted at cumulative-delta ranges
//! 3. **Lowercase**: ranges lowercased in place, in final coordinates
//!
//! Both insertion passes are expressed as an [`InsertionPlan`] that is
//! materialised into a new buffer in one sweep, so no index is invalidated by
//! an earlier insertion.

use tracing::debug;

use crate::core::metadata::Metadata;
use crate::core::types::{RangeList, SpecialChars};
use crate::reconstruct::ReconstructError;
use crate::utils::validation::check_sequence_length;

/// Unknown-base marker
pub const N_BASE: u8 = b'N';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Insertion {
    /// Position of the first inserted byte in the output
    position: usize,
    byte: u8,
    count: usize,
}

/// Insertions in output coordinates, sorted by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
    what: &'static str,
    insertions: Vec<Insertion>,
}

impl InsertionPlan {
    /// One insertion per special character occurrence
    #[must_use]
    pub fn special_chars(special: &SpecialChars) -> Self {
        Self {
            what: "special character",
            insertions: special
                .occurrences()
                .map(|(position, byte)| Insertion {
                    position,
                    byte,
                    count: 1,
                })
                .collect(),
        }
    }

    /// One run of `N` per range
    #[must_use]
    pub fn n_ranges(ranges: &RangeList) -> Self {
        Self {
            what: "N range",
            insertions: ranges
                .absolute()
                .map(|range| Insertion {
                    position: range.start,
                    byte: N_BASE,
                    count: range.len(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
    }

    /// Total number of bytes the plan inserts
    #[must_use]
    pub fn inserted_len(&self) -> usize {
        self.insertions
            .iter()
            .fold(0usize, |acc, i| acc.saturating_add(i.count))
    }

    /// Build the output: source bytes interleaved with the planned
    /// insertions.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructError::OverlayOutOfBounds` if an insertion point
    /// lies past the end of what the source can fill, or
    /// `ReconstructError::SequenceTooLong` if the result would exceed
    /// `max_length`.
    pub fn materialize(&self, source: Vec<u8>, max_length: usize) -> Result<Vec<u8>, ReconstructError> {
        if self.is_empty() {
            return Ok(source);
        }

        let final_len = source.len().saturating_add(self.inserted_len());
        if check_sequence_length(final_len, max_length).is_some() {
            return Err(ReconstructError::SequenceTooLong { limit: max_length });
        }

        let mut out = Vec::with_capacity(final_len);
        let mut consumed = 0usize;

        for insertion in &self.insertions {
            let out_of_bounds = ReconstructError::OverlayOutOfBounds {
                what: self.what,
                position: insertion.position,
                len: out.len() + (source.len() - consumed),
            };
            let take = insertion
                .position
                .checked_sub(out.len())
                .ok_or_else(|| out_of_bounds.clone())?;
            let chunk = source
                .get(consumed..consumed.saturating_add(take))
                .ok_or(out_of_bounds)?;

            out.extend_from_slice(chunk);
            consumed += take;
            out.resize(out.len() + insertion.count, insertion.byte);
        }
        out.extend_from_slice(&source[consumed..]);

        Ok(out)
    }
}

/// Re-insert special characters.
///
/// # Errors
///
/// See [`InsertionPlan::materialize`].
pub fn apply_special_chars(
    sequence: Vec<u8>,
    special: &SpecialChars,
    max_length: usize,
) -> Result<Vec<u8>, ReconstructError> {
    InsertionPlan::special_chars(special).materialize(sequence, max_length)
}

/// Re-insert runs of `N`.
///
/// # Errors
///
/// See [`InsertionPlan::materialize`].
pub fn apply_n_ranges(
    sequence: Vec<u8>,
    ranges: &RangeList,
    max_length: usize,
) -> Result<Vec<u8>, ReconstructError> {
    InsertionPlan::n_ranges(ranges).materialize(sequence, max_length)
}

/// Lowercase every range in place. Returns the number of characters covered.
///
/// # Errors
///
/// Returns `ReconstructError::OverlayOutOfBounds` if a range ends past the
/// sequence; the sequence is left untouched in that case.
pub fn apply_lowercase(sequence: &mut [u8], ranges: &RangeList) -> Result<usize, ReconstructError> {
    if let Some(bad) = ranges.absolute().find(|r| r.end > sequence.len()) {
        return Err(ReconstructError::OverlayOutOfBounds {
            what: "lowercase range",
            position: bad.end,
            len: sequence.len(),
        });
    }

    let mut lowered = 0usize;
    for range in ranges.absolute() {
        lowered += range.len();
        sequence[range].make_ascii_lowercase();
    }
    Ok(lowered)
}

/// Counts of what each pass restored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayStats {
    pub special_chars: usize,
    pub n_bases: usize,
    pub lowercase_bases: usize,
}

/// Applies the overlays described by a [`Metadata`] in their fixed order.
pub struct OverlayPipeline<'a> {
    metadata: &'a Metadata,
    max_length: usize,
}

impl<'a> OverlayPipeline<'a> {
    #[must_use]
    pub fn new(metadata: &'a Metadata, max_length: usize) -> Self {
        Self {
            metadata,
            max_length,
        }
    }

    /// Turn the raw target into the final sequence.
    ///
    /// # Errors
    ///
    /// Returns the first `ReconstructError` of any pass.
    pub fn run(&self, raw: Vec<u8>) -> Result<(Vec<u8>, OverlayStats), ReconstructError> {
        let special = &self.metadata.special_chars;
        let sequence = apply_special_chars(raw, special, self.max_length)?;

        let n_ranges = &self.metadata.n_ranges;
        let mut sequence = apply_n_ranges(sequence, n_ranges, self.max_length)?;

        let lowercase_bases = apply_lowercase(&mut sequence, &self.metadata.lowercase)?;

        let stats = OverlayStats {
            special_chars: special.len(),
            n_bases: n_ranges.total_length(),
            lowercase_bases,
        };
        debug!(
            special_chars = stats.special_chars,
            n_bases = stats.n_bases,
            lowercase_bases = stats.lowercase_bases,
            length = sequence.len(),
            "Applied overlays"
        );
        Ok((sequence, stats))
    }
}
