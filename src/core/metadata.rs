use crate::core::types::{LineLayout, RangeList, SpecialChars, ANCHOR_LENGTH};

/// Everything the compressed file's fixed header says about the target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Header line, echoed verbatim to the output
    pub header: Vec<u8>,

    /// Physical line lengths of the original target
    pub line_layout: LineLayout,

    /// Lowercase runs, in final coordinates
    pub lowercase: RangeList,

    /// Runs of `N`, in coordinates after special characters are restored
    pub n_ranges: RangeList,

    /// Non-ACGTN characters and their positions
    pub special_chars: SpecialChars,

    /// Reference position the first copy starts at
    pub initial_offset: i64,

    /// First copy length minus the anchor length
    pub initial_run_length: i64,
}

impl Metadata {
    /// Header as text, with invalid UTF-8 replaced
    #[must_use]
    pub fn header_lossy(&self) -> String {
        String::from_utf8_lossy(&self.header).into_owned()
    }

    /// Length of the copy emitted before the first mismatch record
    #[must_use]
    pub fn initial_copy_length(&self) -> i64 {
        self.initial_run_length.saturating_add(ANCHOR_LENGTH)
    }

    /// True when none of the overlay passes has anything to do
    #[must_use]
    pub fn has_no_overlays(&self) -> bool {
        self.special_chars.is_empty() && self.n_ranges.is_empty() && self.lowercase.is_empty()
    }
}
