use std::ops::Range;

/// Fixed seed length of the upstream compressor. Every reference copy is
/// `continue_for + ANCHOR_LENGTH` bases long.
pub const ANCHOR_LENGTH: i64 = 20;

/// One of the four bases the reference-relative encoding works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Decode a 2-bit base code (A=0, C=1, G=2, T=3)
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::A),
            1 => Some(Self::C),
            2 => Some(Self::G),
            3 => Some(Self::T),
            _ => None,
        }
    }

    /// Decode an ASCII digit `'0'..='3'` as written in edit script lines
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Self> {
        digit.checked_sub(b'0').and_then(Self::from_code)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
        }
    }

    /// Uppercase ASCII letter for this base
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

/// A point where the target diverges from a straight reference copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mismatch {
    /// Literal bases emitted before the next reference copy (may be empty)
    pub mismatched_bases: Vec<Base>,

    /// Signed jump applied to the reference cursor after the literal run
    pub offset_from_prev: i64,

    /// Copy length minus [`ANCHOR_LENGTH`]
    pub continue_for: i64,
}

impl Mismatch {
    #[must_use]
    pub fn new(mismatched_bases: Vec<Base>, offset_from_prev: i64, continue_for: i64) -> Self {
        Self {
            mismatched_bases,
            offset_from_prev,
            continue_for,
        }
    }

    /// Number of bases copied from the reference after the literal run
    #[must_use]
    pub fn copy_length(&self) -> i64 {
        self.continue_for.saturating_add(ANCHOR_LENGTH)
    }
}

/// Ordered list of mismatch records; order defines replay order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditScript {
    mismatches: Vec<Mismatch>,
}

impl EditScript {
    #[must_use]
    pub fn new(mismatches: Vec<Mismatch>) -> Self {
        Self { mismatches }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mismatch> {
        self.mismatches.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mismatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Total number of literal bases across all records
    #[must_use]
    pub fn literal_bases(&self) -> usize {
        self.mismatches
            .iter()
            .map(|m| m.mismatched_bases.len())
            .sum()
    }
}

impl FromIterator<Mismatch> for EditScript {
    fn from_iter<I: IntoIterator<Item = Mismatch>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Mismatch;
    type IntoIter = std::slice::Iter<'a, Mismatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `repeat` consecutive output lines of `length` characters each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    pub length: usize,
    pub repeat: usize,
}

/// How the final sequence is wrapped into physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineLayout {
    pub runs: Vec<LineRun>,
}

impl LineLayout {
    #[must_use]
    pub fn new(runs: Vec<LineRun>) -> Self {
        Self { runs }
    }

    /// Number of sequence characters covered by the layout.
    ///
    /// Saturates instead of overflowing; a saturated total never matches a
    /// real sequence length.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.runs.iter().fold(0usize, |acc, run| {
            acc.saturating_add(run.length.saturating_mul(run.repeat))
        })
    }

    /// Iterate over the length of every physical line in output order
    pub fn line_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat(run.length).take(run.repeat))
    }
}

/// A range whose start is relative to the end of the previous range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaRange {
    pub start_delta: usize,
    pub length: usize,
}

/// Cumulative-delta encoded ranges (lowercase runs, N runs).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeList {
    ranges: Vec<DeltaRange>,
}

impl RangeList {
    #[must_use]
    pub fn new(ranges: Vec<DeltaRange>) -> Self {
        Self { ranges }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeltaRange> {
        self.ranges.iter()
    }

    /// Sum of all range lengths
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.ranges
            .iter()
            .fold(0usize, |acc, r| acc.saturating_add(r.length))
    }

    /// Resolve the cumulative deltas into absolute, half-open ranges.
    ///
    /// Each start is the end of the previous range plus its delta, so the
    /// starts of non-empty ranges are strictly increasing.
    pub fn absolute(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.ranges.iter().scan(0usize, |running, r| {
            let start = running.saturating_add(r.start_delta);
            let end = start.saturating_add(r.length);
            *running = end;
            Some(start..end)
        })
    }
}

/// Characters outside `ACGTN` stripped by the compressor, with where to put
/// them back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecialChars {
    positions: Vec<usize>,
    dictionary: Vec<u8>,
    order: Vec<u8>,
}

impl SpecialChars {
    /// Build from the cumulative gap list as stored in the compressed file.
    ///
    /// The first gap is absolute; every later position is
    /// `previous + gap + 1`.
    ///
    /// # Errors
    ///
    /// Returns a message if `order` and `gaps` disagree in length or an order
    /// entry points outside `dictionary`.
    pub fn from_gaps(gaps: &[usize], dictionary: Vec<u8>, order: Vec<u8>) -> Result<Self, String> {
        if order.len() != gaps.len() {
            return Err(format!(
                "special character order lists {} occurrences but {} positions are encoded",
                order.len(),
                gaps.len()
            ));
        }
        if let Some(&bad) = order.iter().find(|&&i| usize::from(i) >= dictionary.len()) {
            return Err(format!(
                "special character index {bad} is outside a dictionary of {} characters",
                dictionary.len()
            ));
        }

        let mut positions = Vec::with_capacity(gaps.len());
        let mut next = 0usize;
        for &gap in gaps {
            let pos = next.saturating_add(gap);
            positions.push(pos);
            next = pos.saturating_add(1);
        }

        Ok(Self {
            positions,
            dictionary,
            order,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    #[must_use]
    pub fn dictionary(&self) -> &[u8] {
        &self.dictionary
    }

    /// `(absolute position, character)` for every occurrence, left to right
    pub fn occurrences(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.positions
            .iter()
            .zip(&self.order)
            .map(|(&pos, &idx)| (pos, self.dictionary[usize::from(idx)]))
    }
}
