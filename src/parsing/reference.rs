//! Loader for the reference sequence.
//!
//! Accepts FASTA or bare sequence text. Lines starting with `>` and blank
//! lines are skipped; all other characters are upper-cased and filtered to
//! `A`, `C`, `G`, `T`. Every record in the file is concatenated into one
//! sequence. Gzip/bgzip input (`.gz`, `.bgz`) is decompressed on the fly.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::core::reference::ReferenceStore;
use crate::parsing::{open_input, NumberedLines, ParseError};
use crate::utils::validation::check_sequence_length;

/// Load and clean a reference file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or
/// `ParseError::SequenceTooLong` if the cleaned sequence exceeds
/// `max_length`.
pub fn parse_reference_file(path: &Path, max_length: usize) -> Result<ReferenceStore, ParseError> {
    let reader = open_input(path)?;
    let reference = parse_reference_reader(reader, max_length)?;
    debug!(
        path = %path.display(),
        bases = reference.len(),
        "Loaded reference"
    );
    Ok(reference)
}

/// Load and clean a reference from any buffered reader.
///
/// # Errors
///
/// As [`parse_reference_file`].
pub fn parse_reference_reader<R: BufRead>(
    reader: R,
    max_length: usize,
) -> Result<ReferenceStore, ParseError> {
    let mut reference = ReferenceStore::new();
    let mut lines = NumberedLines::new(reader);

    while let Some(line) = lines.next_line()? {
        if line.is_empty() || line.starts_with(b">") {
            continue;
        }
        reference.push_cleaned(line);

        if check_sequence_length(reference.len(), max_length).is_some() {
            return Err(ParseError::SequenceTooLong { limit: max_length });
        }
    }

    Ok(reference)
}

/// Load and clean a reference from text.
///
/// # Errors
///
/// Returns `ParseError::SequenceTooLong` if the cleaned sequence exceeds
/// `max_length`.
pub fn parse_reference_text(text: &str, max_length: usize) -> Result<ReferenceStore, ParseError> {
    parse_reference_reader(text.as_bytes(), max_length)
}
