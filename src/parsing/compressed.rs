use std::io::BufRead;
use std::path::Path;

use crate::core::metadata::Metadata;
use crate::core::types::EditScript;
use crate::parsing::edit_script::parse_edit_script;
use crate::parsing::metadata::parse_metadata;
use crate::parsing::{open_input, NumberedLines, ParseError};

/// A fully parsed compressed target: header metadata plus edit script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompressedTarget {
    pub metadata: Metadata,
    pub edit_script: EditScript,
}

/// Parse a compressed target file in one pass.
///
/// The whole file is parsed before anything is replayed, so format errors
/// surface before reconstruction starts.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the first format
/// error found in the metadata or the edit script.
pub fn parse_compressed_file(path: &Path) -> Result<CompressedTarget, ParseError> {
    let reader = open_input(path)?;
    parse_compressed_reader(reader)
}

/// Parse a compressed target from any buffered reader.
///
/// # Errors
///
/// As [`parse_compressed_file`].
pub fn parse_compressed_reader<R: BufRead>(reader: R) -> Result<CompressedTarget, ParseError> {
    let mut lines = NumberedLines::new(reader);
    let metadata = parse_metadata(&mut lines)?;
    let edit_script = parse_edit_script(&mut lines)?;
    Ok(CompressedTarget {
        metadata,
        edit_script,
    })
}

/// Parse a compressed target from text.
///
/// # Errors
///
/// As [`parse_compressed_file`].
pub fn parse_compressed_text(text: &str) -> Result<CompressedTarget, ParseError> {
    parse_compressed_reader(text.as_bytes())
}
