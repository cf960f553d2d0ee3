//! Parsers for the two input files.
//!
//! - **Reference files**: FASTA or plain sequence text, optionally gzip compressed
//! - **Compressed target files**: the seven-line metadata header followed by
//!   the edit script body
//!
//! ## Compressed file layout
//!
//! | Line | Contents |
//! |------|----------|
//! | 1 | header, echoed verbatim |
//! | 2 | blank separator |
//! | 3 | line layout: `n len1 rep1 len2 rep2 ...` (`n` = number of values) |
//! | 4 | lowercase ranges: `count d1 l1 d2 l2 ...` |
//! | 5 | N ranges: `count d1 l1 d2 l2 ...` |
//! | 6 | special characters: `count g1 .. gN unique v1 .. vU order-digits` |
//! | 7 | `initial_offset initial_run_length` |
//! | 8.. | pairs of `base-code digits` / `[-]offset [-]continue_for` |
//!
//! ## Example
//!
//! ```rust
//! use hirgc_decompress::parsing::compressed::parse_compressed_text;
//!
//! let text = ">chr1\n\n2 20 1\n0\n0\n0 0 \n0 0\n";
//! let compressed = parse_compressed_text(text).unwrap();
//! assert_eq!(compressed.metadata.header, b">chr1");
//! assert!(compressed.edit_script.is_empty());
//! ```

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod compressed;
pub mod edit_script;
pub mod int_list;
pub mod metadata;
pub mod reference;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing {what}")]
    MissingLine { line: usize, what: &'static str },

    #[error("line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    #[error("line {line}: edit script ends with an unpaired line")]
    UnpairedLine { line: usize },

    #[error("sequence exceeds the maximum supported length of {limit} bases")]
    SequenceTooLong { limit: usize },
}

impl ParseError {
    pub(crate) fn invalid(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line,
            message: message.into(),
        }
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text input, transparently decompressing gzip/bgzip.
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be opened.
pub fn open_input(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Byte lines with 1-based numbering and line terminators (`\n`, `\r\n`)
/// removed.
pub struct NumberedLines<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> NumberedLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Number of the last line returned (0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Read the next line. `Ok(None)` only at end of input; an empty line is
    /// `Ok(Some(..))` with an empty slice.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the underlying reader fails.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>, ParseError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(&self.buf))
    }

    /// Read a line that must be present.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingLine` at end of input.
    pub fn require(&mut self, what: &'static str) -> Result<&[u8], ParseError> {
        let expected = self.line + 1;
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(ParseError::MissingLine {
                line: expected,
                what,
            }),
        }
    }
}
