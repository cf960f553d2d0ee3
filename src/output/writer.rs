use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::core::types::LineLayout;
use crate::output::WriteError;
use crate::utils::validation::check_layout_total;

/// Write the header, a blank line, then the sequence wrapped by `layout`.
///
/// The layout is checked against the sequence before anything is written.
///
/// # Errors
///
/// Returns `WriteError::LayoutMismatch` if the layout does not cover the
/// sequence exactly, or `WriteError::Io` if writing fails.
pub fn write_sequence<W: Write>(
    writer: &mut W,
    header: &[u8],
    sequence: &[u8],
    layout: &LineLayout,
) -> Result<(), WriteError> {
    let expected = layout.total_length();
    if let Some(message) = check_layout_total(expected, sequence.len()) {
        return Err(WriteError::LayoutMismatch(message));
    }

    writer.write_all(header)?;
    writer.write_all(b"\n\n")?;

    let mut rest = sequence;
    for length in layout.line_lengths() {
        let (line, tail) = rest.split_at(length);
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
        rest = tail;
    }
    writer.flush()?;

    Ok(())
}

/// Write the reconstructed target to `path`, or to stdout if `path` is `-`.
///
/// The layout is checked before the file is created, so a mismatch leaves
/// any existing file untouched.
///
/// # Errors
///
/// As [`write_sequence`], plus `WriteError::Io` if the file cannot be
/// created.
pub fn write_sequence_to_path(
    path: &Path,
    header: &[u8],
    sequence: &[u8],
    layout: &LineLayout,
) -> Result<(), WriteError> {
    if let Some(message) = check_layout_total(layout.total_length(), sequence.len()) {
        return Err(WriteError::LayoutMismatch(message));
    }

    if path.as_os_str() == "-" {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_sequence(&mut out, header, sequence, layout)?;
    } else {
        let mut out = BufWriter::new(File::create(path)?);
        write_sequence(&mut out, header, sequence, layout)?;
        debug!(path = %path.display(), bytes = sequence.len(), "Wrote sequence");
    }
    Ok(())
}
