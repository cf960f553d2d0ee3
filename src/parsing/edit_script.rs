use std::io::BufRead;

use tracing::debug;

use crate::core::types::{Base, EditScript, Mismatch};
use crate::parsing::int_list::parse_signed;
use crate::parsing::{NumberedLines, ParseError};

/// Parse the edit script body: every remaining line, in pairs.
///
/// End of input between pairs ends the script. An empty first line is an
/// empty literal run, not the end of the script.
///
/// # Errors
///
/// Returns `ParseError::UnpairedLine` if the input ends after the first line
/// of a pair and `ParseError::InvalidFormat` if either line is malformed.
pub fn parse_edit_script<R: BufRead>(lines: &mut NumberedLines<R>) -> Result<EditScript, ParseError> {
    let mut mismatches = Vec::new();

    loop {
        let bases_line_no = lines.line_number() + 1;
        let mismatched_bases = match lines.next_line()? {
            Some(line) => parse_bases(bases_line_no, line)?,
            None => break,
        };

        let values_line_no = lines.line_number() + 1;
        let Some(line) = lines.next_line()? else {
            return Err(ParseError::UnpairedLine {
                line: bases_line_no,
            });
        };
        let (offset_from_prev, continue_for) = parse_offsets(values_line_no, line)?;

        mismatches.push(Mismatch {
            mismatched_bases,
            offset_from_prev,
            continue_for,
        });
    }

    debug!(records = mismatches.len(), "Parsed edit script");
    Ok(EditScript::new(mismatches))
}

/// Parse a line of base codes, one digit `0..=3` per base.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on any other character.
pub fn parse_bases(line_no: usize, line: &[u8]) -> Result<Vec<Base>, ParseError> {
    line.iter()
        .enumerate()
        .map(|(i, &d)| {
            Base::from_digit(d).ok_or_else(|| {
                ParseError::invalid(
                    line_no,
                    format!(
                        "invalid base code {:?} at column {}",
                        char::from(d),
                        i + 1
                    ),
                )
            })
        })
        .collect()
}

/// Parse `[-]offset_from_prev [-]continue_for`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` unless the line holds exactly two
/// signed integers.
pub fn parse_offsets(line_no: usize, line: &[u8]) -> Result<(i64, i64), ParseError> {
    let values = parse_signed(line).map_err(|e| ParseError::invalid(line_no, format!("edit record: {e}")))?;
    match values.as_slice() {
        &[offset, continue_for] => Ok((offset, continue_for)),
        _ => Err(ParseError::invalid(
            line_no,
            format!("edit record needs 2 values, found {}", values.len()),
        )),
    }
}
