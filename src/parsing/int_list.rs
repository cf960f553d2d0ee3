//! The run-length integer list format used throughout the compressed header.
//!
//! Digits accumulate left to right; a single space ends the current value;
//! the end of the line ends the last one. There is no quoting or escaping.
//! Signed lists additionally accept one `-` at the start of each field, and
//! the sign applies to that field only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntListError {
    #[error("expected a list of integers, found an empty line")]
    Empty,

    #[error("unexpected character {found:?} at column {column}")]
    UnexpectedChar { column: usize, found: char },

    #[error("missing value at column {column}")]
    MissingValue { column: usize },

    #[error("value ending at column {column} is too large")]
    Overflow { column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Unsigned,
    Signed,
}

/// Parse a space-delimited list of non-negative integers.
///
/// A single trailing space is tolerated.
///
/// # Errors
///
/// Returns `IntListError` on an empty line, a non-digit, an empty field
/// (leading or doubled space) or a value that overflows.
pub fn parse_unsigned(line: &[u8]) -> Result<Vec<usize>, IntListError> {
    parse_fields(line, Sign::Unsigned)?
        .into_iter()
        .map(|(value, column)| usize::try_from(value).map_err(|_| IntListError::Overflow { column }))
        .collect()
}

/// Parse a space-delimited list of integers that may carry a leading `-`.
///
/// # Errors
///
/// As [`parse_unsigned`]; a `-` anywhere but the start of a field is an
/// unexpected character.
pub fn parse_signed(line: &[u8]) -> Result<Vec<i64>, IntListError> {
    Ok(parse_fields(line, Sign::Signed)?
        .into_iter()
        .map(|(value, _)| value)
        .collect())
}

/// Values paired with the column of their last character.
fn parse_fields(line: &[u8], sign: Sign) -> Result<Vec<(i64, usize)>, IntListError> {
    if line.is_empty() {
        return Err(IntListError::Empty);
    }

    let line = line.strip_suffix(b" ").unwrap_or(line);
    let mut values = Vec::new();
    let mut current: i64 = 0;
    let mut negative = false;
    let mut digits = 0usize;

    for (i, &c) in line.iter().enumerate() {
        let column = i + 1;
        match c {
            b'0'..=b'9' => {
                current = current
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(c - b'0')))
                    .ok_or(IntListError::Overflow { column })?;
                digits += 1;
            }
            b' ' => {
                if digits == 0 {
                    return Err(IntListError::MissingValue { column });
                }
                values.push((if negative { -current } else { current }, i));
                current = 0;
                negative = false;
                digits = 0;
            }
            b'-' if sign == Sign::Signed && digits == 0 && !negative => {
                negative = true;
            }
            _ => {
                return Err(IntListError::UnexpectedChar {
                    column,
                    found: char::from(c),
                })
            }
        }
    }

    if digits == 0 {
        return Err(IntListError::MissingValue {
            column: line.len() + 1,
        });
    }
    values.push((if negative { -current } else { current }, line.len()));

    Ok(values)
}
