use std::io::BufRead;

use tracing::debug;

use crate::core::metadata::Metadata;
use crate::core::types::{DeltaRange, LineLayout, LineRun, RangeList, SpecialChars};
use crate::parsing::int_list::{parse_signed, parse_unsigned};
use crate::parsing::{NumberedLines, ParseError};

/// Number of fixed lines before the edit script body
pub const METADATA_LINES: usize = 7;

/// Parse the seven metadata lines at the start of a compressed file.
///
/// # Errors
///
/// Returns `ParseError::MissingLine` if the input ends early and
/// `ParseError::InvalidFormat` if any line is malformed.
pub fn parse_metadata<R: BufRead>(lines: &mut NumberedLines<R>) -> Result<Metadata, ParseError> {
    let header = lines.require("header line")?.to_vec();

    let n = lines.line_number() + 1;
    if !lines.require("blank separator line")?.is_empty() {
        return Err(ParseError::invalid(
            n,
            "expected a blank separator line after the header",
        ));
    }

    let n = lines.line_number() + 1;
    let line_layout = parse_line_layout(n, lines.require("line layout")?)?;

    let n = lines.line_number() + 1;
    let lowercase = parse_range_list(n, lines.require("lowercase ranges")?, "lowercase")?;

    let n = lines.line_number() + 1;
    let n_ranges = parse_range_list(n, lines.require("N ranges")?, "N")?;

    let n = lines.line_number() + 1;
    let special_chars = parse_special_chars(n, lines.require("special characters")?)?;

    let n = lines.line_number() + 1;
    let (initial_offset, initial_run_length) =
        parse_initial_position(n, lines.require("initial reference position")?)?;

    debug!(
        layout_bases = line_layout.total_length(),
        lowercase = lowercase.len(),
        n_ranges = n_ranges.len(),
        special_chars = special_chars.len(),
        initial_offset,
        initial_run_length,
        "Parsed metadata"
    );

    Ok(Metadata {
        header,
        line_layout,
        lowercase,
        n_ranges,
        special_chars,
        initial_offset,
        initial_run_length,
    })
}

/// Parse the line layout: the number of values that follow, then
/// `length repeat` pairs.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the list is malformed or its
/// leading count disagrees with the values present.
pub fn parse_line_layout(line_no: usize, line: &[u8]) -> Result<LineLayout, ParseError> {
    let values = parse_unsigned(line).map_err(|e| ParseError::invalid(line_no, format!("line layout: {e}")))?;
    let (&declared, rest) = values
        .split_first()
        .ok_or_else(|| ParseError::invalid(line_no, "line layout is empty"))?;

    if declared != rest.len() || declared % 2 != 0 {
        return Err(ParseError::invalid(
            line_no,
            format!(
                "line layout declares {declared} values but {} follow",
                rest.len()
            ),
        ));
    }

    let runs = rest
        .chunks_exact(2)
        .map(|pair| LineRun {
            length: pair[0],
            repeat: pair[1],
        })
        .collect();

    Ok(LineLayout::new(runs))
}

/// Parse a cumulative range list: a pair count, then `delta length` pairs.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the list is malformed or the pair
/// count disagrees with the values present.
pub fn parse_range_list(line_no: usize, line: &[u8], name: &str) -> Result<RangeList, ParseError> {
    let values = parse_unsigned(line).map_err(|e| ParseError::invalid(line_no, format!("{name} ranges: {e}")))?;
    let (&count, rest) = values
        .split_first()
        .ok_or_else(|| ParseError::invalid(line_no, format!("{name} ranges are empty")))?;

    if count.checked_mul(2) != Some(rest.len()) {
        return Err(ParseError::invalid(
            line_no,
            format!(
                "{name} ranges declare {count} ranges but {} values follow",
                rest.len()
            ),
        ));
    }

    let ranges = rest
        .chunks_exact(2)
        .map(|pair| DeltaRange {
            start_delta: pair[0],
            length: pair[1],
        })
        .collect();

    Ok(RangeList::new(ranges))
}

/// Parse the special character line.
///
/// Everything before the last space is an integer list (count, `count`
/// gaps, dictionary size, dictionary entries as `char - 'A'`); everything
/// after it is one dictionary index digit per occurrence.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if either part is malformed or the
/// parts disagree.
pub fn parse_special_chars(line_no: usize, line: &[u8]) -> Result<SpecialChars, ParseError> {
    let (list, order_digits) = match line.iter().rposition(|&b| b == b' ') {
        Some(idx) => (&line[..idx], &line[idx + 1..]),
        None => (line, &line[line.len()..]),
    };

    let values = parse_unsigned(list)
        .map_err(|e| ParseError::invalid(line_no, format!("special characters: {e}")))?;
    let (&count, rest) = values
        .split_first()
        .ok_or_else(|| ParseError::invalid(line_no, "special character list is empty"))?;

    if count == 0 {
        // only an optional zero dictionary size may follow
        let whole = parse_unsigned(line)
            .map_err(|e| ParseError::invalid(line_no, format!("special characters: {e}")))?;
        if !matches!(whole.as_slice(), [0] | [0, 0]) {
            return Err(ParseError::invalid(
                line_no,
                "special characters declare no positions but list further values",
            ));
        }
        return Ok(SpecialChars::default());
    }

    if rest.len() <= count {
        return Err(ParseError::invalid(
            line_no,
            format!(
                "special characters declare {count} positions but only {} values follow",
                rest.len()
            ),
        ));
    }
    let (gaps, rest) = rest.split_at(count);
    let (&unique, dictionary) = rest
        .split_first()
        .ok_or_else(|| ParseError::invalid(line_no, "missing special character dictionary size"))?;

    if unique != dictionary.len() {
        return Err(ParseError::invalid(
            line_no,
            format!(
                "special character dictionary declares {unique} entries but {} follow",
                dictionary.len()
            ),
        ));
    }

    let dictionary = dictionary
        .iter()
        .map(|&v| {
            u8::try_from(v)
                .ok()
                .and_then(|v| b'A'.checked_add(v))
                .filter(u8::is_ascii_graphic)
                .ok_or_else(|| {
                    ParseError::invalid(
                        line_no,
                        format!("special character code {v} does not decode to a printable character"),
                    )
                })
        })
        .collect::<Result<Vec<u8>, ParseError>>()?;

    let order = order_digits
        .iter()
        .map(|&d| {
            if d.is_ascii_digit() {
                Ok(d - b'0')
            } else {
                Err(ParseError::invalid(
                    line_no,
                    format!("special character order contains non-digit {:?}", char::from(d)),
                ))
            }
        })
        .collect::<Result<Vec<u8>, ParseError>>()?;

    SpecialChars::from_gaps(gaps, dictionary, order).map_err(|message| ParseError::invalid(line_no, message))
}

/// Parse `initial_offset initial_run_length`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` unless the line holds exactly two
/// integers.
pub fn parse_initial_position(line_no: usize, line: &[u8]) -> Result<(i64, i64), ParseError> {
    let values = parse_signed(line)
        .map_err(|e| ParseError::invalid(line_no, format!("initial reference position: {e}")))?;
    match values.as_slice() {
        &[offset, run_length] => Ok((offset, run_length)),
        _ => Err(ParseError::invalid(
            line_no,
            format!(
                "initial reference position needs 2 values, found {}",
                values.len()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Metadata, ParseError> {
        parse_metadata(&mut NumberedLines::new(text.as_bytes()))
    }

    #[test]
    fn test_parse_metadata() {
        let text = ">chr21 test\n\n4 60 10 35 1\n1 2 3\n1 0 2\n2 3 0 1 17 00\n150 12\n";
        let meta = parse(text).unwrap();

        assert_eq!(meta.header, b">chr21 test");
        assert_eq!(meta.line_layout.total_length(), 635);
        assert_eq!(meta.lowercase.absolute().collect::<Vec<_>>(), vec![2..5]);
        assert_eq!(meta.n_ranges.absolute().collect::<Vec<_>>(), vec![0..2]);
        assert_eq!(meta.special_chars.positions(), &[3, 4]);
        assert_eq!(meta.special_chars.dictionary(), b"R");
        assert_eq!(meta.initial_offset, 150);
        assert_eq!(meta.initial_run_length, 12);
        assert_eq!(meta.initial_copy_length(), 32);
    }

    #[test]
    fn test_parse_metadata_without_overlays() {
        let meta = parse(">x\n\n2 20 1\n0\n0\n0 0 \n0 0\n").unwrap();
        assert!(meta.has_no_overlays());
        assert_eq!(meta.header_lossy(), ">x");
    }

    #[test]
    fn test_missing_line() {
        let err = parse(">x\n\n2 20 1\n0\n0\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingLine { line: 6, .. }));
    }

    #[test]
    fn test_separator_must_be_blank() {
        let err = parse(">x\nACGT\n2 20 1\n0\n0\n0 0 \n0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat { line: 2, .. }));
    }

    #[test]
    fn test_empty_list_line_is_an_error() {
        let err = parse(">x\n\n\n0\n0\n0 0 \n0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat { line: 3, .. }));
    }

    #[test]
    fn test_line_layout_count_mismatch() {
        assert!(parse_line_layout(3, b"4 60 10").is_err());
        assert!(parse_line_layout(3, b"3 60 10 1").is_err());
        assert_eq!(parse_line_layout(3, b"0").unwrap().total_length(), 0);
    }

    #[test]
    fn test_range_list_count_mismatch() {
        assert!(parse_range_list(4, b"2 1 1", "lowercase").is_err());
        assert!(parse_range_list(4, b"0 1", "lowercase").is_err());
        assert!(parse_range_list(4, b"1 a 1", "lowercase").is_err());
    }

    #[test]
    fn test_special_chars_validation() {
        // order digit outside the dictionary
        assert!(parse_special_chars(6, b"1 5 1 17 1").is_err());
        // fewer order digits than occurrences
        assert!(parse_special_chars(6, b"2 5 0 1 17 0").is_err());
        // dictionary size disagrees
        assert!(parse_special_chars(6, b"1 5 2 17 0").is_err());
        // non-digit order entry
        assert!(parse_special_chars(6, b"1 5 1 17 x").is_err());
        // bare zero count
        assert!(parse_special_chars(6, b"0").unwrap().is_empty());
    }

    #[test]
    fn test_zero_special_chars_accept_only_empty_forms() {
        assert!(parse_special_chars(6, b"0 0 ").unwrap().is_empty());
        assert!(parse_special_chars(6, b"0 0").unwrap().is_empty());

        // non-digit where an order digit would go
        assert!(matches!(
            parse_special_chars(6, b"0 x"),
            Err(ParseError::InvalidFormat { line: 6, .. })
        ));
        // gaps, dictionary and order digits with no occurrences
        assert!(matches!(
            parse_special_chars(6, b"0 5 9 1 17 00"),
            Err(ParseError::InvalidFormat { line: 6, .. })
        ));
        // nonzero dictionary size
        assert!(parse_special_chars(6, b"0 1 17 ").is_err());
    }

    #[test]
    fn test_initial_position() {
        assert_eq!(parse_initial_position(7, b"0 0").unwrap(), (0, 0));
        assert_eq!(parse_initial_position(7, b"-3 4").unwrap(), (-3, 4));
        assert!(parse_initial_position(7, b"12").is_err());
        assert!(parse_initial_position(7, b"1 2 3").is_err());
        assert!(parse_initial_position(7, b"").is_err());
    }
}
