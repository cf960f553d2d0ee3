//! Centralized limits and checks.

/// Default cap on reference and reconstructed sequence length (256 Mbases).
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 1 << 28;

/// Check whether a sequence of `len` bases fits under `limit`.
///
/// Returns an error message if it does not, None if it fits.
///
/// # Example
/// ```
/// use hirgc_decompress::utils::validation::check_sequence_length;
///
/// assert!(check_sequence_length(10, 10).is_none());
/// assert!(check_sequence_length(11, 10).is_some());
/// ```
#[must_use]
pub fn check_sequence_length(len: usize, limit: usize) -> Option<String> {
    if len > limit {
        Some(format!(
            "Sequence of {len} bases exceeds maximum of {limit}"
        ))
    } else {
        None
    }
}

/// Check that a line layout covers exactly `len` characters.
///
/// Returns an error message describing the difference, None if they agree.
#[must_use]
pub fn check_layout_total(layout_total: usize, len: usize) -> Option<String> {
    if layout_total == len {
        None
    } else {
        Some(format!(
            "Line layout covers {layout_total} characters but the sequence has {len}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sequence_length() {
        assert!(check_sequence_length(0, 0).is_none());
        assert!(check_sequence_length(DEFAULT_MAX_SEQUENCE_LENGTH, DEFAULT_MAX_SEQUENCE_LENGTH).is_none());
        assert!(check_sequence_length(DEFAULT_MAX_SEQUENCE_LENGTH + 1, DEFAULT_MAX_SEQUENCE_LENGTH).is_some());
    }

    #[test]
    fn test_check_layout_total() {
        assert!(check_layout_total(12, 12).is_none());
        let msg = check_layout_total(10, 12).unwrap();
        assert!(msg.contains("10"));
        assert!(msg.contains("12"));
    }
}
