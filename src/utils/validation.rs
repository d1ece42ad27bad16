//! Centralized input limits and symbol helpers.

use crate::core::penalty::GAP;

/// Maximum number of records allowed in a single sequence file (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Maximum number of symbols in a single sequence.
///
/// This caps each input line only. One alignment allocates
/// `(len_a + 1) * (len_b + 1)` cells in each of its score and move grids, so
/// two sequences near this limit still need tens of gigabytes.
pub const MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(new_record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Returns an error message if a sequence of `length` symbols is too long.
#[must_use]
pub fn check_sequence_length(length: usize) -> Option<String> {
    if length > MAX_SEQUENCE_LENGTH {
        Some(format!(
            "Sequence of {length} symbols exceeds maximum of {MAX_SEQUENCE_LENGTH}"
        ))
    } else {
        None
    }
}

/// Whether `symbol` is the reserved gap symbol.
///
/// # Examples
///
/// ```
/// use prot_match::utils::validation::is_gap;
///
/// assert!(is_gap('*'));
/// assert!(!is_gap('A'));
/// ```
#[must_use]
pub fn is_gap(symbol: char) -> bool {
    symbol == GAP
}

/// First symbol of `sequence` that is the gap symbol or whitespace, if any.
///
/// Such symbols cannot come from a sequence line and would be mistaken for
/// alignment gaps in the output.
#[must_use]
pub fn find_invalid_symbol(sequence: &str) -> Option<char> {
    sequence
        .chars()
        .find(|&c| is_gap(c) || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }

    #[test]
    fn test_check_sequence_length() {
        assert!(check_sequence_length(MAX_SEQUENCE_LENGTH).is_none());
        assert!(check_sequence_length(MAX_SEQUENCE_LENGTH + 1).is_some());
    }

    #[test]
    fn test_find_invalid_symbol() {
        assert_eq!(find_invalid_symbol("MYPEPTIDE"), None);
        assert_eq!(find_invalid_symbol("MYP*PTIDE"), Some('*'));
        assert_eq!(find_invalid_symbol("MYP PTIDE"), Some(' '));
    }
}
