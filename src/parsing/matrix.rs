//! Reader for penalty matrix files.
//!
//! One line starting with `$` lists the alphabet in column order (the first
//! character of each whitespace-separated token). Every following non-blank
//! line starts with a row symbol and carries one integer per column, so the
//! k-th value on row `r` is the score for `(r, alphabet[k])`. Lines starting
//! with `#` are comments. Rows may be shorter than the alphabet; the missing
//! pairs stay unregistered.

use std::io::Read;
use std::path::Path;

use crate::core::penalty::PenaltyTable;
use crate::parsing::{open_text, ParseError};

/// Parse a penalty matrix file, decompressing `.gz`/`.bgz` input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if the content is not a valid matrix.
pub fn parse_matrix_file(path: &Path) -> Result<PenaltyTable, ParseError> {
    let mut text = String::new();
    open_text(path)?.read_to_string(&mut text)?;
    parse_matrix_text(&text)
}

/// Parse a penalty matrix from text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row appears before the alphabet
/// line, the alphabet line is repeated or empty, a row has more values than
/// the alphabet has symbols, a value is not an integer, or no scores are found.
pub fn parse_matrix_text(text: &str) -> Result<PenaltyTable, ParseError> {
    let mut table = PenaltyTable::new();
    let mut columns: Option<Vec<char>> = None;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if let Some(rest) = line.strip_prefix('$') {
            if columns.is_some() {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {line_num} repeats the '$' alphabet line"
                )));
            }
            let symbols: Vec<char> = rest
                .split_whitespace()
                .filter_map(|token| token.chars().next())
                .collect();
            if symbols.is_empty() {
                return Err(ParseError::InvalidFormat(format!(
                    "Alphabet line {line_num} lists no symbols"
                )));
            }
            columns = Some(symbols);
            continue;
        }

        let Some(columns) = columns.as_deref() else {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} appears before the '$' alphabet line"
            )));
        };

        let mut chars = line.chars();
        let Some(row) = chars.next() else {
            continue;
        };

        for (k, token) in chars.as_str().split_whitespace().enumerate() {
            let score: i32 = token.parse().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid score on line {line_num}: '{token}'"
                ))
            })?;
            let column = columns.get(k).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Line {line_num} has more than {} scores",
                    columns.len()
                ))
            })?;
            table.set(row, *column, score);
        }
    }

    if columns.is_none() {
        return Err(ParseError::InvalidFormat(
            "No '$' alphabet line found".to_string(),
        ));
    }
    if table.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No scores found in matrix".to_string(),
        ));
    }

    Ok(table)
}
