//! Readers and writers for the flat text formats around the alignment core.
//!
//! - **Sequence files**: `>label` lines each followed by exactly one sequence line
//! - **Penalty matrix files**: a `$` alphabet line followed by one row per symbol
//!
//! Files ending in `.gz` or `.bgz` are decompressed on the fly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prot_match::parsing::matrix::parse_matrix_file;
//! use prot_match::parsing::sequences::parse_sequence_file;
//! use std::path::Path;
//!
//! let references = parse_sequence_file(Path::new("proteins.txt")).unwrap();
//! let table = parse_matrix_file(Path::new("blosum62.txt")).unwrap();
//! ```
//!
//! ## Penalty Matrix Layout
//!
//! ```text
//! $  A  R  *
//! A  4 -1 -4
//! R -1  5 -4
//! * -4 -4  1
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::utils::validation::MAX_RECORDS;

pub mod matrix;
pub mod sequences;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),

    #[error("Sequence '{label}' is too long: {length} symbols")]
    SequenceTooLong { label: String, length: usize },
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text file, decompressing gzip/bgzip input
fn open_text(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("proteins.txt.gz")));
        assert!(is_gzipped(Path::new("proteins.fa.BGZ")));
        assert!(!is_gzipped(Path::new("proteins.txt")));
        assert!(!is_gzipped(Path::new("blosum62")));
    }
}
