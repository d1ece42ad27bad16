//! # prot-match
//!
//! A library for finding the reference sequence that best matches a query.
//!
//! Each reference in an ordered collection is aligned against the query with a
//! query-anchored local alignment: a Smith-Waterman style dynamic program whose
//! best cell is taken from the final row only, so the reference (the first
//! operand) is always consumed up to its last symbol while its span over the
//! query is free. Substitution and gap scores come from a [`PenaltyTable`]
//! keyed by ordered symbol pairs, with [`GAP`] (`*`) standing for a gap.
//!
//! ## Features
//!
//! - **Embedded BLOSUM62**: the standard protein matrix is compiled in
//! - **Custom matrices**: load any `$`-header matrix file, plain or gzipped
//! - **Deterministic ties**: the earliest reference wins on equal scores
//! - **Ranking**: report the top N references, not only the best one
//!
//! ## Example
//!
//! ```rust,no_run
//! use prot_match::{find_best, PenaltyTable, SequenceRecord};
//!
//! let table = PenaltyTable::blosum62().unwrap();
//! let references = vec![
//!     SequenceRecord::new("p1", "MKTAYIAKQRQISFVKSHFSRQ"),
//!     SequenceRecord::new("p2", "PIEPCMGAKLSGW"),
//! ];
//!
//! let best = find_best("PIEPCMGA", &references, &table).unwrap();
//! println!("{}: {}", best.reference.label, best.score());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Penalty table, sequence records, and alignment errors
//! - [`matching`]: Alignment engine and best-match search
//! - [`parsing`]: Readers and writers for sequence and matrix files
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Input limits and symbol helpers

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::error::AlignError;
pub use crate::core::penalty::{PenaltyTable, GAP};
pub use crate::core::sequence::SequenceRecord;
pub use crate::matching::alignment::{align, Alignment, AlignmentEngine, Traceback};
pub use crate::matching::engine::{find_best, MatchResult, SearchConfig, SearchEngine};
