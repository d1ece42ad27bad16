//! Core data types for query-anchored protein matching.
//!
//! - [`SequenceRecord`]: A labelled sequence read from a sequence file
//! - [`PenaltyTable`]: Scores for ordered symbol pairs, including the gap symbol
//! - [`AlignError`]: Failures raised by alignment and best-match search
//!
//! ## Gap Symbol
//!
//! The penalty table reserves [`GAP`] (`*`) to score a symbol aligned against
//! nothing. The same symbol marks insertions and deletions in aligned output:
//!
//! ```text
//! reference  ACA
//! query      A*A
//! ```
//!
//! [`SequenceRecord`]: sequence::SequenceRecord
//! [`PenaltyTable`]: penalty::PenaltyTable
//! [`AlignError`]: error::AlignError
//! [`GAP`]: penalty::GAP

pub mod error;
pub mod penalty;
pub mod sequence;
