//! Alignment engine and best-match search.
//!
//! - [`AlignmentEngine`]: Query-anchored local alignment of one sequence pair
//! - [`SearchEngine`]: Best match of a query across an ordered reference collection
//!
//! ## Algorithm
//!
//! For each reference, a dynamic-programming score matrix and a parallel move
//! matrix are filled with linear gap costs taken from the penalty table:
//!
//! 1. **Fill**: each cell takes the best of up, left and diagonal, floored at 0
//! 2. **Anchor**: the best cell is searched only in the reference's last row
//! 3. **Backtrace**: moves are followed back to the matrix boundary
//!
//! The search keeps the first reference with the strictly highest score.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prot_match::{PenaltyTable, SearchEngine, SequenceRecord};
//!
//! let table = PenaltyTable::blosum62().unwrap();
//! let references = vec![
//!     SequenceRecord::new("sp|P1", "MKTAYIAKQRQISFVKSHFSRQ"),
//!     SequenceRecord::new("sp|P2", "MYPEPTIDEWITHQRS"),
//! ];
//!
//! let engine = SearchEngine::new(&references, &table);
//! let best = engine.find_best("PEPTIDE").unwrap();
//! println!("{} {}", best.reference.label, best.score());
//! ```

pub mod alignment;
pub mod engine;
