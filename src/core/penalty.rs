use std::collections::HashMap;

use crate::core::error::AlignError;
use crate::parsing::matrix::parse_matrix_text;
use crate::parsing::ParseError;

/// Reserved symbol standing for "aligned against nothing" in either operand.
pub const GAP: char = '*';

/// Scores for ordered symbol pairs, including pairs against [`GAP`].
///
/// The table is not assumed to be symmetric: `get(a, b)` and `get(b, a)` are
/// independent entries. There is no default score; looking up a pair that was
/// never registered is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyTable {
    scores: HashMap<(char, char), i32>,

    /// Symbols in the order they were first registered
    alphabet: Vec<char>,
}

impl PenaltyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the BLOSUM62 table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if the embedded table is malformed,
    /// which `build.rs` rules out at compile time.
    pub fn blosum62() -> Result<Self, ParseError> {
        const EMBEDDED_BLOSUM62: &str = include_str!("../../matrices/blosum62.txt");
        parse_matrix_text(EMBEDDED_BLOSUM62)
    }

    /// Score for aligning `a` against `b`.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::UnknownPair` if the ordered pair was never set.
    pub fn get(&self, a: char, b: char) -> Result<i32, AlignError> {
        self.scores
            .get(&(a, b))
            .copied()
            .ok_or(AlignError::UnknownPair { a, b })
    }

    /// Register or overwrite the score for the ordered pair `(a, b)`.
    pub fn set(&mut self, a: char, b: char, score: i32) {
        self.note_symbol(a);
        self.note_symbol(b);
        self.scores.insert((a, b), score);
    }

    #[must_use]
    pub fn contains(&self, a: char, b: char) -> bool {
        self.scores.contains_key(&(a, b))
    }

    /// Symbols seen in any registered pair, in first-registration order.
    #[must_use]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Number of registered pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Check that every pair an alignment of `sequence` with itself would
    /// look up is registered: each symbol against [`GAP`] in both orders,
    /// and each ordered pair of its distinct symbols.
    ///
    /// # Errors
    ///
    /// Returns the first missing pair as `AlignError::UnknownPair`.
    pub fn check_symbols(&self, sequence: &str) -> Result<(), AlignError> {
        let mut symbols: Vec<char> = Vec::new();
        for symbol in sequence.chars() {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        for &symbol in &symbols {
            self.get(symbol, GAP)?;
            self.get(GAP, symbol)?;
        }
        for &a in &symbols {
            for &b in &symbols {
                self.get(a, b)?;
            }
        }
        Ok(())
    }

    fn note_symbol(&mut self, symbol: char) {
        if !self.alphabet.contains(&symbol) {
            self.alphabet.push(symbol);
        }
    }
}
