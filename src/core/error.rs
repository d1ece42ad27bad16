use thiserror::Error;

/// Failures raised by the alignment engine and the best-match search.
///
/// All variants are deterministic for a given input; retrying never helps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A symbol pair was looked up that the penalty table never registered.
    #[error("No penalty registered for symbol pair ('{a}', '{b}')")]
    UnknownPair { a: char, b: char },

    /// The search was given no reference sequences.
    #[error("Reference collection is empty")]
    EmptyCollection,

    /// An alignment score does not fit in an `i32`.
    #[error("Alignment score {score} overflows a 32-bit score")]
    ScoreOverflow { score: i64 },

    /// A ranking was requested with room for zero matches.
    #[error("Match limit must be at least 1")]
    ZeroLimit,

    /// No reference scored above the search threshold.
    #[error("No reference aligned to query '{query}' with a score above {min_score}")]
    NoAlignmentFound { query: String, min_score: i32 },
}
