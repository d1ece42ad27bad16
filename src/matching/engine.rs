use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::error::AlignError;
use crate::core::penalty::PenaltyTable;
use crate::core::sequence::SequenceRecord;
use crate::matching::alignment::{Alignment, AlignmentEngine, Traceback};

/// Result of aligning a query against one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// Position of the reference in the collection
    pub index: usize,

    /// The matched reference
    pub reference: &'a SequenceRecord,

    /// Alignment with the reference as sequence A and the query as sequence B
    pub alignment: Alignment,
}

impl MatchResult<'_> {
    #[must_use]
    pub fn score(&self) -> i32 {
        self.alignment.score
    }

    /// Aligned fragment of the query
    #[must_use]
    pub fn aligned_query(&self) -> &str {
        &self.alignment.aligned_b
    }

    /// Aligned fragment of the reference
    #[must_use]
    pub fn aligned_reference(&self) -> &str {
        &self.alignment.aligned_a
    }
}

/// Default score a reference must exceed to count as a match
pub const DEFAULT_MIN_SCORE: i32 = 0;

/// Configuration for the search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// References must score strictly above this to be reported
    pub min_score: i32,
    /// Backtrace mode used for every alignment
    pub traceback: Traceback,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            traceback: Traceback::default(),
        }
    }
}

/// Searches an ordered reference collection for the best match to a query
pub struct SearchEngine<'a> {
    references: &'a [SequenceRecord],
    aligner: AlignmentEngine<'a>,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    /// Create a new search engine with default configuration
    pub fn new(references: &'a [SequenceRecord], table: &'a PenaltyTable) -> Self {
        Self::with_config(references, table, SearchConfig::default())
    }

    /// Create a new search engine with custom configuration
    pub fn with_config(
        references: &'a [SequenceRecord],
        table: &'a PenaltyTable,
        config: SearchConfig,
    ) -> Self {
        Self {
            references,
            aligner: AlignmentEngine::new(table).with_traceback(config.traceback),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find the single best-scoring reference for `query`.
    ///
    /// Each reference is aligned as sequence A against the query as sequence
    /// B, so the reference is the anchored operand. On equal scores the
    /// earliest reference in the collection wins.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::EmptyCollection` if there are no references,
    /// `AlignError::UnknownPair` if an alignment needs an unregistered symbol
    /// pair, or `AlignError::NoAlignmentFound` if no reference scores above
    /// the configured minimum.
    pub fn find_best(&self, query: &str) -> Result<MatchResult<'a>, AlignError> {
        if self.references.is_empty() {
            return Err(AlignError::EmptyCollection);
        }

        let mut best: Option<MatchResult<'a>> = None;
        for (index, reference) in self.references.iter().enumerate() {
            let alignment = self
                .aligner
                .align_query_anchored(&reference.sequence, query)?;
            trace!(reference = %reference.label, score = alignment.score, "aligned");

            let threshold = best.as_ref().map_or(self.config.min_score, MatchResult::score);
            if alignment.score > threshold {
                best = Some(MatchResult {
                    index,
                    reference,
                    alignment,
                });
            }
        }

        let best = best.ok_or_else(|| AlignError::NoAlignmentFound {
            query: query.to_string(),
            min_score: self.config.min_score,
        })?;
        debug!(
            query,
            reference = %best.reference.label,
            score = best.score(),
            "best match"
        );
        Ok(best)
    }

    /// Score every reference and return up to `limit` matches, best first.
    ///
    /// Matches at or below the configured minimum are dropped. Equal scores
    /// keep collection order.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::ZeroLimit` if `limit` is 0, otherwise the same
    /// errors as [`SearchEngine::find_best`].
    pub fn rank(&self, query: &str, limit: usize) -> Result<Vec<MatchResult<'a>>, AlignError> {
        if limit == 0 {
            return Err(AlignError::ZeroLimit);
        }
        if self.references.is_empty() {
            return Err(AlignError::EmptyCollection);
        }

        let mut results = Vec::new();
        for (index, reference) in self.references.iter().enumerate() {
            let alignment = self
                .aligner
                .align_query_anchored(&reference.sequence, query)?;
            if alignment.score > self.config.min_score {
                results.push(MatchResult {
                    index,
                    reference,
                    alignment,
                });
            }
        }

        if results.is_empty() {
            return Err(AlignError::NoAlignmentFound {
                query: query.to_string(),
                min_score: self.config.min_score,
            });
        }

        // Stable sort keeps collection order on ties
        results.sort_by(|a, b| b.score().cmp(&a.score()));
        results.truncate(limit);
        Ok(results)
    }
}

/// Find the best-scoring reference for `query` with default configuration.
///
/// # Errors
///
/// See [`SearchEngine::find_best`].
pub fn find_best<'a>(
    query: &str,
    references: &'a [SequenceRecord],
    table: &'a PenaltyTable,
) -> Result<MatchResult<'a>, AlignError> {
    SearchEngine::new(references, table).find_best(query)
}
