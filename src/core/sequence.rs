use serde::{Deserialize, Serialize};

/// A labelled sequence as read from a sequence file.
///
/// Records are never deduplicated: two records may share a label or a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Identifying label (text after `>` in the sequence file)
    pub label: String,

    /// Symbols, exactly as they appeared in the input
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(label: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of symbols in the sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Copy of this record keeping only the symbols in `start..start + width`.
    ///
    /// The window is clamped to the sequence, so a window past the end yields
    /// an empty sequence rather than an error.
    #[must_use]
    pub fn windowed(&self, start: usize, width: usize) -> Self {
        let sequence = self.sequence.chars().skip(start).take(width).collect();
        Self {
            label: self.label.clone(),
            sequence,
        }
    }
}
