//! Query-anchored local alignment.
//!
//! A Smith-Waterman style fill with linear, symbol-pair-driven gap costs, where
//! the best cell is searched only in the final row. Sequence A is therefore
//! anchored at its end, while the span of sequence B is free.
//!
//! The move for each cell is chosen among up, left and diagonal *before* the
//! zero floor is applied, so cells whose clamped score is 0 still carry a move.
//! With [`Traceback::Boundary`] (the default) the backtrace follows those moves
//! until it reaches row 0 or column 0, which can carry the alignment through
//! zero-score regions. [`Traceback::UntilZero`] stops at the first zero-score
//! cell instead, as classic Smith-Waterman does.

use serde::{Deserialize, Serialize};

use crate::core::error::AlignError;
use crate::core::penalty::{PenaltyTable, GAP};

/// Where the backtrace stops
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Traceback {
    /// Follow recorded moves until row 0 or column 0
    #[default]
    Boundary,
    /// Stop at the first cell whose score is 0
    UntilZero,
}

/// One alignment between sequence A and sequence B.
///
/// Both aligned strings have the same length; [`GAP`] marks a symbol of the
/// other sequence aligned against nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// Score of the best final-row cell, never negative
    pub score: i32,

    /// Aligned fragment of sequence A
    pub aligned_a: String,

    /// Aligned fragment of sequence B
    pub aligned_b: String,
}

impl Alignment {
    fn empty() -> Self {
        Self {
            score: 0,
            aligned_a: String::new(),
            aligned_b: String::new(),
        }
    }

    /// Number of alignment columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.aligned_a.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    /// Columns where both fragments carry the same symbol
    #[must_use]
    pub fn identities(&self) -> usize {
        self.columns().filter(|(a, b)| a == b && *a != GAP).count()
    }

    /// Columns where either fragment carries a gap
    #[must_use]
    pub fn gaps(&self) -> usize {
        self.columns().filter(|(a, b)| *a == GAP || *b == GAP).count()
    }

    fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.aligned_a.chars().zip(self.aligned_b.chars())
    }
}

/// Aligns sequence pairs against one shared penalty table
#[derive(Debug, Clone, Copy)]
pub struct AlignmentEngine<'a> {
    table: &'a PenaltyTable,
    traceback: Traceback,
}

impl<'a> AlignmentEngine<'a> {
    /// Create an engine with the default [`Traceback::Boundary`] mode
    pub fn new(table: &'a PenaltyTable) -> Self {
        Self {
            table,
            traceback: Traceback::default(),
        }
    }

    #[must_use]
    pub fn with_traceback(mut self, traceback: Traceback) -> Self {
        self.traceback = traceback;
        self
    }

    #[must_use]
    pub fn table(&self) -> &'a PenaltyTable {
        self.table
    }

    /// Align `seq_a` (consumed up to its last symbol) against `seq_b`.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::UnknownPair` if the fill needs a symbol pair the
    /// table does not define, or `AlignError::ScoreOverflow` if the best
    /// score does not fit in an `i32`.
    pub fn align_query_anchored(&self, seq_a: &str, seq_b: &str) -> Result<Alignment, AlignError> {
        let a: Vec<char> = seq_a.chars().collect();
        let b: Vec<char> = seq_b.chars().collect();
        if a.is_empty() || b.is_empty() {
            return Ok(Alignment::empty());
        }

        let profile = ScoreProfile::build(&a, &b, self.table)?;
        let matrices = DpMatrices::fill(&profile, a.len(), b.len());

        let (best, best_j) = matrices.best_in_final_row();
        if best == 0 {
            return Ok(Alignment::empty());
        }
        let score = i32::try_from(best).map_err(|_| AlignError::ScoreOverflow { score: best })?;

        let (aligned_a, aligned_b) = matrices.backtrace(&a, &b, best_j, self.traceback);
        Ok(Alignment {
            score,
            aligned_a,
            aligned_b,
        })
    }
}

/// Align `seq_a` against `seq_b` with the default backtrace.
///
/// # Errors
///
/// Returns `AlignError::UnknownPair` if `table` lacks a pair the fill needs,
/// or `AlignError::ScoreOverflow` if the best score does not fit in an `i32`.
pub fn align(seq_a: &str, seq_b: &str, table: &PenaltyTable) -> Result<Alignment, AlignError> {
    AlignmentEngine::new(table).align_query_anchored(seq_a, seq_b)
}

/// Predecessor of a DP cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Stop,
    Diagonal,
    Up,
    Left,
}

/// Left only wins if strictly greater than up; diagonal wins any tie.
fn pick_step(up: i64, left: i64, diag: i64) -> Step {
    let (side, side_step) = if left > up {
        (left, Step::Left)
    } else {
        (up, Step::Up)
    };
    if side > diag {
        side_step
    } else {
        Step::Diagonal
    }
}

/// Penalty lookups resolved once per alignment, so the fill cannot fail.
///
/// Every (A symbol, B symbol) pair is visited by the fill, so resolving them
/// up front fails for exactly the inputs the fill would fail on.
struct ScoreProfile {
    /// `get(A[i], GAP)` per row
    up: Vec<i32>,
    /// `get(GAP, B[j])` per column
    left: Vec<i32>,
    /// Index into `subst` for each row
    row_symbol: Vec<usize>,
    /// `get(a, B[j])` per column, one vector per distinct symbol of A
    subst: Vec<Vec<i32>>,
}

impl ScoreProfile {
    fn build(a: &[char], b: &[char], table: &PenaltyTable) -> Result<Self, AlignError> {
        let left = b
            .iter()
            .map(|&sym| table.get(GAP, sym))
            .collect::<Result<Vec<_>, _>>()?;

        let mut up = Vec::with_capacity(a.len());
        let mut row_symbol = Vec::with_capacity(a.len());
        let mut symbols: Vec<char> = Vec::new();
        let mut subst: Vec<Vec<i32>> = Vec::new();

        for &sym in a {
            up.push(table.get(sym, GAP)?);
            let idx = if let Some(idx) = symbols.iter().position(|&s| s == sym) {
                idx
            } else {
                let scores = b
                    .iter()
                    .map(|&other| table.get(sym, other))
                    .collect::<Result<Vec<_>, _>>()?;
                symbols.push(sym);
                subst.push(scores);
                symbols.len() - 1
            };
            row_symbol.push(idx);
        }

        Ok(Self {
            up,
            left,
            row_symbol,
            subst,
        })
    }
}

/// Row-major grid of `(rows) x (cols)` cells
struct Grid<T> {
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> T {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: T) {
        self.cells[i * self.cols + j] = value;
    }
}

/// Score and move matrices for one alignment.
///
/// Scores are summed in `i64` so that any `i32` table stays exact.
struct DpMatrices {
    rows: usize,
    cols: usize,
    scores: Grid<i64>,
    moves: Grid<Step>,
}

impl DpMatrices {
    /// Fill both matrices; row and column 0 stay at score 0 with no move.
    fn fill(profile: &ScoreProfile, len_a: usize, len_b: usize) -> Self {
        let rows = len_a + 1;
        let cols = len_b + 1;
        let mut scores = Grid::new(rows, cols, 0i64);
        let mut moves = Grid::new(rows, cols, Step::Stop);

        for i in 1..rows {
            let up_cost = i64::from(profile.up[i - 1]);
            let subst = &profile.subst[profile.row_symbol[i - 1]];
            for j in 1..cols {
                let up = scores.get(i - 1, j) + up_cost;
                let left = scores.get(i, j - 1) + i64::from(profile.left[j - 1]);
                let diag = scores.get(i - 1, j - 1) + i64::from(subst[j - 1]);

                moves.set(i, j, pick_step(up, left, diag));
                scores.set(i, j, up.max(left).max(diag).max(0));
            }
        }

        Self {
            rows,
            cols,
            scores,
            moves,
        }
    }

    /// Highest score in the last row and its column; the first column wins ties.
    fn best_in_final_row(&self) -> (i64, usize) {
        let last = self.rows - 1;
        let mut best = (0, 0);
        for j in 1..self.cols {
            let score = self.scores.get(last, j);
            if score > best.0 {
                best = (score, j);
            }
        }
        best
    }

    fn backtrace(
        &self,
        a: &[char],
        b: &[char],
        best_j: usize,
        traceback: Traceback,
    ) -> (String, String) {
        let mut i = self.rows - 1;
        let mut j = best_j;
        let mut out_a: Vec<char> = Vec::new();
        let mut out_b: Vec<char> = Vec::new();

        while i > 0 && j > 0 {
            if traceback == Traceback::UntilZero && self.scores.get(i, j) == 0 {
                break;
            }
            match self.moves.get(i, j) {
                Step::Diagonal => {
                    out_a.push(a[i - 1]);
                    out_b.push(b[j - 1]);
                    i -= 1;
                    j -= 1;
                }
                Step::Up => {
                    out_a.push(a[i - 1]);
                    out_b.push(GAP);
                    i -= 1;
                }
                Step::Left => {
                    out_a.push(GAP);
                    out_b.push(b[j - 1]);
                    j -= 1;
                }
                Step::Stop => break,
            }
        }

        (out_a.into_iter().rev().collect(), out_b.into_iter().rev().collect())
    }
}
