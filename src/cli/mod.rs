//! Command-line interface for prot-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find the best-matching reference for one or more queries
//! - **align**: Align two sequences and show the alignment
//! - **matrix**: Print the penalty matrix in use
//! - **export**: Rewrite a sequence file, optionally cut to the legacy window
//!
//! ## Usage
//!
//! ```text
//! # Best match for a query against a reference file (embedded BLOSUM62)
//! prot-match search --references proteins.txt --query PIEPCMGA
//!
//! # Top 5 matches for every query in a file, as JSON
//! prot-match --format json search -r proteins.txt --query-file queries.txt -n 5
//!
//! # Align two sequences with a custom matrix
//! prot-match align MKTAYIAK KTAYI --matrix pam250.txt
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::penalty::PenaltyTable;
use crate::parsing::matrix::parse_matrix_file;
use crate::utils::validation::find_invalid_symbol;

pub mod align;
pub mod export;
pub mod matrix;
pub mod search;

#[derive(Parser)]
#[command(name = "prot-match")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Find the reference sequence that best matches a query")]
#[command(
    long_about = "prot-match aligns a query sequence against every sequence in a reference file and reports the best match.\n\nScores come from a substitution matrix (BLOSUM62 by default) whose '*' row and column give the gap penalties. Each reference is aligned as the anchored operand: the alignment always ends at the last symbol of the reference, while its span over the query is free."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best-matching reference sequence for each query
    Search(search::SearchArgs),

    /// Align two sequences
    Align(align::AlignArgs),

    /// Print a penalty matrix
    Matrix(matrix::MatrixArgs),

    /// Rewrite a sequence file
    Export(export::ExportArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the matrix at `path`, or the embedded BLOSUM62 matrix when no path is given
pub(crate) fn load_table(path: Option<&Path>) -> anyhow::Result<PenaltyTable> {
    match path {
        Some(path) => parse_matrix_file(path)
            .with_context(|| format!("Failed to load matrix from {}", path.display())),
        None => PenaltyTable::blosum62().context("Embedded BLOSUM62 matrix is invalid"),
    }
}

/// Reject sequences given on the command line that contain the gap symbol or whitespace
pub(crate) fn check_sequence_arg(name: &str, sequence: &str) -> anyhow::Result<()> {
    if let Some(symbol) = find_invalid_symbol(sequence) {
        anyhow::bail!("{name} '{sequence}' contains invalid symbol {symbol:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_embedded_table() {
        let table = load_table(None).unwrap();
        assert_eq!(table.get('W', 'W'), Ok(11));
    }

    #[test]
    fn test_load_missing_table() {
        let err = load_table(Some(Path::new("/nonexistent/matrix.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/matrix.txt"));
    }

    #[test]
    fn test_check_sequence_arg() {
        assert!(check_sequence_arg("Query", "PIEPCMGA").is_ok());
        assert!(check_sequence_arg("Query", "PIE*PC").is_err());
        assert!(check_sequence_arg("Query", "PIE PC").is_err());
    }
}
