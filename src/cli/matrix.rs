use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{load_table, OutputFormat};
use crate::core::penalty::PenaltyTable;

#[derive(Args)]
pub struct MatrixArgs {
    /// Penalty matrix file (defaults to the embedded BLOSUM62 matrix)
    #[arg(short, long)]
    pub matrix: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MatrixRow {
    symbol: char,
    /// One entry per alphabet symbol; `None` for unregistered pairs
    scores: Vec<Option<i32>>,
}

pub fn run(args: MatrixArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let table = load_table(args.matrix.as_deref())?;

    match format {
        OutputFormat::Text => print!("{}", render_matrix(&table)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "alphabet": table.alphabet(),
                "rows": matrix_rows(&table),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            let header: Vec<String> = table.alphabet().iter().map(char::to_string).collect();
            println!("\t{}", header.join("\t"));
            for row in matrix_rows(&table) {
                let cells: Vec<String> = row
                    .scores
                    .iter()
                    .map(|s| s.map_or_else(String::new, |s| s.to_string()))
                    .collect();
                println!("{}\t{}", row.symbol, cells.join("\t"));
            }
        }
    }

    Ok(())
}

fn matrix_rows(table: &PenaltyTable) -> Vec<MatrixRow> {
    let alphabet = table.alphabet();
    alphabet
        .iter()
        .map(|&row| MatrixRow {
            symbol: row,
            scores: alphabet.iter().map(|&col| table.get(row, col).ok()).collect(),
        })
        .collect()
}

/// Render `table` in the `$`-header matrix file format, `.` marking unregistered pairs
fn render_matrix(table: &PenaltyTable) -> String {
    let mut out = String::from("$ ");
    let header: Vec<String> = table.alphabet().iter().map(char::to_string).collect();
    out.push_str(&header.join("  "));
    out.push('\n');

    for row in matrix_rows(table) {
        out.push(row.symbol);
        for score in &row.scores {
            match score {
                Some(score) => {
                    let _ = write!(out, " {score:>2}");
                }
                None => out.push_str("  ."),
            }
        }
        out.push('\n');
    }
    out
}
