use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{check_sequence_arg, load_table, OutputFormat};
use crate::matching::alignment::{Alignment, AlignmentEngine, Traceback};

#[derive(Args)]
pub struct AlignArgs {
    /// Sequence A, consumed up to its last symbol
    #[arg(required = true)]
    pub seq_a: String,

    /// Sequence B
    #[arg(required = true)]
    pub seq_b: String,

    /// Penalty matrix file (defaults to the embedded BLOSUM62 matrix)
    #[arg(short, long)]
    pub matrix: Option<PathBuf>,

    /// Where the alignment backtrace stops
    #[arg(long, value_enum, default_value = "boundary")]
    pub traceback: Traceback,
}

pub fn run(args: AlignArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_sequence_arg("Sequence A", &args.seq_a)?;
    check_sequence_arg("Sequence B", &args.seq_b)?;
    let table = load_table(args.matrix.as_deref())?;

    let alignment = AlignmentEngine::new(&table)
        .with_traceback(args.traceback)
        .align_query_anchored(&args.seq_a, &args.seq_b)
        .context("Alignment failed")?;

    match format {
        OutputFormat::Text => print_text_result(&alignment, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&alignment)?),
        OutputFormat::Tsv => {
            println!("score\taligned_a\taligned_b\tidentities\tgaps");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                alignment.score,
                alignment.aligned_a,
                alignment.aligned_b,
                alignment.identities(),
                alignment.gaps()
            );
        }
    }

    Ok(())
}

fn print_text_result(alignment: &Alignment, verbose: bool) {
    println!("Score: {}", alignment.score);
    if alignment.is_empty() {
        println!("No positive-scoring alignment.");
        return;
    }

    println!("   A: {}", alignment.aligned_a);
    println!("      {}", match_line(alignment));
    println!("   B: {}", alignment.aligned_b);

    if verbose {
        println!(
            "\nLength: {}  Identities: {}  Gaps: {}",
            alignment.len(),
            alignment.identities(),
            alignment.gaps()
        );
    }
}

/// `|` under identical columns, space elsewhere
fn match_line(alignment: &Alignment) -> String {
    alignment
        .aligned_a
        .chars()
        .zip(alignment.aligned_b.chars())
        .map(|(a, b)| if a == b { '|' } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_line() {
        let alignment = Alignment {
            score: 3,
            aligned_a: "ACA".to_string(),
            aligned_b: "A*A".to_string(),
        };
        assert_eq!(match_line(&alignment), "| |");
    }
}
