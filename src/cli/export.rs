use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::parsing::sequences::{
    parse_sequence_file, save_sequence_file, LEGACY_WINDOW_START, LEGACY_WINDOW_WIDTH,
};

#[derive(Args)]
pub struct ExportArgs {
    /// Sequence file to read
    #[arg(required = true)]
    pub input: PathBuf,

    /// File to write
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Keep only the 10 symbols starting at offset 10 of each sequence
    #[arg(long)]
    pub legacy_window: bool,
}

pub fn run(args: ExportArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let records = parse_sequence_file(&args.input)
        .with_context(|| format!("Failed to read sequences from {}", args.input.display()))?;

    let written = save_sequence_file(&args.output, &records, args.legacy_window)
        .with_context(|| format!("Failed to write sequences to {}", args.output.display()))?;

    if args.legacy_window {
        info!(
            start = LEGACY_WINDOW_START,
            width = LEGACY_WINDOW_WIDTH,
            "Cut sequences to legacy window"
        );
    }

    match format {
        OutputFormat::Text => println!(
            "Wrote {written} of {} sequences to {}",
            records.len(),
            args.output.display()
        ),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": args.input,
                "output": args.output,
                "records": records.len(),
                "written": written,
                "legacy_window": args.legacy_window,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("input\toutput\trecords\twritten");
            println!(
                "{}\t{}\t{}\t{written}",
                args.input.display(),
                args.output.display(),
                records.len()
            );
        }
    }

    Ok(())
}
