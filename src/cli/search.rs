use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::{check_sequence_arg, load_table, OutputFormat};
use crate::core::error::AlignError;
use crate::core::sequence::SequenceRecord;
use crate::matching::alignment::Traceback;
use crate::matching::engine::{MatchResult, SearchConfig, SearchEngine, DEFAULT_MIN_SCORE};
use crate::parsing::sequences::parse_sequence_file;

#[derive(Args)]
pub struct SearchArgs {
    /// Reference sequence file (`>label` line followed by one sequence line)
    #[arg(short, long, required = true)]
    pub references: PathBuf,

    /// Query sequence (can be repeated)
    #[arg(short, long = "query")]
    pub queries: Vec<String>,

    /// File of query sequences, in the same format as the references
    #[arg(long)]
    pub query_file: Option<PathBuf>,

    /// Penalty matrix file (defaults to the embedded BLOSUM62 matrix)
    #[arg(short, long)]
    pub matrix: Option<PathBuf>,

    /// Maximum number of matches to report per query
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_matches: u32,

    /// References must score strictly above this to be reported
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE, allow_hyphen_values = true)]
    pub min_score: i32,

    /// Where the alignment backtrace stops
    #[arg(long, value_enum, default_value = "boundary")]
    pub traceback: Traceback,
}

/// Matches found for one query
#[derive(Debug, Serialize)]
struct QueryReport {
    query_label: String,
    query: String,
    matches: Vec<MatchRow>,
}

#[derive(Debug, Serialize)]
struct MatchRow {
    rank: usize,
    index: usize,
    reference: String,
    score: i32,
    aligned_query: String,
    aligned_reference: String,
    identities: usize,
    gaps: usize,
}

impl MatchRow {
    fn new(rank: usize, result: &MatchResult<'_>) -> Self {
        Self {
            rank,
            index: result.index,
            reference: result.reference.label.clone(),
            score: result.score(),
            aligned_query: result.aligned_query().to_string(),
            aligned_reference: result.aligned_reference().to_string(),
            identities: result.alignment.identities(),
            gaps: result.alignment.gaps(),
        }
    }
}

pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = load_table(args.matrix.as_deref())?;
    let references = parse_sequence_file(&args.references).with_context(|| {
        format!("Failed to read references from {}", args.references.display())
    })?;
    let queries = collect_queries(&args)?;

    // Fail before searching if any input uses a symbol the matrix lacks
    for query in &queries {
        table.check_symbols(&query.sequence).with_context(|| {
            format!("Query '{}' uses symbols the matrix does not score", query.label)
        })?;
    }
    for reference in &references {
        table.check_symbols(&reference.sequence).with_context(|| {
            format!("Reference '{}' uses symbols the matrix does not score", reference.label)
        })?;
    }

    info!(
        references = references.len(),
        queries = queries.len(),
        symbols = table.alphabet().len(),
        "Loaded inputs"
    );

    let config = SearchConfig {
        min_score: args.min_score,
        traceback: args.traceback,
    };
    let engine = SearchEngine::with_config(&references, &table, config);
    let limit = args.max_matches as usize;

    let mut reports = Vec::with_capacity(queries.len());
    for query in &queries {
        let start = Instant::now();
        let found = if limit == 1 {
            engine.find_best(&query.sequence).map(|best| vec![best])
        } else {
            engine.rank(&query.sequence, limit)
        };
        debug!(query = %query.label, elapsed = ?start.elapsed(), "Searched references");

        let matches = match found {
            Ok(matches) => matches,
            // Reported per query; the remaining queries still run
            Err(err @ AlignError::NoAlignmentFound { .. }) => {
                warn!(query = %query.label, "{err}");
                Vec::new()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to search query '{}'", query.label));
            }
        };

        reports.push(QueryReport {
            query_label: query.label.clone(),
            query: query.sequence.clone(),
            matches: matches
                .iter()
                .enumerate()
                .map(|(i, m)| MatchRow::new(i + 1, m))
                .collect(),
        });
    }

    match format {
        OutputFormat::Text => print_text_results(&reports, verbose),
        OutputFormat::Json => print_json_results(&reports, &config)?,
        OutputFormat::Tsv => print_tsv_results(&reports),
    }

    Ok(())
}

/// Queries from `--query` (labelled by their own sequence) followed by those in `--query-file`
fn collect_queries(args: &SearchArgs) -> anyhow::Result<Vec<SequenceRecord>> {
    let mut queries = Vec::new();
    for query in &args.queries {
        check_sequence_arg("Query", query)?;
        queries.push(SequenceRecord::new(query.as_str(), query.as_str()));
    }

    if let Some(path) = &args.query_file {
        let records = parse_sequence_file(path)
            .with_context(|| format!("Failed to read queries from {}", path.display()))?;
        for record in &records {
            check_sequence_arg(&format!("Query {}", record.label), &record.sequence)?;
        }
        queries.extend(records);
    }

    if queries.is_empty() {
        anyhow::bail!("No queries given; use --query or --query-file");
    }
    Ok(queries)
}

fn print_text_results(reports: &[QueryReport], verbose: bool) {
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Query: {}", report.query_label);

        if report.matches.is_empty() {
            println!("   No matching reference found.");
            continue;
        }

        for row in &report.matches {
            println!("\n#{} {} (score {})", row.rank, row.reference, row.score);
            println!("   Query:     {}", row.aligned_query);
            println!("   Reference: {}", row.aligned_reference);
            if verbose {
                println!(
                    "   Identities: {}/{}  Gaps: {}  Index: {}",
                    row.identities,
                    row.aligned_query.chars().count(),
                    row.gaps,
                    row.index
                );
            }
        }
    }
}

fn print_json_results(reports: &[QueryReport], config: &SearchConfig) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "config": config,
        "queries": reports,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(reports: &[QueryReport]) {
    println!("query\trank\treference\tscore\taligned_query\taligned_reference\tidentities\tgaps");
    for report in reports {
        for row in &report.matches {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                report.query_label,
                row.rank,
                row.reference,
                row.score,
                row.aligned_query,
                row.aligned_reference,
                row.identities,
                row.gaps
            );
        }
    }
}
