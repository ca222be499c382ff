use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::thresholds::{validate_threshold_lists, ThresholdGrid};
use crate::matching::comparator::{self, ComparisonResult};
use crate::matching::merge::merge_other;
use crate::matching::selector::select_interest;
use crate::parsing::m9::M9Reader;

#[derive(Args)]
pub struct CompareArgs {
    /// Search results against the database of interest (m9 tabular)
    #[arg(required = true)]
    pub interest: PathBuf,

    /// Search results against the other database (m9 tabular)
    #[arg(required = true)]
    pub other: PathBuf,

    /// Directory for the report files (created if absent)
    #[arg(short, long, default_value = "blast-results-compare")]
    pub output_dir: PathBuf,

    /// Minimum percent identities accepted in the interest results
    #[arg(long, value_delimiter = ',', default_value = "70")]
    pub interest_pcts: Vec<u32>,

    /// Minimum alignment lengths accepted in the interest results
    #[arg(long, value_delimiter = ',', default_value = "50")]
    pub interest_lengths: Vec<u64>,

    /// Minimum percent identities accepted in the other results
    /// (defaults to the interest values; must match their count)
    #[arg(long, value_delimiter = ',')]
    pub other_pcts: Option<Vec<u32>>,

    /// Minimum alignment lengths accepted in the other results
    /// (defaults to the interest values; must match their count)
    #[arg(long, value_delimiter = ',')]
    pub other_lengths: Option<Vec<u64>>,

    /// Also write per-subject hit tallies for the interest database
    #[arg(long)]
    pub hits_to_first: bool,

    /// Also write per-subject hit tallies for the other database
    #[arg(long)]
    pub hits_to_second: bool,
}

/// Execute the compare subcommand
///
/// # Errors
///
/// Returns an error if the threshold configuration is inconsistent, either
/// result file cannot be parsed, or a report file cannot be written.
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let other_pcts = args
        .other_pcts
        .clone()
        .unwrap_or_else(|| args.interest_pcts.clone());
    let other_lengths = args
        .other_lengths
        .clone()
        .unwrap_or_else(|| args.interest_lengths.clone());

    // Configuration is checked before any file is opened
    validate_threshold_lists(
        &args.interest_pcts,
        &args.interest_lengths,
        &other_pcts,
        &other_lengths,
    )?;

    let interest_grid = ThresholdGrid::cross(&args.interest_pcts, &args.interest_lengths);
    let other_grid = ThresholdGrid::cross(&other_pcts, &other_lengths);

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let interest_reader = open_results(&args.interest)?;
    let selection = select_interest(interest_reader, &interest_grid)
        .with_context(|| format!("Failed to parse {}", args.interest.display()))?;

    if verbose {
        eprintln!(
            "Interest results: {} queries, {} with at least one hit",
            selection.total_queries,
            selection.table.len()
        );
    }

    let other_reader = open_results(&args.other)?;
    let total_queries = selection.total_queries;
    let table = merge_other(selection.table, other_reader, &other_grid)
        .with_context(|| format!("Failed to parse {}", args.other.display()))?;

    let results = comparator::compare(&table, &interest_grid, &other_grid)?;

    write_reports(&args, &results, total_queries)?;

    match format {
        OutputFormat::Text => print_text_summary(&results, total_queries),
        OutputFormat::Json => print_json_summary(&results, total_queries)?,
    }

    Ok(())
}

fn open_results(path: &Path) -> anyhow::Result<M9Reader<BufReader<fs::File>>> {
    let file =
        fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(M9Reader::new(BufReader::new(file)))
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_reports(
    args: &CompareArgs,
    results: &[ComparisonResult],
    total_queries: usize,
) -> anyhow::Result<()> {
    let dir = &args.output_dir;

    // Collated table: one labelled row per metric, one column per
    // threshold combination
    let mut collated: Vec<Vec<String>> = vec![
        vec!["filename".to_string()],
        vec![format!("interest db ({})", basename(&args.interest))],
        vec![format!("other db ({})", basename(&args.other))],
        vec!["only interest".to_string()],
        vec!["both dbs".to_string()],
        vec!["no hits in interest db".to_string()],
    ];

    for result in results {
        let summary_path = dir.join(format!("summary_{}.txt", result.label));
        write_summary(&summary_path, result)?;

        collated[0].push(result.label.clone());
        collated[1].push(result.interest_stronger.to_string());
        collated[2].push(result.other_wins.to_string());
        collated[3].push(result.interest_exclusive.to_string());
        collated[4].push(result.equal.to_string());
        collated[5].push(result.no_hits(total_queries).to_string());

        if args.hits_to_first {
            let path = dir.join(format!("hits_to_first_db_{}.txt", result.label));
            write_hits(&path, &result.sorted_interest_hits())?;
        }

        if args.hits_to_second {
            let path = dir.join(format!("hits_to_second_db_{}.txt", result.label));
            write_hits(&path, &result.sorted_other_hits())?;
        }
    }

    write_collated(&dir.join("compile_output.txt"), &collated)?;
    write_collated(
        &dir.join("compile_output_no_nohits.txt"),
        &collated[..collated.len() - 1],
    )?;

    Ok(())
}

fn write_summary(path: &Path, result: &ComparisonResult) -> anyhow::Result<()> {
    let mut lines = vec!["#SeqId\tFirst\tSecond".to_string()];
    lines.extend(result.summary.iter().map(ToString::to_string));

    fs::write(path, lines.join("\n") + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn write_hits(path: &Path, hits: &[(&str, u64)]) -> anyhow::Result<()> {
    let lines: Vec<String> = hits
        .iter()
        .map(|(subject, count)| format!("{subject}\t{count}"))
        .collect();

    fs::write(path, lines.join("\n") + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn write_collated(path: &Path, rows: &[Vec<String>]) -> anyhow::Result<()> {
    let lines: Vec<String> = rows.iter().map(|row| row.join("\t")).collect();

    fs::write(path, lines.join("\n") + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn print_text_summary(results: &[ComparisonResult], total_queries: usize) {
    println!("Comparison Results");
    println!("{}", "=".repeat(60));
    println!("\nTotal queries in interest results: {total_queries}");

    for result in results {
        println!("\nThresholds {}:", result.label);
        println!("  Both dbs equal: {}", result.equal);
        println!("  Other db stronger: {}", result.other_wins);
        println!("  Only interest db: {}", result.interest_exclusive);
        println!("  Interest db stronger: {}", result.interest_stronger);
        println!(
            "  No hits in interest db: {}",
            result.no_hits(total_queries)
        );
    }
}

fn print_json_summary(results: &[ComparisonResult], total_queries: usize) -> anyhow::Result<()> {
    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|result| {
            serde_json::json!({
                "filename": result.label,
                "interest_db": result.interest_stronger,
                "other_db": result.other_wins,
                "only_interest": result.interest_exclusive,
                "both_dbs": result.equal,
                "no_hits": result.no_hits(total_queries),
            })
        })
        .collect();

    let output = serde_json::json!({
        "total_queries": total_queries,
        "results": entries,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
