//! Command-line interface for hit-compare.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **compare**: Compare search results from two databases and write the
//!   per-threshold reports
//! - **split-db**: Partition a FASTA collection into interest and rest by
//!   taxonomy query
//!
//! ## Usage
//!
//! ```text
//! # Split the reference collection
//! hit-compare split-db --taxonomy taxa.txt --seqs refs.fna \
//!     --query salmonella --output-dir split
//!
//! # Compare search results against the two halves
//! hit-compare compare interest_results.txt other_results.txt \
//!     --output-dir results --interest-pcts 70,80 --interest-lengths 50
//!
//! # JSON collated output for scripting
//! hit-compare compare interest_results.txt other_results.txt --format json
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod split_db;

#[derive(Parser)]
#[command(name = "hit-compare")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Compare BLAST tabular search results across two reference databases")]
#[command(
    long_about = "hit-compare reports, per query sequence, which of two reference databases produced the stronger match.\n\nSearch the same queries against a database of interest and a database of everything else, then feed both tabular result files to the compare command. For every (percent identity, alignment length) acceptance threshold it writes:\n- a per-query summary of equal, other-db, and interest-only outcomes\n- optional per-subject hit tallies for each database\n- a collated table across all thresholds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the collated comparison printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare search results from two databases
    Compare(compare::CompareArgs),

    /// Split a FASTA database by taxonomy query
    SplitDb(split_db::SplitDbArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
