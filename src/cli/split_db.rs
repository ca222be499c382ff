use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use crate::parsing::fasta::{full_header, open_fasta};
use crate::parsing::taxonomy::{ids_from_list, sequences_from_query};

#[derive(Args)]
pub struct SplitDbArgs {
    /// Tab-delimited file mapping sequence identifier to taxonomy
    #[arg(short, long)]
    pub taxonomy: PathBuf,

    /// FASTA file to split (plain or gzip compressed)
    #[arg(short, long)]
    pub seqs: PathBuf,

    /// Directory for interest.fna and rest.fna (created if absent)
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Substring to search for in the taxonomy assignments,
    /// case insensitive (e.g. salmonella)
    #[arg(short, long, conflicts_with = "id_list")]
    pub query: Option<String>,

    /// Tab-delimited file whose first column lists the identifiers to
    /// place in the interest half, bypassing the taxonomy query
    #[arg(long)]
    pub id_list: Option<PathBuf>,
}

/// Execute the split-db subcommand
///
/// # Errors
///
/// Returns an error if the taxonomy file is malformed or has duplicate
/// identifiers, the query selects nothing, or the FASTA cannot be read.
pub fn run(args: SplitDbArgs, verbose: bool) -> anyhow::Result<()> {
    let interest_ids = match (&args.query, &args.id_list) {
        (Some(query), _) => {
            let file = fs::File::open(&args.taxonomy)
                .with_context(|| format!("Failed to open {}", args.taxonomy.display()))?;
            let ids = sequences_from_query(BufReader::new(file), query)?;
            if ids.is_empty() {
                bail!("The query could not retrieve any results, try a different one");
            }
            ids
        }
        (None, Some(id_list)) => {
            let file = fs::File::open(id_list)
                .with_context(|| format!("Failed to open {}", id_list.display()))?;
            let ids = ids_from_list(BufReader::new(file))?;
            if ids.is_empty() {
                bail!("The id list file is empty");
            }
            ids
        }
        (None, None) => bail!("Either --query or --id-list is required"),
    };

    if verbose {
        eprintln!("{} identifiers selected for the interest half", interest_ids.len());
    }

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let interest_path = args.output_dir.join("interest.fna");
    let rest_path = args.output_dir.join("rest.fna");
    let mut interest_out = BufWriter::new(
        fs::File::create(&interest_path)
            .with_context(|| format!("Failed to create {}", interest_path.display()))?,
    );
    let mut rest_out = BufWriter::new(
        fs::File::create(&rest_path)
            .with_context(|| format!("Failed to create {}", rest_path.display()))?,
    );

    let mut reader = open_fasta(&args.seqs)
        .with_context(|| format!("Failed to open {}", args.seqs.display()))?;

    let mut interest_count = 0u64;
    let mut rest_count = 0u64;

    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to parse {}", args.seqs.display()))?;

        // The identifier is the header up to the first space
        let name = String::from_utf8_lossy(record.name()).trim().to_string();

        let out = if interest_ids.contains_key(&name) {
            interest_count += 1;
            &mut interest_out
        } else {
            rest_count += 1;
            &mut rest_out
        };

        write_fasta_record(out, &full_header(&record), record.sequence().as_ref())?;
    }

    interest_out.flush()?;
    rest_out.flush()?;

    tracing::info!(
        interest = interest_count,
        rest = rest_count,
        "database split written"
    );
    if verbose {
        eprintln!("Wrote {interest_count} interest and {rest_count} rest sequences");
    }

    Ok(())
}

fn write_fasta_record<W: Write>(out: &mut W, header: &str, sequence: &[u8]) -> anyhow::Result<()> {
    writeln!(out, ">{header}")?;
    out.write_all(sequence)?;
    writeln!(out)?;
    Ok(())
}
