//! FASTA input for the database-splitting command.
//!
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTA file as a noodles reader, decompressing if needed.
///
/// # Errors
///
/// Returns `std::io::Error` if the file cannot be opened.
pub fn open_fasta(path: &Path) -> std::io::Result<fasta::io::Reader<Box<dyn BufRead>>> {
    let file = std::fs::File::open(path)?;

    let reader: Box<dyn BufRead> = if is_gzipped(path) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(fasta::io::Reader::new(reader))
}

/// Reassemble the full header text of a record (name plus description)
pub fn full_header(record: &fasta::Record) -> String {
    let name = String::from_utf8_lossy(record.name());
    match record.description() {
        Some(description) => format!("{name} {}", String::from_utf8_lossy(description)),
        None => name.to_string(),
    }
}
