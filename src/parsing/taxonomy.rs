use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Taxonomy file is not tab delimited (line {0})")]
    NotTabDelimited(usize),

    #[error("There are duplicated entries in the taxonomy file ({0})")]
    DuplicateEntry(String),
}

/// Select sequence identifiers whose taxonomy assignment contains `query`.
///
/// The input is a two-column tab-delimited stream of sequence identifier and
/// taxonomy string. Matching is an exact substring test, case insensitive.
/// Every line is checked for well-formedness and duplicate identifiers even
/// when it does not match the query.
///
/// # Errors
///
/// Returns `TaxonomyError::NotTabDelimited` if a line does not have exactly
/// two tab-separated columns, or `TaxonomyError::DuplicateEntry` (carrying
/// the offending identifier) if an identifier repeats.
pub fn sequences_from_query<R: BufRead>(
    reader: R,
    query: &str,
) -> Result<HashMap<String, String>, TaxonomyError> {
    let query_lower = query.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut interest = HashMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut columns = line.trim().split('\t');
        let (id, taxa) = match (columns.next(), columns.next(), columns.next()) {
            (Some(id), Some(taxa), None) => (id.trim(), taxa.trim()),
            _ => return Err(TaxonomyError::NotTabDelimited(i + 1)),
        };

        if !seen.insert(id.to_string()) {
            return Err(TaxonomyError::DuplicateEntry(id.to_string()));
        }

        if taxa.to_lowercase().contains(&query_lower) {
            interest.insert(id.to_string(), taxa.to_string());
        }
    }

    Ok(interest)
}

/// Load sequence identifiers from a tab-delimited list file.
///
/// Only the first column of each line is used; remaining columns are
/// ignored. Blank lines are skipped.
///
/// # Errors
///
/// Returns `TaxonomyError::Io` if the stream cannot be read.
pub fn ids_from_list<R: BufRead>(reader: R) -> Result<HashMap<String, String>, TaxonomyError> {
    let mut ids = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        let id = line.trim().split('\t').next().unwrap_or("").trim();
        if !id.is_empty() {
            ids.insert(id.to_string(), String::new());
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAXONOMY: &str = "\
seq1\tk__Bacteria; g__Streptococcus; s__pneumoniae
seq2\tk__Bacteria; g__Escherichia; s__coli
seq3\tk__Bacteria; g__Streptococcus; s__mutans
";

    #[test]
    fn test_sequences_from_query() {
        let interest = sequences_from_query(TAXONOMY.as_bytes(), "streptococcus").unwrap();
        assert_eq!(interest.len(), 2);
        assert!(interest.contains_key("seq1"));
        assert!(interest.contains_key("seq3"));
        assert_eq!(
            interest["seq1"],
            "k__Bacteria; g__Streptococcus; s__pneumoniae"
        );
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let interest = sequences_from_query(TAXONOMY.as_bytes(), "STREPTOCOCCUS").unwrap();
        assert_eq!(interest.len(), 2);
    }

    #[test]
    fn test_no_matches() {
        let interest = sequences_from_query(TAXONOMY.as_bytes(), "salmonella").unwrap();
        assert!(interest.is_empty());
    }

    #[test]
    fn test_duplicate_identifier() {
        let text = "seq1\tg__Foo\nseq1\tg__Bar\n";
        let err = sequences_from_query(text.as_bytes(), "foo").unwrap_err();
        match err {
            TaxonomyError::DuplicateEntry(id) => assert_eq!(id, "seq1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_detected_even_without_match() {
        let text = "seq1\tg__Foo\nseq1\tg__Bar\n";
        let err = sequences_from_query(text.as_bytes(), "does-not-match").unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateEntry(_)));
    }

    #[test]
    fn test_not_tab_delimited() {
        let text = "seq1 g__Foo\n";
        let err = sequences_from_query(text.as_bytes(), "foo").unwrap_err();
        assert!(matches!(err, TaxonomyError::NotTabDelimited(1)));

        let text = "seq1\tg__Foo\textra\n";
        let err = sequences_from_query(text.as_bytes(), "foo").unwrap_err();
        assert!(matches!(err, TaxonomyError::NotTabDelimited(1)));
    }

    #[test]
    fn test_ids_from_list() {
        let text = "seq1\tignored\nseq2\n\nseq3\textra\tcolumns\n";
        let ids = ids_from_list(text.as_bytes()).unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains_key("seq1"));
        assert!(ids.contains_key("seq2"));
        assert!(ids.contains_key("seq3"));
    }
}
