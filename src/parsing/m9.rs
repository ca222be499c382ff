use std::io::BufRead;

use thiserror::Error;

use crate::core::hit::{HitRecord, QueryGroup};

/// Comment marker that opens the field-header block of a record
const FIELDS_MARKER: &str = "# Fields";

/// Comment marker naming the producing program (`# BLASTN 2.2.22`, ...).
/// Seen while a field-header block is still pending data, it means the
/// previous query produced zero hits.
const PROGRAM_MARKER: &str = "# BLAST";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected number of fields on line {line}: found {found}, expected 12 or 14")]
    FieldCount { line: usize, found: usize },

    #[error("Invalid {field} on line {line}: '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Streaming reader for m9-style tabular hits, yielding one [`QueryGroup`]
/// per record.
///
/// The reader is lazy and single-pass: groups are produced as the consumer
/// advances, nothing is buffered beyond the current group, and the sequence
/// cannot be restarted. Re-scanning a file requires re-opening it.
///
/// Two record-boundary conventions are handled without a mode switch:
///
/// - **Header-delimited** (BLAST m9): a `# Fields` comment flushes the
///   buffered group and arms the start-of-record state; a program-name
///   comment arriving while armed, with no data line in between, yields the
///   zero-hit sentinel.
/// - **Query-change-delimited** (headerless m8, sortmerna): a data line
///   whose query differs from the buffered query flushes the buffered group.
///   Within a header-delimited block all hits share one query, so this rule
///   is inert there.
///
/// A data line with a field count other than 12 or 14 is fatal: the error
/// is yielded once and the iterator is fused afterwards.
pub struct M9Reader<R: BufRead> {
    lines: std::io::Lines<R>,
    hits: Vec<HitRecord>,
    start_of_record: bool,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> M9Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            hits: Vec::new(),
            start_of_record: false,
            line_number: 0,
            done: false,
        }
    }

    /// Take the buffered hits as a finished group
    fn flush(&mut self) -> QueryGroup {
        let hits = std::mem::take(&mut self.hits);
        // flush is only called with at least one buffered hit
        let query = hits[0].query.clone();
        QueryGroup::new(query, hits)
    }

    fn parse_data_line(&self, line: &str) -> Result<HitRecord, ParseError> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() != 12 && fields.len() != 14 {
            return Err(ParseError::FieldCount {
                line: self.line_number,
                found: fields.len(),
            });
        }

        Ok(HitRecord {
            query: fields[0].to_string(),
            subject: fields[1].to_string(),
            percent_id: self.parse_field(fields[2], "percent identity")?,
            aln_length: self.parse_field(fields[3], "alignment length")?,
            mismatches: self.parse_field(fields[4], "mismatch count")?,
            gap_openings: self.parse_field(fields[5], "gap opening count")?,
            q_start: self.parse_field(fields[6], "query start")?,
            q_end: self.parse_field(fields[7], "query end")?,
            s_start: self.parse_field(fields[8], "subject start")?,
            s_end: self.parse_field(fields[9], "subject end")?,
            evalue: self.parse_field(fields[10], "e-value")?,
            bit_score: self.parse_field(fields[11], "bit score")?,
        })
    }

    fn parse_field<T: std::str::FromStr>(
        &self,
        value: &str,
        field: &'static str,
    ) -> Result<T, ParseError> {
        value.trim().parse().map_err(|_| ParseError::InvalidField {
            line: self.line_number,
            field,
            value: value.to_string(),
        })
    }
}

impl<R: BufRead> Iterator for M9Reader<R> {
    type Item = Result<QueryGroup, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(ParseError::Io(e)));
                }
                None => {
                    // Stream exhausted: flush any buffered group, then, if a
                    // field-header block was still pending data, emit one
                    // trailing zero-hit sentinel.
                    self.done = self.hits.is_empty() && !self.start_of_record;
                    if !self.hits.is_empty() {
                        return Some(Ok(self.flush()));
                    }
                    if self.start_of_record {
                        self.start_of_record = false;
                        return Some(Ok(QueryGroup::empty()));
                    }
                    return None;
                }
            };
            self.line_number += 1;

            if line.starts_with(FIELDS_MARKER) {
                self.start_of_record = true;
                if !self.hits.is_empty() {
                    return Some(Ok(self.flush()));
                }
                continue;
            }

            if line.starts_with(PROGRAM_MARKER) && self.start_of_record {
                // A new program header before any data line: the previous
                // record had zero hits.
                self.start_of_record = false;
                return Some(Ok(QueryGroup::empty()));
            }

            if line.starts_with('#') {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            self.start_of_record = false;
            let hit = match self.parse_data_line(trimmed) {
                Ok(hit) => hit,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            // Query-change boundary: flush the previous group before
            // buffering the first hit of the next one.
            let changed = self
                .hits
                .last()
                .is_some_and(|last| last.query != hit.query);
            if changed {
                let group = self.flush();
                self.hits.push(hit);
                return Some(Ok(group));
            }

            self.hits.push(hit);
        }
    }
}
