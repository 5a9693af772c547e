//! Batch processing: parse, validate and classify every line, then persist
//! both collections with a single commit.

use crate::classifier::{classify, Classification};
use crate::error::Result;
use crate::parser::{parse_line, parse_reference_period};
use crate::record::{RejectionEntry, SalesRecord};
use crate::store::SalesStore;
use crate::validator::validate;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::io::BufRead;

/// Accepted records and rejection entries of one batch, in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Batch {
    pub accepted: Vec<SalesRecord>,
    pub rejected: Vec<RejectionEntry>,
}

impl Batch {
    /// Number of record lines that produced an output.
    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn summary(&self) -> BatchSummary {
        BatchSummary {
            accepted: self.accepted.len(),
            rejected: self.rejected.len(),
        }
    }
}

/// Counts reported after an ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Reads the whole batch into memory.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

/// Runs every line through parser, validator and classifier.
///
/// Blank lines are skipped. The first malformed line aborts the batch.
pub fn process_lines<S: AsRef<str>>(lines: &[S], reference_period: NaiveDate) -> Result<Batch> {
    let mut batch = Batch::default();

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let line_no = idx + 1;

        if line.trim().is_empty() {
            warn!("Line {}: blank line skipped", line_no);
            continue;
        }

        let record = parse_line(line, line_no)?;
        let violations = validate(&record, reference_period);

        match classify(record, &violations) {
            Classification::Accepted(record) => batch.accepted.push(record),
            Classification::Rejected(entry) => {
                debug!(
                    "Line {}: rejected '{}': {}",
                    line_no,
                    entry.original_line,
                    entry.joined_reasons()
                );
                batch.rejected.push(entry);
            }
        }
    }

    Ok(batch)
}

/// Ingests a batch into the store.
///
/// The reference period is read and parsed before any line is processed.
/// Nothing is written unless the whole batch parses.
pub fn ingest<St: SalesStore, R: BufRead>(store: &mut St, reader: R) -> Result<BatchSummary> {
    let reference_period = parse_reference_period(&store.read_reference_period()?)?;
    info!("Reference period: {}", reference_period);

    let lines = read_lines(reader)?;
    let batch = process_lines(&lines, reference_period)?;
    let summary = batch.summary();

    store.append_accepted_records(batch.accepted);
    store.append_rejection_entries(batch.rejected);
    store.commit()?;

    info!(
        "Batch processed: {} accepted, {} rejected",
        summary.accepted, summary.rejected
    );
    Ok(summary)
}
