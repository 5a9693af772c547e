//! Persistence of the reference period, accepted sales and rejections.
//!
//! Appended rows are staged in memory and only written by `commit`, so a
//! batch that fails before committing leaves the store untouched.

use crate::error::{Result, SalesError};
use crate::record::{RejectionEntry, SalesRecord};
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage used by the ingest and report phases.
pub trait SalesStore {
    /// Returns the raw reference period value, expected as `yyyy-MM-dd`.
    fn read_reference_period(&self) -> Result<String>;

    /// Stages accepted records for the next commit.
    fn append_accepted_records(&mut self, records: Vec<SalesRecord>);

    /// Stages rejection entries for the next commit.
    fn append_rejection_entries(&mut self, entries: Vec<RejectionEntry>);

    /// Persists everything staged since the last commit.
    fn commit(&mut self) -> Result<()>;

    /// All committed accepted records, in insertion order.
    fn read_accepted_records(&self) -> Result<Vec<SalesRecord>>;

    /// All committed rejection entries, in insertion order.
    fn read_rejection_entries(&self) -> Result<Vec<RejectionEntry>>;
}

/// In-memory store, used by tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reference_period: Option<String>,
    staged_accepted: Vec<SalesRecord>,
    staged_rejected: Vec<RejectionEntry>,
    accepted: Vec<SalesRecord>,
    rejected: Vec<RejectionEntry>,
}

impl MemoryStore {
    /// Creates an empty store configured with the given reference period.
    pub fn with_reference_period(value: impl Into<String>) -> Self {
        MemoryStore {
            reference_period: Some(value.into()),
            ..Default::default()
        }
    }

    /// Number of staged, uncommitted rows.
    pub fn pending(&self) -> usize {
        self.staged_accepted.len() + self.staged_rejected.len()
    }
}

impl SalesStore for MemoryStore {
    fn read_reference_period(&self) -> Result<String> {
        self.reference_period
            .clone()
            .ok_or_else(|| SalesError::MissingReferencePeriod("memory store".to_string()))
    }

    fn append_accepted_records(&mut self, records: Vec<SalesRecord>) {
        self.staged_accepted.extend(records);
    }

    fn append_rejection_entries(&mut self, entries: Vec<RejectionEntry>) {
        self.staged_rejected.extend(entries);
    }

    fn commit(&mut self) -> Result<()> {
        self.accepted.append(&mut self.staged_accepted);
        self.rejected.append(&mut self.staged_rejected);
        Ok(())
    }

    fn read_accepted_records(&self) -> Result<Vec<SalesRecord>> {
        Ok(self.accepted.clone())
    }

    fn read_rejection_entries(&self) -> Result<Vec<RejectionEntry>> {
        Ok(self.rejected.clone())
    }
}

/// Persisted shape of a rejection: reasons are stored joined.
#[derive(Debug, Serialize, Deserialize)]
struct RejectionRow {
    original_line: String,
    error: String,
}

impl From<&RejectionEntry> for RejectionRow {
    fn from(entry: &RejectionEntry) -> Self {
        RejectionRow {
            original_line: entry.original_line.clone(),
            error: entry.joined_reasons(),
        }
    }
}

impl From<RejectionRow> for RejectionEntry {
    fn from(row: RejectionRow) -> Self {
        RejectionEntry::new(row.original_line, RejectionEntry::split_reasons(&row.error))
    }
}

/// Directory-backed store.
///
/// Layout:
/// - `reference_period.txt`: the single configuration value
/// - `accepted_sales.csv`: `date,seller_code,amount,large_account`
/// - `rejected_sales.csv`: `original_line,error`
#[derive(Debug)]
pub struct CsvStore {
    dir: PathBuf,
    staged_accepted: Vec<SalesRecord>,
    staged_rejected: Vec<RejectionEntry>,
}

impl CsvStore {
    pub const REFERENCE_PERIOD_FILE: &'static str = "reference_period.txt";
    pub const ACCEPTED_FILE: &'static str = "accepted_sales.csv";
    pub const REJECTED_FILE: &'static str = "rejected_sales.csv";

    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(CsvStore {
            dir,
            staged_accepted: Vec::new(),
            staged_rejected: Vec::new(),
        })
    }

    /// Replaces the stored reference period. This is an administrative
    /// action; batch runs only read it.
    pub fn write_reference_period(&self, value: &str) -> Result<()> {
        fs::write(self.path(Self::REFERENCE_PERIOD_FILE), format!("{}\n", value))?;
        Ok(())
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn staging_path(&self, file: &str) -> PathBuf {
        self.dir.join(format!("{}.tmp", file))
    }

    /// Copies `file` to its staging path and appends `rows` to the copy.
    fn stage_rows<T: Serialize>(
        &self,
        file: &str,
        rows: impl IntoIterator<Item = T>,
    ) -> Result<PathBuf> {
        let staging = self.staging_path(file);
        match fs::copy(self.path(file), &staging) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                File::create(&staging)?;
            }
            Err(e) => return Err(e.into()),
        }

        let handle = OpenOptions::new().append(true).open(&staging)?;
        let needs_header = handle.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(handle);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(staging)
    }

    fn stage_all(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut staged = Vec::new();
        if !self.staged_accepted.is_empty() {
            let staging = self.stage_rows(Self::ACCEPTED_FILE, self.staged_accepted.iter())?;
            staged.push((staging, self.path(Self::ACCEPTED_FILE)));
        }
        if !self.staged_rejected.is_empty() {
            let staging = self.stage_rows(
                Self::REJECTED_FILE,
                self.staged_rejected.iter().map(RejectionRow::from),
            )?;
            staged.push((staging, self.path(Self::REJECTED_FILE)));
        }
        Ok(staged)
    }

    fn read_rows<T: for<'de> Deserialize<'de>>(&self, file: &str) -> Result<Vec<T>> {
        let handle = match File::open(self.path(file)) {
            Ok(handle) => handle,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new().from_reader(handle);
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl SalesStore for CsvStore {
    fn read_reference_period(&self) -> Result<String> {
        let path = self.path(Self::REFERENCE_PERIOD_FILE);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(value.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SalesError::MissingReferencePeriod(
                path.display().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn append_accepted_records(&mut self, records: Vec<SalesRecord>) {
        self.staged_accepted.extend(records);
    }

    fn append_rejection_entries(&mut self, entries: Vec<RejectionEntry>) {
        self.staged_rejected.extend(entries);
    }

    /// Writes both collections to staging copies first and renames them into
    /// place only once every copy is complete. A failure while staging leaves
    /// the data files untouched. The two renames are separate filesystem
    /// operations, so a crash between them can still persist one file only.
    fn commit(&mut self) -> Result<()> {
        let staged = match self.stage_all() {
            Ok(staged) => staged,
            Err(e) => {
                for file in [Self::ACCEPTED_FILE, Self::REJECTED_FILE] {
                    let _ = fs::remove_file(self.staging_path(file));
                }
                return Err(e);
            }
        };
        for (staging, target) in staged {
            fs::rename(staging, target)?;
        }

        debug!(
            "Committed {} accepted and {} rejected rows to {}",
            self.staged_accepted.len(),
            self.staged_rejected.len(),
            self.dir.display()
        );
        self.staged_accepted.clear();
        self.staged_rejected.clear();
        Ok(())
    }

    fn read_accepted_records(&self) -> Result<Vec<SalesRecord>> {
        self.read_rows(Self::ACCEPTED_FILE)
    }

    fn read_rejection_entries(&self) -> Result<Vec<RejectionEntry>> {
        let rows: Vec<RejectionRow> = self.read_rows(Self::REJECTED_FILE)?;
        Ok(rows.into_iter().map(RejectionEntry::from).collect())
    }
}
