//! Append-only CSV prediction log.
//!
//! Single mutation point of the whole pipeline. Appends are serialized by a
//! mutex so concurrent requests interleave at record granularity only, and
//! every append is flushed before it is reported as successful.
//!
//! A bounded in-memory tail is maintained under the same lock, so the fixed
//! "last 10" query never re-reads the growing file; the file remains the
//! durable source of truth and is consulted only when a caller asks for more
//! history than the tail holds.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::record::{LogRecord, CSV_HEADER};
use super::StoreUnavailableError;

/// In-memory tail capacity. Must stay >= the pipeline's fixed display count.
const TAIL_CAPACITY: usize = 32;

#[derive(Debug)]
struct LogInner {
    /// Opened lazily: the file is created (with its header) on first append.
    file: Option<File>,
    /// Most recent records, oldest first.
    tail: VecDeque<LogRecord>,
    /// Total records in the store, including rows loaded from a prior run.
    total_records: u64,
}

/// Durable, append-only prediction log.
#[derive(Debug)]
pub struct PredictionLog {
    path: PathBuf,
    inner: Mutex<LogInner>,
}

impl PredictionLog {
    /// Open a log at `path`, seeding the tail cache from any existing file.
    ///
    /// A missing file is not an error; it is created with its header on the
    /// first append. An existing but unreadable file is a startup failure.
    pub fn open(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut tail = VecDeque::with_capacity(TAIL_CAPACITY);
        let mut total_records = 0u64;

        if path.exists() {
            for record in read_records(&path)? {
                total_records += 1;
                if tail.len() == TAIL_CAPACITY {
                    tail.pop_front();
                }
                tail.push_back(record);
            }
            log::info!(
                "Opened prediction log {} ({} existing records)",
                path.display(),
                total_records
            );
        }

        Ok(Self {
            path,
            inner: Mutex::new(LogInner {
                file: None,
                tail,
                total_records,
            }),
        })
    }

    /// Append one record. Atomic with respect to concurrent appends; once
    /// this returns `Ok` the record is flushed and will not be lost.
    pub fn append(&self, record: &LogRecord) -> std::io::Result<()> {
        let mut inner = self.inner.lock();

        if inner.file.is_none() {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            // Header exactly once per file lifetime, never rewritten.
            if file.metadata()?.len() == 0 {
                writeln!(file, "{}", CSV_HEADER)?;
            }
            inner.file = Some(file);
        }

        let file = inner.file.as_mut().expect("file opened above");
        writeln!(file, "{}", record.to_csv_row())?;
        file.flush()?;

        if inner.tail.len() == TAIL_CAPACITY {
            inner.tail.pop_front();
        }
        inner.tail.push_back(record.clone());
        inner.total_records += 1;

        Ok(())
    }

    /// The `n` most recent records in insertion order (oldest of the n
    /// first), or fewer if the store holds less than `n`.
    ///
    /// Served from the tail cache whenever it covers the request; otherwise
    /// the durable file is re-read.
    pub fn read_last(&self, n: usize) -> Result<Vec<LogRecord>, StoreUnavailableError> {
        let inner = self.inner.lock();

        if n <= inner.tail.len() || inner.total_records <= inner.tail.len() as u64 {
            let skip = inner.tail.len().saturating_sub(n);
            return Ok(inner.tail.iter().skip(skip).cloned().collect());
        }

        // Cache does not reach far enough back; fall back to the file.
        let records = read_records(&self.path)
            .map_err(|e| StoreUnavailableError(format!("{}: {}", self.path.display(), e)))?;
        let skip = records.len().saturating_sub(n);
        Ok(records.into_iter().skip(skip).collect())
    }

    /// Total records currently in the store.
    pub fn len(&self) -> u64 {
        self.inner.lock().total_records
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locatable reference to the full durable store, for download/export.
    pub fn export_path(&self) -> &Path {
        &self.path
    }
}

/// Read every parsable record from a store file, skipping the header and
/// warning on damaged rows rather than failing the whole read.
fn read_records(path: &Path) -> std::io::Result<Vec<LogRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line == CSV_HEADER {
            continue;
        }
        match LogRecord::from_csv_row(&line) {
            Some(record) => records.push(record),
            None => log::warn!(
                "Skipping malformed row {} in {}",
                line_no + 1,
                path.display()
            ),
        }
    }

    Ok(records)
}
