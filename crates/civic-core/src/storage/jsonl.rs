// Rust guideline compliant 2026-02-06

//! Persistent JSONL journal backend.
//!
//! The journal holds one tagged record per line: every issue row followed
//! by every audit row. Each commit reloads the journal under an exclusive
//! lock, applies the commit, writes the full journal to a temp file and
//! renames it over the original, so an issue row and its audit rows land
//! in a single rename.

use crate::storage::{Commit, Committed, JournalRecord, Ledger, StorageBackend};
use crate::{Error, Issue, IssueUpdate, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Backend persisting the ledger to a JSONL journal.
#[derive(Debug)]
pub struct JsonlBackend {
    /// Path to the journal file.
    path: PathBuf,
    /// Last committed or loaded state.
    ledger: Ledger,
}

impl JsonlBackend {
    /// Opens a journal, creating an empty store if the file does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSONL journal
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is empty
    /// - The journal cannot be read
    /// - The journal violates a store invariant
    pub fn open(path: PathBuf) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }

        let ledger = load_ledger(&path)?;
        tracing::debug!(
            path = %path.display(),
            issues = ledger.issues().len(),
            "Opened issue journal"
        );
        Ok(Self { path, ledger })
    }

    /// Returns the journal path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executes a closure with an exclusive lock on the journal.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock cannot be acquired
    /// - The closure returns an error
    fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file.try_lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock: {}", e),
            ))
        })?;

        let result = f();

        // Released even if the closure fails
        let _ = lock_file.unlock();

        result
    }
}

impl StorageBackend for JsonlBackend {
    fn get(&self, id: u64) -> Result<Issue> {
        self.ledger.get(id)
    }

    fn issues(&self) -> Result<Vec<Issue>> {
        Ok(self.ledger.issues())
    }

    fn updates(&self, issue_id: u64) -> Result<Vec<IssueUpdate>> {
        self.ledger.updates(issue_id)
    }

    fn commit(&mut self, commit: Commit) -> Result<Committed> {
        let path = self.path.clone();
        let (ledger, outcome) = self.with_lock(|| {
            // Another process may have written since our last load.
            let mut ledger = load_ledger(&path)?;
            match ledger.apply(commit) {
                Ok(committed) => {
                    write_journal(&path, &ledger.records())?;
                    Ok((ledger, Ok(committed)))
                }
                // A rejected commit leaves the ledger untouched.
                Err(err) => Ok((ledger, Err(err))),
            }
        })?;

        self.ledger = ledger;
        outcome
    }

    fn kind(&self) -> &'static str {
        "jsonl"
    }
}

/// Reads the journal, skipping malformed lines.
fn load_ledger(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        return Ok(Ledger::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<JournalRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = index + 1,
                    error = %e,
                    "Skipping malformed journal line"
                );
            }
        }
    }

    Ledger::from_records(records)
}

/// Writes every record to a temp file and renames it over the journal.
fn write_journal(path: &Path, records: &[JournalRecord]) -> Result<()> {
    let temp_path = path.with_extension("jsonl.tmp");

    {
        let mut file = File::create(&temp_path)?;
        for record in records {
            let json = serde_json::to_string(record)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.sync_all()?;
    }

    std::fs::rename(&temp_path, path)?;
    Ok(())
}
