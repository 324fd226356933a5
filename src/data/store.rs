use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::data::record::StudentRecord;
use crate::data::sort::{sort_records, SortColumn, SortState};
use crate::storage::StorageBackend;

/// Demo dataset compiled into the binary, used when nothing has been
/// persisted yet and no seed file is configured.
const BUNDLED_SEED: &str = include_str!("../../data/students.json");

/// Where the first-run dataset comes from.
pub enum SeedSource {
    Bundled,
    File(PathBuf),
}

impl SeedSource {
    fn read(&self) -> Result<String> {
        match self {
            SeedSource::Bundled => Ok(BUNDLED_SEED.to_string()),
            SeedSource::File(path) => Ok(fs::read_to_string(path)?),
        }
    }
}

/// How `load` populated the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Adopted previously persisted data.
    Persisted,
    /// No persisted data; adopted the seed dataset and persisted it.
    Seeded,
    /// Seed could not be read or parsed; the store starts empty.
    SeedFailed,
}

/// Which record the edit form currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCursor {
    /// The next save creates a new record.
    None,
    /// The next save replaces the record at this index.
    Editing(usize),
}

/// Owns the authoritative, ordered record list plus the editing cursor.
/// Every mutation persists the full list through the backend before
/// returning, so callers can render immediately afterwards.
pub struct StudentStore {
    records: Vec<StudentRecord>,
    cursor: EditCursor,
    backend: Box<dyn StorageBackend>,
}

impl StudentStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            records: Vec::new(),
            cursor: EditCursor::None,
            backend,
        }
    }

    /// Populate the store: persisted data wins; otherwise the seed dataset
    /// is adopted and persisted immediately so later runs take the first
    /// branch. A broken seed leaves the store empty rather than failing.
    pub fn load(&mut self, seed: &SeedSource) -> Result<LoadOutcome> {
        if let Some(records) = self.backend.load()? {
            info!(target: "store", "Loaded {} persisted records", records.len());
            self.records = records;
            return Ok(LoadOutcome::Persisted);
        }

        let seeded: Result<Vec<StudentRecord>> = seed
            .read()
            .and_then(|text| serde_json::from_str(&text).map_err(anyhow::Error::from));
        match seeded {
            Ok(seeded) => {
                info!(target: "store", "Seeded {} demo records", seeded.len());
                self.records = seeded;
                self.persist()?;
                Ok(LoadOutcome::Seeded)
            }
            Err(e) => {
                warn!(target: "store", "Seed dataset unavailable: {e:#}");
                self.records.clear();
                Ok(LoadOutcome::SeedFailed)
            }
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    /// Position of the record with the given stable id, if any.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn cursor(&self) -> EditCursor {
        self.cursor
    }

    /// Point the edit cursor at `index` and hand back the record so the
    /// form can be pre-filled.
    pub fn begin_edit(&mut self, index: usize) -> Option<&StudentRecord> {
        if index >= self.records.len() {
            return None;
        }
        self.cursor = EditCursor::Editing(index);
        self.records.get(index)
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = EditCursor::None;
    }

    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        debug!(target: "store", "Adding record id={}", record.id);
        self.records.push(record);
        self.cursor = EditCursor::None;
        self.persist()
    }

    pub fn replace(&mut self, index: usize, record: StudentRecord) -> Result<()> {
        if index >= self.records.len() {
            bail!("replace index {index} out of bounds");
        }
        debug!(target: "store", "Replacing record at index {index} with id={}", record.id);
        self.records[index] = record;
        self.cursor = EditCursor::None;
        self.persist()
    }

    /// Remove the record at `index`. Out-of-bounds indices are a no-op and
    /// report `false`. A cursor pointing at or past the removed slot is
    /// cleared, since its target either vanished or shifted.
    pub fn delete(&mut self, index: usize) -> Result<bool> {
        if index >= self.records.len() {
            debug!(target: "store", "Delete index {index} out of bounds, ignoring");
            return Ok(false);
        }

        self.records.remove(index);
        if let EditCursor::Editing(c) = self.cursor {
            if c >= index {
                self.cursor = EditCursor::None;
            }
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        info!(target: "store", "Clearing all {} records", self.records.len());
        self.records.clear();
        self.cursor = EditCursor::None;
        self.persist()
    }

    /// Reorder the authoritative list by `column`, flipping the direction
    /// held in `state`, and persist the new order.
    pub fn sort_by(&mut self, state: &mut SortState, column: SortColumn) -> Result<()> {
        sort_records(&mut self.records, state, column);
        self.persist()
    }

    /// Serialize the full list through the backend in one synchronous step.
    pub fn persist(&mut self) -> Result<()> {
        self.backend.save(&self.records)
    }

    /// Unique course values in first-seen order, for the filter options.
    pub fn distinct_courses(&self) -> Vec<String> {
        Self::distinct(self.records.iter().map(|r| r.course.as_str()))
    }

    /// Unique status values in first-seen order, for the filter options.
    pub fn distinct_statuses(&self) -> Vec<String> {
        Self::distinct(self.records.iter().map(|r| r.status.as_str()))
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = Vec::new();
        for value in values {
            if !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
        seen
    }
}
