use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::data::record::StudentRecord;

/// Persistence seam for the student store. The whole record list is written
/// in one shot on every save; there are no partial writes to recover from.
pub trait StorageBackend {
    /// Returns `None` when no data has ever been persisted.
    fn load(&self) -> Result<Option<Vec<StudentRecord>>>;
    fn save(&mut self, records: &[StudentRecord]) -> Result<()>;
}

/// Stores the record list as a single pretty-printed JSON array on disk.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Vec<StudentRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let records: Vec<StudentRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        debug!(target: "storage", "Loaded {} records from {}", records.len(), self.path.display());
        Ok(Some(records))
    }

    fn save(&mut self, records: &[StudentRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!(target: "storage", "Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// In-memory backend used by tests; `saved` holds whatever the store last
/// persisted, or `None` if nothing was ever saved.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub saved: Option<Vec<StudentRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            saved: Some(records),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<StudentRecord>>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, records: &[StudentRecord]) -> Result<()> {
        self.saved = Some(records.to_vec());
        Ok(())
    }
}
