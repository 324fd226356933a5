use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Cannot determine data directory"))?
            .join("student-cli");

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// The persisted record list, a single JSON array.
    pub fn records_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("students.json"))
    }

    pub fn log_dir() -> Result<PathBuf> {
        let log_dir = Self::data_dir()?.join("logs");
        fs::create_dir_all(&log_dir)?;
        Ok(log_dir)
    }
}
