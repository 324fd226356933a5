use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown per table page.
    pub rows_per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Override for the persisted records file (defaults to the platform
    /// data dir).
    pub data_file: Option<PathBuf>,

    /// Override for the first-run seed dataset (defaults to the bundled
    /// demo data).
    pub seed_file: Option<PathBuf>,

    /// Ask y/n before delete-one and clear-all.
    pub confirm_destructive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { rows_per_page: 5 }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            seed_file: None,
            confirm_destructive: true,
        }
    }
}

impl Config {
    /// Load config from the default location, writing the defaults there
    /// on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("student-cli").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.rows_per_page, 5);
        assert!(config.behavior.confirm_destructive);
        assert!(config.behavior.data_file.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.display.rows_per_page, parsed.display.rows_per_page);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[display]\nrows_per_page = 10\n").unwrap();
        assert_eq!(parsed.display.rows_per_page, 10);
        assert!(parsed.behavior.confirm_destructive);
    }
}
