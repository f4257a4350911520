//! # Configuration
//!
//! Optional `leadbook.toml`:
//!
//! ```toml
//! data_dir = "./data"
//! backend = "redb"            # file | redb | memory
//! slot_key = "eleva_crm_v1"
//! business_name = "Eleva Inmobiliaria"
//! default_source = "WhatsApp"
//! default_follow_up_days = 1
//! ```
//!
//! A missing file means defaults. A malformed file is an error. Command-line
//! flags override file values.

use clap::ValueEnum;
use leadbook_core::LeadError;
use leadbook_core::primitives::{
    DEFAULT_BUSINESS_NAME, DEFAULT_FOLLOW_UP_DAYS, DEFAULT_SOURCE, SLOT_KEY,
};
use leadbook_core::storage::validate_key;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Storage backend selectable from config or `--backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per slot in the data directory
    #[default]
    File,
    /// A redb database in the data directory
    Redb,
    /// Nothing is kept after the process exits
    Memory,
}

impl BackendKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Redb => "redb",
            BackendKind::Memory => "memory",
        }
    }
}

/// Settings read from `leadbook.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub slot_key: String,
    pub business_name: String,
    pub default_source: String,
    pub default_follow_up_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            backend: BackendKind::default(),
            slot_key: SLOT_KEY.to_string(),
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            default_source: DEFAULT_SOURCE.to_string(),
            default_follow_up_days: DEFAULT_FOLLOW_UP_DAYS,
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, LeadError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| LeadError::IoError(format!("Cannot read config metadata: {}", e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(LeadError::ConfigError(format!(
                "Config file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| LeadError::IoError(format!("Read config '{}': {}", path.display(), e)))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), backend = config.backend.name(), "config loaded");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, LeadError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| LeadError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), LeadError> {
        validate_key(&self.slot_key).map_err(|e| LeadError::ConfigError(e.to_string()))?;
        if self.business_name.trim().is_empty() {
            return Err(LeadError::ConfigError(
                "business_name must not be empty".to_string(),
            ));
        }
        if !(0..=365).contains(&self.default_follow_up_days) {
            return Err(LeadError::ConfigError(format!(
                "default_follow_up_days must be within 0..=365, got {}",
                self.default_follow_up_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let config = Config::from_toml_str("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.slot_key, "eleva_crm_v1");
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config, Config::default());
    }
}
