//! Configuration for recall.
//!
//! Loaded from `<data_dir>/config.yml` or an explicit `--config` path,
//! falling back to defaults. Passed explicitly to command handlers.

use crate::error::Result;
use crate::models::sm2::INITIAL_EASE_FACTOR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.yml";
pub const DATABASE_FILE: &str = "recall.db";
pub const LOG_FILE: &str = "recall.log";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Where the database and log file live
    pub data_dir: PathBuf,

    /// Ease factor given to newly added problems
    pub default_ease_factor: f64,

    /// Open the problem URL during reviews without passing --open
    pub open_browser: bool,

    /// Browser executable to use instead of the system default
    pub browser_command: Option<String>,

    /// chrono format string for dates in tables
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_ease_factor: INITIAL_EASE_FACTOR,
            open_browser: false,
            browser_command: None,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// `~/.recall`, or `./.recall` when no home directory is known
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".recall")
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. config.yml in the data directory (`data_dir_override` or ~/.recall)
    /// 3. Defaults
    ///
    /// `data_dir_override` always wins over a configured `data_dir`.
    ///
    /// An unreadable config.yml in the data directory is not fatal. Defaults are
    /// used and the problem comes back as a warning, since logging is not set up
    /// until the config says where the log file goes.
    pub fn load(
        config_path: Option<&PathBuf>,
        data_dir_override: Option<&PathBuf>,
    ) -> Result<(Self, Vec<String>)> {
        let mut warnings = Vec::new();
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            let candidate = data_dir_override
                .cloned()
                .unwrap_or_else(default_data_dir)
                .join(CONFIG_FILE);

            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => config,
                    Err(e) => {
                        warnings.push(format!(
                            "Ignoring {}: {}. Using default settings.",
                            candidate.display(),
                            e
                        ));
                        Self::default()
                    }
                }
            } else {
                Self::default()
            }
        };

        if let Some(dir) = data_dir_override {
            config.data_dir = dir.clone();
        }
        Ok((config, warnings))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
