//! Configuration loading and database URL resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable holding the database connection string
pub const DATABASE_URL_ENV: &str = "SPELLBOOK_DBURL";

/// Catalog location used when neither CLI nor TOML names one
pub const DEFAULT_CATALOG_PATH: &str = "data/spells.json";

/// Port the lookup service listens on by default
pub const DEFAULT_PORT: u16 = 8880;

/// Optional settings read from `config.toml`
///
/// Every field is optional; a missing file or missing key falls through to the
/// next resolution tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    /// sqlx connection string, e.g. `sqlite:///var/lib/spellbook/spellbook.db`
    pub database_url: Option<String>,
    /// Path of the spell catalog JSON file
    pub catalog_path: Option<PathBuf>,
    /// Listening port for the lookup service
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the platform config file, or defaults if there is none
    ///
    /// A file that exists but cannot be parsed is reported and ignored so that
    /// a typo in the config never prevents startup.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }
}

/// Database URL resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. `database_url` in `toml_config`
/// 4. OS-dependent compiled default
pub fn resolve_database_url_with(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> Result<String> {
    // Priority 1: Command-line argument
    if let Some(url) = cli_arg.filter(|u| !u.trim().is_empty()) {
        return Ok(url.to_string());
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(env_var_name) {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    // Priority 3: TOML config file
    if let Some(url) = toml_config
        .database_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
    {
        return Ok(url.to_string());
    }

    // Priority 4: OS-dependent compiled default
    default_database_url()
}

/// Default sqlite URL under the platform data directory
pub fn default_database_url() -> Result<String> {
    let dir = dirs::data_local_dir()
        .map(|d| d.join("spellbook"))
        .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;

    Ok(format!("sqlite://{}", dir.join("spellbook.db").display()))
}

/// Locate the config file for the platform
///
/// Linux checks `~/.config/spellbook/config.toml` then
/// `/etc/spellbook/config.toml`; other platforms only the user config dir.
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("spellbook").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/spellbook/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
