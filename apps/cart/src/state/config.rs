//! # Cart Configuration
//!
//! Configuration for the cart app, loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MARKETPLACE_STORAGE_BACKEND=memory                                 │
//! │     MARKETPLACE_DB_PATH=/tmp/cart.db                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/cart.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.gomarketplace.cart/cart.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite in the platform data dir, key @GoMarketplace:products       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "sqlite"            # sqlite | memory
//! database_path = "/data/cart.db"
//! key = "@GoMarketplace:products"
//!
//! [cart]
//! discard_corrupt_record = false
//! ```
//!
//! Configuration is read-only after startup, so no lock is needed.

use directories::ProjectDirs;
use marketplace_core::PRODUCTS_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};
use crate::state::cart::CartOptions;

/// File name of the SQLite database in the data dir.
const DATABASE_FILE: &str = "cart.db";

/// File name of the config file in the config dir.
const CONFIG_FILE: &str = "cart.toml";

// =============================================================================
// Storage Backend
// =============================================================================

/// Which key/value store backs the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file on the device (survives restarts).
    #[default]
    Sqlite,

    /// Process memory (lost on exit).
    Memory,
}

impl FromStr for StorageBackend {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(CartError::config(format!(
                "unknown storage backend '{}', expected sqlite or memory",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

fn default_key() -> String {
    PRODUCTS_STORAGE_KEY.to_string()
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file; defaults to `cart.db` in the platform data dir.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Key of the persisted cart record.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            database_path: None,
            key: default_key(),
        }
    }
}

/// `[cart]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    #[serde(default)]
    pub discard_corrupt_record: bool,
}

// =============================================================================
// CartConfig
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or `cart.toml` in the config dir)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CartError::config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> CartResult<Self> {
        info!(?path, "Loading cart config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CartError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> CartResult<Self> {
        toml::from_str(contents).map_err(|e| CartError::config(e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(CartError::config("storage key must not be empty"));
        }

        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(CartError::config("database_path must not be empty"));
            }
        }

        Ok(())
    }

    /// Applies `MARKETPLACE_*` overrides read through `lookup`.
    ///
    /// ## Variables
    /// - `MARKETPLACE_STORAGE_BACKEND`: `sqlite` | `memory`
    /// - `MARKETPLACE_DB_PATH`: SQLite file path
    /// - `MARKETPLACE_STORAGE_KEY`: persisted record key
    /// - `MARKETPLACE_DISCARD_CORRUPT`: `true` | `false`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("MARKETPLACE_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %parsed, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring MARKETPLACE_STORAGE_BACKEND"),
            }
        }

        if let Some(path) = lookup("MARKETPLACE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("MARKETPLACE_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(discard) = lookup("MARKETPLACE_DISCARD_CORRUPT") {
            match discard.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.cart.discard_corrupt_record = true,
                "0" | "false" | "no" => self.cart.discard_corrupt_record = false,
                _ => warn!(value = %discard, "Ignoring MARKETPLACE_DISCARD_CORRUPT"),
            }
        }
    }

    /// Resolves the SQLite file path, falling back to the platform data dir.
    pub fn database_path(&self) -> CartResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs()
            .ok_or_else(|| CartError::config("could not determine app data directory"))?;

        Ok(dirs.data_dir().join(DATABASE_FILE))
    }

    /// Provider options derived from this config.
    pub fn cart_options(&self) -> CartOptions {
        CartOptions {
            storage_key: self.storage.key.clone(),
            discard_corrupt_record: self.cart.discard_corrupt_record,
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "gomarketplace", "cart")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}
