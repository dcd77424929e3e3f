//! Bitgap Configuration
//!
//! Shared configuration crate for all Bitgap components.
//!
//! Handles loading configuration from:
//! 1. BG_CONFIG env var (explicit path)
//! 2. ./config.toml (current directory)
//! 3. ~/.bitgap/config.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::{env, fs};

/// Global config instance for convenience access
pub static GLOBAL_CONFIG: OnceLock<BitgapConfig> = OnceLock::new();

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = ".bitgap";

// ============================================================================
// Default Constants (avoid repeated allocations)
// ============================================================================

const DEFAULT_STORE_PATH: &str = "./bitgap-db";
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BitgapConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub backend: BackendTomlConfig,
}

/// Artifact store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.into(),
        }
    }
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.into()
}

/// Proving backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendTomlConfig {
    /// Ceiling for a single backend call in seconds. Proof generation is
    /// CPU-bound and can legitimately run for minutes.
    #[serde(default = "default_call_timeout")]
    pub call_timeout_secs: u64,
}

impl Default for BackendTomlConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
        }
    }
}

fn default_call_timeout() -> u64 {
    DEFAULT_CALL_TIMEOUT_SECS
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set field from env var if present
fn env_string(key: &str, field: &mut String) {
    if let Ok(v) = env::var(key) {
        *field = v;
    }
}

/// Set field from env var if present and parseable
fn env_parse<T: std::str::FromStr>(key: &str, field: &mut T) {
    if let Ok(v) = env::var(key) {
        if let Ok(parsed) = v.parse() {
            *field = parsed;
        }
    }
}

// ============================================================================
// Implementation
// ============================================================================

impl BitgapConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => {
                log::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check BG_CONFIG env var
        if let Ok(path) = env::var("BG_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check ./config.toml (current directory)
        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.bitgap/config.toml
        dirs::home_dir()
            .map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        env_string("BG_STORE_PATH", &mut self.store.path);
        env_parse(
            "BG_BACKEND_TIMEOUT_SECS",
            &mut self.backend.call_timeout_secs,
        );
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }

    /// Get the global config instance, initializing it if necessary.
    ///
    /// Falls back to defaults if loading fails.
    pub fn global() -> &'static BitgapConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                log::warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Try to get the global config instance.
    ///
    /// Returns `None` if config hasn't been initialized yet.
    pub fn try_global() -> Option<&'static BitgapConfig> {
        GLOBAL_CONFIG.get()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BitgapConfig::default();
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.backend.call_timeout_secs, DEFAULT_CALL_TIMEOUT_SECS);
    }

    #[test]
    fn test_generate_sample() {
        let sample = BitgapConfig::generate_sample();
        assert!(sample.contains("[store]"));
        assert!(sample.contains("[backend]"));
    }

    #[test]
    fn test_parse_sample() {
        let sample = BitgapConfig::generate_sample();
        let parsed: BitgapConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.store.path, DEFAULT_STORE_PATH);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: BitgapConfig = toml::from_str("[store]\npath = \"/tmp/bg\"\n").unwrap();
        assert_eq!(parsed.store.path, "/tmp/bg");
        assert_eq!(parsed.backend.call_timeout_secs, DEFAULT_CALL_TIMEOUT_SECS);
    }
}
