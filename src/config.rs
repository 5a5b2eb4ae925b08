// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Ask before a bulk clear wipes the whole list.
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
    #[serde(default)]
    pub strikethrough_completed: bool,
    #[serde(default)]
    pub hide_completed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            confirm_clear: true,
            strikethrough_completed: false,
            hide_completed: false,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers (first run) can behave accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        // Read the file with contextualized error (covers permission/IO issues).
        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        // Parse TOML with contextualized error (covers syntax issues).
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Helper to detect whether an anyhow::Error indicates that the config
    /// file was missing, as opposed to being unreadable or malformed.
    pub fn is_missing_config_error(err: &Error) -> bool {
        // Fast textual check for the explicit not-found message.
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Walk the error chain and look for an underlying IO NotFound.
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_is_detected() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_save_and_reload() {
        let ctx = TestContext::new();
        let cfg = Config {
            confirm_clear: false,
            strikethrough_completed: true,
            hide_completed: false,
        };
        cfg.save(&ctx).unwrap();

        let loaded = Config::load(&ctx).unwrap();
        assert!(!loaded.confirm_clear);
        assert!(loaded.strikethrough_completed);
        assert!(!loaded.hide_completed);
    }

    #[test]
    fn test_malformed_config_is_not_missing() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "confirm_clear = \"maybe\"").unwrap();

        let err = Config::load(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
    }
}
