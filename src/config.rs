//! Application Configuration Module
//! Optional `pairscope.json` in the working directory overrides defaults.

use serde::Deserialize;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "pairscope.json";
const DEFAULT_STORE_DIR: &str = "datasets";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the CSV dataset store.
    pub store_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

impl AppConfig {
    /// Read `pairscope.json` from the working directory. A missing file is
    /// normal; a malformed one is logged and ignored.
    pub fn load_or_default() -> Self {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Ignoring malformed {CONFIG_FILE}: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_dir() {
        assert_eq!(AppConfig::default().store_dir, PathBuf::from("datasets"));
    }

    #[test]
    fn parses_store_dir_override() {
        let config: AppConfig = serde_json::from_str(r#"{"store_dir": "/tmp/csvs"}"#).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/tmp/csvs"));
    }

    #[test]
    fn empty_object_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.store_dir, PathBuf::from("datasets"));
    }
}
