//! Runtime configuration read from `config.json` in the app data dir

use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::bible_service::BibleService;

/// Compile-time default for the mock service latency (see build.rs)
const BUILTIN_SERVICE_DELAY_MS: &str = env!("BUILTIN_SERVICE_DELAY_MS");

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub service_delay_ms: u64,
    pub search_delay_ms: u64,
    pub recent_limit: usize,
    pub log_level: String,
    pub storage_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_delay_ms: BUILTIN_SERVICE_DELAY_MS.parse().unwrap_or(300),
            search_delay_ms: 500,
            recent_limit: DEFAULT_RECENT_LIMIT,
            log_level: "info".to_string(),
            storage_file: "local_storage.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config file, falling back to defaults when it is missing
    /// or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<AppConfig>(&content).map_err(|e| e.to_string())
            });
        match parsed {
            Ok(config) => {
                info!("[config] Loaded {:?}", path);
                config
            }
            Err(e) => {
                warn!("[config] Failed to parse {:?}, using defaults: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory: {}", e))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to save config: {}", e))
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn bible_service(&self) -> BibleService {
        BibleService::new(
            Duration::from_millis(self.service_delay_ms),
            Duration::from_millis(self.search_delay_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.recent_limit, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"service_delay_ms": 0, "log_level": "debug"}"#).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.service_delay_ms, 0);
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
        assert_eq!(config.search_delay_ms, 500);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let config = AppConfig {
            recent_limit: 5,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).recent_limit, 5);
    }
}
