//! Path utilities and file system helpers

use std::path::PathBuf;

use crate::db::StorageError;

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "org.scripture.mini";

/// File name of the log written by the log plugin
pub const LOG_FILE_NAME: &str = "scripture";

/// Gets the application data directory
pub fn get_app_data_dir() -> Result<PathBuf, StorageError> {
    dirs::data_dir()
        .map(|p| p.join(APP_DIR_NAME))
        .ok_or(StorageError::NoDataDir)
}

/// Gets the runtime configuration file path
pub fn get_config_path() -> Result<PathBuf, StorageError> {
    get_app_data_dir().map(|p| p.join("config.json"))
}

/// Gets the local storage database path
pub fn get_storage_path(file_name: &str) -> Result<PathBuf, StorageError> {
    get_app_data_dir().map(|p| p.join(file_name))
}
