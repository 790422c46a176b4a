use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};
use std::path::{Path, PathBuf};

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// Falls back to the current directory if no config directory is available.
pub fn get_config_path() -> String {
    app_dir().join("config.toml").to_string_lossy().to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    app_dir().join("logs").to_string_lossy().to_string()
}

/// Default log file location, used when no custom path is configured
pub fn get_default_log_file_path() -> String {
    Path::new(&get_log_dir_path())
        .join(LOG_FILE_NAME)
        .to_string_lossy()
        .to_string()
}
