use crate::error::AppError;
use std::path::Path;

/// Checks that a configured URL is usable for HTTP requests.
///
/// Accepts explicit `http://`/`https://` URLs, bare domains containing a dot
/// and `localhost` hosts.
pub fn validate_url(field: &str, url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::config_error(format!("{field} cannot be empty")));
    }

    let has_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_scheme && !url.contains('.') && !url.starts_with("localhost") {
        return Err(AppError::config_error(format!(
            "{field} must be a valid URL or domain name"
        )));
    }

    Ok(())
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - Backend and feed URLs cannot be empty and must look like URLs
/// - If a log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
/// - HTTP timeout must be at least one second
pub fn validate_config(
    backend_url: &str,
    feed_url: &str,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    validate_url("Backend URL", backend_url)?;
    validate_url("Feed URL", feed_url)?;

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FEED: &str = "https://feed.example.com/matches.php";

    #[test]
    fn test_validate_config_accepts_urls_and_domains() {
        assert!(validate_config("https://api.example.com", FEED, &None, 30).is_ok());
        assert!(validate_config("api.example.com", FEED, &None, 30).is_ok());
        assert!(validate_config("localhost:3000", FEED, &None, 30).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_empty_backend() {
        let result = validate_config("", FEED, &None, 30);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("Backend URL")));
    }

    #[test]
    fn test_validate_config_rejects_non_url_feed() {
        let result = validate_config("https://api.example.com", "matches", &None, 30);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("Feed URL")));
    }

    #[test]
    fn test_validate_config_rejects_zero_timeout() {
        assert!(validate_config("https://api.example.com", FEED, &None, 0).is_err());
    }

    #[test]
    fn test_validate_config_creates_log_directory() {
        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("sync.log");
        let log_path = Some(log_path.to_string_lossy().to_string());

        assert!(validate_config("https://api.example.com", FEED, &log_path, 30).is_ok());
        assert!(temp_dir.path().join("nested").exists());
    }

    #[test]
    fn test_validate_config_rejects_empty_log_path() {
        let result = validate_config("https://api.example.com", FEED, &Some(String::new()), 30);
        assert!(result.is_err());
    }
}
