use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    // Reconciliation errors
    #[error("Failed to fetch seasons: {0}")]
    SeasonFetch(#[source] Box<AppError>),

    #[error("Failed to fetch results feed: {0}")]
    FeedFetch(#[source] Box<AppError>),

    #[error("Server error for season {season_id}: {message}")]
    SeasonPersist { season_id: String, message: String },

    #[error("Synchronization aborted: {0}")]
    SyncAborted(String),

    #[error("Season not found: {season_id}")]
    SeasonNotFound { season_id: String },

    #[error("Division {division_id} not found in season {season_id}")]
    DivisionNotFound {
        season_id: String,
        division_id: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Wrap a failure that happened while loading the season list
    pub fn season_fetch(source: AppError) -> Self {
        Self::SeasonFetch(Box::new(source))
    }

    /// Wrap a failure that happened while loading the external results feed
    pub fn feed_fetch(source: AppError) -> Self {
        Self::FeedFetch(Box::new(source))
    }

    /// Create a season persistence error
    pub fn season_persist(season_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SeasonPersist {
            season_id: season_id.into(),
            message: message.into(),
        }
    }

    /// Create an error for a reconciliation run that could not start
    pub fn sync_aborted(message: impl Into<String>) -> Self {
        Self::SyncAborted(message.into())
    }

    /// Create a season not found error
    pub fn season_not_found(season_id: impl Into<String>) -> Self {
        Self::SeasonNotFound {
            season_id: season_id.into(),
        }
    }

    /// Create a division not found error
    pub fn division_not_found(
        season_id: impl Into<String>,
        division_id: impl Into<String>,
    ) -> Self {
        Self::DivisionNotFound {
            season_id: season_id.into(),
            division_id: division_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("https://api.example.com/saisons");
        assert!(matches!(error, AppError::ApiNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/saisons"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_season_persist_message_names_season() {
        let error = AppError::season_persist("2024-2025", "500 - boom");
        assert_eq!(
            error.to_string(),
            "Server error for season 2024-2025: 500 - boom"
        );
    }

    #[test]
    fn test_fetch_wrappers_keep_inner_message() {
        let error = AppError::season_fetch(AppError::network_timeout("https://api.example.com"));
        assert_eq!(
            error.to_string(),
            "Failed to fetch seasons: Network timeout while fetching data from: https://api.example.com"
        );

        let error = AppError::feed_fetch(AppError::api_not_found("https://feed.example.com"));
        assert!(error.to_string().starts_with("Failed to fetch results feed:"));
    }
}
