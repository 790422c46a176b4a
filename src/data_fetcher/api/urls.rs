//! URL building utilities for the season backend

/// Builds the URL listing every season.
///
/// # Example
/// ```
/// use club_standings::data_fetcher::api::build_seasons_url;
///
/// let url = build_seasons_url("https://api.example.com/");
/// assert_eq!(url, "https://api.example.com/saisons");
/// ```
pub fn build_seasons_url(backend_url: &str) -> String {
    format!("{}/saisons", backend_url.trim_end_matches('/'))
}

/// Builds the URL of a single season, used for partial updates.
///
/// # Example
/// ```
/// use club_standings::data_fetcher::api::build_season_url;
///
/// let url = build_season_url("https://api.example.com", "2024-2025");
/// assert_eq!(url, "https://api.example.com/saisons/2024-2025");
/// ```
pub fn build_season_url(backend_url: &str, season_id: &str) -> String {
    format!("{}/{season_id}", build_seasons_url(backend_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_seasons_url() {
        assert_eq!(
            build_seasons_url("http://localhost:3000"),
            "http://localhost:3000/saisons"
        );
    }

    #[test]
    fn test_build_season_url_strips_trailing_slash() {
        assert_eq!(
            build_season_url("http://localhost:3000/", "s1"),
            "http://localhost:3000/saisons/s1"
        );
    }
}
