//! Read and write access to the season backend

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::fetch_utils::{fetch, patch_json};
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_season_url, build_seasons_url};
use crate::config::Config;
use crate::data_fetcher::models::{Match, Season};
use crate::error::AppError;

/// Persistence seam used by the reconciler.
///
/// The backend has no per-match endpoint: a calendar write always replaces
/// the season's whole `calendrier` array.
#[allow(async_fn_in_trait)]
pub trait SeasonStore {
    /// Loads every season together with its calendar.
    async fn fetch_seasons(&self) -> Result<Vec<Season>, AppError>;

    /// Replaces the calendar of `season_id` with `calendar`.
    async fn save_calendar(&self, season_id: &str, calendar: &[Match]) -> Result<(), AppError>;

    /// Loads a single season.
    async fn fetch_season(&self, season_id: &str) -> Result<Season, AppError> {
        self.fetch_seasons()
            .await?
            .into_iter()
            .find(|season| season.id == season_id)
            .ok_or_else(|| AppError::season_not_found(season_id))
    }
}

#[derive(Serialize)]
struct CalendarUpdate<'a> {
    #[serde(rename = "calendrier")]
    calendar: &'a [Match],
}

/// [`SeasonStore`] backed by the REST backend (`/saisons`).
#[derive(Debug, Clone)]
pub struct HttpSeasonStore {
    client: Client,
    backend_url: String,
}

impl HttpSeasonStore {
    pub fn new(client: Client, backend_url: impl Into<String>) -> Self {
        Self {
            client,
            backend_url: backend_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.backend_url.clone()))
    }
}

impl SeasonStore for HttpSeasonStore {
    #[instrument(skip(self))]
    async fn fetch_seasons(&self) -> Result<Vec<Season>, AppError> {
        let url = build_seasons_url(&self.backend_url);
        let seasons: Vec<Season> = fetch(&self.client, &url).await?;
        info!("Loaded {} season(s) from {url}", seasons.len());
        Ok(seasons)
    }

    #[instrument(skip(self, calendar), fields(matches = calendar.len()))]
    async fn save_calendar(&self, season_id: &str, calendar: &[Match]) -> Result<(), AppError> {
        let url = build_season_url(&self.backend_url, season_id);
        patch_json(&self.client, &url, &CalendarUpdate { calendar }).await?;
        debug!("Calendar of season {season_id} saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_season(&self, season_id: &str) -> Result<Season, AppError> {
        let url = build_season_url(&self.backend_url, season_id);
        match fetch::<Season>(&self.client, &url).await {
            Err(AppError::ApiNotFound { .. }) => Err(AppError::season_not_found(season_id)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    #[tokio::test]
    async fn test_fetch_seasons() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/saisons"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "s1", "label": "2024", "statut": "En cours", "calendrier": []},
                {"id": "s2", "label": "2023", "statut": "Archivée"}
            ])))
            .mount(&mock_server)
            .await;

        let store = HttpSeasonStore::new(create_test_http_client(), mock_server.uri());
        let seasons = store.fetch_seasons().await.unwrap();

        assert_eq!(seasons.len(), 2);
        assert!(seasons[0].calendar.is_some());
        assert!(seasons[1].calendar.is_none());
    }

    #[tokio::test]
    async fn test_save_calendar_replaces_whole_calendar() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/saisons/s1"))
            .and(body_json(serde_json::json!({
                "calendrier": [
                    {"id": "m1", "serieId": "D1", "domicile": "A", "exterieur": "B", "score": "9-7", "date": "2024-03-01"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpSeasonStore::new(create_test_http_client(), mock_server.uri());
        let calendar = vec![Match {
            id: Some("m1".to_string()),
            division_id: "D1".to_string(),
            home: "A".to_string(),
            away: "B".to_string(),
            score: "9-7".to_string(),
            date: "2024-03-01".to_string(),
            ..Default::default()
        }];

        store.save_calendar("s1", &calendar).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_season_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/saisons/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = HttpSeasonStore::new(create_test_http_client(), mock_server.uri());
        let result = store.fetch_season("nope").await;

        assert!(matches!(result, Err(AppError::SeasonNotFound { .. })));
    }
}
