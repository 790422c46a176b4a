//! Generic HTTP helpers with status-aware error handling

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::AppError;

/// Maps a transport failure to the most specific [`AppError`].
fn transport_error(e: reqwest::Error, url: &str) -> AppError {
    error!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Maps a non-success HTTP status to the most specific [`AppError`].
pub(crate) fn status_error(status: StatusCode, message: impl Into<String>, url: &str) -> AppError {
    let status_code = status.as_u16();
    let message = message.into();

    error!("HTTP {} - {} (URL: {})", status_code, message, url);

    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(message, url),
        400..=499 => AppError::api_client_error(status_code, message, url),
        502 | 503 => AppError::api_service_unavailable(status_code, message, url),
        _ => AppError::api_server_error(status_code, message, url),
    }
}

/// Reads the body of a failed response so it can be reported. Falls back to
/// the canonical reason phrase when the body is empty or unreadable.
async fn failure_message(response: Response) -> String {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => reason.to_string(),
    }
}

/// Fetches `url` and deserializes the JSON body.
///
/// No retries are attempted: a failed request is reported immediately and
/// the caller decides whether to run the whole operation again.
///
/// # Errors
/// * status-specific variants for non-2xx responses
/// * `NetworkTimeout` / `NetworkConnection` for transport failures
/// * `ApiNoData`, `ApiMalformedJson` or `ApiUnexpectedStructure` when the body
///   cannot be turned into `T`
#[instrument(skip(client))]
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(e, url))?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let message = status.canonical_reason().unwrap_or("Unknown error");
        return Err(status_error(status, message, url));
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    parse_body(&response_text, url)
}

/// Parses a response body, classifying failures the same way for every endpoint.
pub(crate) fn parse_body<T: DeserializeOwned>(response_text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            let trimmed = response_text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json("Response is not valid JSON", url))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

/// Sends `body` as a JSON `PATCH` to `url`. The response body is ignored on
/// success and used as the error message otherwise.
#[instrument(skip(client, body))]
pub async fn patch_json<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<(), AppError> {
    info!("Sending PATCH to URL: {url}");

    let response = client
        .patch(url)
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(e, url))?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let message = failure_message(response).await;
        return Err(status_error(status, message, url));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use serde::Deserialize;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1}])))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/items", mock_server.uri());
        let items: Vec<Item> = fetch(&client, &url).await.unwrap();

        assert_eq!(items, vec![Item { id: 1 }]);
    }

    #[tokio::test]
    async fn test_fetch_status_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/busy"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let base = mock_server.uri();

        let result = fetch::<Vec<Item>>(&client, &format!("{base}/missing")).await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));

        let result = fetch::<Vec<Item>>(&client, &format!("{base}/broken")).await;
        assert!(matches!(result, Err(AppError::ApiServerError { status: 500, .. })));

        let result = fetch::<Vec<Item>>(&client, &format!("{base}/busy")).await;
        assert!(matches!(
            result,
            Err(AppError::ApiServiceUnavailable { status: 503, .. })
        ));
    }

    #[test]
    fn test_parse_body_classification() {
        let result = parse_body::<Vec<Item>>("", "u");
        assert!(matches!(result, Err(AppError::ApiNoData { .. })));

        let result = parse_body::<Vec<Item>>("<html>oops</html>", "u");
        assert!(matches!(result, Err(AppError::ApiMalformedJson { .. })));

        let result = parse_body::<Vec<Item>>(r#"{"id": 1}"#, "u");
        assert!(matches!(result, Err(AppError::ApiUnexpectedStructure { .. })));
    }

    #[tokio::test]
    async fn test_patch_json_sends_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/items/1"))
            .and(body_json(serde_json::json!({"id": 2})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/items/1", mock_server.uri());
        patch_json(&client, &url, &serde_json::json!({"id": 2}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_patch_json_reports_body_on_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/items/1", mock_server.uri());
        let error = patch_json(&client, &url, &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(error.to_string().contains("disk full"));
    }
}
