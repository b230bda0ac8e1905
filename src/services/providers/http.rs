//! HTTP/JSON recommendation backend
//!
//! Endpoints, all relative to the configured origin:
//! 1. `GET /api/stats` → catalog counters
//! 2. `GET /api/search?q=` → up to a handful of matching titles
//! 3. `POST /api/recommend` → source title plus scored neighbours, or `{error}`

use crate::{
    error::{AppError, AppResult, GENERIC_FAILURE},
    middleware::request_id::{make_span_with_request_id, with_request_id},
    models::{ApiErrorBody, RecommendRequest, RecommendResponse, SearchResultItem, Stats},
    services::providers::RecommendationProvider,
};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::Instrument;

const STATS_PATH: &str = "/api/stats";
const SEARCH_PATH: &str = "/api/search";
const RECOMMEND_PATH: &str = "/api/recommend";

#[derive(Clone)]
pub struct HttpProvider {
    http_client: HttpClient,
    api_url: String,
}

impl HttpProvider {
    /// Creates a provider rooted at `api_url` (scheme, host and optional port)
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), api_url)
    }

    pub fn with_client(http_client: HttpClient, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            api_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Decodes a 2xx body, or turns any other status into an error
    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Backend returned status {}: {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize backend response");
            AppError::Decode(e)
        })
    }

    /// Extracts the `error` field of a rejection body, if there is one
    fn rejection_message(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpProvider {
    async fn stats(&self) -> AppResult<Stats> {
        let (request, request_id) = with_request_id(self.http_client.get(self.endpoint(STATS_PATH)));
        let span = make_span_with_request_id("GET", STATS_PATH, &request_id);

        async move {
            let response = request.send().await?;
            let stats: Stats = Self::read_json(response).await?;

            tracing::info!(
                total_titles = stats.total_titles,
                embedding_available = stats.embedding_available,
                "Stats loaded"
            );

            Ok(stats)
        }
        .instrument(span)
        .await
    }

    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let (request, request_id) = with_request_id(
            self.http_client
                .get(self.endpoint(SEARCH_PATH))
                .query(&[("q", query)]),
        );
        let span = make_span_with_request_id("GET", SEARCH_PATH, &request_id);

        async move {
            let response = request.send().await?;
            let titles: Vec<SearchResultItem> = Self::read_json(response).await?;

            tracing::info!(
                query = %query,
                results = titles.len(),
                provider = "http",
                "Title search completed"
            );

            Ok(titles)
        }
        .instrument(span)
        .await
    }

    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse> {
        let (builder, request_id) = with_request_id(
            self.http_client
                .post(self.endpoint(RECOMMEND_PATH))
                .json(request),
        );
        let span = make_span_with_request_id("POST", RECOMMEND_PATH, &request_id);

        async move {
            let response = builder.send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = Self::rejection_message(&body);
                tracing::warn!(
                    status = status.as_u16(),
                    title = %request.title,
                    message = %message,
                    "Recommendation request rejected"
                );
                return Err(AppError::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let result: RecommendResponse = serde_json::from_str(&body).map_err(|e| {
                tracing::error!(error = %e, "Failed to deserialize recommendation response");
                AppError::Decode(e)
            })?;

            tracing::info!(
                title = %request.title,
                method = %request.method,
                requested = request.n,
                returned = result.recommendations.len(),
                "Recommendations fetched"
            );

            Ok(result)
        }
        .instrument(span)
        .await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = HttpProvider::new("http://recs.local/");
        assert_eq!(provider.endpoint(STATS_PATH), "http://recs.local/api/stats");
    }

    #[test]
    fn test_rejection_message_uses_error_field() {
        assert_eq!(
            HttpProvider::rejection_message(r#"{"error":"Title not found"}"#),
            "Title not found"
        );
    }

    #[test]
    fn test_rejection_message_fallbacks() {
        assert_eq!(HttpProvider::rejection_message("{}"), GENERIC_FAILURE);
        assert_eq!(HttpProvider::rejection_message("<html>502</html>"), GENERIC_FAILURE);
        assert_eq!(HttpProvider::rejection_message(r#"{"error":""}"#), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let provider = HttpProvider::new("http://recs.local");
        let result = provider.search("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
