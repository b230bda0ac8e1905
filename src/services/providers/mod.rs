//! Recommendation backend abstraction
//!
//! The catalog, similarity scoring and statistics live on a remote server. The client
//! only ever talks to it through this trait so the event loop can be driven against
//! a stub in tests and against HTTP in production.

use crate::{
    error::AppResult,
    models::{RecommendRequest, RecommendResponse, SearchResultItem, Stats},
};

pub mod http;

pub use http::HttpProvider;

/// Trait for recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch catalog counters and the embedding capability flag
    async fn stats(&self) -> AppResult<Stats>;

    /// Search titles whose name contains `query`
    ///
    /// The query is sent as-is; callers trim it and enforce the minimum length.
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>>;

    /// Ask for titles similar to `request.title`
    ///
    /// Non-2xx answers surface as [`crate::error::AppError::Rejected`] carrying the
    /// server's message.
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
