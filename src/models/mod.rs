use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod title;

pub use title::{RecommendationItem, SearchResultItem, SourceTitle, TitleType};

/// Catalog counters from `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total_titles: u64,
    pub movies: u64,
    pub tv_shows: u64,
    /// Whether the server can answer `embedding` requests
    #[serde(default)]
    pub embedding_available: bool,
}

/// Similarity backend the server should use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendMethod {
    /// TF-IDF over title metadata
    #[default]
    Content,
    /// Precomputed sentence embeddings
    Embedding,
}

impl RecommendMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendMethod::Content => "content",
            RecommendMethod::Embedding => "embedding",
        }
    }

    /// Parses a control value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "content" | "tfidf" => Some(RecommendMethod::Content),
            "embedding" => Some(RecommendMethod::Embedding),
            _ => None,
        }
    }
}

impl Display for RecommendMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendRequest {
    pub title: String,
    pub method: RecommendMethod,
    pub n: u32,
}

/// Successful answer of `POST /api/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub source: SourceTitle,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
}

/// Error body sent with non-2xx statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
