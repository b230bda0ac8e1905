use serde::{Deserialize, Serialize};

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TitleType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
    /// Anything the backend sends that we do not know about
    #[serde(other)]
    Unknown,
}

impl TitleType {
    /// Fixed label used in badges and suggestion meta lines
    pub fn label(self) -> &'static str {
        match self {
            TitleType::Movie => "Movie",
            TitleType::TvShow => "TV Show",
            TitleType::Unknown => "Unknown",
        }
    }
}

/// One candidate from the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TitleType,
    pub release_year: i32,
}

/// The title recommendations were computed for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceTitle {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TitleType,
    pub release_year: i32,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma separated genres
    #[serde(default)]
    pub listed_in: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

/// A similar title with its score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    #[serde(flatten)]
    pub title: SourceTitle,
    /// Closeness in [0, 1]
    pub similarity: f64,
}
