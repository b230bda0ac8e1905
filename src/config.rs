use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Origin hosting the recommendation API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Quiet period after the last keystroke before a search is sent
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Trimmed queries shorter than this never reach the backend
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// How long the error banner stays visible
    #[serde(default = "default_error_display_ms")]
    pub error_display_ms: u64,

    /// Per-card entrance delay step
    #[serde(default = "default_card_stagger_ms")]
    pub card_stagger_ms: u64,

    /// Initial value of the result count control
    #[serde(default = "default_result_count")]
    pub default_result_count: u32,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    2
}

fn default_error_display_ms() -> u64 {
    5000
}

fn default_card_stagger_ms() -> u64 {
    50
}

fn default_result_count() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            search_debounce_ms: default_search_debounce_ms(),
            min_query_len: default_min_query_len(),
            error_display_ms: default_error_display_ms(),
            card_stagger_ms: default_card_stagger_ms(),
            default_result_count: default_result_count(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Timer and threshold settings consumed by the controller
    pub fn timings(&self) -> Timings {
        Timings {
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            min_query_len: self.min_query_len,
            error_display: Duration::from_millis(self.error_display_ms),
            card_stagger: Duration::from_millis(self.card_stagger_ms),
            default_result_count: self.default_result_count,
        }
    }
}

/// Runtime knobs for the client event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub search_debounce: Duration,
    pub min_query_len: usize,
    pub error_display: Duration,
    pub card_stagger: Duration,
    pub default_result_count: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Config::default().timings()
    }
}
