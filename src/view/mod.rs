//! HTML rendering for the client.

pub mod components;
pub mod markup;
pub mod page;

pub use components::{
    group_thousands, ErrorBannerView, RecommendationCardView, RecommendationGridView,
    SourcePanelView, StatsView, SuggestionListView, SuggestionView,
};
pub use markup::{escape_html, Markup, Percent, Render};
