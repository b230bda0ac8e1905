//! Typed view models for each region of the page.
//!
//! Each view is built from API models and renders through [`Markup`], so free
//! text is escaped no matter which template it ends up in.

use std::time::Duration;

use crate::models::{RecommendationItem, SearchResultItem, SourceTitle, Stats, TitleType};

use super::markup::{Markup, Percent, Render};

const NOT_AVAILABLE: &str = "N/A";
const CAST_MISSING: &str = "Cast information not available";
const DIRECTOR_MISSING: &str = "Director information not available";

/// Missing, blank and the catalog's literal `Unknown` all count as absent
fn known(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty() && *v != "Unknown")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Formats a count with comma thousands separators
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Header counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub total_titles: String,
    pub movies: String,
    pub tv_shows: String,
}

impl Default for StatsView {
    fn default() -> Self {
        Self {
            total_titles: "-".to_string(),
            movies: "-".to_string(),
            tv_shows: "-".to_string(),
        }
    }
}

impl From<&Stats> for StatsView {
    fn from(stats: &Stats) -> Self {
        Self {
            total_titles: group_thousands(stats.total_titles),
            movies: group_thousands(stats.movies),
            tv_shows: group_thousands(stats.tv_shows),
        }
    }
}

impl Render for StatsView {
    fn render_into(&self, out: &mut Markup) {
        out.raw(r#"<div class="stats">"#)
            .raw(r#"<div class="stat"><span id="total-titles" class="stat-value">"#)
            .text(&self.total_titles)
            .raw(r#"</span><span class="stat-label">Titles</span></div>"#)
            .raw(r#"<div class="stat"><span id="movies" class="stat-value">"#)
            .text(&self.movies)
            .raw(r#"</span><span class="stat-label">Movies</span></div>"#)
            .raw(r#"<div class="stat"><span id="tv-shows" class="stat-value">"#)
            .text(&self.tv_shows)
            .raw(r#"</span><span class="stat-label">TV Shows</span></div>"#)
            .raw("</div>");
    }
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionView {
    pub index: usize,
    pub title: String,
    pub kind: TitleType,
    pub release_year: i32,
}

impl SuggestionView {
    pub fn new(index: usize, item: &SearchResultItem) -> Self {
        Self {
            index,
            title: item.title.clone(),
            kind: item.kind,
            release_year: item.release_year,
        }
    }
}

impl Render for SuggestionView {
    fn render_into(&self, out: &mut Markup) {
        out.raw(r#"<div class="suggestion-item" data-index=""#)
            .value(self.index)
            .raw(r#""><div class="suggestion-title">"#)
            .text(&self.title)
            .raw(r#"</div><div class="suggestion-meta">"#)
            .raw(self.kind.label())
            .raw(" \u{2022} ")
            .value(self.release_year)
            .raw("</div></div>");
    }
}

/// The search dropdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionListView {
    pub items: Vec<SuggestionView>,
    pub open: bool,
}

impl SuggestionListView {
    pub fn new(items: &[SearchResultItem], open: bool) -> Self {
        Self {
            items: items
                .iter()
                .enumerate()
                .map(|(i, item)| SuggestionView::new(i, item))
                .collect(),
            open,
        }
    }
}

impl Render for SuggestionListView {
    fn render_into(&self, out: &mut Markup) {
        out.raw(r#"<div id="suggestions" class="suggestions"#);
        if self.open {
            out.raw(" active");
        }
        out.raw(r#"">"#);
        for item in &self.items {
            out.child(item);
        }
        out.raw("</div>");
    }
}

/// "You selected" panel above the grid
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePanelView {
    pub title: String,
    pub kind: TitleType,
    pub release_year: i32,
    pub rating: String,
    pub duration: String,
    pub genres: String,
    pub description: String,
}

impl From<&SourceTitle> for SourcePanelView {
    fn from(source: &SourceTitle) -> Self {
        Self {
            title: source.title.clone(),
            kind: source.kind,
            release_year: source.release_year,
            rating: present(source.rating.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            duration: present(source.duration.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            genres: present(source.listed_in.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            description: source.description.clone().unwrap_or_default(),
        }
    }
}

impl Render for SourcePanelView {
    fn render_into(&self, out: &mut Markup) {
        out.raw(r#"<div class="source-label">You selected:</div>"#)
            .raw(r#"<div class="source-name">"#)
            .text(&self.title)
            .raw("</div>")
            .raw(r#"<div class="source-details">"#)
            .raw(r#"<span class="source-tag">"#)
            .raw(self.kind.label())
            .raw(r#"</span><span class="source-tag">"#)
            .value(self.release_year)
            .raw(r#"</span><span class="source-tag">"#)
            .text(&self.rating)
            .raw(r#"</span><span class="source-tag">"#)
            .text(&self.duration)
            .raw("</span></div>")
            .raw(r#"<div class="source-genres">"#)
            .text(&self.genres)
            .raw("</div>")
            .raw(r#"<div class="source-description">"#)
            .text(&self.description)
            .raw("</div>");
    }
}

/// One card in the results grid
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationCardView {
    pub title: String,
    pub kind: TitleType,
    pub release_year: i32,
    pub rating: String,
    pub duration: String,
    pub genres: String,
    pub description: String,
    pub cast: String,
    pub director: String,
    pub match_percent: Percent,
    /// Entrance animation offset
    pub entrance_delay: Duration,
}

impl RecommendationCardView {
    pub fn new(index: usize, rec: &RecommendationItem, stagger: Duration) -> Self {
        let title = &rec.title;
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        Self {
            title: title.title.clone(),
            kind: title.kind,
            release_year: title.release_year,
            rating: present(title.rating.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            duration: present(title.duration.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            genres: present(title.listed_in.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            description: title.description.clone().unwrap_or_default(),
            cast: known(title.cast.as_deref())
                .unwrap_or(CAST_MISSING)
                .to_string(),
            director: known(title.director.as_deref())
                .unwrap_or(DIRECTOR_MISSING)
                .to_string(),
            match_percent: Percent::from_similarity(rec.similarity),
            entrance_delay: stagger.saturating_mul(steps),
        }
    }
}

impl Render for RecommendationCardView {
    fn render_into(&self, out: &mut Markup) {
        let delay_ms = u64::try_from(self.entrance_delay.as_millis()).unwrap_or(u64::MAX);

        out.raw(r#"<div class="recommendation-card" style="animation-delay: "#)
            .value(delay_ms)
            .raw(r#"ms">"#);

        out.raw(r#"<div class="card-header"><div class="card-title">"#)
            .text(&self.title)
            .raw(r#"</div><div class="card-meta">"#)
            .raw(r#"<span class="meta-badge">"#)
            .raw(self.kind.label())
            .raw(r#"</span><span class="meta-badge">"#)
            .value(self.release_year)
            .raw(r#"</span><span class="meta-badge">"#)
            .text(&self.rating)
            .raw(r#"</span><span class="meta-badge">"#)
            .text(&self.duration)
            .raw("</span></div></div>");

        out.raw(r#"<div class="card-body"><div class="card-genres">"#)
            .text(&self.genres)
            .raw(r#"</div><div class="card-description">"#)
            .text(&self.description)
            .raw(r#"</div><div class="card-cast"><strong>Cast:</strong> "#)
            .text(&self.cast)
            .raw(r#"</div><div class="card-cast"><strong>Director:</strong> "#)
            .text(&self.director)
            .raw("</div></div>");

        out.raw(r#"<div class="card-footer"><div class="similarity-score">"#)
            .raw(r#"<span class="score-label">Match:</span><span class="score-value">"#)
            .value(self.match_percent)
            .raw(r#"</span></div><div class="score-bar"><div class="score-fill" style="width: "#)
            .value(self.match_percent)
            .raw(r#""></div></div></div>"#);

        out.raw("</div>");
    }
}

/// Results grid plus its count label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationGridView {
    pub cards: Vec<RecommendationCardView>,
}

impl RecommendationGridView {
    pub fn new(recommendations: &[RecommendationItem], stagger: Duration) -> Self {
        Self {
            cards: recommendations
                .iter()
                .enumerate()
                .map(|(i, rec)| RecommendationCardView::new(i, rec, stagger))
                .collect(),
        }
    }

    pub fn count_label(&self) -> String {
        format!("{} recommendations found", self.cards.len())
    }
}

impl Render for RecommendationGridView {
    fn render_into(&self, out: &mut Markup) {
        out.raw(r#"<div id="rec-count" class="rec-count">"#)
            .text(&self.count_label())
            .raw("</div>")
            .raw(r#"<div id="recommendations-grid" class="recommendations-grid">"#);
        for card in &self.cards {
            out.child(card);
        }
        out.raw("</div>");
    }
}

/// Transient error banner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBannerView {
    pub message: String,
    pub visible: bool,
}

impl Render for ErrorBannerView {
    fn render_into(&self, out: &mut Markup) {
        out.raw(r#"<div id="error-message" class="error-message"#);
        if self.visible {
            out.raw(" active");
        }
        out.raw(r#"">"#).text(&self.message).raw("</div>");
    }
}
