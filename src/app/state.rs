use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{RecommendMethod, RecommendRequest, RecommendResponse, SearchResultItem, Stats};
use crate::services::{RequestSequence, RequestTicket, TaskToken};
use crate::view::StatsView;

use super::events::ClickTarget;

/// Values offered by the result count control
pub const COUNT_OPTIONS: [u32; 4] = [5, 10, 15, 20];

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

impl AppState {
    /// Creates a fresh page state with the count control at `default_count`
    pub fn new(default_count: u32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner::new(default_count))),
        }
    }
}

/// Error banner contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub visible: bool,
}

/// Results section contents
#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    pub data: Option<RecommendResponse>,
    pub visible: bool,
    /// Set when the section was just revealed and should be scrolled to
    pub scroll_requested: bool,
}

/// What an input change asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOutcome {
    /// Debounce timer that must be cancelled
    pub cancelled: Option<TaskToken>,
    /// Trimmed query to schedule, or `None` when it is too short
    pub query: Option<String>,
}

/// Everything needed to send one recommend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendStart {
    pub ticket: RequestTicket,
    pub request: RecommendRequest,
    /// Hide timer of the banner that was just cleared
    pub cancelled_timer: Option<TaskToken>,
}

/// A title that was just locked in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub title: String,
    /// Debounce timer that must be cancelled so it cannot reopen the dropdown
    pub cancelled_search: Option<TaskToken>,
}

/// How a recommend response was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendOutcome {
    /// A newer request was issued meanwhile; nothing changed
    Stale,
    Shown { count: usize },
    Failed { message: String },
}

/// The whole UI.
///
/// All mutation goes through the methods below so that "recommend is enabled
/// exactly when a title is selected" holds after every transition.
#[derive(Debug)]
pub struct AppStateInner {
    pub stats: StatsView,
    pub embedding_enabled: bool,
    pub input: String,
    pub suggestions: Vec<SearchResultItem>,
    pub dropdown_open: bool,
    pub method: RecommendMethod,
    pub count: u32,
    pub loading: bool,
    pub error: ErrorBanner,
    pub results: ResultsPanel,
    selected: Option<String>,
    search_seq: RequestSequence,
    recommend_seq: RequestSequence,
    pending_search: Option<TaskToken>,
    error_timer: Option<TaskToken>,
}

impl AppStateInner {
    pub fn new(default_count: u32) -> Self {
        Self {
            stats: StatsView::default(),
            embedding_enabled: false,
            input: String::new(),
            suggestions: Vec::new(),
            dropdown_open: false,
            method: RecommendMethod::default(),
            count: default_count,
            loading: false,
            error: ErrorBanner::default(),
            results: ResultsPanel::default(),
            selected: None,
            search_seq: RequestSequence::new(),
            recommend_seq: RequestSequence::new(),
            pending_search: None,
            error_timer: None,
        }
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn recommend_enabled(&self) -> bool {
        self.selected.is_some()
    }

    pub fn apply_stats(&mut self, stats: &Stats) {
        self.stats = StatsView::from(stats);
        if stats.embedding_available {
            self.embedding_enabled = true;
        }
    }

    /// Records new input text and decides whether a search should follow
    pub fn apply_input(&mut self, raw: &str, min_query_len: usize) -> InputOutcome {
        self.input = raw.to_string();
        let cancelled = self.pending_search.take();
        let query = raw.trim();

        if query.chars().count() < min_query_len {
            self.suggestions.clear();
            self.dropdown_open = false;
            self.selected = None;
            self.search_seq.invalidate();
            return InputOutcome {
                cancelled,
                query: None,
            };
        }

        InputOutcome {
            cancelled,
            query: Some(query.to_string()),
        }
    }

    pub fn set_pending_search(&mut self, token: TaskToken) {
        self.pending_search = Some(token);
    }

    pub fn pending_search(&self) -> Option<TaskToken> {
        self.pending_search
    }

    /// Called when the debounce timer fires. Returns `None` when the input no
    /// longer matches `query`, which happens if a keystroke raced the timer.
    pub fn begin_search(&mut self, query: &str) -> Option<RequestTicket> {
        if self.input.trim() != query {
            return None;
        }
        Some(self.search_seq.issue())
    }

    /// Replaces the dropdown with a search response. Returns `false` for stale ones.
    pub fn finish_search(&mut self, ticket: RequestTicket, items: Vec<SearchResultItem>) -> bool {
        if !self.search_seq.is_current(ticket) {
            return false;
        }
        self.dropdown_open = !items.is_empty();
        self.suggestions = items;
        true
    }

    /// Selects the suggestion at `index`
    pub fn select_suggestion(&mut self, index: usize) -> Option<Selection> {
        let title = self.suggestions.get(index)?.title.clone();
        self.select_title(&title)
    }

    /// Locks in `title`. Blank titles are refused.
    pub fn select_title(&mut self, title: &str) -> Option<Selection> {
        if title.trim().is_empty() {
            return None;
        }
        self.selected = Some(title.to_string());
        self.input = title.to_string();
        self.dropdown_open = false;
        // Neither a queued nor an in-flight search may reopen the dropdown
        let cancelled_search = self.pending_search.take();
        self.search_seq.invalidate();
        Some(Selection {
            title: title.to_string(),
            cancelled_search,
        })
    }

    pub fn focus_input(&mut self) {
        if !self.suggestions.is_empty() {
            self.dropdown_open = true;
        }
    }

    /// Document-level click handling: anything outside the input and the
    /// dropdown closes it
    pub fn apply_click(&mut self, target: ClickTarget) {
        if target.is_outside_search() {
            self.dropdown_open = false;
        }
    }

    /// Changes the method control. Embedding is refused until the server offers it.
    pub fn set_method(&mut self, method: RecommendMethod) -> bool {
        if method == RecommendMethod::Embedding && !self.embedding_enabled {
            return false;
        }
        self.method = method;
        true
    }

    pub fn set_count(&mut self, count: u32) -> bool {
        if !COUNT_OPTIONS.contains(&count) {
            return false;
        }
        self.count = count;
        true
    }

    /// Clears old output, shows loading and builds the request from the controls
    pub fn begin_recommend(&mut self) -> Option<RecommendStart> {
        let title = self.selected.clone()?;

        self.results.visible = false;
        self.results.scroll_requested = false;
        self.error.visible = false;
        let cancelled_timer = self.error_timer.take();
        self.loading = true;

        Some(RecommendStart {
            ticket: self.recommend_seq.issue(),
            request: RecommendRequest {
                title,
                method: self.method,
                n: self.count,
            },
            cancelled_timer,
        })
    }

    /// Applies a recommend result. Loading is cleared for every current ticket,
    /// success or not; stale tickets leave the state alone because a newer
    /// request owns the indicator.
    pub fn finish_recommend(
        &mut self,
        ticket: RequestTicket,
        result: Result<RecommendResponse, String>,
    ) -> RecommendOutcome {
        if !self.recommend_seq.is_current(ticket) {
            return RecommendOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(response) => {
                let count = response.recommendations.len();
                self.results.data = Some(response);
                self.results.visible = true;
                self.results.scroll_requested = true;
                RecommendOutcome::Shown { count }
            }
            Err(message) => {
                self.results.data = None;
                RecommendOutcome::Failed { message }
            }
        }
    }

    /// Releases the loading indicator of a request that ended without a
    /// response. Returns `false` when a newer request owns the indicator.
    pub fn abandon_recommend(&mut self, ticket: RequestTicket) -> bool {
        if !self.recommend_seq.is_current(ticket) || !self.loading {
            return false;
        }
        self.loading = false;
        true
    }

    /// Shows the banner, returning the previous hide timer to cancel
    pub fn show_error(&mut self, message: String) -> Option<TaskToken> {
        self.error = ErrorBanner {
            message,
            visible: true,
        };
        self.error_timer.take()
    }

    pub fn set_error_timer(&mut self, token: TaskToken) {
        self.error_timer = Some(token);
    }

    /// Hides the banner if `token` is still the timer that owns it
    pub fn hide_error(&mut self, token: TaskToken) -> bool {
        if self.error_timer != Some(token) {
            return false;
        }
        self.error_timer = None;
        self.error.visible = false;
        true
    }

    /// Marks the scroll request as handled
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.results.scroll_requested)
    }
}
