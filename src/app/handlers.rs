use std::sync::Arc;

use crate::{
    config::Timings,
    models::RecommendMethod,
    services::{RecommendationProvider, RequestTicket, Scheduler, TaskToken},
    view::{page, Markup},
};

use super::events::{ClickTarget, Key, UiEvent};
use super::state::{AppState, RecommendOutcome};

/// Drives [`AppState`] from UI events, timers and backend responses.
///
/// Cloning is cheap; clones share state, provider and timers. Locks are only
/// held for synchronous transitions, never across a backend call.
#[derive(Clone)]
pub struct Controller {
    state: AppState,
    provider: Arc<dyn RecommendationProvider>,
    scheduler: Scheduler,
    timings: Timings,
}

impl Controller {
    pub fn new(provider: Arc<dyn RecommendationProvider>, timings: Timings) -> Self {
        Self {
            state: AppState::new(timings.default_result_count),
            provider,
            scheduler: Scheduler::new(),
            timings,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Routes one event to its handler
    pub async fn dispatch(&self, event: UiEvent) {
        tracing::trace!(event = ?event, "Dispatching UI event");

        match event {
            UiEvent::Loaded => self.load_stats().await,
            UiEvent::Input(value) => self.handle_input(&value).await,
            UiEvent::Focus => self.state.inner.write().await.focus_input(),
            UiEvent::Click(target) => self.handle_click(target).await,
            UiEvent::KeyPress(key) => self.handle_key(key).await,
            UiEvent::MethodChanged(method) => self.set_method(method).await,
            UiEvent::CountChanged(count) => self.set_count(count).await,
        }
    }

    /// Loads header counters. Failures only get logged.
    pub async fn load_stats(&self) {
        match self.provider.stats().await {
            Ok(stats) => {
                self.state.inner.write().await.apply_stats(&stats);
            }
            Err(e) => {
                tracing::error!(error = %e, provider = self.provider.name(), "Error loading stats");
            }
        }
    }

    /// Restarts the debounce window for the new input value
    pub async fn handle_input(&self, value: &str) {
        let mut inner = self.state.inner.write().await;
        let outcome = inner.apply_input(value, self.timings.min_query_len);

        if let Some(token) = outcome.cancelled {
            self.scheduler.cancel(token);
        }

        let Some(query) = outcome.query else {
            tracing::debug!("Query too short, suggestions cleared");
            return;
        };

        let this = self.clone();
        let token = self
            .scheduler
            .schedule(self.timings.search_debounce, move |_| async move {
                this.run_search(query).await;
            });
        inner.set_pending_search(token);
    }

    /// Sends the search for `query` if it is still what the user typed
    pub async fn run_search(&self, query: String) {
        let Some(ticket) = self.state.inner.write().await.begin_search(&query) else {
            tracing::debug!(query = %query, "Input changed before search fired");
            return;
        };

        match self.provider.search(&query).await {
            Ok(items) => {
                let count = items.len();
                if self.state.inner.write().await.finish_search(ticket, items) {
                    tracing::debug!(query = %query, results = count, "Suggestions updated");
                } else {
                    tracing::debug!(query = %query, ticket = %ticket, "Discarded stale search response");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, query = %query, "Error searching titles");
            }
        }
    }

    /// Selects the suggestion at `index`
    pub async fn select_suggestion(&self, index: usize) -> Option<String> {
        let Some(selection) = self.state.inner.write().await.select_suggestion(index) else {
            tracing::warn!(index, "No suggestion at index");
            return None;
        };

        if let Some(token) = selection.cancelled_search {
            self.scheduler.cancel(token);
        }
        tracing::info!(title = %selection.title, "Title selected");
        Some(selection.title)
    }

    pub async fn handle_click(&self, target: ClickTarget) {
        match target {
            // The item handler completes before the document-level check
            ClickTarget::SuggestionItem(index) => {
                self.select_suggestion(index).await;
                self.state.inner.write().await.apply_click(target);
            }
            ClickTarget::RecommendButton => {
                self.state.inner.write().await.apply_click(target);
                self.recommend().await;
            }
            _ => self.state.inner.write().await.apply_click(target),
        }
    }

    pub async fn handle_key(&self, key: Key) {
        if key != Key::Enter {
            return;
        }
        let enabled = self.state.inner.read().await.recommend_enabled();
        if enabled {
            self.recommend().await;
        }
    }

    pub async fn set_method(&self, method: RecommendMethod) {
        if !self.state.inner.write().await.set_method(method) {
            tracing::warn!(method = %method, "Method not offered by the server");
        }
    }

    pub async fn set_count(&self, count: u32) {
        if !self.state.inner.write().await.set_count(count) {
            tracing::warn!(count, "Unsupported result count");
        }
    }

    /// Requests recommendations for the selected title.
    ///
    /// Loading is cleared on every path out of here: by `finish_recommend` when a
    /// response arrives, and by a drop guard if this future is dropped or
    /// the provider panics.
    pub async fn recommend(&self) {
        let Some(start) = self.state.inner.write().await.begin_recommend() else {
            tracing::debug!("Recommend ignored, no title selected");
            return;
        };

        if let Some(token) = start.cancelled_timer {
            self.scheduler.cancel(token);
        }

        tracing::info!(
            title = %start.request.title,
            method = %start.request.method,
            n = start.request.n,
            ticket = %start.ticket,
            "Requesting recommendations"
        );

        let release = LoadingRelease::new(self.state.clone(), start.ticket);

        let result = self
            .provider
            .recommend(&start.request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, title = %start.request.title, "Recommendation request failed");
                e.user_message()
            });

        let outcome = self
            .state
            .inner
            .write()
            .await
            .finish_recommend(start.ticket, result);
        release.disarm();

        match outcome {
            RecommendOutcome::Stale => {
                tracing::debug!(ticket = %start.ticket, "Discarded stale recommendation response");
            }
            RecommendOutcome::Shown { count } => {
                tracing::info!(count, "Recommendations rendered");
            }
            RecommendOutcome::Failed { message } => self.show_error(message).await,
        }
    }

    /// Shows the banner and arms its hide timer
    pub async fn show_error(&self, message: String) {
        let mut inner = self.state.inner.write().await;
        if let Some(previous) = inner.show_error(message) {
            self.scheduler.cancel(previous);
        }

        let this = self.clone();
        let token = self
            .scheduler
            .schedule(self.timings.error_display, move |token| async move {
                this.hide_error(token).await;
            });
        inner.set_error_timer(token);
    }

    async fn hide_error(&self, token: TaskToken) {
        if self.state.inner.write().await.hide_error(token) {
            tracing::debug!("Error banner hidden");
        }
    }

    /// Consumes a pending "scroll results into view" request
    pub async fn take_scroll_request(&self) -> bool {
        self.state.inner.write().await.take_scroll_request()
    }

    /// Renders the full page for the current state
    pub async fn render_page(&self) -> Markup {
        let inner = self.state.inner.read().await;
        page::render_page(&inner, &self.timings)
    }
}

/// Clears the loading indicator of `ticket` when dropped while armed
struct LoadingRelease {
    state: AppState,
    ticket: RequestTicket,
    armed: bool,
}

impl LoadingRelease {
    fn new(state: AppState, ticket: RequestTicket) -> Self {
        Self {
            state,
            ticket,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingRelease {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let ticket = self.ticket;
        if let Ok(mut inner) = self.state.inner.try_write() {
            if inner.abandon_recommend(ticket) {
                tracing::warn!(ticket = %ticket, "Recommendation request abandoned");
            }
            return;
        }

        // Lock is busy; release once it frees up
        let state = self.state.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if state.inner.write().await.abandon_recommend(ticket) {
                        tracing::warn!(ticket = %ticket, "Recommendation request abandoned");
                    }
                });
            }
            Err(_) => {
                tracing::error!(ticket = %ticket, "No runtime to release loading indicator");
            }
        }
    }
}
