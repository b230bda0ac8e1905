mod common;

use std::sync::Arc;
use std::time::Duration;

use recflix::app::{ClickTarget, Controller, Key, UiEvent};
use recflix::config::Timings;
use recflix::error::GENERIC_FAILURE;
use recflix::services::HttpProvider;

const DEBOUNCE: Duration = Duration::from_millis(40);
const BANNER: Duration = Duration::from_millis(300);

fn timings() -> Timings {
    Timings {
        search_debounce: DEBOUNCE,
        error_display: BANNER,
        ..Timings::default()
    }
}

async fn create_test_controller() -> Controller {
    let origin = common::spawn_backend(common::backend()).await;
    Controller::new(Arc::new(HttpProvider::new(origin)), timings())
}

async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Types `query`, waits for the dropdown and picks suggestion 0
async fn search_and_pick(controller: &Controller, query: &str) {
    controller.dispatch(UiEvent::Input(query.to_string())).await;
    wait(DEBOUNCE * 4).await;
    controller
        .dispatch(UiEvent::Click(ClickTarget::SuggestionItem(0)))
        .await;
}

#[tokio::test]
async fn test_load_populates_stats() {
    let controller = create_test_controller().await;
    controller.dispatch(UiEvent::Loaded).await;

    let page = controller.render_page().await;
    assert!(page.as_str().contains(r#"<span id="total-titles" class="stat-value">8,807</span>"#));
    assert!(page.as_str().contains(r#"<option value="embedding">"#));
}

#[tokio::test]
async fn test_search_select_and_recommend() {
    let controller = create_test_controller().await;

    controller.dispatch(UiEvent::Input("incep".to_string())).await;
    wait(DEBOUNCE * 4).await;
    {
        let inner = controller.state().inner.read().await;
        assert!(inner.dropdown_open);
        assert_eq!(inner.suggestions.len(), 2);
        assert!(!inner.recommend_enabled());
    }

    controller
        .dispatch(UiEvent::Click(ClickTarget::SuggestionItem(1)))
        .await;
    {
        let inner = controller.state().inner.read().await;
        assert_eq!(inner.input, "incep II");
        assert_eq!(inner.selected_title(), Some("incep II"));
        assert!(!inner.dropdown_open);
        assert!(inner.recommend_enabled());
    }

    controller.dispatch(UiEvent::CountChanged(5)).await;
    controller.dispatch(UiEvent::KeyPress(Key::Enter)).await;

    assert!(controller.take_scroll_request().await);
    let page = controller.render_page().await;
    let html = page.as_str();
    assert_eq!(html.matches(r#"class="recommendation-card""#).count(), 5);
    assert!(html.contains("5 recommendations found"));
    assert!(html.contains(r#"<span class="score-value">87%</span>"#));
    assert!(html.contains(r#"style="width: 87%""#));
    assert!(html.contains("Cast information not available"));
    assert!(html.contains(r#"class="results-section active""#));
    assert!(html.contains(r#"<div id="loading" class="loading">"#));
}

#[tokio::test]
async fn test_short_input_disables_recommend() {
    let controller = create_test_controller().await;
    search_and_pick(&controller, "heat").await;
    assert!(controller.state().inner.read().await.recommend_enabled());

    controller.dispatch(UiEvent::Input("h".to_string())).await;
    wait(DEBOUNCE * 4).await;

    let inner = controller.state().inner.read().await;
    assert!(!inner.recommend_enabled());
    assert!(inner.suggestions.is_empty());
    assert!(!inner.dropdown_open);
}

#[tokio::test]
async fn test_outside_click_closes_dropdown_and_focus_reopens() {
    let controller = create_test_controller().await;
    controller.dispatch(UiEvent::Input("heat".to_string())).await;
    wait(DEBOUNCE * 4).await;

    controller.dispatch(UiEvent::Click(ClickTarget::Suggestions)).await;
    assert!(controller.state().inner.read().await.dropdown_open);

    controller.dispatch(UiEvent::Click(ClickTarget::Elsewhere)).await;
    assert!(!controller.state().inner.read().await.dropdown_open);

    controller.dispatch(UiEvent::Focus).await;
    assert!(controller.state().inner.read().await.dropdown_open);
}

#[tokio::test]
async fn test_not_found_shows_banner_then_hides() {
    let controller = create_test_controller().await;
    search_and_pick(&controller, "Missing").await;

    controller
        .dispatch(UiEvent::Click(ClickTarget::RecommendButton))
        .await;
    {
        let inner = controller.state().inner.read().await;
        assert!(!inner.loading);
        assert!(inner.error.visible);
        assert_eq!(inner.error.message, "Title not found");
        assert!(!inner.results.visible);
    }

    wait(BANNER * 2).await;
    assert!(!controller.state().inner.read().await.error.visible);
}

#[tokio::test]
async fn test_network_failure_shows_generic_banner() {
    let controller = Controller::new(
        Arc::new(HttpProvider::new(common::dead_origin().await)),
        timings(),
    );
    controller.state().inner.write().await.select_title("Inception");

    controller.dispatch(UiEvent::KeyPress(Key::Enter)).await;

    let inner = controller.state().inner.read().await;
    assert!(!inner.loading);
    assert!(inner.error.visible);
    assert_eq!(inner.error.message, GENERIC_FAILURE);
}

#[tokio::test]
async fn test_slow_search_cannot_overwrite_newer_results() {
    let controller = create_test_controller().await;

    controller.dispatch(UiEvent::Input("slow one".to_string())).await;
    // Let the slow request go out
    wait(DEBOUNCE * 2).await;
    controller.dispatch(UiEvent::Input("fast one".to_string())).await;

    // Slow answer lands long after the fast one
    wait(Duration::from_millis(700)).await;

    let inner = controller.state().inner.read().await;
    assert_eq!(inner.suggestions[0].title, "fast one");
}

#[tokio::test]
async fn test_script_title_is_rendered_as_text() {
    let controller = create_test_controller().await;
    controller
        .state()
        .inner
        .write()
        .await
        .select_title("<script>x</script>");

    controller.recommend().await;

    let page = controller.render_page().await;
    let html = page.as_str();
    assert!(html.contains(
        r#"<div class="source-name">&lt;script&gt;x&lt;/script&gt;</div>"#
    ));
    assert!(!html.contains("<script>"));
}
