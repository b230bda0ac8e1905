use crate::app::state::{AppStateInner, COUNT_OPTIONS};
use crate::config::Timings;
use crate::models::RecommendMethod;

use super::components::{
    ErrorBannerView, RecommendationGridView, SourcePanelView, SuggestionListView,
};
use super::markup::Markup;

const METHODS: [(RecommendMethod, &str); 2] = [
    (RecommendMethod::Content, "Content (TF-IDF)"),
    (RecommendMethod::Embedding, "Semantic (Embeddings)"),
];

fn render_controls(state: &AppStateInner, out: &mut Markup) {
    out.raw(r#"<div class="controls"><select id="method-select">"#);
    for (method, label) in METHODS {
        out.raw(r#"<option value=""#).raw(method.as_str()).raw(r#"""#);
        if method == RecommendMethod::Embedding && !state.embedding_enabled {
            out.raw(" disabled");
        }
        if method == state.method {
            out.raw(" selected");
        }
        out.raw(">").raw(label).raw("</option>");
    }
    out.raw(r#"</select><select id="count-select">"#);
    for count in COUNT_OPTIONS {
        out.raw(r#"<option value=""#).value(count).raw(r#"""#);
        if count == state.count {
            out.raw(" selected");
        }
        out.raw(">").value(count).raw("</option>");
    }
    out.raw(r#"</select><button id="recommend-btn""#);
    if !state.recommend_enabled() {
        out.raw(" disabled");
    }
    out.raw(">Get Recommendations</button></div>");
}

fn render_results(state: &AppStateInner, timings: &Timings, out: &mut Markup) {
    out.raw(r#"<section id="results-section" class="results-section"#);
    if state.results.visible {
        out.raw(" active");
    }
    out.raw(r#"">"#);

    if let Some(data) = &state.results.data {
        out.raw(r#"<div id="source-title" class="source-title">"#)
            .child(&SourcePanelView::from(&data.source))
            .raw("</div>")
            .child(&RecommendationGridView::new(
                &data.recommendations,
                timings.card_stagger,
            ));
    }

    out.raw("</section>");
}

/// Renders the complete document for `state`
pub fn render_page(state: &AppStateInner, timings: &Timings) -> Markup {
    let mut out = Markup::new();

    out.raw("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\">")
        .raw("<title>Recflix - Find Similar Titles</title>")
        .raw(r#"<link rel="stylesheet" href="/static/style.css"></head><body>"#);

    out.raw("<header><h1>Recflix</h1>")
        .child(&state.stats)
        .raw("</header><main>");

    out.raw(r#"<div class="search-box"><input id="search-input" type="text" autocomplete="off" value=""#)
        .text(&state.input)
        .raw(r#"">"#)
        .child(&SuggestionListView::new(&state.suggestions, state.dropdown_open))
        .raw("</div>");

    render_controls(state, &mut out);

    out.raw(r#"<div id="loading" class="loading"#);
    if state.loading {
        out.raw(" active");
    }
    out.raw(r#"">Finding similar titles...</div>"#);

    out.child(&ErrorBannerView {
        message: state.error.message.clone(),
        visible: state.error.visible,
    });

    render_results(state, timings, &mut out);

    out.raw("</main></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchResultItem, Stats, TitleType};

    #[test]
    fn test_fresh_page_has_disabled_controls() {
        let state = AppStateInner::new(10);
        let html = render_page(&state, &Timings::default());
        let html = html.as_str();

        assert!(html.contains(r#"<button id="recommend-btn" disabled>"#));
        assert!(html.contains(r#"<option value="embedding" disabled>"#));
        assert!(html.contains(r#"<option value="10" selected>10</option>"#));
        assert!(html.contains(r#"<div id="loading" class="loading">"#));
        assert!(html.contains(r#"<section id="results-section" class="results-section">"#));
    }

    #[test]
    fn test_page_reflects_selection_and_stats() {
        let mut state = AppStateInner::new(10);
        state.apply_stats(&Stats {
            total_titles: 8807,
            movies: 6131,
            tv_shows: 2676,
            embedding_available: true,
        });
        state.select_title("Tom & Jerry");

        let html = render_page(&state, &Timings::default());
        let html = html.as_str();
        assert!(html.contains(r#"<button id="recommend-btn">"#));
        assert!(html.contains(r#"<option value="embedding">"#));
        assert!(html.contains(r#"value="Tom &amp; Jerry""#));
        assert!(html.contains("8,807"));
    }

    #[test]
    fn test_input_value_cannot_break_out_of_attribute() {
        let mut state = AppStateInner::new(10);
        state.apply_input(r#""><script>alert(1)</script>"#, 2);
        let ticket = state
            .begin_search(r#""><script>alert(1)</script>"#)
            .unwrap();
        state.finish_search(
            ticket,
            vec![SearchResultItem {
                title: "<img src=x>".to_string(),
                kind: TitleType::Movie,
                release_year: 2000,
            }],
        );

        let html = render_page(&state, &Timings::default());
        assert!(!html.as_str().contains("<script>"));
        assert!(!html.as_str().contains("<img"));
        assert!(html.as_str().contains(r#"class="suggestions active""#));
    }
}
