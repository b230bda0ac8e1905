use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use recflix::middleware::REQUEST_ID_HEADER;

/// Starts `router` on an ephemeral port and returns its origin
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Origin nothing is listening on
pub async fn dead_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn has_request_id(headers: &HeaderMap) -> bool {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| uuid::Uuid::parse_str(s).ok())
        .is_some()
}

async fn stats() -> Json<Value> {
    Json(json!({
        "total_titles": 8807,
        "movies": 6131,
        "tv_shows": 2676,
        "embedding_available": true
    }))
}

/// Echoes the decoded query back as a title. `slow...` queries answer late.
async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !has_request_id(&headers) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let q = params.get("q").cloned().unwrap_or_default();
    if q.starts_with("slow") {
        tokio::time::sleep(Duration::from_millis(400)).await;
    }

    Json(json!([
        { "title": q, "type": "Movie", "release_year": 2010 },
        { "title": format!("{} II", q), "type": "TV Show", "release_year": 2012 }
    ]))
    .into_response()
}

async fn recommend(Json(body): Json<Value>) -> Response {
    let title = body["title"].as_str().unwrap_or_default().to_string();
    let n = body["n"].as_u64().unwrap_or(10) as usize;

    match title.as_str() {
        "" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Title is required" })),
        )
            .into_response(),
        "Title not found" | "Missing" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Title not found" })),
        )
            .into_response(),
        "Broken" => (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response(),
        _ => {
            let recommendations: Vec<Value> = (0..n)
                .map(|i| {
                    json!({
                        "title": format!("Similar {}", i),
                        "type": "Movie",
                        "release_year": 2000 + i,
                        "rating": "PG-13",
                        "duration": "100 min",
                        "description": "A film",
                        "listed_in": "Dramas",
                        "cast": "Unknown",
                        "director": null,
                        "similarity": 0.873
                    })
                })
                .collect();

            Json(json!({
                "source": {
                    "title": title,
                    "type": "Movie",
                    "release_year": 2020,
                    "rating": "PG",
                    "duration": "90 min",
                    "description": "d",
                    "method": body["method"]
                },
                "recommendations": recommendations
            }))
            .into_response()
        }
    }
}

/// Minimal stand-in for the recommendation server
pub fn backend() -> Router {
    Router::new()
        .route("/api/stats", get(stats))
        .route("/api/search", get(search))
        .route("/api/recommend", post(recommend))
}
