use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::api::{FailureResponse, ReloadResponse, SearchParams};
use crate::search::SearchEngine;

const SEARCH_CACHE_CONTROL: &str = "public, max-age=300";

pub fn router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/api/search.json", get(search_handler))
        .route("/api/reload", post(reload_handler))
        .with_state(engine)
}

/// Query strings are read as raw pairs so that no query string is ever
/// rejected with a non-JSON answer.
pub async fn search_handler(
    State(engine): State<Arc<SearchEngine>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = SearchParams::from_pairs(pairs);
    match engine.search(&params).await {
        Ok(response) => {
            info!(
                query = %response.query,
                total = response.total,
                returned = response.results.len(),
                "search served"
            );
            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, SEARCH_CACHE_CONTROL)],
                Json(response),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "search failed");
            failure()
        }
    }
}

pub async fn reload_handler(State(engine): State<Arc<SearchEngine>>) -> Response {
    match engine.reload().await {
        Ok(total) => (
            StatusCode::OK,
            Json(ReloadResponse {
                success: true,
                total,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "index reload failed");
            failure()
        }
    }
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse::internal()),
    )
        .into_response()
}
