//! HTTP surface for query parsing.
//!
//! `POST /ai-search` runs the same extractor the CLI uses, so both paths always
//! agree on what a query means.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use crate::models::ParsedQuery;
use crate::search::{parse_and_log, QueryLogger};

pub struct AppState {
    pub logger: Arc<dyn QueryLogger>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchRequest {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Query parameter is required")]
    MissingQuery,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingQuery | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/ai-search", post(ai_search_handler))
        .route("/health", get(|| async { "ok" }))
        .layer(cors)
        .with_state(state)
}

pub async fn ai_search_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AiSearchRequest>, JsonRejection>,
) -> Result<Json<ParsedQuery>, AppError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected ai-search payload: {}", e);
        AppError::MalformedPayload(e.body_text())
    })?;

    let query = request
        .query
        .filter(|q| !q.is_empty())
        .ok_or(AppError::MissingQuery)?;

    let parsed = parse_and_log(&query, request.user_id.as_deref(), state.logger.clone());
    debug!("Parsed {:?} into {:?}", query, parsed.filters);

    Ok(Json(parsed))
}
