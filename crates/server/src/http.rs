//! HTTP surface.
//!
//! - `GET /healthCheck`: liveness probe
//! - `POST /fetchCode`: search and extract code for `{"query": "..."}`
//! - `GET /privacy`: static privacy policy

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::service::{self, AppState, FetchCodeOutput};

const PRIVACY_HTML: &str = include_str!("../static/privacy.html");

#[derive(Debug, Deserialize)]
pub struct FetchCodeRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Build the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthCheck", get(health))
        .route("/fetchCode", post(fetch_code))
        .route("/privacy", get(privacy))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn fetch_code(
    State(state): State<AppState>, payload: Result<Json<FetchCodeRequest>, JsonRejection>,
) -> Result<Json<FetchCodeOutput>, ApiError> {
    let query = match payload {
        Ok(Json(FetchCodeRequest { query: Some(q) })) if !q.trim().is_empty() => q,
        Ok(_) => return Err(ApiError::MissingQuery),
        Err(rejection) => {
            tracing::debug!("rejected fetchCode body: {}", rejection);
            return Err(ApiError::MissingQuery);
        }
    };

    let output = service::fetch_code(&state, &query).await?;
    Ok(Json(output))
}

async fn privacy() -> Html<&'static str> {
    Html(PRIVACY_HTML)
}
