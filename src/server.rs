//! HTTP host for the translate operation.
//!
//! Errors from the pipeline are returned in-band as `{"error": {...}}` with a
//! 200 status, matching what translation hosts expect from a plugin.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::build_client;
use crate::i18n::supported_languages;
use crate::security::api_key_matches;
use crate::translate::{run_pipeline, Outcome, Query};

pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/translate", post(translate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `0.0.0.0:<port>` and serve until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let port = config.port;
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router(state))
        .await
        .context("Server error")
}

async fn health() -> &'static str {
    "OK"
}

async fn languages() -> Json<Vec<&'static str>> {
    Json(supported_languages())
}

async fn translate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(query): Json<Query>,
) -> Result<Json<Outcome>, (StatusCode, &'static str)> {
    if let Some(expected) = state.config.api_key.as_deref() {
        let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if !api_key_matches(expected, provided) {
            warn!("Rejected /translate request with missing or invalid API key");
            return Err((StatusCode::UNAUTHORIZED, "Invalid API key"));
        }
    }

    Ok(Json(run_pipeline(&state.client, &state.config, &query).await))
}
