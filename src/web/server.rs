use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::engine::QueryEngine;
use crate::error::PipelineError;
use crate::result_format::QueryResponse;

/// Shared application state
pub type AppState = Arc<QueryEngine>;

/// Question-to-SQL request
#[derive(Debug, Deserialize, Serialize)]
pub struct QueryRequest {
    pub question: String,
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Pipeline error at the HTTP boundary
pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PipelineError::invalid_request(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        let body = ErrorResponse {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query", post(run_query))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server and run until Ctrl-C
pub async fn start_server(engine: QueryEngine, config: &ServerConfig) -> anyhow::Result<()> {
    let app = router(Arc::new(engine));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Query API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

async fn run_query(
    State(engine): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Malformed query request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    match engine.ask(&req.question).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::warn!("Query failed [{}]: {}", e.kind(), e);
            Err(e.into())
        }
    }
}

async fn health_check(State(engine): State<AppState>) -> Json<serde_json::Value> {
    let model = if engine.model_available().await {
        "available"
    } else {
        "unavailable"
    };
    Json(serde_json::json!({ "status": "ok", "model": model }))
}
