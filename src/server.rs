//! HTTP routes.

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::model::{
    ErrorResponse, HealthResponse, ImportFromTextRequest, ImportFromUrlRequest, ImportResponse,
    ProvidersResponse,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, warn};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all handlers
pub type AppState = Arc<Gateway>;

/// Build the router with every gateway endpoint.
pub fn router(gateway: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/providers", get(providers))
        .route("/import/url", post(import_url))
        .route("/import/text", post(import_text))
        .layer(CorsLayer::permissive())
        .with_state(gateway)
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Request rejected with {}: {}", status, self);
        }

        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

async fn providers(State(gateway): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: gateway.providers(),
    })
}

async fn import_url(
    State(gateway): State<AppState>,
    Json(request): Json<ImportFromUrlRequest>,
) -> Result<Json<ImportResponse>, GatewayError> {
    gateway.import_url(request).await.map(Json)
}

async fn import_text(
    State(gateway): State<AppState>,
    Json(request): Json<ImportFromTextRequest>,
) -> Result<Json<ImportResponse>, GatewayError> {
    gateway.import_text(request).await.map(Json)
}
