pub mod document_routes;
pub mod session_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación con sus capas
pub fn create_app_router(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors_middleware(&state.config.cors_origins));

    Router::new()
        .route("/health", get(health))
        .nest("/api/sessions", session_routes::create_session_router())
        .nest("/api/documents", document_routes::create_document_router())
        .layer(layers)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "gestao-documentos",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
