//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Existence probe on an id that is never issued
    let storage = match state.service.student_exists(0).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("storage health check failed: {}", e);
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::service::GradebookService;

    #[tokio::test]
    async fn health_returns_ok() {
        let state = Arc::new(AppState::new(GradebookService::new(Arc::new(MemoryStore::new()))));
        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.storage, "ok");
    }
}
