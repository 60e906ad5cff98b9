/// Health endpoints used by container probes and `news-service healthcheck`
use crate::db::Storage;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use std::time::Instant;

/// Readiness summary: 200 when the storage backend answers, 503 otherwise
pub async fn health_summary(state: web::Data<AppState>) -> HttpResponse {
    let start = Instant::now();
    let backend = state.storage.backend_name();

    match state.storage.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "news-service",
            "storage": backend,
            "latency_ms": start.elapsed().as_millis() as u64,
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!(backend, "Storage health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "news-service",
                "storage": backend,
                "error": "storage unavailable"
            }))
        }
    }
}

pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
