use std::sync::Arc;
use std::time::Duration;

use actix_web::{Responder, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::storage::LinkStore;

use super::helpers::success_response;

/// Application start time, recorded once at boot.
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    pub links_count: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: i64,
    pub storage: HealthStorageCheck,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        store: web::Data<Arc<dyn LinkStore>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("received health check request");

        let backend = store.backend_name().await;

        let storage = match tokio::time::timeout(Duration::from_secs(5), store.load_all()).await {
            Ok(Ok(records)) => HealthStorageCheck {
                status: "healthy".to_string(),
                backend,
                links_count: Some(records.len()),
                error: None,
            },
            Ok(Err(e)) => {
                error!("storage health check failed: {}", e);
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    links_count: None,
                    error: Some(format!("database error: {}", e)),
                }
            }
            Err(_) => {
                error!("storage health check timeout");
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    links_count: None,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let status = if storage.status == "healthy" {
            "healthy"
        } else {
            "degraded"
        };

        success_response(HealthResponse {
            status: status.to_string(),
            uptime_seconds: (chrono::Utc::now() - app_start_time.start_datetime).num_seconds(),
            storage,
        })
    }

    /// Liveness probe: the process answers, nothing else is checked.
    pub async fn liveness_check() -> impl Responder {
        success_response(serde_json::json!({ "status": "alive" }))
    }

    pub async fn readiness_check(store: web::Data<Arc<dyn LinkStore>>) -> impl Responder {
        match tokio::time::timeout(Duration::from_secs(5), store.load_all()).await {
            Ok(Ok(_)) => success_response(serde_json::json!({ "status": "ready" })),
            _ => super::helpers::error_response(
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                "storage not ready",
            ),
        }
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/healthz")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
}
