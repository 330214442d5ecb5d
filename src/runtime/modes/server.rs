//! Server mode
//!
//! Configures and starts the HTTP server: storage, the resolver and
//! publisher services, CORS, and all routes. The visitor page routes mount
//! last so the tail match only sees paths no other scope claimed.

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::services::{AppStartTime, api_routes, health_routes, page_routes};
use crate::config::get_config;
use crate::services::{PublisherService, ResolverService};
use crate::storage::{LinkStore, StorageFactory};

/// Build CORS middleware. Empty origin list keeps the browser's same-origin
/// default; `*` opens the JSON API to any origin.
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server until it exits.
///
/// **Note**: logging must be initialized before calling this.
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = get_config();

    let storage: Arc<dyn LinkStore> = StorageFactory::create().await.map_err(|e| {
        tracing::error!("Storage startup failed: {}", e);
        e
    })?;
    info!("Using storage backend: {}", storage.backend_name().await);

    let resolver = Arc::new(ResolverService::new(
        storage.clone(),
        &config.site.admin_key,
        Duration::from_secs(config.site.lookup_timeout_secs),
    ));
    let publisher = Arc::new(PublisherService::new(storage.clone(), &config.site.public_url)?);

    let cors_origins = config.server.cors_allowed_origins.clone();
    let cpu_count = config.server.cpu_count.min(32);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors_middleware(&cors_origins))
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(resolver.clone()))
            .app_data(web::Data::new(publisher.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .service(api_routes())
            .service(health_routes())
            .service(page_routes())
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
