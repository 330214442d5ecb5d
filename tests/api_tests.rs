//! HTTP surface tests
//!
//! Exercise the operator API, the health checks and the visitor page through
//! actix routing, against a temporary SQLite database.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::json;
use tempfile::TempDir;

use imsakia::api::services::{AppStartTime, api_routes, health_routes, page_routes};
use imsakia::errors::{ImsakiaError, Result};
use imsakia::services::{PublisherService, ResolverService};
use imsakia::storage::{LinkRecord, LinkStore, SeaOrmStorage};

async fn create_temp_storage() -> (Arc<dyn LinkStore>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

// Builds the same app the server mode builds, minus middleware.
macro_rules! test_app {
    ($storage:expr) => {{
        let storage: Arc<dyn LinkStore> = $storage.clone();
        let resolver = Arc::new(ResolverService::new(
            storage.clone(),
            "123",
            Duration::from_secs(2),
        ));
        let publisher =
            Arc::new(PublisherService::new(storage.clone(), "https://ramadan.example.com").unwrap());
        let app_start_time = AppStartTime {
            start_datetime: chrono::Utc::now(),
        };

        test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(resolver))
                .app_data(web::Data::new(publisher))
                .app_data(web::Data::new(app_start_time))
                .service(api_routes())
                .service(health_routes())
                .service(page_routes()),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_publish_then_visit_roundtrip() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/links")
            .set_json(json!({
                "slug": "My Shop!!",
                "name": "مطعم فورصة",
                "city": "القاهرة",
                "whatsapp": "201001234567"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["slug"], "my-shop");
    assert_eq!(body["data"]["url"], "https://ramadan.example.com/my-shop");

    let resp = test::call_service(&app, TestRequest::get().uri("/my-shop").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["slug"], "my-shop");
    assert_eq!(page["profile"]["name"], "مطعم فورصة");
    assert_eq!(page["profile"]["whatsapp"], "201001234567");
    assert_eq!(page["admin"], false);
    assert_eq!(page["schedule"].as_array().unwrap().len(), 30);
    assert!(page["title"].as_str().unwrap().contains("مطعم فورصة"));
}

#[actix_rt::test]
async fn test_publish_validation_failures_return_400() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    for body in [
        json!({ "slug": "shop", "name": "   " }),
        json!({ "slug": "  ", "name": "متجر" }),
        json!({ "slug": "!!!", "name": "متجر" }),
    ] {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/links")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing was persisted.
    let resp = test::call_service(&app, TestRequest::get().uri("/api/links").to_request()).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn test_unknown_slug_serves_default_profile() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/ghost").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["profile"]["name"], "إمساكية رمضان الذكية");
    assert_eq!(page["profile"]["city"], "القاهرة");
}

#[actix_rt::test]
async fn test_root_and_query_slug_paths() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/links")
            .set_json(json!({ "slug": "foursa", "name": "متجر فورصة" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Bare root resolves the default profile.
    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["slug"], serde_json::Value::Null);
    assert_eq!(page["profile"]["name"], "إمساكية رمضان الذكية");

    // The `s` query parameter carries the slug when the path cannot.
    let resp = test::call_service(&app, TestRequest::get().uri("/?s=foursa").to_request()).await;
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["slug"], "foursa");
    assert_eq!(page["profile"]["name"], "متجر فورصة");
}

#[actix_rt::test]
async fn test_admin_flag_over_http() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    for (uri, expected) in [
        ("/?admin=123", true),
        ("/?admin=456", false),
        ("/?admin=", false),
        ("/", false),
    ] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        let page: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(page["admin"], expected, "admin flag mismatch for {}", uri);
    }
}

#[actix_rt::test]
async fn test_link_listing_and_single_lookup() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    for (slug, name) in [("first", "الأول"), ("second", "الثاني")] {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/links")
                .set_json(json!({ "slug": slug, "name": name }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(&app, TestRequest::get().uri("/api/links").to_request()).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/links/first").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["profile"]["name"], "الأول");

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/links/ghost").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_cities_endpoint() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/cities").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let cities = body["data"].as_array().unwrap();
    assert_eq!(cities.len(), 4);
    assert!(cities.contains(&json!("القاهرة")));
}

// Storage whose every call fails, for the degraded-health path.
struct FailingStore;

#[async_trait::async_trait]
impl LinkStore for FailingStore {
    async fn get(&self, _slug: &str) -> Result<Option<LinkRecord>> {
        Err(ImsakiaError::database_operation("connection refused"))
    }

    async fn upsert(&self, _record: LinkRecord) -> Result<()> {
        Err(ImsakiaError::database_operation("connection refused"))
    }

    async fn load_all(&self) -> Result<Vec<LinkRecord>> {
        Err(ImsakiaError::database_operation("connection refused"))
    }

    async fn backend_name(&self) -> String {
        "mock".to_string()
    }
}

#[actix_rt::test]
async fn test_health_reports_failing_storage() {
    let storage: Arc<dyn LinkStore> = Arc::new(FailingStore);
    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "degraded");
    assert_eq!(body["data"]["storage"]["status"], "unhealthy");

    let resp =
        test::call_service(&app, TestRequest::get().uri("/healthz/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    // The visitor page still renders coherently on a dead store.
    let resp = test::call_service(&app, TestRequest::get().uri("/any-slug").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["profile"]["name"], "إمساكية رمضان الذكية");
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let (storage, _dir) = create_temp_storage().await;
    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "sqlite");

    let resp = test::call_service(&app, TestRequest::get().uri("/healthz/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/healthz/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
