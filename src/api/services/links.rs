//! Operator link management API
//!
//! The write path's HTTP surface plus the record listing the admin form
//! uses. Unlike the visitor page, errors here are surfaced verbatim:
//! publishing is an attended action and silent failure would be worse than a
//! visible one.

use std::sync::Arc;

use actix_web::{Responder, web};
use serde::Serialize;
use tracing::{info, trace};

use crate::services::publisher::{PublishRequest, PublisherService};
use crate::storage::{CITIES, ClientProfile, LinkStore, decode_payload};

use super::helpers::{api_result, error_response, success_response};

/// Listing entry: the slug plus whatever the stored payload still decodes
/// to. A `None` profile marks a corrupted record the operator should
/// republish.
#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    pub slug: String,
    pub profile: Option<ClientProfile>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub struct LinkService;

impl LinkService {
    /// POST /api/links - publish (create or replace) a profile.
    pub async fn publish_link(
        body: web::Json<PublishRequest>,
        publisher: web::Data<Arc<PublisherService>>,
    ) -> impl Responder {
        let req = body.into_inner();
        info!(
            "publish request for slug '{}' (client '{}')",
            req.slug, req.profile.name
        );

        api_result(publisher.publish(req).await)
    }

    /// GET /api/links - list all published records.
    pub async fn get_all_links(store: web::Data<Arc<dyn LinkStore>>) -> impl Responder {
        let records = match store.load_all().await {
            Ok(records) => records,
            Err(e) => return super::helpers::error_from_imsakia(&e),
        };

        trace!("listing {} link records", records.len());

        let summaries: Vec<LinkSummary> = records
            .into_iter()
            .map(|record| LinkSummary {
                profile: decode_payload(&record.payload).ok(),
                slug: record.slug,
                updated_at: record.updated_at,
            })
            .collect();

        success_response(summaries)
    }

    /// GET /api/links/{slug} - fetch one record, decoded.
    pub async fn get_link(
        path: web::Path<String>,
        store: web::Data<Arc<dyn LinkStore>>,
    ) -> impl Responder {
        let slug = path.into_inner().trim().to_lowercase();

        match store.get(&slug).await {
            Ok(Some(record)) => match decode_payload(&record.payload) {
                Ok(profile) => success_response(LinkSummary {
                    slug: record.slug,
                    profile: Some(profile),
                    updated_at: record.updated_at,
                }),
                Err(e) => super::helpers::error_from_imsakia(&e),
            },
            Ok(None) => error_response(
                actix_web::http::StatusCode::NOT_FOUND,
                &format!("no record published under '{}'", slug),
            ),
            Err(e) => super::helpers::error_from_imsakia(&e),
        }
    }

    /// GET /api/cities - the advisory city list for the admin form.
    pub async fn get_cities() -> impl Responder {
        success_response(CITIES)
    }
}

pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(LinkService::get_all_links))
        .route("", web::post().to(LinkService::publish_link))
        .route("/{slug}", web::get().to(LinkService::get_link))
}

pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(links_routes())
        .route("/cities", web::get().to(LinkService::get_cities))
}
