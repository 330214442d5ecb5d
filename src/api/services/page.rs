//! Visitor page resolution
//!
//! The read path's HTTP surface. `GET /<slug>` (or `/?s=<slug>`) returns the
//! fully resolved page state as JSON: branding profile, admin flag, the
//! countdown and the 30-day schedule. Store problems never surface here; the
//! resolver guarantees a coherent page.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::debug;

use crate::services::resolver::{PageQuery, ResolverService};
use crate::services::timetable::{self, Countdown, TimetableRow};
use crate::storage::ClientProfile;

/// Everything the landing page needs, resolved server-side in one value.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub slug: Option<String>,
    pub profile: ClientProfile,
    pub admin: bool,
    pub ramadan_day: i64,
    pub countdown: Countdown,
    pub today: TimetableRow,
    pub schedule: Vec<TimetableRow>,
}

pub struct PageService;

impl PageService {
    pub async fn resolve_page(
        path: web::Path<String>,
        query: web::Query<PageQuery>,
        resolver: web::Data<Arc<ResolverService>>,
    ) -> impl Responder {
        let captured_path = path.into_inner();
        debug!("page resolution for path '{}'", captured_path);

        let resolved = resolver.resolve(&captured_path, &query).await;

        let now = chrono::Local::now().naive_local();
        let schedule = timetable::schedule();
        let today = timetable::today_row(now, &schedule);

        let view = PageView {
            title: format!("{} | رمضان ١٤٤٧ هـ", resolved.profile.name),
            slug: resolved.slug,
            profile: resolved.profile,
            admin: resolved.admin,
            ramadan_day: timetable::ramadan_day(now),
            countdown: timetable::countdown(now),
            today,
            schedule,
        };

        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(view)
    }
}

/// Page routes. Mounted last: the tail match swallows everything the API and
/// health scopes did not claim.
pub fn page_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{path}*", web::get().to(PageService::resolve_page))
        .route("/{path}*", web::head().to(PageService::resolve_page))
}
