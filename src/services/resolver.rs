//! Link resolver (read path)
//!
//! Turns an inbound request location into a concrete [`ClientProfile`],
//! always. A miss, a store failure, an undecodable payload or a timeout all
//! resolve to the fixed default profile; the page never blocks on a store
//! problem and never shows an error for one.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::storage::{ClientProfile, LinkStore, decode_payload};

/// Name shown when no profile is published under the visited slug.
pub const DEFAULT_CLIENT_NAME: &str = "إمساكية رمضان الذكية";
pub const DEFAULT_CITY: &str = "القاهرة";

/// The fixed fallback profile.
pub fn default_profile() -> ClientProfile {
    ClientProfile {
        name: DEFAULT_CLIENT_NAME.to_string(),
        city: Some(DEFAULT_CITY.to_string()),
        ..Default::default()
    }
}

/// Query parameters the resolver reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Fallback slug carrier for hosts that cannot rewrite paths.
    pub s: Option<String>,
    /// Admin form gate. Presentational only: anyone inspecting the URL can
    /// set it, and nothing privileged happens server-side.
    pub admin: Option<String>,
}

/// Outcome of a resolution: always a usable profile.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPage {
    pub slug: Option<String>,
    pub profile: ClientProfile,
    pub admin: bool,
}

pub struct ResolverService {
    store: Arc<dyn LinkStore>,
    admin_key: String,
    lookup_timeout: Duration,
}

impl ResolverService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        admin_key: impl Into<String>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            store,
            admin_key: admin_key.into(),
            lookup_timeout,
        }
    }

    /// Slug extraction policy: first non-empty path segment, else the `s`
    /// query parameter. The winner is trimmed and lower-cased; an extraction
    /// that ends up empty counts as no slug at all.
    pub fn extract_slug(path: &str, query: &PageQuery) -> Option<String> {
        path.split('/')
            .find(|segment| !segment.is_empty())
            .map(str::to_string)
            .or_else(|| query.s.clone())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    pub fn is_admin(&self, query: &PageQuery) -> bool {
        query.admin.as_deref() == Some(self.admin_key.as_str())
    }

    /// Resolve the request location to a page. Slug extraction completes
    /// before the lookup starts, and the lookup completes (or falls back)
    /// before this returns; callers never observe a partial profile.
    pub async fn resolve(&self, path: &str, query: &PageQuery) -> ResolvedPage {
        let admin = self.is_admin(query);
        let slug = Self::extract_slug(path, query);

        let profile = match slug.as_deref() {
            Some(slug) => self.lookup(slug).await,
            None => default_profile(),
        };

        ResolvedPage {
            slug,
            profile,
            admin,
        }
    }

    /// Look up one slug, absorbing every failure mode into the default
    /// profile. Misses, store failures and decode failures are logged
    /// distinctly; visitors see the same fallback for all three.
    async fn lookup(&self, slug: &str) -> ClientProfile {
        let lookup = tokio::time::timeout(self.lookup_timeout, self.store.get(slug)).await;

        match lookup {
            Ok(Ok(Some(record))) if !record.payload.trim().is_empty() => {
                match decode_payload(&record.payload) {
                    Ok(profile) => profile,
                    Err(e) => {
                        warn!(
                            "stored payload for '{}' is undecodable, serving default profile: {}",
                            slug, e
                        );
                        default_profile()
                    }
                }
            }
            Ok(Ok(_)) => {
                debug!("no published profile for '{}', serving default", slug);
                default_profile()
            }
            Ok(Err(e)) => {
                error!("profile lookup for '{}' failed: {}", slug, e);
                default_profile()
            }
            Err(_) => {
                error!(
                    "profile lookup for '{}' timed out after {:?}",
                    slug, self.lookup_timeout
                );
                default_profile()
            }
        }
    }
}
