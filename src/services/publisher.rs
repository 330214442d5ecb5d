//! Link publisher (write path)
//!
//! Validates operator input, normalizes the desired slug and persists the
//! record whole. Repeated publishes under one slug replace rather than
//! duplicate. Unlike the read path, every failure here is surfaced to the
//! operator verbatim.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::errors::{ImsakiaError, Result};
use crate::storage::{ClientProfile, LinkRecord, LinkStore};
use crate::utils::normalize_slug;

/// Operator input: the profile to publish and the raw slug choice.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishRequest {
    pub slug: String,
    #[serde(flatten)]
    pub profile: ClientProfile,
}

/// Successful publish: the stored key and the canonical share URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedLink {
    pub slug: String,
    pub url: String,
}

pub struct PublisherService {
    store: Arc<dyn LinkStore>,
    public_url: String,
}

impl PublisherService {
    /// `public_url` is the origin share links are minted against; it must be
    /// an absolute URL.
    pub fn new(store: Arc<dyn LinkStore>, public_url: &str) -> Result<Self> {
        Url::parse(public_url).map_err(|e| {
            ImsakiaError::validation(format!("invalid public URL '{}': {}", public_url, e))
        })?;

        Ok(Self {
            store,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }

    /// Canonical share URL: the public origin joined with the normalized
    /// slug as sole path segment.
    pub fn share_url(&self, slug: &str) -> String {
        format!("{}/{}", self.public_url, slug)
    }

    /// Create-or-replace the record for the request's slug.
    ///
    /// Validation failures return before any store call. Concurrent
    /// publishes to the same slug race with last-writer-wins; the store
    /// offers no conditional write, so this is a documented limitation
    /// rather than something coordinated here.
    pub async fn publish(&self, req: PublishRequest) -> Result<PublishedLink> {
        if req.profile.name.trim().is_empty() {
            return Err(ImsakiaError::validation("client name must not be empty"));
        }
        if req.slug.trim().is_empty() {
            return Err(ImsakiaError::validation("slug must not be empty"));
        }

        let slug = normalize_slug(&req.slug);
        if slug.is_empty() {
            return Err(ImsakiaError::validation(format!(
                "slug '{}' contains no characters usable in a URL",
                req.slug
            )));
        }

        let payload = serde_json::to_string(&req.profile)?;
        let now = Utc::now();

        self.store
            .upsert(LinkRecord {
                slug: slug.clone(),
                payload,
                created_at: now,
                updated_at: now,
            })
            .await?;

        let url = self.share_url(&slug);
        info!("published profile '{}' under /{}", req.profile.name, slug);

        Ok(PublishedLink { slug, url })
    }
}
