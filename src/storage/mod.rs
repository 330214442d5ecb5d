use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{CITIES, ClientProfile, LinkRecord, decode_payload};

/// The record store both core flows talk to.
///
/// Callers normalize slug case before calling; the store compares keys
/// exactly as given.
#[async_trait]
pub trait LinkStore: Send + Sync {
    async fn get(&self, slug: &str) -> Result<Option<LinkRecord>>;

    /// Create-or-replace by slug. The payload is replaced wholesale; there
    /// is no partial update.
    async fn upsert(&self, record: LinkRecord) -> Result<()>;

    async fn load_all(&self) -> Result<Vec<LinkRecord>>;

    async fn backend_name(&self) -> String;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<dyn LinkStore>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
