//! SeaORM storage backend
//!
//! Database storage for link records, supporting SQLite, MySQL/MariaDB and
//! PostgreSQL. The backend is inferred from the database URL.

mod connection;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, sea_query::OnConflict};
use tracing::{debug, warn};

use crate::errors::{ImsakiaError, Result};
use crate::storage::{LinkRecord, LinkStore};
use migration::entities::link;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infer the database backend from a connection URL.
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ImsakiaError::database_config(format!(
            "cannot infer database backend from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based record store
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ImsakiaError::database_config(
                "database_url is not set".to_string(),
            ));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn model_to_record(model: link::Model) -> LinkRecord {
    LinkRecord {
        slug: model.slug,
        payload: model.payload,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn record_to_active_model(record: &LinkRecord) -> link::ActiveModel {
    use sea_orm::Set;

    link::ActiveModel {
        slug: Set(record.slug.clone()),
        payload: Set(record.payload.clone()),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn get(&self, slug: &str) -> Result<Option<LinkRecord>> {
        let model = link::Entity::find_by_id(slug.to_owned())
            .one(&self.db)
            .await
            .map_err(|e| {
                ImsakiaError::database_operation(format!("failed to load link '{}': {}", slug, e))
            })?;

        Ok(model.map(model_to_record))
    }

    /// Atomic whole-record upsert via ON CONFLICT. `created_at` survives a
    /// replace; `updated_at` does not.
    async fn upsert(&self, record: LinkRecord) -> Result<()> {
        let active_model = record_to_active_model(&record);

        link::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(link::Column::Slug)
                    .update_columns([link::Column::Payload, link::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                ImsakiaError::database_operation(format!(
                    "failed to upsert link '{}': {}",
                    record.slug, e
                ))
            })?;

        debug!("Link record upserted: {}", record.slug);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<LinkRecord>> {
        let models = link::Entity::find()
            .order_by_desc(link::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                ImsakiaError::database_operation(format!("failed to list links: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_record).collect())
    }

    async fn backend_name(&self) -> String {
        self.backend_name.clone()
    }
}
