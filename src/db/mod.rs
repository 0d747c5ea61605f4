//! Database module - AppState and the document data repository
//!
//! This module is split into submodules for better separation of concerns:
//! - `records` - read-only HR records (companies, employees, events)
//! - `template` - document template rows

mod records;
mod template;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::documents::{DocumentEngine, DocumentType};
use crate::hr::{Capacitacion, Empleado, Empresa, Sancion, Vacacion};
use crate::storage::{ObjectStorage, SupabaseStorage};
use crate::templates::model::DocumentTemplate;

/// Postgres error code for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// True when the backing table has not been created yet.
    pub fn is_missing_table(&self) -> bool {
        match self {
            RepositoryError::Database(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some(UNDEFINED_TABLE)
            }
            _ => false,
        }
    }
}

/// Every read and write the document pipeline performs against the backend.
/// All lookups are scoped to a tenant (`empresa_id`).
#[async_trait]
pub trait DocumentRepository {
    /// Active default template for `tipo`, preferring the tenant's own row
    /// over a global one.
    async fn find_default_template(
        &self,
        empresa_id: Uuid,
        tipo: DocumentType,
    ) -> Result<Option<DocumentTemplate>, RepositoryError>;

    async fn list_templates(&self, empresa_id: Uuid)
        -> Result<Vec<DocumentTemplate>, RepositoryError>;

    async fn get_template(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentTemplate>, RepositoryError>;

    /// Insert or update a template. A default template clears the default
    /// flag of the tenant's other templates of the same type.
    async fn save_template(&self, template: &DocumentTemplate) -> Result<(), RepositoryError>;

    async fn get_company(&self, empresa_id: Uuid) -> Result<Option<Empresa>, RepositoryError>;

    async fn get_employee(
        &self,
        empresa_id: Uuid,
        empleado_id: Uuid,
    ) -> Result<Option<Empleado>, RepositoryError>;

    async fn get_sanction(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Sancion>, RepositoryError>;

    async fn get_vacation(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vacacion>, RepositoryError>;

    async fn get_training(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Capacitacion>, RepositoryError>;
}

/// Repository backed by the Supabase Postgres database.
#[derive(Clone)]
pub struct PgRepository {
    pub pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgRepository {
    async fn find_default_template(
        &self,
        empresa_id: Uuid,
        tipo: DocumentType,
    ) -> Result<Option<DocumentTemplate>, RepositoryError> {
        self.find_default_template_row(empresa_id, tipo).await
    }

    async fn list_templates(
        &self,
        empresa_id: Uuid,
    ) -> Result<Vec<DocumentTemplate>, RepositoryError> {
        self.list_template_rows(empresa_id).await
    }

    async fn get_template(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentTemplate>, RepositoryError> {
        self.get_template_row(empresa_id, id).await
    }

    async fn save_template(&self, template: &DocumentTemplate) -> Result<(), RepositoryError> {
        self.save_template_row(template).await
    }

    async fn get_company(&self, empresa_id: Uuid) -> Result<Option<Empresa>, RepositoryError> {
        self.get_company_row(empresa_id).await
    }

    async fn get_employee(
        &self,
        empresa_id: Uuid,
        empleado_id: Uuid,
    ) -> Result<Option<Empleado>, RepositoryError> {
        self.get_employee_row(empresa_id, empleado_id).await
    }

    async fn get_sanction(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Sancion>, RepositoryError> {
        self.get_sanction_row(empresa_id, id).await
    }

    async fn get_vacation(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vacacion>, RepositoryError> {
        self.get_vacation_row(empresa_id, id).await
    }

    async fn get_training(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Capacitacion>, RepositoryError> {
        self.get_training_row(empresa_id, id).await
    }
}

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn DocumentRepository + Send + Sync>,
    pub storage: Arc<dyn ObjectStorage + Send + Sync>,
    pub jwt_secret: String,
}

impl AppState {
    pub async fn new_with_config(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(900))
            .max_lifetime(std::time::Duration::from_secs(1800))
            .connect(&config.database_url)
            .await?;

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent(concat!("hr-docs-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let storage = Arc::new(SupabaseStorage::new(config.supabase.clone(), http_client));

        Ok(Self::new_with_repository_and_storage(
            Arc::new(PgRepository::new(pool)),
            storage,
            config.jwt_secret.clone(),
        ))
    }

    pub fn new_with_repository_and_storage(
        repository: Arc<dyn DocumentRepository + Send + Sync>,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        jwt_secret: String,
    ) -> Self {
        AppState {
            repository,
            storage,
            jwt_secret,
        }
    }

    pub fn document_engine(&self) -> DocumentEngine {
        DocumentEngine::new(self.repository.clone(), self.storage.clone())
    }
}
