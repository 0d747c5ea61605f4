//! Document template queries

use super::{PgRepository, RepositoryError};
use crate::documents::DocumentType;
use crate::templates::model::DocumentTemplate;
use uuid::Uuid;

const TEMPLATE_COLUMNS: &str = "id, empresa_id, tipo, nombre, contenido_html, activo, es_default, created_at, updated_at";

impl PgRepository {
    /// Tenant row first, then the global (`empresa_id IS NULL`) one.
    /// A missing table reads as "no template".
    pub async fn find_default_template_row(
        &self,
        empresa_id: Uuid,
        tipo: DocumentType,
    ) -> Result<Option<DocumentTemplate>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM plantillas_documento \
             WHERE tipo = $1 AND activo AND es_default \
             AND (empresa_id = $2 OR empresa_id IS NULL) \
             ORDER BY empresa_id NULLS LAST, updated_at DESC NULLS LAST \
             LIMIT 1",
            TEMPLATE_COLUMNS
        );

        let result = sqlx::query_as::<_, DocumentTemplate>(&query)
            .bind(tipo.as_str())
            .bind(empresa_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from);

        match result {
            Err(err) if err.is_missing_table() => {
                log::warn!("plantillas_documento table missing, no template for {}", tipo);
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn list_template_rows(
        &self,
        empresa_id: Uuid,
    ) -> Result<Vec<DocumentTemplate>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM plantillas_documento \
             WHERE empresa_id = $1 OR empresa_id IS NULL \
             ORDER BY tipo, empresa_id NULLS LAST, nombre",
            TEMPLATE_COLUMNS
        );
        let rows = sqlx::query_as::<_, DocumentTemplate>(&query)
            .bind(empresa_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_template_row(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentTemplate>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM plantillas_documento WHERE id = $1 AND empresa_id = $2",
            TEMPLATE_COLUMNS
        );
        let row = sqlx::query_as::<_, DocumentTemplate>(&query)
            .bind(id)
            .bind(empresa_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn save_template_row(&self, template: &DocumentTemplate) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if template.es_default {
            sqlx::query(
                "UPDATE plantillas_documento SET es_default = FALSE, updated_at = NOW() \
                 WHERE empresa_id = $1 AND tipo = $2 AND id <> $3 AND es_default",
            )
            .bind(template.empresa_id)
            .bind(&template.tipo)
            .bind(template.id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO plantillas_documento
                (id, empresa_id, tipo, nombre, contenido_html, activo, es_default, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()), COALESCE($9, NOW()))
            ON CONFLICT (id) DO UPDATE SET
                nombre = EXCLUDED.nombre,
                contenido_html = EXCLUDED.contenido_html,
                activo = EXCLUDED.activo,
                es_default = EXCLUDED.es_default,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(template.id)
        .bind(template.empresa_id)
        .bind(&template.tipo)
        .bind(&template.nombre)
        .bind(&template.contenido_html)
        .bind(template.activo)
        .bind(template.es_default)
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        log::info!("Saved template {} ({})", template.id, template.tipo);
        Ok(())
    }
}
