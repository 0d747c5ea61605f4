use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::documents::validation::{validate_required, ValidationErrors};
use crate::documents::{DocumentType, Validator};

/// HTML template row stored in `plantillas_documento`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct DocumentTemplate {
    pub id: Uuid,
    /// Owning company; `None` marks a global template shared by all tenants.
    pub empresa_id: Option<Uuid>,
    pub tipo: String,
    pub nombre: String,
    pub contenido_html: String,
    pub activo: bool,
    pub es_default: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentTemplate {
    pub fn new(
        empresa_id: Uuid,
        tipo: DocumentType,
        nombre: String,
        contenido_html: String,
        activo: bool,
        es_default: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            empresa_id: Some(empresa_id),
            tipo: tipo.as_str().to_string(),
            nombre,
            contenido_html,
            activo,
            es_default,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Whether this row is the one generation should pick for `tipo`.
    pub fn is_default_for(&self, tipo: DocumentType) -> bool {
        self.activo && self.es_default && self.tipo == tipo.as_str()
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTemplateRequest {
    pub tipo: DocumentType,
    pub nombre: String,
    pub contenido_html: String,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub es_default: bool,
}

impl Validator for CreateTemplateRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.nombre, "nombre", "Nombre de la plantilla", &mut errors);
        validate_required(
            &self.contenido_html,
            "contenido_html",
            "Contenido HTML",
            &mut errors,
        );
        errors.into_result()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTemplateRequest {
    pub nombre: Option<String>,
    pub contenido_html: Option<String>,
    pub activo: Option<bool>,
    pub es_default: Option<bool>,
}

impl Validator for UpdateTemplateRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();
        if let Some(nombre) = &self.nombre {
            validate_required(nombre, "nombre", "Nombre de la plantilla", &mut errors);
        }
        if let Some(contenido) = &self.contenido_html {
            validate_required(contenido, "contenido_html", "Contenido HTML", &mut errors);
        }
        errors.into_result()
    }
}

impl UpdateTemplateRequest {
    pub fn apply(&self, template: &mut DocumentTemplate) {
        if let Some(nombre) = &self.nombre {
            template.nombre = nombre.clone();
        }
        if let Some(contenido) = &self.contenido_html {
            template.contenido_html = contenido.clone();
        }
        if let Some(activo) = self.activo {
            template.activo = activo;
        }
        if let Some(es_default) = self.es_default {
            template.es_default = es_default;
        }
        template.updated_at = Some(Utc::now());
    }
}

/// Template plus the placeholders it uses that the engine does not know.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateResponse {
    pub plantilla: DocumentTemplate,
    pub placeholders_desconocidos: Vec<String>,
}
