use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::placeholders::VOCABULARY;
use super::validation::{validate_id, validate_reference, validate_token_names, ValidationErrors};
use super::{DocumentType, RenderSource, Validator};

/// Request body shared by generate, render and preview.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateDocumentRequest {
    pub tipo: DocumentType,
    pub empleado_id: Uuid,
    /// Sanction, vacation or training id, depending on `tipo`.
    pub referencia_id: Option<Uuid>,
    /// Issue date printed on the document. Defaults to today.
    pub fecha: Option<NaiveDate>,
    /// Extra or overriding replacement values.
    #[serde(default)]
    pub campos_extra: BTreeMap<String, String>,
}

impl Validator for GenerateDocumentRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();
        validate_id(&self.empleado_id, "empleado_id", &mut errors);
        validate_reference(
            self.tipo,
            self.referencia_id.as_ref(),
            "referencia_id",
            &mut errors,
        );
        validate_token_names(&self.campos_extra, "campos_extra", &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedDocument {
    /// Public URL of the stored PDF
    pub url: String,
    /// Object path inside the bucket
    pub ruta: String,
    pub filename: String,
    pub tipo: DocumentType,
    pub origen: RenderSource,
    pub tamano_bytes: usize,
    pub generado_en: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentPreview {
    pub tipo: DocumentType,
    /// Substituted template HTML, `None` when the built-in layout applies.
    pub html: Option<String>,
    pub template_id: Option<Uuid>,
    pub origen: RenderSource,
    pub reemplazos: BTreeMap<String, String>,
    pub placeholders_desconocidos: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaceholderGroup {
    pub categoria: String,
    pub tokens: Vec<String>,
}

/// Token vocabulary grouped by category, in display order.
pub fn placeholder_catalog() -> Vec<PlaceholderGroup> {
    VOCABULARY
        .iter()
        .map(|(categoria, tokens)| PlaceholderGroup {
            categoria: categoria.to_string(),
            tokens: tokens.iter().map(|t| format!("{{{{{}}}}}", t)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{
            "tipo": "constancia_trabajo",
            "empleado_id": "6f1c1f2e-1d0a-4c59-9a3b-2f0c2f5b7a10"
        }"#;
        let request: GenerateDocumentRequest = serde_json::from_str(json).unwrap();
        assert!(request.campos_extra.is_empty());
        assert!(request.fecha.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_requires_reference_for_suspension() {
        let request = GenerateDocumentRequest {
            tipo: DocumentType::Suspension,
            empleado_id: Uuid::new_v4(),
            referencia_id: None,
            fecha: None,
            campos_extra: BTreeMap::new(),
        };
        let message = request.validate().unwrap_err();
        assert!(message.contains("referencia_id"));
    }

    #[test]
    fn test_catalog_wraps_tokens_in_braces() {
        let catalog = placeholder_catalog();
        assert_eq!(catalog.len(), VOCABULARY.len());
        assert!(catalog[0].tokens.iter().all(|t| t.starts_with("{{") && t.ends_with("}}")));
    }
}
