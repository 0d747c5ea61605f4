//! Input validation for document and template requests.
//!
//! Errors are collected rather than returned on the first failure so the
//! admin UI can show every problem at once, each with a suggestion.

use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::common::is_token_name;
use super::DocumentType;

/// Validation error with a user facing message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Message in Spanish
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} no puede estar vacío", label)).with_suggestion(format!(
            "Complete {} con un valor válido",
            label.to_lowercase()
        ))
    }

    pub fn missing_reference(field: &str, tipo: DocumentType) -> Self {
        let record = tipo
            .required_event()
            .map(|kind| kind.label())
            .unwrap_or("registro");
        Self::new(
            field,
            format!("El documento '{}' requiere el id de la {}", tipo, record),
        )
        .with_suggestion(format!("Seleccione la {} a notificar", record))
    }

    pub fn invalid_token_name(field: &str, name: &str) -> Self {
        Self::new(field, format!("'{}' no es un nombre de campo válido", name)).with_suggestion(
            "Use solo minúsculas, números y guiones bajos, por ejemplo: lugar_de_trabajo",
        )
    }

    pub fn nil_id(field: &str) -> Self {
        Self::new(field, "El identificador no puede ser nulo")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validación fallida: {} error(es) encontrado(s)",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.join("\n")
    }

    /// Ok if no errors, Err with formatted message if errors exist
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_id(value: &Uuid, field: &str, errors: &mut ValidationErrors) {
    if value.is_nil() {
        errors.add(ValidationError::nil_id(field));
    }
}

/// Documents tied to an event record need its id.
pub fn validate_reference(
    tipo: DocumentType,
    referencia_id: Option<&Uuid>,
    field: &str,
    errors: &mut ValidationErrors,
) {
    if tipo.required_event().is_none() {
        return;
    }
    match referencia_id {
        None => errors.add(ValidationError::missing_reference(field, tipo)),
        Some(id) => validate_id(id, field, errors),
    }
}

/// Extra replacement keys must be well-formed token names.
pub fn validate_token_names(
    fields: &BTreeMap<String, String>,
    field: &str,
    errors: &mut ValidationErrors,
) {
    for name in fields.keys() {
        if !is_token_name(name) {
            errors.add(ValidationError::invalid_token_name(
                &format!("{}.{}", field, name),
                name,
            ));
        }
    }
}
