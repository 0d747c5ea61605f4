//! Document generation - business logic for turning HR records into PDFs.
//!
//! The pipeline is: load records, build the replacement bag, look up the
//! tenant template, substitute placeholders, render the PDF, upload it.
//! - `placeholders` - token vocabulary and replacement bag
//! - `substitution` - `{{token}}` and `{{#field}}...{{/field}}` processing
//! - `html` / `pdf` - flatten HTML into text blocks and lay them out
//! - `fallback` - hard-coded renderers used when no template applies
//! - `engine` - orchestration with template fallback and upload

pub mod common;
pub mod context;
pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod html;
pub mod models;
pub mod pdf;
pub mod placeholders;
pub mod substitution;
pub mod traits;
pub mod validation;

pub use context::{DocumentContext, EventRecord};
pub use engine::DocumentEngine;
pub use placeholders::ReplacementMap;
pub use traits::Validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::RepositoryError;

/// Logical document types a tenant can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Written warning for a sanction.
    Amonestacion,
    Suspension,
    /// Vacation notice.
    Vacaciones,
    /// Training completion certificate.
    Capacitacion,
    /// Employment certificate.
    ConstanciaTrabajo,
}

/// Which HR record a document type needs besides employee and company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Sancion,
    Vacacion,
    Capacitacion,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sancion => "sancion",
            Self::Vacacion => "vacacion",
            Self::Capacitacion => "capacitacion",
        }
    }
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Amonestacion,
        DocumentType::Suspension,
        DocumentType::Vacaciones,
        DocumentType::Capacitacion,
        DocumentType::ConstanciaTrabajo,
    ];

    /// Identifier stored in the `tipo` column of the templates table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amonestacion => "amonestacion",
            Self::Suspension => "suspension",
            Self::Vacaciones => "vacaciones",
            Self::Capacitacion => "capacitacion",
            Self::ConstanciaTrabajo => "constancia_trabajo",
        }
    }

    /// Human readable title printed on the document.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Amonestacion => "Notificación de Apercibimiento",
            Self::Suspension => "Notificación de Suspensión",
            Self::Vacaciones => "Notificación de Vacaciones",
            Self::Capacitacion => "Certificado de Capacitación",
            Self::ConstanciaTrabajo => "Constancia de Trabajo",
        }
    }

    pub fn required_event(&self) -> Option<EventKind> {
        match self {
            Self::Amonestacion | Self::Suspension => Some(EventKind::Sancion),
            Self::Vacaciones => Some(EventKind::Vacacion),
            Self::Capacitacion => Some(EventKind::Capacitacion),
            Self::ConstanciaTrabajo => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .iter()
            .copied()
            .find(|tipo| tipo.as_str() == value.trim())
            .ok_or_else(|| format!("tipo de documento desconocido: '{}'", value))
    }
}

/// Which rendering path produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderSource {
    /// Tenant (or global) HTML template.
    Plantilla,
    /// Hard-coded routine for the document type.
    Predeterminado,
    /// Minimal renderer used when a template rendered empty.
    Minimo,
}

impl RenderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plantilla => "plantilla",
            Self::Predeterminado => "predeterminado",
            Self::Minimo => "minimo",
        }
    }
}

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Validation(String),
    #[error("company {0} not found")]
    CompanyNotFound(Uuid),
    #[error("employee {0} not found")]
    EmployeeNotFound(Uuid),
    #[error("{kind} {id} not found for this employee")]
    EventNotFound { kind: &'static str, id: Uuid },
    #[error("failed to read HR records: {0}")]
    Records(#[source] RepositoryError),
    #[error("failed to render PDF: {0}")]
    Render(String),
    #[error("failed to upload document: {0}")]
    Upload(String),
}

impl From<printpdf::Error> for DocumentError {
    fn from(err: printpdf::Error) -> Self {
        DocumentError::Render(err.to_string())
    }
}

/// PDF bytes plus the path that produced them.
#[derive(Debug)]
pub struct RenderedDocument {
    pub pdf: Vec<u8>,
    pub origen: RenderSource,
    pub template_id: Option<Uuid>,
}
