//! Document engine.
//!
//! Loads the HR records for a request, resolves the template for the tenant,
//! renders the PDF and uploads it. Template lookup never fails the request:
//! any problem there degrades to the built-in layout for the document type.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::common::{sanitize_filename, today};
use super::fallback::{render_builtin, render_minimal};
use super::html::{html_to_blocks, text_length};
use super::models::{DocumentPreview, GenerateDocumentRequest, GeneratedDocument};
use super::pdf::render_blocks;
use super::substitution::{render_template, unknown_placeholders};
use super::{
    DocumentContext, DocumentError, DocumentType, EventKind, EventRecord, RenderSource,
    RenderedDocument, ReplacementMap, Validator,
};
use crate::db::DocumentRepository;
use crate::hr::Empleado;
use crate::storage::ObjectStorage;
use crate::templates::model::DocumentTemplate;

/// Below this many visible characters a rendered template counts as empty.
pub const MIN_TEXT_CHARS: usize = 10;
/// Smallest byte size accepted as a real PDF.
pub const MIN_PDF_BYTES: usize = 512;

pub struct DocumentEngine {
    repository: Arc<dyn DocumentRepository + Send + Sync>,
    storage: Arc<dyn ObjectStorage + Send + Sync>,
}

impl DocumentEngine {
    pub fn new(
        repository: Arc<dyn DocumentRepository + Send + Sync>,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Fetch company, employee and event record for the request.
    pub async fn load_context(
        &self,
        empresa_id: Uuid,
        request: &GenerateDocumentRequest,
    ) -> Result<DocumentContext, DocumentError> {
        let empresa = self
            .repository
            .get_company(empresa_id)
            .await
            .map_err(DocumentError::Records)?
            .ok_or(DocumentError::CompanyNotFound(empresa_id))?;

        let empleado = self
            .repository
            .get_employee(empresa_id, request.empleado_id)
            .await
            .map_err(DocumentError::Records)?
            .ok_or(DocumentError::EmployeeNotFound(request.empleado_id))?;

        let evento = match request.tipo.required_event() {
            None => EventRecord::Ninguno,
            Some(kind) => {
                let id = request.referencia_id.ok_or_else(|| {
                    DocumentError::Validation(format!(
                        "referencia_id es obligatorio para '{}'",
                        request.tipo
                    ))
                })?;
                self.load_event(empresa_id, &empleado, kind, id).await?
            }
        };

        let fecha: NaiveDate = request.fecha.unwrap_or_else(today);
        Ok(DocumentContext::new(empresa, empleado, fecha)
            .with_event(evento)
            .with_extra_fields(request.campos_extra.clone()))
    }

    async fn load_event(
        &self,
        empresa_id: Uuid,
        empleado: &Empleado,
        kind: EventKind,
        id: Uuid,
    ) -> Result<EventRecord, DocumentError> {
        let not_found = DocumentError::EventNotFound {
            kind: kind.label(),
            id,
        };

        let record = match kind {
            EventKind::Sancion => self
                .repository
                .get_sanction(empresa_id, id)
                .await
                .map_err(DocumentError::Records)?
                .filter(|s| s.empleado_id == empleado.id)
                .map(EventRecord::Sancion),
            EventKind::Vacacion => self
                .repository
                .get_vacation(empresa_id, id)
                .await
                .map_err(DocumentError::Records)?
                .filter(|v| v.empleado_id == empleado.id)
                .map(EventRecord::Vacacion),
            EventKind::Capacitacion => self
                .repository
                .get_training(empresa_id, id)
                .await
                .map_err(DocumentError::Records)?
                .filter(|c| c.empleado_id == empleado.id)
                .map(EventRecord::Capacitacion),
        };

        record.ok_or(not_found)
    }

    /// Active default template for the tenant, or `None` when the built-in
    /// layout should be used. Backend errors are logged and swallowed.
    pub async fn lookup_template(
        &self,
        empresa_id: Uuid,
        tipo: DocumentType,
    ) -> Option<DocumentTemplate> {
        match self.repository.find_default_template(empresa_id, tipo).await {
            Ok(Some(template)) if template.is_default_for(tipo) => Some(template),
            Ok(Some(template)) => {
                log::warn!(
                    "Ignoring template {} returned for {}: not an active default",
                    template.id,
                    tipo
                );
                None
            }
            Ok(None) => {
                log::info!("No template for {} in empresa {}, using built-in layout", tipo, empresa_id);
                None
            }
            Err(err) => {
                log::warn!(
                    "Template lookup for {} failed, using built-in layout: {}",
                    tipo,
                    err
                );
                None
            }
        }
    }

    /// Validate, load records and render the PDF without storing it.
    pub async fn render(
        &self,
        empresa_id: Uuid,
        request: &GenerateDocumentRequest,
    ) -> Result<(DocumentContext, RenderedDocument), DocumentError> {
        request.validate().map_err(DocumentError::Validation)?;

        let ctx = self.load_context(empresa_id, request).await?;
        let map = ReplacementMap::from_context(&ctx);
        let template = self.lookup_template(empresa_id, request.tipo).await;
        let rendered = render_document(request.tipo, template.as_ref(), &map)?;

        log::info!(
            "Rendered {} for empleado {} ({:?}, {} bytes)",
            request.tipo,
            ctx.empleado.id,
            rendered.origen,
            rendered.pdf.len()
        );
        Ok((ctx, rendered))
    }

    /// Render and upload. Upload failures are returned to the caller.
    pub async fn generate(
        &self,
        empresa_id: Uuid,
        request: &GenerateDocumentRequest,
    ) -> Result<GeneratedDocument, DocumentError> {
        let (ctx, rendered) = self.render(empresa_id, request).await?;

        let generado_en = Utc::now();
        let ruta = document_object_path(empresa_id, request.tipo, ctx.empleado.id, generado_en);

        self.storage
            .upload_file(&ruta, &rendered.pdf)
            .await
            .map_err(|e| {
                log::error!("Upload of {} failed: {}", ruta, e);
                DocumentError::Upload(e)
            })?;

        Ok(GeneratedDocument {
            url: self.storage.get_public_url(&ruta),
            filename: download_filename(request.tipo, &ctx.empleado),
            ruta,
            tipo: request.tipo,
            origen: rendered.origen,
            tamano_bytes: rendered.pdf.len(),
            generado_en,
        })
    }

    /// Substituted template HTML and replacement bag, without rendering.
    pub async fn preview(
        &self,
        empresa_id: Uuid,
        request: &GenerateDocumentRequest,
    ) -> Result<DocumentPreview, DocumentError> {
        request.validate().map_err(DocumentError::Validation)?;

        let ctx = self.load_context(empresa_id, request).await?;
        let map = ReplacementMap::from_context(&ctx);
        let template = self.lookup_template(empresa_id, request.tipo).await;

        let preview = match template {
            Some(template) => {
                let html = render_template(&template.contenido_html, &map);
                let origen = if text_length(&html_to_blocks(&html)) < MIN_TEXT_CHARS {
                    RenderSource::Minimo
                } else {
                    RenderSource::Plantilla
                };
                DocumentPreview {
                    tipo: request.tipo,
                    placeholders_desconocidos: unknown_placeholders(
                        &template.contenido_html,
                        &map,
                    ),
                    html: Some(html),
                    template_id: Some(template.id),
                    origen,
                    reemplazos: map.into_inner(),
                }
            }
            None => DocumentPreview {
                tipo: request.tipo,
                html: None,
                template_id: None,
                origen: RenderSource::Predeterminado,
                reemplazos: map.into_inner(),
                placeholders_desconocidos: Vec::new(),
            },
        };
        Ok(preview)
    }
}

/// Render with the template when there is one, else the built-in layout.
/// A template that renders to almost nothing, or to bytes that are not a
/// PDF, is replaced by the minimal layout.
pub fn render_document(
    tipo: DocumentType,
    template: Option<&DocumentTemplate>,
    map: &ReplacementMap,
) -> Result<RenderedDocument, DocumentError> {
    let Some(template) = template else {
        return Ok(RenderedDocument {
            pdf: render_builtin(tipo, map)?,
            origen: RenderSource::Predeterminado,
            template_id: None,
        });
    };

    let html = render_template(&template.contenido_html, map);
    let blocks = html_to_blocks(&html);

    if text_length(&blocks) >= MIN_TEXT_CHARS {
        match render_blocks(tipo.title(), &blocks) {
            Ok(pdf) if looks_like_pdf(&pdf) => {
                return Ok(RenderedDocument {
                    pdf,
                    origen: RenderSource::Plantilla,
                    template_id: Some(template.id),
                });
            }
            Ok(pdf) => log::warn!(
                "Template {} produced {} bytes that are not a PDF",
                template.id,
                pdf.len()
            ),
            Err(err) => log::warn!("Template {} failed to render: {}", template.id, err),
        }
    } else {
        log::warn!("Template {} rendered empty for {}", template.id, tipo);
    }

    Ok(RenderedDocument {
        pdf: render_minimal(tipo, map)?,
        origen: RenderSource::Minimo,
        template_id: Some(template.id),
    })
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.len() >= MIN_PDF_BYTES && bytes.starts_with(b"%PDF")
}

/// Bucket path: `{empresa_id}/{tipo}_{empleado_id}_{unix_millis}.pdf`.
pub fn document_object_path(
    empresa_id: Uuid,
    tipo: DocumentType,
    empleado_id: Uuid,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}/{}_{}_{}.pdf",
        empresa_id,
        tipo.as_str(),
        empleado_id,
        at.timestamp_millis()
    )
}

/// Name offered to the browser, e.g. `suspension-ana-perez.pdf`.
pub fn download_filename(tipo: DocumentType, empleado: &Empleado) -> String {
    format!(
        "{}-{}.pdf",
        tipo.as_str(),
        sanitize_filename(&empleado.nombre_completo(), "empleado")
    )
}
