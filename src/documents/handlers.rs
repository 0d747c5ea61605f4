use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use super::engine::download_filename;
use super::models::{
    placeholder_catalog, DocumentPreview, GenerateDocumentRequest, GeneratedDocument,
    PlaceholderGroup,
};
use super::DocumentError;
use crate::auth::request_tenant;
use crate::{AppState, ErrorResponse};

impl ResponseError for DocumentError {
    fn status_code(&self) -> StatusCode {
        match self {
            DocumentError::Validation(_) => StatusCode::BAD_REQUEST,
            DocumentError::CompanyNotFound(_)
            | DocumentError::EmployeeNotFound(_)
            | DocumentError::EventNotFound { .. } => StatusCode::NOT_FOUND,
            DocumentError::Records(_) | DocumentError::Render(_) | DocumentError::Upload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            DocumentError::Validation(message) => ErrorResponse::bad_request(message),
            DocumentError::CompanyNotFound(_)
            | DocumentError::EmployeeNotFound(_)
            | DocumentError::EventNotFound { .. } => ErrorResponse::not_found(&self.to_string()),
            DocumentError::Records(_) | DocumentError::Render(_) => {
                log::error!("Document generation failed: {}", self);
                ErrorResponse::internal_error("No se pudo generar el documento")
            }
            DocumentError::Upload(_) => {
                log::error!("Document upload failed: {}", self);
                ErrorResponse::internal_error("No se pudo guardar el documento")
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = GenerateDocumentRequest,
    responses(
        (status = 201, description = "Document generated and stored", body = GeneratedDocument),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Employee or event not found", body = ErrorResponse),
        (status = 500, description = "Generation or upload failed", body = ErrorResponse)
    )
)]
pub async fn generate_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<GenerateDocumentRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let empresa_id = request_tenant(&req, &state)?;
    log::info!(
        "Generating {} for empleado {} (empresa {})",
        body.tipo,
        body.empleado_id,
        empresa_id
    );

    let document = state.document_engine().generate(empresa_id, &body).await?;
    Ok(HttpResponse::Created().json(document))
}

#[utoipa::path(
    post,
    path = "/api/documents/render",
    tag = "Documents",
    request_body = GenerateDocumentRequest,
    responses(
        (status = 200, description = "PDF bytes", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Employee or event not found", body = ErrorResponse)
    )
)]
pub async fn render_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<GenerateDocumentRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let empresa_id = request_tenant(&req, &state)?;
    log::info!("Rendering {} for empleado {}", body.tipo, body.empleado_id);

    let (ctx, rendered) = state.document_engine().render(empresa_id, &body).await?;
    let filename = download_filename(body.tipo, &ctx.empleado);

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .insert_header(("X-Document-Origin", rendered.origen.as_str()))
        .body(rendered.pdf))
}

#[utoipa::path(
    post,
    path = "/api/documents/preview",
    tag = "Documents",
    request_body = GenerateDocumentRequest,
    responses(
        (status = 200, description = "Substituted template and replacement values", body = DocumentPreview),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn preview_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<GenerateDocumentRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let empresa_id = request_tenant(&req, &state)?;
    let preview = state.document_engine().preview(empresa_id, &body).await?;
    Ok(HttpResponse::Ok().json(preview))
}

#[utoipa::path(
    get,
    path = "/api/documents/placeholders",
    tag = "Documents",
    responses(
        (status = 200, description = "Placeholder vocabulary by category", body = Vec<PlaceholderGroup>)
    )
)]
pub async fn list_placeholders(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    request_tenant(&req, &state)?;
    Ok(HttpResponse::Ok().json(placeholder_catalog()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/documents").route(web::post().to(generate_document)))
        .service(web::resource("/documents/render").route(web::post().to(render_document)))
        .service(web::resource("/documents/preview").route(web::post().to(preview_document)))
        .service(
            web::resource("/documents/placeholders").route(web::get().to(list_placeholders)),
        );
}
