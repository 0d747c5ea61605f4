use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use super::model::{CreateTemplateRequest, DocumentTemplate, TemplateResponse, UpdateTemplateRequest};
use crate::auth::request_tenant;
use crate::documents::substitution::unknown_placeholders;
use crate::documents::{ReplacementMap, Validator};
use crate::{AppState, ErrorResponse};

fn template_response(plantilla: DocumentTemplate) -> TemplateResponse {
    let placeholders_desconocidos =
        unknown_placeholders(&plantilla.contenido_html, &ReplacementMap::new());
    if !placeholders_desconocidos.is_empty() {
        log::warn!(
            "Template {} uses unknown placeholders: {}",
            plantilla.id,
            placeholders_desconocidos.join(", ")
        );
    }
    TemplateResponse {
        plantilla,
        placeholders_desconocidos,
    }
}

#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "Templates",
    responses(
        (status = 200, description = "Tenant and global templates", body = Vec<DocumentTemplate>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn list_templates(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let empresa_id = request_tenant(&req, &state)?;

    match state.repository.list_templates(empresa_id).await {
        Ok(templates) => Ok(HttpResponse::Ok().json(templates)),
        Err(e) => {
            log::error!("Failed to list templates for {}: {}", empresa_id, e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("No se pudieron obtener las plantillas")))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/templates",
    tag = "Templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = TemplateResponse),
        (status = 400, description = "Invalid template", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn create_template(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateTemplateRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let empresa_id = request_tenant(&req, &state)?;

    if let Err(message) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)));
    }

    let body = body.into_inner();
    let template = DocumentTemplate::new(
        empresa_id,
        body.tipo,
        body.nombre.trim().to_string(),
        body.contenido_html,
        body.activo,
        body.es_default,
    );

    match state.repository.save_template(&template).await {
        Ok(()) => {
            log::info!("Template {} created for empresa {}", template.id, empresa_id);
            Ok(HttpResponse::Created().json(template_response(template)))
        }
        Err(e) => {
            log::error!("Failed to create template: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("No se pudo guardar la plantilla")))
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    tag = "Templates",
    params(
        ("id" = Uuid, Path, description = "Template ID")
    ),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = TemplateResponse),
        (status = 400, description = "Invalid template", body = ErrorResponse),
        (status = 404, description = "Template not found", body = ErrorResponse)
    )
)]
pub async fn update_template(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTemplateRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let empresa_id = request_tenant(&req, &state)?;
    let id = path.into_inner();

    if let Err(message) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)));
    }

    let mut template = match state.repository.get_template(empresa_id, id).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ErrorResponse::not_found(&format!("Plantilla {} no encontrada", id))))
        }
        Err(e) => {
            log::error!("Failed to load template {}: {}", id, e);
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("No se pudo obtener la plantilla")));
        }
    };

    body.apply(&mut template);

    match state.repository.save_template(&template).await {
        Ok(()) => Ok(HttpResponse::Ok().json(template_response(template))),
        Err(e) => {
            log::error!("Failed to update template {}: {}", id, e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("No se pudo guardar la plantilla")))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/templates")
            .route(web::get().to(list_templates))
            .route(web::post().to(create_template)),
    )
    .service(web::resource("/templates/{id}").route(web::put().to(update_template)));
}

