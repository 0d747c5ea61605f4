mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::{app_state, bearer_token, seeded_repository, MockObjectStorage};
use hr_docs_server::configure_api;
use hr_docs_server::documents::models::GeneratedDocument;
use serde_json::{json, Value};
use uuid::Uuid;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .service(web::scope("/api").configure(configure_api)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_generate_requires_token() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({ "tipo": "constancia_trabajo", "empleado_id": fx.empleado_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn test_token_without_company_is_forbidden() {
    let (repo, _) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::get()
        .uri("/api/documents/placeholders")
        .insert_header(("Authorization", bearer_token(None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_generate_returns_created_document() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header(("Authorization", bearer_token(Some(fx.empresa_id))))
        .set_json(json!({
            "tipo": "suspension",
            "empleado_id": fx.empleado_id,
            "referencia_id": fx.sancion_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let doc: GeneratedDocument = test::read_body_json(resp).await;
    assert!(doc.ruta.starts_with(&fx.empresa_id.to_string()));
    assert!(doc.tamano_bytes > 0);
}

#[actix_web::test]
async fn test_generate_validation_error() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header(("Authorization", bearer_token(Some(fx.empresa_id))))
        .set_json(json!({
            "tipo": "amonestacion",
            "empleado_id": fx.empleado_id,
            "campos_extra": { "Campo Malo": "x" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BadRequest");
    assert!(body["message"].as_str().unwrap().contains("2 error(es)"));
}

#[actix_web::test]
async fn test_generate_unknown_employee_is_not_found() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header(("Authorization", bearer_token(Some(fx.empresa_id))))
        .set_json(json!({ "tipo": "constancia_trabajo", "empleado_id": Uuid::new_v4() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_upload_failure_is_internal_error() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::failing()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header(("Authorization", bearer_token(Some(fx.empresa_id))))
        .set_json(json!({ "tipo": "constancia_trabajo", "empleado_id": fx.empleado_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "InternalServerError");
    assert!(!body["message"].as_str().unwrap().contains("503"));
}

#[actix_web::test]
async fn test_render_returns_inline_pdf() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::post()
        .uri("/api/documents/render")
        .insert_header(("Authorization", bearer_token(Some(fx.empresa_id))))
        .set_json(json!({
            "tipo": "vacaciones",
            "empleado_id": fx.empleado_id,
            "referencia_id": fx.vacacion_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get("X-Document-Origin").unwrap(),
        "predeterminado"
    );
    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn test_placeholders_catalog() {
    let (repo, fx) = seeded_repository();
    let app = init_app!(app_state(repo, MockObjectStorage::new()));

    let req = test::TestRequest::get()
        .uri("/api/documents/placeholders")
        .insert_header(("Authorization", bearer_token(Some(fx.empresa_id))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let groups = body.as_array().unwrap();
    assert!(groups.iter().any(|g| g["categoria"] == "empleado"
        && g["tokens"]
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t == "{{empleado_dni}}")));
}
