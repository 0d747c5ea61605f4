use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

use super::jwt::validate_token;
use super::model::Claims;
use crate::db::AppState;
use crate::ErrorResponse;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Token has no company assigned")]
    MissingTenant,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::MissingTenant => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AuthError::MissingTenant => ErrorResponse::forbidden(&self.to_string()),
            _ => ErrorResponse::unauthorized(&self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Extract token from Authorization header
pub fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Validate token from HttpRequest and return claims
pub fn validate_request_token(req: &HttpRequest, secret: &str) -> Result<Claims, AuthError> {
    let token = extract_token(req).ok_or(AuthError::MissingToken)?;

    validate_token(&token, secret).map_err(|e| {
        log::warn!("Token validation failed: {:?}", e);
        AuthError::InvalidToken
    })
}

/// Tenant (`empresa_id`) of the authenticated caller.
pub fn request_tenant(req: &HttpRequest, state: &AppState) -> Result<Uuid, AuthError> {
    let claims = validate_request_token(req, &state.jwt_secret)?;
    claims.tenant_id().ok_or_else(|| {
        log::warn!("Token for {} carries no empresa_id", claims.sub);
        AuthError::MissingTenant
    })
}
