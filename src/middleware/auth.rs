// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::auth::Usuario,
};

fn bearer_token(request: &axum::http::Request<axum::body::Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

// Guardia de rutas que solo requieren un usuario logueado (sin tenant).
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::InvalidToken)?;
    let usuario = app_state.auth_service.validate_token(token).await?;

    // Deja el usuario en las extensions para los extractores
    request.extensions_mut().insert(usuario);
    Ok(next.run(request).await)
}

// Guardia de rutas de datos: ademas del token exige que el usuario ya
// tenga su tenant asignado, y deja el TenantContext listo para el RLS.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::InvalidToken)?;
    let usuario = app_state.auth_service.validate_token(token).await?;

    let tenant_id = usuario.tenant_id.ok_or(AppError::UsuarioSinTenant)?;

    request.extensions_mut().insert(TenantContext(tenant_id));
    request.extensions_mut().insert(usuario);
    Ok(next.run(request).await)
}

// Extractor para obtener el usuario autenticado directamente en los handlers
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
