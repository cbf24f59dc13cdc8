// src/handlers/personal.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::personal::{Personal, TipoPersonal},
};

fn validate_no_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El jornal no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn default_tipo() -> TipoPersonal {
    TipoPersonal::Temporario
}

fn default_activo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalPayload {
    #[validate(length(min = 2, message = "El nombre es obligatorio."))]
    #[schema(example = "Juan Gómez")]
    pub nombre: String,

    pub dni: Option<String>,
    pub legajo: Option<String>,

    #[serde(default = "default_tipo")]
    pub tipo: TipoPersonal,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub costo_jornal_referencia: Decimal,

    #[serde(default = "default_activo")]
    pub activo: bool,
}

// GET /api/personal
#[utoipa::path(
    get,
    path = "/api/personal",
    tag = "Personal",
    responses((status = 200, description = "Personal del tenant", body = [Personal])),
    security(("api_jwt" = []))
)]
pub async fn get_personal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let personal = app_state
        .personal_repo
        .get_all_personal(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(personal)))
}

// POST /api/personal
#[utoipa::path(
    post,
    path = "/api/personal",
    tag = "Personal",
    request_body = PersonalPayload,
    responses((status = 201, description = "Personal creado", body = Personal)),
    security(("api_jwt" = []))
)]
pub async fn create_personal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<PersonalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let personal = app_state
        .personal_repo
        .create_personal(
            &mut *rls_conn,
            tenant.0,
            &payload.nombre,
            payload.dni.as_deref(),
            payload.legajo.as_deref(),
            payload.tipo,
            Some(payload.costo_jornal_referencia),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(personal)))
}

// PUT /api/personal/{id}
#[utoipa::path(
    put,
    path = "/api/personal/{id}",
    tag = "Personal",
    request_body = PersonalPayload,
    params(("id" = Uuid, Path, description = "ID del personal")),
    responses(
        (status = 200, description = "Personal actualizado", body = Personal),
        (status = 404, description = "Personal inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_personal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<PersonalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let personal = app_state
        .personal_repo
        .update_personal(
            &mut *rls_conn,
            tenant.0,
            id,
            &payload.nombre,
            payload.dni.as_deref(),
            payload.legajo.as_deref(),
            payload.tipo,
            Some(payload.costo_jornal_referencia),
            payload.activo,
        )
        .await?;

    Ok((StatusCode::OK, Json(personal)))
}
