// src/handlers/lotes.rs

use axum::{
    extract::{Path, Query, State},
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
    models::fincas::Lote,
};

fn validate_positivo(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("La superficie debe ser mayor a 0.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LotePayload {
    pub finca_id: Uuid,

    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Lote 3 Norte")]
    pub nombre: String,

    #[validate(custom(function = "validate_positivo"))]
    pub superficie: Decimal,

    #[schema(example = "Virginia")]
    pub variedad: Option<String>,

    #[serde(default = "default_activo")]
    pub activo: bool,
}

fn default_activo() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct LoteFiltro {
    pub finca_id: Option<Uuid>,
}

// GET /api/lotes?finca_id=...
#[utoipa::path(
    get,
    path = "/api/lotes",
    tag = "Lotes",
    params(("finca_id" = Option<Uuid>, Query, description = "Filtra por finca")),
    responses((status = 200, description = "Lotes del tenant", body = [Lote])),
    security(("api_jwt" = []))
)]
pub async fn get_lotes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<LoteFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let lotes = app_state
        .finca_repo
        .get_lotes(&mut *rls_conn, tenant.0, filtro.finca_id)
        .await?;

    Ok((StatusCode::OK, Json(lotes)))
}

// POST /api/lotes
#[utoipa::path(
    post,
    path = "/api/lotes",
    tag = "Lotes",
    request_body = LotePayload,
    responses((status = 201, description = "Lote creado", body = Lote)),
    security(("api_jwt" = []))
)]
pub async fn create_lote(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<LotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let lote = app_state
        .finca_repo
        .create_lote(
            &mut *rls_conn,
            tenant.0,
            payload.finca_id,
            &payload.nombre,
            Some(payload.superficie),
            payload.variedad.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lote)))
}

// PUT /api/lotes/{id}
#[utoipa::path(
    put,
    path = "/api/lotes/{id}",
    tag = "Lotes",
    request_body = LotePayload,
    params(("id" = Uuid, Path, description = "ID del lote")),
    responses(
        (status = 200, description = "Lote actualizado", body = Lote),
        (status = 404, description = "Lote inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_lote(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<LotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let lote = app_state
        .finca_repo
        .update_lote(
            &mut *rls_conn,
            tenant.0,
            id,
            &payload.nombre,
            Some(payload.superficie),
            payload.variedad.as_deref(),
            payload.activo,
        )
        .await?;

    Ok((StatusCode::OK, Json(lote)))
}
