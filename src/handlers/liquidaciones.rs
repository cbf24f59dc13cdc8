// src/handlers/liquidaciones.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::personal::{GrupoLiquidacion, Liquidacion},
};

// El rango de fechas es obligatorio: sin él el preview se rechaza
// antes de tocar la base.
#[derive(Debug, Deserialize)]
pub struct PreviewFiltro {
    pub personal_id: Option<Uuid>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerarLiquidacionPayload {
    pub personal_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-07-01")]
    pub periodo_inicio: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2026-07-31")]
    pub periodo_fin: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LiquidacionFiltro {
    pub personal_id: Option<Uuid>,
}

// GET /api/personal/liquidaciones/preview
#[utoipa::path(
    get,
    path = "/api/personal/liquidaciones/preview",
    tag = "Liquidaciones",
    params(
        ("personal_id" = Option<Uuid>, Query, description = "Filtra por trabajador"),
        ("fecha_inicio" = String, Query, description = "Inicio del período (YYYY-MM-DD)"),
        ("fecha_fin" = String, Query, description = "Fin del período (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Jornales pendientes agrupados por trabajador", body = [GrupoLiquidacion]),
        (status = 400, description = "Rango de fechas ausente o inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_liquidacion(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<PreviewFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let grupos = app_state
        .liquidacion_service
        .preview(
            &mut rls_conn,
            tenant.0,
            filtro.personal_id,
            filtro.fecha_inicio,
            filtro.fecha_fin,
        )
        .await?;

    // Vacio no es error: simplemente no hay nada pendiente en el periodo
    Ok((StatusCode::OK, Json(grupos)))
}

// POST /api/personal/liquidaciones
#[utoipa::path(
    post,
    path = "/api/personal/liquidaciones",
    tag = "Liquidaciones",
    request_body = GenerarLiquidacionPayload,
    responses(
        (status = 201, description = "Liquidación generada y jornales vinculados", body = Liquidacion),
        (status = 409, description = "Sin pendientes, o liquidación concurrente")
    ),
    security(("api_jwt" = []))
)]
pub async fn generar_liquidacion(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<GenerarLiquidacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let liquidacion = app_state
        .liquidacion_service
        .generar(
            &mut rls_conn,
            tenant.0,
            payload.personal_id,
            payload.periodo_inicio,
            payload.periodo_fin,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(liquidacion)))
}

// GET /api/personal/liquidaciones
#[utoipa::path(
    get,
    path = "/api/personal/liquidaciones",
    tag = "Liquidaciones",
    params(("personal_id" = Option<Uuid>, Query, description = "Filtra por trabajador")),
    responses((status = 200, description = "Historial de liquidaciones", body = [Liquidacion])),
    security(("api_jwt" = []))
)]
pub async fn get_liquidaciones(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<LiquidacionFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let liquidaciones = app_state
        .liquidacion_service
        .get_liquidaciones(&mut rls_conn, tenant.0, filtro.personal_id)
        .await?;

    Ok((StatusCode::OK, Json(liquidaciones)))
}
