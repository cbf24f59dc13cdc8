// src/handlers/labores.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::{
        insumos::Moneda,
        labores::{AsignacionInput, ConsumoInput, Labor, LaborDetalle},
    },
    services::labor_service::DatosLabor,
};

fn default_moneda() -> Moneda {
    Moneda::Ars
}

fn default_tipo_cambio() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaborPayload {
    pub finca_id: Uuid,
    pub lote_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-07-15")]
    pub fecha: NaiveDate,

    #[validate(length(min = 2, message = "El tipo de labor es obligatorio."))]
    #[schema(example = "Fertilización")]
    pub tipo_labor: String,

    pub estado_fenologico: Option<String>,

    #[serde(default)]
    pub jornales: Decimal,

    #[serde(default)]
    pub costo_jornales: Decimal,

    #[serde(default = "default_moneda")]
    pub moneda: Moneda,

    #[serde(default = "default_tipo_cambio")]
    pub tipo_cambio: Decimal,

    pub observaciones: Option<String>,

    // Consumos de stock: cada linea descuenta del insumo correspondiente
    #[validate(nested)]
    #[serde(default)]
    pub insumos: Vec<ConsumoInput>,

    // Dias trabajados por persona
    #[validate(nested)]
    #[serde(default)]
    pub personal: Vec<AsignacionInput>,
}

impl LaborPayload {
    fn into_datos(self) -> DatosLabor {
        DatosLabor {
            finca_id: self.finca_id,
            lote_id: self.lote_id,
            fecha: self.fecha,
            tipo_labor: self.tipo_labor,
            estado_fenologico: self.estado_fenologico,
            jornales: self.jornales,
            costo_jornales: self.costo_jornales,
            moneda: self.moneda,
            tipo_cambio: self.tipo_cambio,
            observaciones: self.observaciones,
            insumos: self.insumos,
            personal: self.personal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LaborFiltro {
    pub finca_id: Option<Uuid>,
}

// GET /api/labores?finca_id=...
#[utoipa::path(
    get,
    path = "/api/labores",
    tag = "Labores",
    params(("finca_id" = Option<Uuid>, Query, description = "Filtra por finca")),
    responses((status = 200, description = "Labores con consumos y personal", body = [LaborDetalle])),
    security(("api_jwt" = []))
)]
pub async fn get_labores(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<LaborFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let labores = app_state
        .labor_service
        .get_labores(&mut rls_conn, tenant.0, filtro.finca_id)
        .await?;

    Ok((StatusCode::OK, Json(labores)))
}

// POST /api/labores
#[utoipa::path(
    post,
    path = "/api/labores",
    tag = "Labores",
    request_body = LaborPayload,
    responses(
        (status = 201, description = "Labor registrada", body = Labor),
        (status = 409, description = "Stock insuficiente de algún insumo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_labor(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<LaborPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let labor = app_state
        .labor_service
        .registrar_labor(&mut rls_conn, tenant.0, payload.into_datos())
        .await?;

    Ok((StatusCode::CREATED, Json(labor)))
}

// PUT /api/labores/{id}
#[utoipa::path(
    put,
    path = "/api/labores/{id}",
    tag = "Labores",
    request_body = LaborPayload,
    params(("id" = Uuid, Path, description = "ID de la labor")),
    responses(
        (status = 200, description = "Labor actualizada (stock recalculado)", body = Labor),
        (status = 409, description = "Jornales ya liquidados o stock insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_labor(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<LaborPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let labor = app_state
        .labor_service
        .actualizar_labor(&mut rls_conn, tenant.0, id, payload.into_datos())
        .await?;

    Ok((StatusCode::OK, Json(labor)))
}

// DELETE /api/labores/{id}
#[utoipa::path(
    delete,
    path = "/api/labores/{id}",
    tag = "Labores",
    params(("id" = Uuid, Path, description = "ID de la labor")),
    responses(
        (status = 204, description = "Labor eliminada, stock devuelto"),
        (status = 409, description = "Jornales ya liquidados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_labor(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    app_state
        .labor_service
        .eliminar_labor(&mut rls_conn, tenant.0, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rechaza_consumos_con_cantidad_cero() {
        let payload = LaborPayload {
            finca_id: Uuid::new_v4(),
            lote_id: Uuid::new_v4(),
            fecha: NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
            tipo_labor: "Fertilización".into(),
            estado_fenologico: None,
            jornales: Decimal::ZERO,
            costo_jornales: Decimal::ZERO,
            moneda: Moneda::Ars,
            tipo_cambio: Decimal::ONE,
            observaciones: None,
            insumos: vec![ConsumoInput {
                insumo_id: Uuid::new_v4(),
                cantidad: Decimal::ZERO,
            }],
            personal: Vec::new(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rechaza_dias_trabajados_negativos() {
        let payload = LaborPayload {
            finca_id: Uuid::new_v4(),
            lote_id: Uuid::new_v4(),
            fecha: NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
            tipo_labor: "Desflore".into(),
            estado_fenologico: None,
            jornales: Decimal::ZERO,
            costo_jornales: Decimal::ZERO,
            moneda: Moneda::Ars,
            tipo_cambio: Decimal::ONE,
            observaciones: None,
            insumos: Vec::new(),
            personal: vec![AsignacionInput {
                personal_id: Uuid::new_v4(),
                dias_trabajados: "-1".parse().unwrap(),
                costo_asignado: None,
            }],
        };
        assert!(payload.validate().is_err());
    }
}
