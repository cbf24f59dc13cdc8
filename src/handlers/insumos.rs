// src/handlers/insumos.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::insumos::{CategoriaInsumo, Insumo, Moneda},
};

// ---
// Validaciones custom
// ---
fn validate_no_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_positivo(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("El tipo de cambio debe ser positivo.".into());
        return Err(err);
    }
    Ok(())
}

fn default_tipo_cambio() -> Decimal {
    Decimal::ONE
}

fn default_moneda() -> Moneda {
    Moneda::Ars
}

// ---
// Payload: Insumo (alta y edicion comparten forma)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsumoPayload {
    #[validate(length(min = 2, message = "El nombre es obligatorio."))]
    #[schema(example = "Urea")]
    pub nombre: String,

    pub categoria_id: Uuid,

    #[validate(length(min = 1, message = "La unidad es obligatoria."))]
    #[schema(example = "kg")]
    pub unidad: String,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub costo_unitario: Decimal,

    #[serde(default = "default_moneda")]
    pub moneda: Moneda,

    // Cotizacion congelada al momento de la compra
    #[validate(custom(function = "validate_positivo"))]
    #[serde(default = "default_tipo_cambio")]
    pub tipo_cambio: Decimal,

    #[schema(value_type = String, format = Date)]
    pub fecha_compra: NaiveDate,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub stock_actual: Decimal,

    #[serde(default = "default_activo")]
    pub activo: bool,
}

fn default_activo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaPayload {
    #[validate(length(min = 2, message = "El nombre es obligatorio."))]
    #[schema(example = "Fertilizantes")]
    pub nombre: String,
}

// ---
// Handlers: categorias
// ---

// GET /api/insumos/categorias
#[utoipa::path(
    get,
    path = "/api/insumos/categorias",
    tag = "Insumos",
    responses((status = 200, description = "Categorías del tenant", body = [CategoriaInsumo])),
    security(("api_jwt" = []))
)]
pub async fn get_categorias(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let categorias = app_state
        .insumo_repo
        .get_categorias(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(categorias)))
}

// POST /api/insumos/categorias
#[utoipa::path(
    post,
    path = "/api/insumos/categorias",
    tag = "Insumos",
    request_body = CategoriaPayload,
    responses((status = 201, description = "Categoría creada", body = CategoriaInsumo)),
    security(("api_jwt" = []))
)]
pub async fn create_categoria(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let categoria = app_state
        .insumo_repo
        .create_categoria(&mut *rls_conn, tenant.0, &payload.nombre)
        .await?;

    Ok((StatusCode::CREATED, Json(categoria)))
}

// ---
// Handlers: insumos
// ---

// GET /api/insumos
#[utoipa::path(
    get,
    path = "/api/insumos",
    tag = "Insumos",
    responses((status = 200, description = "Insumos del tenant", body = [Insumo])),
    security(("api_jwt" = []))
)]
pub async fn get_insumos(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let insumos = app_state
        .insumo_repo
        .get_all_insumos(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(insumos)))
}

// POST /api/insumos
#[utoipa::path(
    post,
    path = "/api/insumos",
    tag = "Insumos",
    request_body = InsumoPayload,
    responses((status = 201, description = "Insumo creado", body = Insumo)),
    security(("api_jwt" = []))
)]
pub async fn create_insumo(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<InsumoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let insumo = app_state
        .insumo_repo
        .create_insumo(
            &mut *rls_conn,
            tenant.0,
            payload.categoria_id,
            &payload.nombre,
            &payload.unidad,
            payload.costo_unitario,
            payload.moneda,
            payload.tipo_cambio,
            payload.fecha_compra,
            payload.stock_actual,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(insumo)))
}

// PUT /api/insumos/{id}
#[utoipa::path(
    put,
    path = "/api/insumos/{id}",
    tag = "Insumos",
    request_body = InsumoPayload,
    params(("id" = Uuid, Path, description = "ID del insumo")),
    responses(
        (status = 200, description = "Insumo actualizado", body = Insumo),
        (status = 404, description = "Insumo inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_insumo(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<InsumoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let insumo = app_state
        .insumo_repo
        .update_insumo(
            &mut *rls_conn,
            tenant.0,
            id,
            payload.categoria_id,
            &payload.nombre,
            &payload.unidad,
            payload.costo_unitario,
            payload.moneda,
            payload.tipo_cambio,
            payload.fecha_compra,
            payload.stock_actual,
            payload.activo,
        )
        .await?;

    Ok((StatusCode::OK, Json(insumo)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_base() -> InsumoPayload {
        InsumoPayload {
            nombre: "Urea".into(),
            categoria_id: Uuid::new_v4(),
            unidad: "kg".into(),
            costo_unitario: "850".parse().unwrap(),
            moneda: Moneda::Ars,
            tipo_cambio: Decimal::ONE,
            fecha_compra: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            stock_actual: "100".parse().unwrap(),
            activo: true,
        }
    }

    #[test]
    fn acepta_un_insumo_bien_formado() {
        assert!(payload_base().validate().is_ok());
    }

    #[test]
    fn rechaza_costo_negativo() {
        let mut p = payload_base();
        p.costo_unitario = "-1".parse().unwrap();
        assert!(p.validate().is_err());
    }

    #[test]
    fn rechaza_tipo_de_cambio_cero() {
        let mut p = payload_base();
        p.tipo_cambio = Decimal::ZERO;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rechaza_stock_inicial_negativo() {
        let mut p = payload_base();
        p.stock_actual = "-5".parse().unwrap();
        assert!(p.validate().is_err());
    }
}
