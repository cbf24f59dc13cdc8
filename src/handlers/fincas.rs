// src/handlers/fincas.rs

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
    models::fincas::Finca,
};

fn validate_no_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FincaPayload {
    #[validate(length(min = 3, message = "El nombre debe tener al menos 3 caracteres."))]
    #[schema(example = "Finca San Isidro")]
    pub nombre: String,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub superficie_total: Decimal,

    pub rendimiento_esperado: Option<Decimal>,
}

// GET /api/fincas
#[utoipa::path(
    get,
    path = "/api/fincas",
    tag = "Fincas",
    responses((status = 200, description = "Fincas del tenant", body = [Finca])),
    security(("api_jwt" = []))
)]
pub async fn get_fincas(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let fincas = app_state
        .finca_repo
        .get_all_fincas(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(fincas)))
}

// POST /api/fincas
#[utoipa::path(
    post,
    path = "/api/fincas",
    tag = "Fincas",
    request_body = FincaPayload,
    responses((status = 201, description = "Finca creada", body = Finca)),
    security(("api_jwt" = []))
)]
pub async fn create_finca(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<FincaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let finca = app_state
        .finca_repo
        .create_finca(
            &mut *rls_conn,
            tenant.0,
            &payload.nombre,
            Some(payload.superficie_total),
            payload.rendimiento_esperado,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(finca)))
}

// PUT /api/fincas/{id}
#[utoipa::path(
    put,
    path = "/api/fincas/{id}",
    tag = "Fincas",
    request_body = FincaPayload,
    params(("id" = Uuid, Path, description = "ID de la finca")),
    responses(
        (status = 200, description = "Finca actualizada", body = Finca),
        (status = 404, description = "Finca inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_finca(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<FincaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let finca = app_state
        .finca_repo
        .update_finca(
            &mut *rls_conn,
            tenant.0,
            id,
            &payload.nombre,
            Some(payload.superficie_total),
            payload.rendimiento_esperado,
        )
        .await?;

    Ok((StatusCode::OK, Json(finca)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rechaza_superficie_negativa() {
        let payload = FincaPayload {
            nombre: "Finca San Isidro".into(),
            superficie_total: "-1".parse().unwrap(),
            rendimiento_esperado: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rechaza_nombre_corto() {
        let payload = FincaPayload {
            nombre: "ab".into(),
            superficie_total: Decimal::ZERO,
            rendimiento_esperado: None,
        };
        assert!(payload.validate().is_err());
    }
}
