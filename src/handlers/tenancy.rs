// src/handlers/tenancy.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::tenancy::Tenant,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantPayload {
    #[validate(length(min = 3, message = "El nombre debe tener al menos 3 caracteres."))]
    #[schema(example = "Tabacalera La Esperanza")]
    pub nombre: String,

    // Onboarding: opcionalmente se crea la primera finca en el mismo paso
    #[schema(example = "Finca San Isidro")]
    pub finca_nombre: Option<String>,
    pub superficie: Option<Decimal>,
    pub rendimiento: Option<Decimal>,
}

// POST /api/tenants — requiere usuario logueado, todavia sin tenant
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = "Tenancy",
    request_body = CreateTenantPayload,
    responses(
        (status = 201, description = "Tenant creado", body = Tenant),
        (status = 409, description = "Nombre ya usado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenant_service
        .create_tenant_con_finca(
            user.0.id,
            &payload.nombre,
            payload.finca_nombre.as_deref(),
            payload.superficie,
            payload.rendimiento,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tenant)))
}

// GET /api/tenants/me — el tenant del usuario actual
#[utoipa::path(
    get,
    path = "/api/tenants/me",
    tag = "Tenancy",
    responses((status = 200, description = "Tenant del usuario", body = Tenant)),
    security(("api_jwt" = []))
)]
pub async fn get_mi_tenant(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let t = app_state.tenant_service.get_tenant(tenant.0).await?;
    Ok((StatusCode::OK, Json(t)))
}
