// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::dashboard::ResumenTenant,
};

// GET /api/dashboard/resumen
#[utoipa::path(
    get,
    path = "/api/dashboard/resumen",
    tag = "Dashboard",
    responses((status = 200, description = "Indicadores del tenant", body = ResumenTenant)),
    security(("api_jwt" = []))
)]
pub async fn get_resumen(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let resumen = app_state
        .dashboard_service
        .get_resumen(&mut rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(resumen)))
}
