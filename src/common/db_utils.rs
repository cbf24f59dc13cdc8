// src/common/db_utils.rs

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::tenancy::TenantContext;

// ---
// Helper RLS: la "llave" hacia la base de datos
// ---
/// Toma una conexion del pool y setea las variables que leen las politicas
/// RLS (`app.tenant_id` / `app.user_id`). Toda consulta de datos del tenant
/// debe pasar por una conexion preparada aca.
pub(crate) async fn get_rls_connection(
    app_state: &AppState,
    tenant_ctx: &TenantContext,
    user: &AuthenticatedUser,
) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, AppError> {
    let mut conn = app_state.db_pool.acquire().await?;

    // set_config(..., false) fija el valor para la sesion de esta conexion;
    // cada request lo pisa con su propio contexto antes de consultar.
    sqlx::query("SELECT set_config('app.tenant_id', $1, false)")
        .bind(tenant_ctx.0.to_string())
        .execute(&mut *conn)
        .await?;

    sqlx::query("SELECT set_config('app.user_id', $1, false)")
        .bind(user.0.id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(conn)
}
