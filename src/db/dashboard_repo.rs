// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn contar_fincas(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<i64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fincas WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(conn)
            .await?;
        Ok(n)
    }

    pub async fn contar_lotes_activos(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<i64, AppError> {
        let (n,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM lotes WHERE tenant_id = $1 AND activo")
                .bind(tenant_id)
                .fetch_one(conn)
                .await?;
        Ok(n)
    }

    /// Valuacion del stock en moneda local: costo * tipo de cambio * stock.
    pub async fn valor_stock_insumos(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let (total,): (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(costo_unitario * tipo_cambio * stock_actual), 0)
            FROM insumos
            WHERE tenant_id = $1 AND activo
            "#,
        )
        .bind(tenant_id)
        .fetch_one(conn)
        .await?;
        Ok(total)
    }

    pub async fn kilos_cosechados(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let (total,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(kilos_brutos), 0) FROM cosechas WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .fetch_one(conn)
        .await?;
        Ok(total)
    }

    /// Jornales asignados que aun no entraron en ninguna liquidacion.
    pub async fn jornales_pendientes(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<(Decimal, Decimal), AppError> {
        let (dias, costo): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(dias_trabajados), 0), COALESCE(SUM(costo_asignado), 0)
            FROM labores_personal
            WHERE tenant_id = $1 AND liquidacion_id IS NULL
            "#,
        )
        .bind(tenant_id)
        .fetch_one(conn)
        .await?;
        Ok((dias, costo))
    }
}
