// src/db/finca_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::fincas::{Finca, Lote},
};

#[derive(Clone)]
pub struct FincaRepository {
    pool: PgPool,
}

impl FincaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Fincas
    // ---

    pub async fn get_all_fincas<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Finca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fincas = sqlx::query_as::<_, Finca>(
            "SELECT * FROM fincas WHERE tenant_id = $1 ORDER BY nombre ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(fincas)
    }

    pub async fn create_finca<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        nombre: &str,
        superficie_total: Option<Decimal>,
        rendimiento_esperado: Option<Decimal>,
    ) -> Result<Finca, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let finca = sqlx::query_as::<_, Finca>(
            r#"
            INSERT INTO fincas (tenant_id, nombre, superficie_total, rendimiento_esperado)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(nombre)
        .bind(superficie_total)
        .bind(rendimiento_esperado)
        .fetch_one(executor)
        .await?;
        Ok(finca)
    }

    pub async fn update_finca<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Uuid,
        nombre: &str,
        superficie_total: Option<Decimal>,
        rendimiento_esperado: Option<Decimal>,
    ) -> Result<Finca, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Finca>(
            r#"
            UPDATE fincas
            SET nombre = $3, superficie_total = $4, rendimiento_esperado = $5,
                updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .bind(nombre)
        .bind(superficie_total)
        .bind(rendimiento_esperado)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NoEncontrado("Finca"))
    }

    // ---
    // Lotes
    // ---

    pub async fn get_lotes<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Lote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lotes = sqlx::query_as::<_, Lote>(
            r#"
            SELECT * FROM lotes
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR finca_id = $2)
            ORDER BY nombre ASC
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .fetch_all(executor)
        .await?;
        Ok(lotes)
    }

    pub async fn create_lote<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Uuid,
        nombre: &str,
        superficie: Option<Decimal>,
        variedad: Option<&str>,
    ) -> Result<Lote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lote = sqlx::query_as::<_, Lote>(
            r#"
            INSERT INTO lotes (tenant_id, finca_id, nombre, superficie, variedad)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .bind(nombre)
        .bind(superficie)
        .bind(variedad)
        .fetch_one(executor)
        .await?;
        Ok(lote)
    }

    pub async fn update_lote<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        lote_id: Uuid,
        nombre: &str,
        superficie: Option<Decimal>,
        variedad: Option<&str>,
        activo: bool,
    ) -> Result<Lote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Lote>(
            r#"
            UPDATE lotes
            SET nombre = $3, superficie = $4, variedad = $5, activo = $6,
                updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(lote_id)
        .bind(nombre)
        .bind(superficie)
        .bind(variedad)
        .bind(activo)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NoEncontrado("Lote"))
    }
}
