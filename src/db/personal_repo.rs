// src/db/personal_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgConnection, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::personal::{AsignacionPendiente, Liquidacion, Personal, TipoPersonal},
};

#[derive(Clone)]
pub struct PersonalRepository {
    pool: PgPool,
}

impl PersonalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Personal (maestro)
    // ---

    pub async fn get_all_personal<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Personal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let personal = sqlx::query_as::<_, Personal>(
            "SELECT * FROM personal WHERE tenant_id = $1 ORDER BY nombre ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(personal)
    }

    pub async fn find_personal<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        personal_id: Uuid,
    ) -> Result<Option<Personal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Personal>(
            "SELECT * FROM personal WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(personal_id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_personal<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        nombre: &str,
        dni: Option<&str>,
        legajo: Option<&str>,
        tipo: TipoPersonal,
        costo_jornal_referencia: Option<Decimal>,
    ) -> Result<Personal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            INSERT INTO personal
                (tenant_id, nombre, dni, legajo, tipo, costo_jornal_referencia)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(nombre)
        .bind(dni)
        .bind(legajo)
        .bind(tipo)
        .bind(costo_jornal_referencia)
        .fetch_one(executor)
        .await?;
        Ok(personal)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_personal<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        personal_id: Uuid,
        nombre: &str,
        dni: Option<&str>,
        legajo: Option<&str>,
        tipo: TipoPersonal,
        costo_jornal_referencia: Option<Decimal>,
        activo: bool,
    ) -> Result<Personal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Personal>(
            r#"
            UPDATE personal
            SET nombre = $3, dni = $4, legajo = $5, tipo = $6,
                costo_jornal_referencia = $7, activo = $8, updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(personal_id)
        .bind(nombre)
        .bind(dni)
        .bind(legajo)
        .bind(tipo)
        .bind(costo_jornal_referencia)
        .bind(activo)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NoEncontrado("Personal"))
    }

    // ---
    // Liquidaciones
    // ---

    /// Filas de labores_personal sin liquidar cuya labor cae en el periodo.
    /// El filtro por trabajador es opcional (NULL = todos).
    pub async fn get_pendientes<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        personal_id: Option<Uuid>,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<AsignacionPendiente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pendientes = sqlx::query_as::<_, AsignacionPendiente>(
            r#"
            SELECT lp.id, lp.personal_id, p.nombre AS personal_nombre,
                   p.costo_jornal_referencia,
                   l.id AS labor_id, l.fecha, l.tipo_labor,
                   lt.nombre AS lote_nombre,
                   lp.dias_trabajados, lp.costo_asignado
            FROM labores_personal lp
            JOIN labores l ON l.id = lp.labor_id
            JOIN lotes lt ON lt.id = l.lote_id
            JOIN personal p ON p.id = lp.personal_id
            WHERE lp.tenant_id = $1
              AND lp.liquidacion_id IS NULL
              AND l.fecha >= $3 AND l.fecha <= $4
              AND ($2::uuid IS NULL OR lp.personal_id = $2)
            ORDER BY lp.created_at ASC
            "#,
        )
        .bind(tenant_id)
        .bind(personal_id)
        .bind(desde)
        .bind(hasta)
        .fetch_all(executor)
        .await?;
        Ok(pendientes)
    }

    pub async fn insert_liquidacion(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        personal_id: Uuid,
        periodo_inicio: NaiveDate,
        periodo_fin: NaiveDate,
        total_dias: Decimal,
        total_a_pagar: Decimal,
    ) -> Result<Liquidacion, AppError> {
        let liquidacion = sqlx::query_as::<_, Liquidacion>(
            r#"
            INSERT INTO liquidaciones
                (tenant_id, personal_id, periodo_inicio, periodo_fin,
                 total_dias, total_a_pagar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(personal_id)
        .bind(periodo_inicio)
        .bind(periodo_fin)
        .bind(total_dias)
        .bind(total_a_pagar)
        .fetch_one(conn)
        .await?;
        Ok(liquidacion)
    }

    /// Vincula las asignaciones a la liquidacion. El predicado
    /// `liquidacion_id IS NULL` garantiza que una fila ya liquidada por
    /// otra operacion concurrente no se pise: el caller compara la
    /// cantidad de filas afectadas contra las esperadas.
    pub async fn vincular_asignaciones(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        liquidacion_id: Uuid,
        asignacion_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE labores_personal
            SET liquidacion_id = $2
            WHERE tenant_id = $1 AND id = ANY($3) AND liquidacion_id IS NULL
            "#,
        )
        .bind(tenant_id)
        .bind(liquidacion_id)
        .bind(asignacion_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn get_liquidaciones<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        personal_id: Option<Uuid>,
    ) -> Result<Vec<Liquidacion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let liquidaciones = sqlx::query_as::<_, Liquidacion>(
            r#"
            SELECT * FROM liquidaciones
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR personal_id = $2)
            ORDER BY fecha_liquidacion DESC
            "#,
        )
        .bind(tenant_id)
        .bind(personal_id)
        .fetch_all(executor)
        .await?;
        Ok(liquidaciones)
    }
}
