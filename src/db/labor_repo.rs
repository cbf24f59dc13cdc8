// src/db/labor_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, FromRow, PgConnection, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        insumos::Moneda,
        labores::{Labor, LaborInsumoDetalle, LaborPersonal},
    },
};

// Fila del listado: la labor mas el nombre del lote ya join-eado.
#[derive(Debug, FromRow)]
pub struct LaborFila {
    #[sqlx(flatten)]
    pub labor: Labor,
    pub lote_nombre: String,
}

#[derive(Debug, FromRow)]
struct ConsumoFila {
    labor_id: Uuid,
    insumo_id: Uuid,
    insumo_nombre: String,
    unidad: String,
    cantidad: Decimal,
}

#[derive(Clone)]
pub struct LaborRepository {
    pool: PgPool,
}

impl LaborRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_labores<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<LaborFila>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = sqlx::query_as::<_, LaborFila>(
            r#"
            SELECT l.*, lt.nombre AS lote_nombre
            FROM labores l
            JOIN lotes lt ON lt.id = l.lote_id
            WHERE l.tenant_id = $1 AND ($2::uuid IS NULL OR l.finca_id = $2)
            ORDER BY l.fecha DESC
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .fetch_all(executor)
        .await?;
        Ok(filas)
    }

    pub async fn find_labor<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        labor_id: Uuid,
    ) -> Result<Option<Labor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Labor>(
            "SELECT * FROM labores WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(labor_id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_labor<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Uuid,
        lote_id: Uuid,
        fecha: NaiveDate,
        tipo_labor: &str,
        estado_fenologico: Option<&str>,
        jornales: Decimal,
        costo_jornales: Decimal,
        moneda: Moneda,
        tipo_cambio: Decimal,
        observaciones: Option<&str>,
    ) -> Result<Labor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let labor = sqlx::query_as::<_, Labor>(
            r#"
            INSERT INTO labores
                (tenant_id, finca_id, lote_id, fecha, tipo_labor, estado_fenologico,
                 jornales, costo_jornales, moneda, tipo_cambio, observaciones)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .bind(lote_id)
        .bind(fecha)
        .bind(tipo_labor)
        .bind(estado_fenologico)
        .bind(jornales)
        .bind(costo_jornales)
        .bind(moneda)
        .bind(tipo_cambio)
        .bind(observaciones)
        .fetch_one(executor)
        .await?;
        Ok(labor)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_labor<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        labor_id: Uuid,
        finca_id: Uuid,
        lote_id: Uuid,
        fecha: NaiveDate,
        tipo_labor: &str,
        estado_fenologico: Option<&str>,
        jornales: Decimal,
        costo_jornales: Decimal,
        moneda: Moneda,
        tipo_cambio: Decimal,
        observaciones: Option<&str>,
    ) -> Result<Labor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Labor>(
            r#"
            UPDATE labores
            SET finca_id = $3, lote_id = $4, fecha = $5, tipo_labor = $6,
                estado_fenologico = $7, jornales = $8, costo_jornales = $9,
                moneda = $10, tipo_cambio = $11, observaciones = $12,
                updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(labor_id)
        .bind(finca_id)
        .bind(lote_id)
        .bind(fecha)
        .bind(tipo_labor)
        .bind(estado_fenologico)
        .bind(jornales)
        .bind(costo_jornales)
        .bind(moneda)
        .bind(tipo_cambio)
        .bind(observaciones)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NoEncontrado("Labor"))
    }

    pub async fn delete_labor<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        labor_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM labores WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(labor_id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NoEncontrado("Labor"));
        }
        Ok(())
    }

    // ---
    // Hijos: consumos de insumos y asignaciones de personal
    // ---

    pub async fn insert_consumo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        labor_id: Uuid,
        insumo_id: Uuid,
        cantidad: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO labores_insumos (tenant_id, labor_id, insumo_id, cantidad)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(tenant_id)
        .bind(labor_id)
        .bind(insumo_id)
        .bind(cantidad)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn insert_asignacion<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        labor_id: Uuid,
        personal_id: Uuid,
        dias_trabajados: Decimal,
        costo_asignado: Decimal,
    ) -> Result<LaborPersonal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignacion = sqlx::query_as::<_, LaborPersonal>(
            r#"
            INSERT INTO labores_personal
                (tenant_id, labor_id, personal_id, dias_trabajados, costo_asignado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, labor_id, personal_id, dias_trabajados, costo_asignado, liquidacion_id
            "#,
        )
        .bind(tenant_id)
        .bind(labor_id)
        .bind(personal_id)
        .bind(dias_trabajados)
        .bind(costo_asignado)
        .fetch_one(executor)
        .await?;
        Ok(asignacion)
    }

    /// Consumos de un conjunto de labores, con nombre y unidad del insumo.
    pub async fn get_consumos_detalle<'e, E>(
        &self,
        executor: E,
        labor_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, LaborInsumoDetalle)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = sqlx::query_as::<_, ConsumoFila>(
            r#"
            SELECT li.labor_id, li.insumo_id, i.nombre AS insumo_nombre,
                   i.unidad, li.cantidad
            FROM labores_insumos li
            JOIN insumos i ON i.id = li.insumo_id
            WHERE li.labor_id = ANY($1)
            "#,
        )
        .bind(labor_ids)
        .fetch_all(executor)
        .await?;

        Ok(filas
            .into_iter()
            .map(|f| {
                (
                    f.labor_id,
                    LaborInsumoDetalle {
                        insumo_id: f.insumo_id,
                        insumo_nombre: f.insumo_nombre,
                        unidad: f.unidad,
                        cantidad: f.cantidad,
                    },
                )
            })
            .collect())
    }

    pub async fn get_asignaciones<'e, E>(
        &self,
        executor: E,
        labor_ids: &[Uuid],
    ) -> Result<Vec<LaborPersonal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asignaciones = sqlx::query_as::<_, LaborPersonal>(
            r#"
            SELECT id, labor_id, personal_id, dias_trabajados, costo_asignado, liquidacion_id
            FROM labores_personal
            WHERE labor_id = ANY($1)
            "#,
        )
        .bind(labor_ids)
        .fetch_all(executor)
        .await?;
        Ok(asignaciones)
    }

    pub async fn get_consumos<'e, E>(
        &self,
        executor: E,
        labor_id: Uuid,
    ) -> Result<Vec<(Uuid, Decimal)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas: Vec<(Uuid, Decimal)> = sqlx::query_as(
            "SELECT insumo_id, cantidad FROM labores_insumos WHERE labor_id = $1",
        )
        .bind(labor_id)
        .fetch_all(executor)
        .await?;
        Ok(filas)
    }

    /// true si alguna asignacion de la labor ya entro en una liquidacion.
    /// Bloquea la edicion y la baja: el historial pagado no se toca.
    pub async fn tiene_asignaciones_liquidadas<'e, E>(
        &self,
        executor: E,
        labor_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (existe,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM labores_personal
                WHERE labor_id = $1 AND liquidacion_id IS NOT NULL
            )
            "#,
        )
        .bind(labor_id)
        .fetch_one(executor)
        .await?;
        Ok(existe)
    }

    /// Borra consumos y asignaciones antes de re-insertarlos en una edicion.
    pub async fn delete_hijos(
        &self,
        conn: &mut PgConnection,
        labor_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM labores_insumos WHERE labor_id = $1")
            .bind(labor_id)
            .execute(&mut *conn)
            .await?;
        sqlx::query("DELETE FROM labores_personal WHERE labor_id = $1")
            .bind(labor_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
