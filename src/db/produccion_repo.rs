// src/db/produccion_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        insumos::Moneda,
        produccion::{Almacigo, Cosecha, Curado, EstadoCurado, Estufa, Plantacion},
    },
};

#[derive(Clone)]
pub struct ProduccionRepository {
    pool: PgPool,
}

impl ProduccionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Almacigos
    // ---

    pub async fn get_almacigos<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Almacigo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let almacigos = sqlx::query_as::<_, Almacigo>(
            r#"
            SELECT * FROM almacigos
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR finca_id = $2)
            ORDER BY fecha DESC
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .fetch_all(executor)
        .await?;
        Ok(almacigos)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_almacigo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Uuid,
        fecha: NaiveDate,
        variedad: &str,
        cantidad_bandejas: i32,
        insumo_semilla_id: Uuid,
        semilla_usada: Decimal,
        insumo_sustrato_id: Option<Uuid>,
        sustrato_usado: Decimal,
        observaciones: Option<&str>,
    ) -> Result<Almacigo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let almacigo = sqlx::query_as::<_, Almacigo>(
            r#"
            INSERT INTO almacigos
                (tenant_id, finca_id, fecha, variedad, cantidad_bandejas,
                 insumo_semilla_id, semilla_usada, insumo_sustrato_id,
                 sustrato_usado, observaciones)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .bind(fecha)
        .bind(variedad)
        .bind(cantidad_bandejas)
        .bind(insumo_semilla_id)
        .bind(semilla_usada)
        .bind(insumo_sustrato_id)
        .bind(sustrato_usado)
        .bind(observaciones)
        .fetch_one(executor)
        .await?;
        Ok(almacigo)
    }

    // ---
    // Plantaciones
    // ---

    pub async fn get_plantaciones<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Plantacion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plantaciones = sqlx::query_as::<_, Plantacion>(
            r#"
            SELECT * FROM plantaciones
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR finca_id = $2)
            ORDER BY fecha DESC
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .fetch_all(executor)
        .await?;
        Ok(plantaciones)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_plantacion<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Uuid,
        lote_id: Uuid,
        almacigo_id: Option<Uuid>,
        fecha: NaiveDate,
        variedad: &str,
        tipo_plantacion: Option<&str>,
        cantidad_plantas: Decimal,
        bandejas_usadas: Option<Decimal>,
        superficie_cubierta: Option<Decimal>,
        jornales_usados: Option<Decimal>,
        costo_total: Option<Decimal>,
        moneda: Moneda,
        tipo_cambio: Decimal,
        observaciones: Option<&str>,
    ) -> Result<Plantacion, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plantacion = sqlx::query_as::<_, Plantacion>(
            r#"
            INSERT INTO plantaciones
                (tenant_id, finca_id, lote_id, almacigo_id, fecha, variedad,
                 tipo_plantacion, cantidad_plantas, bandejas_usadas,
                 superficie_cubierta, jornales_usados, costo_total,
                 moneda, tipo_cambio, observaciones)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .bind(lote_id)
        .bind(almacigo_id)
        .bind(fecha)
        .bind(variedad)
        .bind(tipo_plantacion)
        .bind(cantidad_plantas)
        .bind(bandejas_usadas)
        .bind(superficie_cubierta)
        .bind(jornales_usados)
        .bind(costo_total)
        .bind(moneda)
        .bind(tipo_cambio)
        .bind(observaciones)
        .fetch_one(executor)
        .await?;
        Ok(plantacion)
    }

    // ---
    // Cosechas
    // ---

    pub async fn get_cosechas<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Cosecha>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cosechas = sqlx::query_as::<_, Cosecha>(
            r#"
            SELECT * FROM cosechas
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR finca_id = $2)
            ORDER BY fecha DESC
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .fetch_all(executor)
        .await?;
        Ok(cosechas)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_cosecha<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Uuid,
        lote_id: Uuid,
        fecha: NaiveDate,
        kilos_brutos: Decimal,
        cantidad_bultos: Option<i32>,
        clase: Option<&str>,
        observaciones: Option<&str>,
    ) -> Result<Cosecha, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cosecha = sqlx::query_as::<_, Cosecha>(
            r#"
            INSERT INTO cosechas
                (tenant_id, finca_id, lote_id, fecha, kilos_brutos,
                 cantidad_bultos, clase, observaciones)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(finca_id)
        .bind(lote_id)
        .bind(fecha)
        .bind(kilos_brutos)
        .bind(cantidad_bultos)
        .bind(clase)
        .bind(observaciones)
        .fetch_one(executor)
        .await?;
        Ok(cosecha)
    }

    // ---
    // Estufas
    // ---

    pub async fn get_estufas<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Estufa>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let estufas = sqlx::query_as::<_, Estufa>(
            "SELECT * FROM estufas WHERE tenant_id = $1 ORDER BY nombre ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(estufas)
    }

    pub async fn create_estufa<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        nombre: &str,
        capacidad: Decimal,
    ) -> Result<Estufa, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let estufa = sqlx::query_as::<_, Estufa>(
            r#"
            INSERT INTO estufas (tenant_id, nombre, capacidad)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(nombre)
        .bind(capacidad)
        .fetch_one(executor)
        .await?;
        Ok(estufa)
    }

    // ---
    // Curados
    // ---

    pub async fn get_curados<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        estufa_id: Option<Uuid>,
    ) -> Result<Vec<Curado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let curados = sqlx::query_as::<_, Curado>(
            r#"
            SELECT * FROM curados
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR estufa_id = $2)
            ORDER BY fecha_inicio DESC, numero_carga DESC
            "#,
        )
        .bind(tenant_id)
        .bind(estufa_id)
        .fetch_all(executor)
        .await?;
        Ok(curados)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_curado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        estufa_id: Uuid,
        lote_id: Option<Uuid>,
        numero_carga: i32,
        fecha_inicio: NaiveDate,
        variedad: Option<&str>,
        corte: Option<i32>,
        peso_verde: Decimal,
        costo_carga: Option<Decimal>,
    ) -> Result<Curado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let curado = sqlx::query_as::<_, Curado>(
            r#"
            INSERT INTO curados
                (tenant_id, estufa_id, lote_id, numero_carga, fecha_inicio,
                 variedad, corte, peso_verde, costo_carga)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(estufa_id)
        .bind(lote_id)
        .bind(numero_carga)
        .bind(fecha_inicio)
        .bind(variedad)
        .bind(corte)
        .bind(peso_verde)
        .bind(costo_carga)
        .fetch_one(executor)
        .await?;
        Ok(curado)
    }

    /// Cierre de carga: fecha final, peso seco, costo de descarga y estado.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_curado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        curado_id: Uuid,
        fecha_final: Option<NaiveDate>,
        peso_seco: Option<Decimal>,
        costo_descarga: Option<Decimal>,
        estado: EstadoCurado,
    ) -> Result<Curado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Curado>(
            r#"
            UPDATE curados
            SET fecha_final = $3, peso_seco = $4, costo_descarga = $5,
                estado = $6, updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(curado_id)
        .bind(fecha_final)
        .bind(peso_seco)
        .bind(costo_descarga)
        .bind(estado)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NoEncontrado("Curado"))
    }
}
