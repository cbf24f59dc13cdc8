// src/services/produccion_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InsumoRepository, ProduccionRepository},
    models::{
        insumos::Moneda,
        produccion::{Almacigo, Cosecha, Curado, EstadoCurado, Estufa, Plantacion},
    },
};

#[derive(Debug)]
pub struct DatosAlmacigo {
    pub finca_id: Uuid,
    pub fecha: NaiveDate,
    pub variedad: String,
    pub cantidad_bandejas: i32,
    pub insumo_semilla_id: Uuid,
    pub semilla_usada: Decimal,
    pub insumo_sustrato_id: Option<Uuid>,
    pub sustrato_usado: Decimal,
    pub observaciones: Option<String>,
}

#[derive(Debug)]
pub struct DatosPlantacion {
    pub finca_id: Uuid,
    pub lote_id: Uuid,
    pub almacigo_id: Option<Uuid>,
    pub fecha: NaiveDate,
    pub variedad: String,
    pub tipo_plantacion: Option<String>,
    pub cantidad_plantas: Decimal,
    pub bandejas_usadas: Option<Decimal>,
    pub superficie_cubierta: Option<Decimal>,
    pub jornales_usados: Option<Decimal>,
    pub costo_total: Option<Decimal>,
    pub moneda: Moneda,
    pub tipo_cambio: Decimal,
    pub observaciones: Option<String>,
}

#[derive(Clone)]
pub struct ProduccionService {
    produccion_repo: ProduccionRepository,
    insumo_repo: InsumoRepository,
}

impl ProduccionService {
    pub fn new(produccion_repo: ProduccionRepository, insumo_repo: InsumoRepository) -> Self {
        Self { produccion_repo, insumo_repo }
    }

    // ---
    // Almacigos
    // ---

    /// Siembra de almacigo: descuenta semilla (y sustrato si vino) del
    /// stock en la misma transaccion que crea el registro.
    pub async fn registrar_almacigo(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        datos: DatosAlmacigo,
    ) -> Result<Almacigo, AppError> {
        let mut tx = conn.begin().await?;

        let almacigo = self
            .produccion_repo
            .insert_almacigo(
                &mut *tx,
                tenant_id,
                datos.finca_id,
                datos.fecha,
                &datos.variedad,
                datos.cantidad_bandejas,
                datos.insumo_semilla_id,
                datos.semilla_usada,
                datos.insumo_sustrato_id,
                datos.sustrato_usado,
                datos.observaciones.as_deref(),
            )
            .await?;

        self.insumo_repo
            .descontar_stock(&mut *tx, tenant_id, datos.insumo_semilla_id, datos.semilla_usada)
            .await?;

        if let Some(sustrato_id) = datos.insumo_sustrato_id {
            if datos.sustrato_usado > Decimal::ZERO {
                self.insumo_repo
                    .descontar_stock(&mut *tx, tenant_id, sustrato_id, datos.sustrato_usado)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(almacigo)
    }

    pub async fn get_almacigos<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Almacigo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.produccion_repo
            .get_almacigos(executor, tenant_id, finca_id)
            .await
    }

    // ---
    // Plantaciones
    // ---

    pub async fn registrar_plantacion<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        datos: DatosPlantacion,
    ) -> Result<Plantacion, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.produccion_repo
            .insert_plantacion(
                executor,
                tenant_id,
                datos.finca_id,
                datos.lote_id,
                datos.almacigo_id,
                datos.fecha,
                &datos.variedad,
                datos.tipo_plantacion.as_deref(),
                datos.cantidad_plantas,
                datos.bandejas_usadas,
                datos.superficie_cubierta,
                datos.jornales_usados,
                datos.costo_total,
                datos.moneda,
                datos.tipo_cambio,
                datos.observaciones.as_deref(),
            )
            .await
    }

    pub async fn get_plantaciones<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Plantacion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.produccion_repo
            .get_plantaciones(executor, tenant_id, finca_id)
            .await
    }

    // ---
    // Cosechas
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn registrar_cosecha<'e, E>(
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
        self.produccion_repo
            .insert_cosecha(
                executor,
                tenant_id,
                finca_id,
                lote_id,
                fecha,
                kilos_brutos,
                cantidad_bultos,
                clase,
                observaciones,
            )
            .await
    }

    pub async fn get_cosechas<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<Cosecha>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.produccion_repo
            .get_cosechas(executor, tenant_id, finca_id)
            .await
    }

    // ---
    // Estufas y curado
    // ---

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
        self.produccion_repo
            .create_estufa(executor, tenant_id, nombre, capacidad)
            .await
    }

    pub async fn get_estufas<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Estufa>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.produccion_repo.get_estufas(executor, tenant_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn registrar_curado<'e, E>(
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
        self.produccion_repo
            .insert_curado(
                executor,
                tenant_id,
                estufa_id,
                lote_id,
                numero_carga,
                fecha_inicio,
                variedad,
                corte,
                peso_verde,
                costo_carga,
            )
            .await
    }

    pub async fn get_curados<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        estufa_id: Option<Uuid>,
    ) -> Result<Vec<Curado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.produccion_repo
            .get_curados(executor, tenant_id, estufa_id)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn actualizar_curado<'e, E>(
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
        self.produccion_repo
            .update_curado(
                executor,
                tenant_id,
                curado_id,
                fecha_final,
                peso_seco,
                costo_descarga,
                estado,
            )
            .await
    }
}
