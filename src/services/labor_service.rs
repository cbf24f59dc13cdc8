// src/services/labor_service.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, PgConnection};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InsumoRepository, LaborRepository, PersonalRepository},
    models::{
        insumos::Moneda,
        labores::{AsignacionInput, ConsumoInput, Labor, LaborDetalle},
    },
};

// Datos ya validados de un alta/edicion de labor.
#[derive(Debug)]
pub struct DatosLabor {
    pub finca_id: Uuid,
    pub lote_id: Uuid,
    pub fecha: NaiveDate,
    pub tipo_labor: String,
    pub estado_fenologico: Option<String>,
    pub jornales: Decimal,
    pub costo_jornales: Decimal,
    pub moneda: Moneda,
    pub tipo_cambio: Decimal,
    pub observaciones: Option<String>,
    pub insumos: Vec<ConsumoInput>,
    pub personal: Vec<AsignacionInput>,
}

#[derive(Clone)]
pub struct LaborService {
    labor_repo: LaborRepository,
    insumo_repo: InsumoRepository,
    personal_repo: PersonalRepository,
}

/// Costo que se le asigna a un trabajador por una labor: el que vino en el
/// payload o, en su defecto, dias * jornal de referencia.
fn costo_asignado_o_default(
    dias: Decimal,
    costo: Option<Decimal>,
    jornal_referencia: Option<Decimal>,
) -> Decimal {
    costo.unwrap_or_else(|| dias * jornal_referencia.unwrap_or(Decimal::ZERO))
}

impl LaborService {
    pub fn new(
        labor_repo: LaborRepository,
        insumo_repo: InsumoRepository,
        personal_repo: PersonalRepository,
    ) -> Self {
        Self { labor_repo, insumo_repo, personal_repo }
    }

    /// Alta de labor: inserta la labor, sus consumos (descontando stock)
    /// y sus asignaciones de personal en UNA transaccion. Si algun insumo
    /// no alcanza, nada queda escrito.
    pub async fn registrar_labor(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        datos: DatosLabor,
    ) -> Result<Labor, AppError> {
        let mut tx = conn.begin().await?;

        let labor = self
            .labor_repo
            .insert_labor(
                &mut *tx,
                tenant_id,
                datos.finca_id,
                datos.lote_id,
                datos.fecha,
                &datos.tipo_labor,
                datos.estado_fenologico.as_deref(),
                datos.jornales,
                datos.costo_jornales,
                datos.moneda,
                datos.tipo_cambio,
                datos.observaciones.as_deref(),
            )
            .await?;

        self.aplicar_consumos(&mut tx, tenant_id, labor.id, &datos.insumos)
            .await?;
        self.aplicar_asignaciones(&mut tx, tenant_id, labor.id, &datos.personal)
            .await?;

        tx.commit().await?;
        Ok(labor)
    }

    /// Edicion: primero devuelve el stock de los consumos viejos, despues
    /// aplica los nuevos. Asi un cambio de 30kg a 20kg deja el neto bien,
    /// y un cambio que ya no alcanza el stock falla sin tocar nada.
    pub async fn actualizar_labor(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        labor_id: Uuid,
        datos: DatosLabor,
    ) -> Result<Labor, AppError> {
        let mut tx = conn.begin().await?;

        // Jornales ya pagados: la labor queda congelada.
        if self
            .labor_repo
            .tiene_asignaciones_liquidadas(&mut *tx, labor_id)
            .await?
        {
            return Err(AppError::AsignacionYaLiquidada);
        }

        let consumos_previos = self.labor_repo.get_consumos(&mut *tx, labor_id).await?;
        for (insumo_id, cantidad) in consumos_previos {
            self.insumo_repo
                .devolver_stock(&mut *tx, tenant_id, insumo_id, cantidad)
                .await?;
        }

        self.labor_repo.delete_hijos(&mut *tx, labor_id).await?;

        let labor = self
            .labor_repo
            .update_labor(
                &mut *tx,
                tenant_id,
                labor_id,
                datos.finca_id,
                datos.lote_id,
                datos.fecha,
                &datos.tipo_labor,
                datos.estado_fenologico.as_deref(),
                datos.jornales,
                datos.costo_jornales,
                datos.moneda,
                datos.tipo_cambio,
                datos.observaciones.as_deref(),
            )
            .await?;

        self.aplicar_consumos(&mut tx, tenant_id, labor_id, &datos.insumos)
            .await?;
        self.aplicar_asignaciones(&mut tx, tenant_id, labor_id, &datos.personal)
            .await?;

        tx.commit().await?;
        Ok(labor)
    }

    /// Baja: devuelve el stock consumido y borra la labor con sus hijos.
    pub async fn eliminar_labor(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        labor_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = conn.begin().await?;

        if self
            .labor_repo
            .tiene_asignaciones_liquidadas(&mut *tx, labor_id)
            .await?
        {
            return Err(AppError::AsignacionYaLiquidada);
        }

        let consumos = self.labor_repo.get_consumos(&mut *tx, labor_id).await?;
        for (insumo_id, cantidad) in consumos {
            self.insumo_repo
                .devolver_stock(&mut *tx, tenant_id, insumo_id, cantidad)
                .await?;
        }

        // Los hijos caen por ON DELETE CASCADE
        self.labor_repo.delete_labor(&mut *tx, tenant_id, labor_id).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Listado con consumos y asignaciones ya armados por labor.
    pub async fn get_labores(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        finca_id: Option<Uuid>,
    ) -> Result<Vec<LaborDetalle>, AppError> {
        let filas = self
            .labor_repo
            .get_labores(&mut *conn, tenant_id, finca_id)
            .await?;

        let ids: Vec<Uuid> = filas.iter().map(|f| f.labor.id).collect();

        let mut consumos_por_labor: HashMap<Uuid, Vec<_>> = HashMap::new();
        for (labor_id, detalle) in self
            .labor_repo
            .get_consumos_detalle(&mut *conn, &ids)
            .await?
        {
            consumos_por_labor.entry(labor_id).or_default().push(detalle);
        }

        let mut personal_por_labor: HashMap<Uuid, Vec<_>> = HashMap::new();
        for asignacion in self.labor_repo.get_asignaciones(&mut *conn, &ids).await? {
            personal_por_labor
                .entry(asignacion.labor_id)
                .or_default()
                .push(asignacion);
        }

        Ok(filas
            .into_iter()
            .map(|fila| {
                let id = fila.labor.id;
                LaborDetalle {
                    labor: fila.labor,
                    lote_nombre: fila.lote_nombre,
                    insumos: consumos_por_labor.remove(&id).unwrap_or_default(),
                    personal: personal_por_labor.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    // ---
    // Internos
    // ---

    async fn aplicar_consumos(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tenant_id: Uuid,
        labor_id: Uuid,
        consumos: &[ConsumoInput],
    ) -> Result<(), AppError> {
        for consumo in consumos {
            self.labor_repo
                .insert_consumo(&mut **tx, tenant_id, labor_id, consumo.insumo_id, consumo.cantidad)
                .await?;
            // UPDATE condicionado: si no alcanza, corta con StockInsuficiente
            // y la transaccion entera se deshace.
            self.insumo_repo
                .descontar_stock(&mut **tx, tenant_id, consumo.insumo_id, consumo.cantidad)
                .await?;
        }
        Ok(())
    }

    async fn aplicar_asignaciones(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tenant_id: Uuid,
        labor_id: Uuid,
        asignaciones: &[AsignacionInput],
    ) -> Result<(), AppError> {
        for asignacion in asignaciones {
            let personal = self
                .personal_repo
                .find_personal(&mut **tx, tenant_id, asignacion.personal_id)
                .await?
                .ok_or(AppError::NoEncontrado("Personal"))?;

            let costo = costo_asignado_o_default(
                asignacion.dias_trabajados,
                asignacion.costo_asignado,
                personal.costo_jornal_referencia,
            );

            self.labor_repo
                .insert_asignacion(
                    &mut **tx,
                    tenant_id,
                    labor_id,
                    asignacion.personal_id,
                    asignacion.dias_trabajados,
                    costo,
                )
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn el_costo_explicito_tiene_prioridad() {
        let costo = costo_asignado_o_default(dec("2"), Some(dec("1200")), Some(dec("500")));
        assert_eq!(costo, dec("1200"));
    }

    #[test]
    fn sin_costo_usa_dias_por_jornal_de_referencia() {
        let costo = costo_asignado_o_default(dec("2"), None, Some(dec("500")));
        assert_eq!(costo, dec("1000"));

        let costo = costo_asignado_o_default(dec("3"), None, Some(dec("500")));
        assert_eq!(costo, dec("1500"));
    }

    #[test]
    fn sin_jornal_de_referencia_el_default_es_cero() {
        let costo = costo_asignado_o_default(dec("4"), None, None);
        assert_eq!(costo, Decimal::ZERO);
    }
}
