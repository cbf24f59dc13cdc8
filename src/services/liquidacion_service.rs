// src/services/liquidacion_service.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, PgConnection};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PersonalRepository,
    models::personal::{AsignacionPendiente, GrupoLiquidacion, Liquidacion},
};

#[derive(Clone)]
pub struct LiquidacionService {
    personal_repo: PersonalRepository,
}

/// Agrupa las filas pendientes por trabajador, sumando dias y costo.
/// Mantiene el orden de primera aparicion para que el preview sea estable.
fn agrupar_pendientes(pendientes: Vec<AsignacionPendiente>) -> Vec<GrupoLiquidacion> {
    let mut orden: Vec<Uuid> = Vec::new();
    let mut grupos: HashMap<Uuid, GrupoLiquidacion> = HashMap::new();

    for fila in pendientes {
        let grupo = grupos.entry(fila.personal_id).or_insert_with(|| {
            orden.push(fila.personal_id);
            GrupoLiquidacion {
                personal_id: fila.personal_id,
                personal_nombre: fila.personal_nombre.clone(),
                items: Vec::new(),
                total_dias: Decimal::ZERO,
                total_pagar: Decimal::ZERO,
            }
        });
        grupo.total_dias += fila.dias_trabajados;
        grupo.total_pagar += fila.costo_asignado;
        grupo.items.push(fila);
    }

    orden
        .into_iter()
        .filter_map(|id| grupos.remove(&id))
        .collect()
}

impl LiquidacionService {
    pub fn new(personal_repo: PersonalRepository) -> Self {
        Self { personal_repo }
    }

    /// Preview: jornales sin liquidar del periodo, agrupados por trabajador.
    /// Un conjunto vacio no es un error: "nada pendiente".
    pub async fn preview(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        personal_id: Option<Uuid>,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<GrupoLiquidacion>, AppError> {
        let pendientes = self
            .personal_repo
            .get_pendientes(&mut *conn, tenant_id, personal_id, desde, hasta)
            .await?;
        Ok(agrupar_pendientes(pendientes))
    }

    /// Genera la liquidacion de UN trabajador sobre el periodo, en una sola
    /// transaccion: re-selecciona las filas pendientes (los totales salen de
    /// la base, no del cliente), inserta la liquidacion y vincula las filas.
    /// Si otra liquidacion concurrente ya tomo alguna fila, el UPDATE
    /// condicionado vincula menos filas de las esperadas y todo se deshace.
    pub async fn generar(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        personal_id: Uuid,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Liquidacion, AppError> {
        let mut tx = conn.begin().await?;

        let pendientes = self
            .personal_repo
            .get_pendientes(&mut *tx, tenant_id, Some(personal_id), desde, hasta)
            .await?;

        if pendientes.is_empty() {
            return Err(AppError::SinPendientes);
        }

        let total_dias: Decimal = pendientes.iter().map(|p| p.dias_trabajados).sum();
        let total_a_pagar: Decimal = pendientes.iter().map(|p| p.costo_asignado).sum();
        let ids: Vec<Uuid> = pendientes.iter().map(|p| p.id).collect();

        let liquidacion = self
            .personal_repo
            .insert_liquidacion(
                &mut *tx,
                tenant_id,
                personal_id,
                desde,
                hasta,
                total_dias,
                total_a_pagar,
            )
            .await?;

        let vinculadas = self
            .personal_repo
            .vincular_asignaciones(&mut *tx, tenant_id, liquidacion.id, &ids)
            .await?;

        if vinculadas != ids.len() as u64 {
            // Carrera con otra liquidacion: no commitear nada.
            return Err(AppError::LiquidacionEnConflicto);
        }

        tx.commit().await?;

        tracing::info!(
            personal_id = %personal_id,
            total_dias = %liquidacion.total_dias,
            total_a_pagar = %liquidacion.total_a_pagar,
            "Liquidación generada"
        );
        Ok(liquidacion)
    }

    pub async fn get_liquidaciones(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        personal_id: Option<Uuid>,
    ) -> Result<Vec<Liquidacion>, AppError> {
        self.personal_repo
            .get_liquidaciones(conn, tenant_id, personal_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn fila(
        personal_id: Uuid,
        nombre: &str,
        dias: &str,
        costo: &str,
    ) -> AsignacionPendiente {
        AsignacionPendiente {
            id: Uuid::new_v4(),
            personal_id,
            personal_nombre: nombre.into(),
            costo_jornal_referencia: Some(dec("500")),
            labor_id: Uuid::new_v4(),
            fecha: NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            tipo_labor: "Desflore".into(),
            lote_nombre: "Lote 1".into(),
            dias_trabajados: dias.parse().unwrap(),
            costo_asignado: costo.parse().unwrap(),
        }
    }

    #[test]
    fn suma_dias_y_costos_por_trabajador() {
        // Juan: 2 y 3 dias a $500 de jornal -> 5 dias, $2500
        let juan = Uuid::new_v4();
        let grupos = agrupar_pendientes(vec![
            fila(juan, "Juan", "2", "1000"),
            fila(juan, "Juan", "3", "1500"),
        ]);

        assert_eq!(grupos.len(), 1);
        assert_eq!(grupos[0].total_dias, dec("5"));
        assert_eq!(grupos[0].total_pagar, dec("2500"));
        assert_eq!(grupos[0].items.len(), 2);
    }

    #[test]
    fn separa_trabajadores_distintos_en_orden_de_aparicion() {
        let juan = Uuid::new_v4();
        let maria = Uuid::new_v4();
        let grupos = agrupar_pendientes(vec![
            fila(juan, "Juan", "1", "500"),
            fila(maria, "María", "2", "1200"),
            fila(juan, "Juan", "0.5", "250"),
        ]);

        assert_eq!(grupos.len(), 2);
        assert_eq!(grupos[0].personal_nombre, "Juan");
        assert_eq!(grupos[0].total_dias, dec("1.5"));
        assert_eq!(grupos[0].total_pagar, dec("750"));
        assert_eq!(grupos[1].personal_nombre, "María");
        assert_eq!(grupos[1].total_pagar, dec("1200"));
    }

    #[test]
    fn sin_pendientes_devuelve_vacio() {
        let grupos = agrupar_pendientes(Vec::new());
        assert!(grupos.is_empty());
    }

    #[test]
    fn los_totales_del_grupo_igualan_la_suma_de_sus_items() {
        let juan = Uuid::new_v4();
        let grupos = agrupar_pendientes(vec![
            fila(juan, "Juan", "2", "1000"),
            fila(juan, "Juan", "3", "1500"),
            fila(juan, "Juan", "1.5", "750"),
        ]);

        let dias: Decimal = grupos[0].items.iter().map(|i| i.dias_trabajados).sum();
        let costo: Decimal = grupos[0].items.iter().map(|i| i.costo_asignado).sum();
        assert_eq!(grupos[0].total_dias, dias);
        assert_eq!(grupos[0].total_pagar, costo);
    }
}
