// src/services/dashboard_service.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError, db::DashboardRepository, models::dashboard::ResumenTenant,
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn get_resumen(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<ResumenTenant, AppError> {
        let fincas = self.dashboard_repo.contar_fincas(&mut *conn, tenant_id).await?;
        let lotes_activos = self
            .dashboard_repo
            .contar_lotes_activos(&mut *conn, tenant_id)
            .await?;
        let valor_stock_insumos = self
            .dashboard_repo
            .valor_stock_insumos(&mut *conn, tenant_id)
            .await?;
        let kilos_cosechados = self
            .dashboard_repo
            .kilos_cosechados(&mut *conn, tenant_id)
            .await?;
        let (jornales_pendientes, costo_jornales_pendientes) = self
            .dashboard_repo
            .jornales_pendientes(&mut *conn, tenant_id)
            .await?;

        Ok(ResumenTenant {
            fincas,
            lotes_activos,
            valor_stock_insumos,
            kilos_cosechados,
            jornales_pendientes,
            costo_jornales_pendientes,
        })
    }
}
