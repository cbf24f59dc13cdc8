// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Resumen gerencial del tenant (una sola pantalla del frontend).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumenTenant {
    pub fincas: i64,
    pub lotes_activos: i64,

    // Valuacion del stock de insumos en moneda local (costo * cambio * stock)
    pub valor_stock_insumos: Decimal,

    pub kilos_cosechados: Decimal,

    // Jornales asignados que todavia no entraron en ninguna liquidacion
    pub jornales_pendientes: Decimal,
    pub costo_jornales_pendientes: Decimal,
}
