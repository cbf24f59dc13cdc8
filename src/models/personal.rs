// src/models/personal.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_personal")]
pub enum TipoPersonal {
    Permanente,
    Temporario,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Juan Gómez")]
    pub nombre: String,

    pub dni: Option<String>,
    pub legajo: Option<String>,
    pub tipo: TipoPersonal,

    // Jornal de referencia: se usa como default al asignar dias a una labor
    #[schema(example = "500.00")]
    pub costo_jornal_referencia: Option<Decimal>,

    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Pago de jornales de un trabajador sobre un periodo.
// Historial puro: nunca se borra ni se modifica via API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Liquidacion {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub personal_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub periodo_inicio: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub periodo_fin: NaiveDate,

    pub total_dias: Decimal,
    pub total_a_pagar: Decimal,

    pub fecha_liquidacion: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Una fila de labores_personal pendiente de liquidar, con el contexto
// de la labor y del trabajador ya join-eado (lo que muestra el preview).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionPendiente {
    pub id: Uuid,
    pub personal_id: Uuid,
    pub personal_nombre: String,
    pub costo_jornal_referencia: Option<Decimal>,
    pub labor_id: Uuid,
    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,
    pub tipo_labor: String,
    pub lote_nombre: String,
    pub dias_trabajados: Decimal,
    pub costo_asignado: Decimal,
}

// Un grupo del preview: un trabajador con sus filas pendientes y totales.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoLiquidacion {
    pub personal_id: Uuid,
    pub personal_nombre: String,
    pub items: Vec<AsignacionPendiente>,
    pub total_dias: Decimal,
    pub total_pagar: Decimal,
}
