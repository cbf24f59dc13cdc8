// src/models/labores.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::insumos::Moneda;

// Actividad de campo fechada sobre un lote. Puede consumir insumos
// (labores_insumos) y asignar dias de trabajadores (labores_personal).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Labor {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub finca_id: Uuid,
    pub lote_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-07-15")]
    pub fecha: NaiveDate,

    #[schema(example = "Fertilización")]
    pub tipo_labor: String,

    #[schema(example = "Floración")]
    pub estado_fenologico: Option<String>,

    pub jornales: Decimal,
    pub costo_jornales: Decimal,
    pub moneda: Moneda,
    pub tipo_cambio: Decimal,

    pub observaciones: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Asignacion de dias de un trabajador a una labor. liquidacion_id
// se setea una sola vez al liquidar y nunca vuelve a NULL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaborPersonal {
    pub id: Uuid,
    pub labor_id: Uuid,
    pub personal_id: Uuid,
    pub dias_trabajados: Decimal,
    pub costo_asignado: Decimal,
    pub liquidacion_id: Option<Uuid>,
}

// --- Sub-payloads anidados del alta/edicion de labor ---

fn cantidad_minima(val: &Decimal) -> Result<(), validator::ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("La cantidad debe ser mayor a 0.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumoInput {
    pub insumo_id: Uuid,

    #[validate(custom(function = "cantidad_minima"))]
    pub cantidad: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionInput {
    pub personal_id: Uuid,

    #[validate(custom(function = "cantidad_minima"))]
    pub dias_trabajados: Decimal,

    // Si no viene, se calcula con el jornal de referencia del trabajador
    pub costo_asignado: Option<Decimal>,
}

// Linea de consumo con el nombre del insumo, para el historial.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaborInsumoDetalle {
    pub insumo_id: Uuid,
    pub insumo_nombre: String,
    pub unidad: String,
    pub cantidad: Decimal,
}

// Labor con sus consumos y asignaciones, como la devuelve el listado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaborDetalle {
    #[serde(flatten)]
    pub labor: Labor,
    pub lote_nombre: String,
    pub insumos: Vec<LaborInsumoDetalle>,
    pub personal: Vec<LaborPersonal>,
}
