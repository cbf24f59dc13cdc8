// src/models/fincas.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Finca {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Finca San Isidro")]
    pub nombre: String,

    // Hectareas
    #[schema(example = "45.5")]
    pub superficie_total: Option<Decimal>,

    // Kg/ha esperados para la campania
    pub rendimiento_esperado: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Subdivision cultivada dentro de una finca.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lote {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub finca_id: Uuid,

    #[schema(example = "Lote 3 Norte")]
    pub nombre: String,

    pub superficie: Option<Decimal>,

    #[schema(example = "Virginia")]
    pub variedad: Option<String>,

    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
