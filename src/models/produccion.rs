// src/models/produccion.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::insumos::Moneda;

// --- Almacigo (siembra en bandejas) ---
// Crear uno descuenta semilla y, si corresponde, sustrato del stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Almacigo {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub finca_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,

    #[schema(example = "Virginia")]
    pub variedad: String,

    pub cantidad_bandejas: i32,

    pub insumo_semilla_id: Uuid,
    pub semilla_usada: Decimal,

    pub insumo_sustrato_id: Option<Uuid>,
    pub sustrato_usado: Decimal,

    pub observaciones: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Plantacion (trasplante a campo) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plantacion {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub finca_id: Uuid,
    pub lote_id: Uuid,
    pub almacigo_id: Option<Uuid>,

    #[schema(value_type = String, format = Date)]
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Cosecha ---
// Registro puro de kilos levantados; no toca stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cosecha {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub finca_id: Uuid,
    pub lote_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,

    #[schema(example = "1250.5")]
    pub kilos_brutos: Decimal,

    pub cantidad_bultos: Option<i32>,

    #[schema(example = "B1F")]
    pub clase: Option<String>,

    pub observaciones: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Estufas y curado ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Estufa {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Estufa 2")]
    pub nombre: String,

    // Capacidad en kg de hoja verde
    pub capacidad: Decimal,

    pub activa: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_curado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EstadoCurado {
    EnProceso,
    Curado,
    Descargado,
}

// Una carga de estufa. El ciclo avanza en_proceso -> curado -> descargado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Curado {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub estufa_id: Uuid,
    pub lote_id: Option<Uuid>,

    pub numero_carga: i32,

    #[schema(value_type = String, format = Date)]
    pub fecha_inicio: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_final: Option<NaiveDate>,

    pub variedad: Option<String>,
    pub corte: Option<i32>,

    pub peso_verde: Decimal,
    pub peso_seco: Option<Decimal>,

    pub costo_carga: Option<Decimal>,
    pub costo_descarga: Option<Decimal>,

    pub estado: EstadoCurado,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
