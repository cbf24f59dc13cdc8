// src/models/insumos.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Moneda (mapea el enum de Postgres) ---
// El tipo de cambio se congela al momento de la compra; toda valuacion
// en moneda local sale de costo_unitario * tipo_cambio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "moneda")]
pub enum Moneda {
    #[sqlx(rename = "ARS")]
    #[serde(rename = "ARS")]
    Ars,
    #[sqlx(rename = "USD")]
    #[serde(rename = "USD")]
    Usd,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaInsumo {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Fertilizantes")]
    pub nombre: String,

    pub created_at: DateTime<Utc>,
}

// Recurso consumible con stock fisico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insumo {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub categoria_id: Uuid,

    #[schema(example = "Urea")]
    pub nombre: String,

    #[schema(example = "kg")]
    pub unidad: String,

    #[schema(example = "850.00")]
    pub costo_unitario: Decimal,

    pub moneda: Moneda,

    // Cotizacion al momento de la compra (1 si la moneda ya es ARS)
    #[schema(example = "1450.0")]
    pub tipo_cambio: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-05-10")]
    pub fecha_compra: NaiveDate,

    #[schema(example = "100.0")]
    pub stock_actual: Decimal,

    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Insumo {
    /// Costo unitario expresado en moneda local (ARS).
    pub fn costo_unitario_local(&self) -> Decimal {
        self.costo_unitario * self.tipo_cambio
    }

    /// Valuacion del stock en mano, en moneda local.
    pub fn valor_stock_local(&self) -> Decimal {
        self.costo_unitario_local() * self.stock_actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn insumo(costo: &str, cambio: &str, stock: &str, moneda: Moneda) -> Insumo {
        Insumo {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            categoria_id: Uuid::new_v4(),
            nombre: "Urea".into(),
            unidad: "kg".into(),
            costo_unitario: costo.parse().unwrap(),
            moneda,
            tipo_cambio: cambio.parse().unwrap(),
            fecha_compra: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            stock_actual: stock.parse().unwrap(),
            activo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valuacion_en_dolares_usa_el_tipo_de_cambio_congelado() {
        let i = insumo("2.5", "1450", "100", Moneda::Usd);
        assert_eq!(i.costo_unitario_local(), "3625".parse().unwrap());
        assert_eq!(i.valor_stock_local(), "362500".parse().unwrap());
    }

    #[test]
    fn valuacion_en_pesos_es_identidad() {
        let i = insumo("850", "1", "40", Moneda::Ars);
        assert_eq!(i.valor_stock_local(), "34000".parse().unwrap());
    }

    #[test]
    fn el_tipo_de_cambio_sobrevive_la_serializacion() {
        let i = insumo("2.5", "1450.25", "100", Moneda::Usd);
        let json = serde_json::to_value(&i).unwrap();
        assert_eq!(json["moneda"], "USD");
        let cambio: Decimal = json["tipoCambio"].to_string().parse().unwrap();
        assert_eq!(cambio, i.tipo_cambio);
    }
}
