// src/db/insumo_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgConnection, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::insumos::{CategoriaInsumo, Insumo, Moneda},
};

#[derive(Clone)]
pub struct InsumoRepository {
    pool: PgPool,
}

impl InsumoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Categorias
    // ---

    pub async fn get_categorias<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<CategoriaInsumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categorias = sqlx::query_as::<_, CategoriaInsumo>(
            "SELECT * FROM categorias_insumos WHERE tenant_id = $1 ORDER BY nombre ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(categorias)
    }

    pub async fn create_categoria<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        nombre: &str,
    ) -> Result<CategoriaInsumo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categoria = sqlx::query_as::<_, CategoriaInsumo>(
            r#"
            INSERT INTO categorias_insumos (tenant_id, nombre)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(nombre)
        .fetch_one(executor)
        .await?;
        Ok(categoria)
    }

    // ---
    // Insumos
    // ---

    pub async fn get_all_insumos<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Insumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insumos = sqlx::query_as::<_, Insumo>(
            "SELECT * FROM insumos WHERE tenant_id = $1 ORDER BY nombre ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(insumos)
    }

    pub async fn find_insumo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        insumo_id: Uuid,
    ) -> Result<Option<Insumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Insumo>(
            "SELECT * FROM insumos WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(insumo_id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_insumo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        categoria_id: Uuid,
        nombre: &str,
        unidad: &str,
        costo_unitario: Decimal,
        moneda: Moneda,
        tipo_cambio: Decimal,
        fecha_compra: NaiveDate,
        stock_actual: Decimal,
    ) -> Result<Insumo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insumo = sqlx::query_as::<_, Insumo>(
            r#"
            INSERT INTO insumos
                (tenant_id, categoria_id, nombre, unidad, costo_unitario,
                 moneda, tipo_cambio, fecha_compra, stock_actual)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(categoria_id)
        .bind(nombre)
        .bind(unidad)
        .bind(costo_unitario)
        .bind(moneda)
        .bind(tipo_cambio)
        .bind(fecha_compra)
        .bind(stock_actual)
        .fetch_one(executor)
        .await?;
        Ok(insumo)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_insumo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        insumo_id: Uuid,
        categoria_id: Uuid,
        nombre: &str,
        unidad: &str,
        costo_unitario: Decimal,
        moneda: Moneda,
        tipo_cambio: Decimal,
        fecha_compra: NaiveDate,
        stock_actual: Decimal,
        activo: bool,
    ) -> Result<Insumo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Insumo>(
            r#"
            UPDATE insumos
            SET categoria_id = $3, nombre = $4, unidad = $5, costo_unitario = $6,
                moneda = $7, tipo_cambio = $8, fecha_compra = $9,
                stock_actual = $10, activo = $11, updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(insumo_id)
        .bind(categoria_id)
        .bind(nombre)
        .bind(unidad)
        .bind(costo_unitario)
        .bind(moneda)
        .bind(tipo_cambio)
        .bind(fecha_compra)
        .bind(stock_actual)
        .bind(activo)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NoEncontrado("Insumo"))
    }

    // ---
    // Stock
    // ---
    // Siempre dentro de la transaccion del evento que consume; por eso
    // reciben la conexion concreta y no un executor generico.

    /// Descuenta stock con un UPDATE condicionado: el chequeo y el
    /// decremento son una sola sentencia, asi dos consumos simultaneos
    /// no pueden dejar el stock negativo.
    pub async fn descontar_stock(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        insumo_id: Uuid,
        cantidad: Decimal,
    ) -> Result<Insumo, AppError> {
        let insumo = self
            .find_insumo(&mut *conn, tenant_id, insumo_id)
            .await?
            .ok_or(AppError::NoEncontrado("Insumo"))?;

        let actualizado = sqlx::query_as::<_, Insumo>(
            r#"
            UPDATE insumos
            SET stock_actual = stock_actual - $3, updated_at = now()
            WHERE tenant_id = $1 AND id = $2 AND stock_actual >= $3
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(insumo_id)
        .bind(cantidad)
        .fetch_optional(&mut *conn)
        .await?;

        actualizado.ok_or(AppError::StockInsuficiente {
            insumo: insumo.nombre,
            disponible: insumo.stock_actual,
            solicitado: cantidad,
        })
    }

    /// Devuelve stock previamente descontado (edicion o baja de una labor).
    pub async fn devolver_stock(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        insumo_id: Uuid,
        cantidad: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE insumos
            SET stock_actual = stock_actual + $3, updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(insumo_id)
        .bind(cantidad)
        .execute(conn)
        .await?;
        Ok(())
    }
}
