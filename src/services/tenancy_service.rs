// src/services/tenancy_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FincaRepository, TenantRepository, UserRepository},
    models::tenancy::Tenant,
};

#[derive(Clone)]
pub struct TenantService {
    tenant_repo: TenantRepository,
    user_repo: UserRepository,
    finca_repo: FincaRepository,
    pool: PgPool,
}

impl TenantService {
    pub fn new(
        tenant_repo: TenantRepository,
        user_repo: UserRepository,
        finca_repo: FincaRepository,
        pool: PgPool,
    ) -> Self {
        Self { tenant_repo, user_repo, finca_repo, pool }
    }

    /// Onboarding: crea el tenant, vincula al usuario creador y, si vino,
    /// da de alta la primera finca. Todo o nada.
    pub async fn create_tenant_con_finca(
        &self,
        owner_id: Uuid,
        nombre: &str,
        finca_nombre: Option<&str>,
        superficie: Option<Decimal>,
        rendimiento: Option<Decimal>,
    ) -> Result<Tenant, AppError> {
        let slug = slugify(nombre);

        let mut tx = self.pool.begin().await?;

        let nuevo_tenant = self
            .tenant_repo
            .create_tenant(&mut *tx, nombre, &slug)
            .await?;

        self.user_repo
            .asignar_tenant(&mut *tx, owner_id, nuevo_tenant.id)
            .await?;

        // El tenant recien existe dentro de esta transaccion: fija el
        // contexto RLS (alcance local a la tx) para poder insertar la finca.
        sqlx::query("SELECT set_config('app.tenant_id', $1, true)")
            .bind(nuevo_tenant.id.to_string())
            .execute(&mut *tx)
            .await?;

        if let Some(finca_nombre) = finca_nombre {
            self.finca_repo
                .create_finca(&mut *tx, nuevo_tenant.id, finca_nombre, superficie, rendimiento)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Tenant '{}' creado para el usuario {}", nombre, owner_id);
        Ok(nuevo_tenant)
    }

    pub async fn get_tenant(&self, tenant_id: Uuid) -> Result<Tenant, AppError> {
        self.tenant_repo
            .find_by_id(tenant_id)
            .await?
            .ok_or(AppError::NoEncontrado("Tenant"))
    }
}

/// Identificador legible para URLs: minusculas, sin acentos comunes,
/// espacios a guiones.
fn slugify(nombre: &str) -> String {
    nombre
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            c if c.is_ascii_alphanumeric() => c,
            _ => '-',
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_normaliza_acentos_y_espacios() {
        assert_eq!(slugify("Tabacalera La Esperanza"), "tabacalera-la-esperanza");
        assert_eq!(slugify("El Ñandú  Chico"), "el-nandu-chico");
    }
}
