// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, FincaRepository, InsumoRepository, LaborRepository,
        PersonalRepository, ProduccionRepository, TenantRepository, UserRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, labor_service::LaborService,
        liquidacion_service::LiquidacionService, produccion_service::ProduccionService,
        tenancy_service::TenantService,
    },
};

// El estado compartido de toda la aplicacion: pool, repos de maestros
// y el grafo de servicios ya armado.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub tenant_service: TenantService,
    pub labor_service: LaborService,
    pub liquidacion_service: LiquidacionService,
    pub produccion_service: ProduccionService,
    pub dashboard_service: DashboardService,

    // Maestros simples: los handlers van directo al repo
    pub finca_repo: FincaRepository,
    pub insumo_repo: InsumoRepository,
    pub personal_repo: PersonalRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión a la base de datos establecida");

        // --- Grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let finca_repo = FincaRepository::new(db_pool.clone());
        let insumo_repo = InsumoRepository::new(db_pool.clone());
        let labor_repo = LaborRepository::new(db_pool.clone());
        let personal_repo = PersonalRepository::new(db_pool.clone());
        let produccion_repo = ProduccionRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let tenant_service = TenantService::new(
            tenant_repo,
            user_repo,
            finca_repo.clone(),
            db_pool.clone(),
        );
        let labor_service = LaborService::new(
            labor_repo,
            insumo_repo.clone(),
            personal_repo.clone(),
        );
        let liquidacion_service = LiquidacionService::new(personal_repo.clone());
        let produccion_service =
            ProduccionService::new(produccion_repo, insumo_repo.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            tenant_service,
            labor_service,
            liquidacion_service,
            produccion_service,
            dashboard_service,
            finca_repo,
            insumo_repo,
            personal_repo,
        })
    }
}
