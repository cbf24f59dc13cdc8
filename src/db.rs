pub mod user_repo;
pub use user_repo::UserRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod finca_repo;
pub use finca_repo::FincaRepository;
pub mod insumo_repo;
pub use insumo_repo::InsumoRepository;
pub mod labor_repo;
pub use labor_repo::LaborRepository;
pub mod personal_repo;
pub use personal_repo::PersonalRepository;
pub mod produccion_repo;
pub use produccion_repo::ProduccionRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
