pub mod auth;
pub mod dashboard_service;
pub mod labor_service;
pub mod liquidacion_service;
pub mod produccion_service;
pub mod tenancy_service;
