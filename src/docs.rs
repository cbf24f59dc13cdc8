// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Tenancy ---
        handlers::tenancy::create_tenant,
        handlers::tenancy::get_mi_tenant,

        // --- Fincas y lotes ---
        handlers::fincas::get_fincas,
        handlers::fincas::create_finca,
        handlers::fincas::update_finca,
        handlers::lotes::get_lotes,
        handlers::lotes::create_lote,
        handlers::lotes::update_lote,

        // --- Insumos ---
        handlers::insumos::get_categorias,
        handlers::insumos::create_categoria,
        handlers::insumos::get_insumos,
        handlers::insumos::create_insumo,
        handlers::insumos::update_insumo,

        // --- Personal ---
        handlers::personal::get_personal,
        handlers::personal::create_personal,
        handlers::personal::update_personal,

        // --- Labores ---
        handlers::labores::get_labores,
        handlers::labores::create_labor,
        handlers::labores::update_labor,
        handlers::labores::delete_labor,

        // --- Liquidaciones ---
        handlers::liquidaciones::preview_liquidacion,
        handlers::liquidaciones::generar_liquidacion,
        handlers::liquidaciones::get_liquidaciones,

        // --- Produccion ---
        handlers::produccion::get_almacigos,
        handlers::produccion::create_almacigo,
        handlers::produccion::get_plantaciones,
        handlers::produccion::create_plantacion,
        handlers::produccion::get_cosechas,
        handlers::produccion::create_cosecha,
        handlers::produccion::get_estufas,
        handlers::produccion::create_estufa,
        handlers::produccion::get_curados,
        handlers::produccion::create_curado,
        handlers::produccion::update_curado,

        // --- Dashboard ---
        handlers::dashboard::get_resumen,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Usuario,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Tenancy ---
            models::tenancy::Tenant,
            handlers::tenancy::CreateTenantPayload,

            // --- Fincas ---
            models::fincas::Finca,
            models::fincas::Lote,
            handlers::fincas::FincaPayload,
            handlers::lotes::LotePayload,

            // --- Insumos ---
            models::insumos::Moneda,
            models::insumos::CategoriaInsumo,
            models::insumos::Insumo,
            handlers::insumos::InsumoPayload,
            handlers::insumos::CategoriaPayload,

            // --- Personal ---
            models::personal::TipoPersonal,
            models::personal::Personal,
            models::personal::Liquidacion,
            models::personal::AsignacionPendiente,
            models::personal::GrupoLiquidacion,
            handlers::personal::PersonalPayload,
            handlers::liquidaciones::GenerarLiquidacionPayload,

            // --- Labores ---
            models::labores::Labor,
            models::labores::LaborPersonal,
            models::labores::LaborInsumoDetalle,
            models::labores::LaborDetalle,
            models::labores::ConsumoInput,
            models::labores::AsignacionInput,
            handlers::labores::LaborPayload,

            // --- Produccion ---
            models::produccion::Almacigo,
            models::produccion::Plantacion,
            models::produccion::Cosecha,
            models::produccion::Estufa,
            models::produccion::EstadoCurado,
            models::produccion::Curado,
            handlers::produccion::AlmacigoPayload,
            handlers::produccion::PlantacionPayload,
            handlers::produccion::CosechaPayload,
            handlers::produccion::EstufaPayload,
            handlers::produccion::CuradoPayload,
            handlers::produccion::CerrarCuradoPayload,

            // --- Dashboard ---
            models::dashboard::ResumenTenant,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación y registro"),
        (name = "Tenancy", description = "Alta y consulta del tenant"),
        (name = "Fincas", description = "Fincas del tenant"),
        (name = "Lotes", description = "Lotes cultivados"),
        (name = "Insumos", description = "Insumos y stock"),
        (name = "Personal", description = "Trabajadores"),
        (name = "Labores", description = "Labores de campo, consumos y jornales"),
        (name = "Liquidaciones", description = "Liquidación de jornales"),
        (name = "Producción", description = "Almácigos, plantación, cosecha y curado"),
        (name = "Dashboard", description = "Indicadores gerenciales")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
