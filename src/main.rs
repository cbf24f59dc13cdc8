// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{auth_guard, tenant_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() esta bien aca: sin configuracion la aplicacion no arranca.
    let app_state = AppState::new()
        .await
        .expect("Falla al inicializar el estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falla al correr las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones ejecutadas");

    // Rutas publicas de autenticacion
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rutas de usuario: requieren token pero no tenant (onboarding)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tenant_routes = Router::new()
        .route("/", post(handlers::tenancy::create_tenant))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .merge(
            Router::new()
                .route("/me", get(handlers::tenancy::get_mi_tenant))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    tenant_guard,
                )),
        );

    let finca_routes = Router::new()
        .route(
            "/",
            post(handlers::fincas::create_finca).get(handlers::fincas::get_fincas),
        )
        .route("/{id}", put(handlers::fincas::update_finca));

    let lote_routes = Router::new()
        .route(
            "/",
            post(handlers::lotes::create_lote).get(handlers::lotes::get_lotes),
        )
        .route("/{id}", put(handlers::lotes::update_lote));

    let insumo_routes = Router::new()
        .route(
            "/",
            post(handlers::insumos::create_insumo).get(handlers::insumos::get_insumos),
        )
        .route("/{id}", put(handlers::insumos::update_insumo))
        .route(
            "/categorias",
            post(handlers::insumos::create_categoria).get(handlers::insumos::get_categorias),
        );

    let personal_routes = Router::new()
        .route(
            "/",
            post(handlers::personal::create_personal).get(handlers::personal::get_personal),
        )
        .route("/{id}", put(handlers::personal::update_personal))
        .route(
            "/liquidaciones",
            post(handlers::liquidaciones::generar_liquidacion)
                .get(handlers::liquidaciones::get_liquidaciones),
        )
        .route(
            "/liquidaciones/preview",
            get(handlers::liquidaciones::preview_liquidacion),
        );

    let labor_routes = Router::new()
        .route(
            "/",
            post(handlers::labores::create_labor).get(handlers::labores::get_labores),
        )
        .route(
            "/{id}",
            put(handlers::labores::update_labor).delete(handlers::labores::delete_labor),
        );

    let produccion_routes = Router::new()
        .route(
            "/almacigos",
            post(handlers::produccion::create_almacigo).get(handlers::produccion::get_almacigos),
        )
        .route(
            "/plantaciones",
            post(handlers::produccion::create_plantacion)
                .get(handlers::produccion::get_plantaciones),
        )
        .route(
            "/cosechas",
            post(handlers::produccion::create_cosecha).get(handlers::produccion::get_cosechas),
        )
        .route(
            "/estufas",
            post(handlers::produccion::create_estufa).get(handlers::produccion::get_estufas),
        )
        .route(
            "/curados",
            post(handlers::produccion::create_curado).get(handlers::produccion::get_curados),
        )
        .route("/curados/{id}", put(handlers::produccion::update_curado));

    let dashboard_routes =
        Router::new().route("/resumen", get(handlers::dashboard::get_resumen));

    // Todas las rutas de datos comparten el mismo guard de tenant
    let datos_routes = Router::new()
        .nest("/fincas", finca_routes)
        .nest("/lotes", lote_routes)
        .nest("/insumos", insumo_routes)
        .nest("/personal", personal_routes)
        .nest("/labores", labor_routes)
        .nest("/produccion", produccion_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/tenants", tenant_routes)
        .nest("/api", datos_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falla al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
