// src/handlers/produccion.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::{
        insumos::Moneda,
        produccion::{Almacigo, Cosecha, Curado, EstadoCurado, Estufa, Plantacion},
    },
    services::produccion_service::{DatosAlmacigo, DatosPlantacion},
};

fn validate_positivo(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("La cantidad debe ser mayor a 0.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_no_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn default_moneda() -> Moneda {
    Moneda::Ars
}

fn default_tipo_cambio() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Deserialize)]
pub struct FincaFiltro {
    pub finca_id: Option<Uuid>,
}

// =============================================================================
//  ALMACIGOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlmacigoPayload {
    pub finca_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,

    #[validate(length(min = 2, message = "La variedad es requerida."))]
    #[schema(example = "Virginia")]
    pub variedad: String,

    #[validate(range(min = 1, message = "Debe haber al menos 1 bandeja."))]
    pub cantidad_bandejas: i32,

    pub insumo_semilla_id: Uuid,

    #[validate(custom(function = "validate_positivo"))]
    pub semilla_usada: Decimal,

    // El sustrato es opcional; si viene, tambien descuenta stock
    pub insumo_sustrato_id: Option<Uuid>,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub sustrato_usado: Decimal,

    pub observaciones: Option<String>,
}

// GET /api/produccion/almacigos
#[utoipa::path(
    get,
    path = "/api/produccion/almacigos",
    tag = "Producción",
    params(("finca_id" = Option<Uuid>, Query, description = "Filtra por finca")),
    responses((status = 200, description = "Almácigos del tenant", body = [Almacigo])),
    security(("api_jwt" = []))
)]
pub async fn get_almacigos(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<FincaFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let almacigos = app_state
        .produccion_service
        .get_almacigos(&mut *rls_conn, tenant.0, filtro.finca_id)
        .await?;

    Ok((StatusCode::OK, Json(almacigos)))
}

// POST /api/produccion/almacigos
#[utoipa::path(
    post,
    path = "/api/produccion/almacigos",
    tag = "Producción",
    request_body = AlmacigoPayload,
    responses(
        (status = 201, description = "Almácigo registrado, stock descontado", body = Almacigo),
        (status = 409, description = "Stock insuficiente de semilla o sustrato")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_almacigo(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<AlmacigoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let almacigo = app_state
        .produccion_service
        .registrar_almacigo(
            &mut rls_conn,
            tenant.0,
            DatosAlmacigo {
                finca_id: payload.finca_id,
                fecha: payload.fecha,
                variedad: payload.variedad,
                cantidad_bandejas: payload.cantidad_bandejas,
                insumo_semilla_id: payload.insumo_semilla_id,
                semilla_usada: payload.semilla_usada,
                insumo_sustrato_id: payload.insumo_sustrato_id,
                sustrato_usado: payload.sustrato_usado,
                observaciones: payload.observaciones,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(almacigo)))
}

// =============================================================================
//  PLANTACIONES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantacionPayload {
    pub finca_id: Uuid,
    pub lote_id: Uuid,
    pub almacigo_id: Option<Uuid>,

    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,

    #[validate(length(min = 2, message = "La variedad es requerida."))]
    pub variedad: String,

    pub tipo_plantacion: Option<String>,

    #[validate(custom(function = "validate_positivo"))]
    pub cantidad_plantas: Decimal,

    pub bandejas_usadas: Option<Decimal>,
    pub superficie_cubierta: Option<Decimal>,
    pub jornales_usados: Option<Decimal>,
    pub costo_total: Option<Decimal>,

    #[serde(default = "default_moneda")]
    pub moneda: Moneda,

    #[serde(default = "default_tipo_cambio")]
    pub tipo_cambio: Decimal,

    pub observaciones: Option<String>,
}

// GET /api/produccion/plantaciones
#[utoipa::path(
    get,
    path = "/api/produccion/plantaciones",
    tag = "Producción",
    params(("finca_id" = Option<Uuid>, Query, description = "Filtra por finca")),
    responses((status = 200, description = "Plantaciones del tenant", body = [Plantacion])),
    security(("api_jwt" = []))
)]
pub async fn get_plantaciones(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<FincaFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let plantaciones = app_state
        .produccion_service
        .get_plantaciones(&mut *rls_conn, tenant.0, filtro.finca_id)
        .await?;

    Ok((StatusCode::OK, Json(plantaciones)))
}

// POST /api/produccion/plantaciones
#[utoipa::path(
    post,
    path = "/api/produccion/plantaciones",
    tag = "Producción",
    request_body = PlantacionPayload,
    responses((status = 201, description = "Plantación registrada", body = Plantacion)),
    security(("api_jwt" = []))
)]
pub async fn create_plantacion(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<PlantacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let plantacion = app_state
        .produccion_service
        .registrar_plantacion(
            &mut *rls_conn,
            tenant.0,
            DatosPlantacion {
                finca_id: payload.finca_id,
                lote_id: payload.lote_id,
                almacigo_id: payload.almacigo_id,
                fecha: payload.fecha,
                variedad: payload.variedad,
                tipo_plantacion: payload.tipo_plantacion,
                cantidad_plantas: payload.cantidad_plantas,
                bandejas_usadas: payload.bandejas_usadas,
                superficie_cubierta: payload.superficie_cubierta,
                jornales_usados: payload.jornales_usados,
                costo_total: payload.costo_total,
                moneda: payload.moneda,
                tipo_cambio: payload.tipo_cambio,
                observaciones: payload.observaciones,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(plantacion)))
}

// =============================================================================
//  COSECHAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CosechaPayload {
    pub finca_id: Uuid,
    pub lote_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,

    #[validate(custom(function = "validate_positivo"))]
    #[schema(example = "1250.5")]
    pub kilos_brutos: Decimal,

    pub cantidad_bultos: Option<i32>,

    #[schema(example = "B1F")]
    pub clase: Option<String>,

    pub observaciones: Option<String>,
}

// GET /api/produccion/cosechas
#[utoipa::path(
    get,
    path = "/api/produccion/cosechas",
    tag = "Producción",
    params(("finca_id" = Option<Uuid>, Query, description = "Filtra por finca")),
    responses((status = 200, description = "Cosechas del tenant", body = [Cosecha])),
    security(("api_jwt" = []))
)]
pub async fn get_cosechas(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<FincaFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let cosechas = app_state
        .produccion_service
        .get_cosechas(&mut *rls_conn, tenant.0, filtro.finca_id)
        .await?;

    Ok((StatusCode::OK, Json(cosechas)))
}

// POST /api/produccion/cosechas
#[utoipa::path(
    post,
    path = "/api/produccion/cosechas",
    tag = "Producción",
    request_body = CosechaPayload,
    responses((status = 201, description = "Cosecha registrada", body = Cosecha)),
    security(("api_jwt" = []))
)]
pub async fn create_cosecha(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CosechaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let cosecha = app_state
        .produccion_service
        .registrar_cosecha(
            &mut *rls_conn,
            tenant.0,
            payload.finca_id,
            payload.lote_id,
            payload.fecha,
            payload.kilos_brutos,
            payload.cantidad_bultos,
            payload.clase.as_deref(),
            payload.observaciones.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cosecha)))
}

// =============================================================================
//  ESTUFAS Y CURADO
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstufaPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Estufa 2")]
    pub nombre: String,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub capacidad: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CuradoPayload {
    pub estufa_id: Uuid,
    pub lote_id: Option<Uuid>,

    #[validate(range(min = 1, message = "Número de carga inválido."))]
    pub numero_carga: i32,

    #[schema(value_type = String, format = Date)]
    pub fecha_inicio: NaiveDate,

    pub variedad: Option<String>,
    pub corte: Option<i32>,

    #[validate(custom(function = "validate_no_negativo"))]
    #[serde(default)]
    pub peso_verde: Decimal,

    pub costo_carga: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CerrarCuradoPayload {
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_final: Option<NaiveDate>,

    pub peso_seco: Option<Decimal>,
    pub costo_descarga: Option<Decimal>,

    pub estado: EstadoCurado,
}

#[derive(Debug, Deserialize)]
pub struct CuradoFiltro {
    pub estufa_id: Option<Uuid>,
}

// GET /api/produccion/estufas
#[utoipa::path(
    get,
    path = "/api/produccion/estufas",
    tag = "Producción",
    responses((status = 200, description = "Estufas del tenant", body = [Estufa])),
    security(("api_jwt" = []))
)]
pub async fn get_estufas(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let estufas = app_state
        .produccion_service
        .get_estufas(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(estufas)))
}

// POST /api/produccion/estufas
#[utoipa::path(
    post,
    path = "/api/produccion/estufas",
    tag = "Producción",
    request_body = EstufaPayload,
    responses((status = 201, description = "Estufa creada", body = Estufa)),
    security(("api_jwt" = []))
)]
pub async fn create_estufa(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<EstufaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let estufa = app_state
        .produccion_service
        .create_estufa(&mut *rls_conn, tenant.0, &payload.nombre, payload.capacidad)
        .await?;

    Ok((StatusCode::CREATED, Json(estufa)))
}

// GET /api/produccion/curados
#[utoipa::path(
    get,
    path = "/api/produccion/curados",
    tag = "Producción",
    params(("estufa_id" = Option<Uuid>, Query, description = "Filtra por estufa")),
    responses((status = 200, description = "Cargas de curado", body = [Curado])),
    security(("api_jwt" = []))
)]
pub async fn get_curados(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(filtro): Query<CuradoFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let curados = app_state
        .produccion_service
        .get_curados(&mut *rls_conn, tenant.0, filtro.estufa_id)
        .await?;

    Ok((StatusCode::OK, Json(curados)))
}

// POST /api/produccion/curados
#[utoipa::path(
    post,
    path = "/api/produccion/curados",
    tag = "Producción",
    request_body = CuradoPayload,
    responses((status = 201, description = "Carga registrada", body = Curado)),
    security(("api_jwt" = []))
)]
pub async fn create_curado(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CuradoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let curado = app_state
        .produccion_service
        .registrar_curado(
            &mut *rls_conn,
            tenant.0,
            payload.estufa_id,
            payload.lote_id,
            payload.numero_carga,
            payload.fecha_inicio,
            payload.variedad.as_deref(),
            payload.corte,
            payload.peso_verde,
            payload.costo_carga,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(curado)))
}

// PUT /api/produccion/curados/{id}
#[utoipa::path(
    put,
    path = "/api/produccion/curados/{id}",
    tag = "Producción",
    request_body = CerrarCuradoPayload,
    params(("id" = Uuid, Path, description = "ID de la carga")),
    responses(
        (status = 200, description = "Carga actualizada", body = Curado),
        (status = 404, description = "Carga inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_curado(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<CerrarCuradoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let curado = app_state
        .produccion_service
        .actualizar_curado(
            &mut *rls_conn,
            tenant.0,
            id,
            payload.fecha_final,
            payload.peso_seco,
            payload.costo_descarga,
            payload.estado,
        )
        .await?;

    Ok((StatusCode::OK, Json(curado)))
}
