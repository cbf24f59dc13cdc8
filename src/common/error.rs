// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

// El tipo de error de toda la aplicacion, con `thiserror` para mejor ergonomia.
// Cada categoria del contrato HTTP tiene su variante: validacion -> 400,
// autenticacion -> 401, regla de dominio -> 409, resto -> 500 generico.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("El e-mail ya está registrado")]
    EmailAlreadyExists,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("El usuario no tiene un tenant asignado")]
    UsuarioSinTenant,

    #[error("Ya existe un tenant con el nombre '{0}'")]
    TenantYaExiste(String),

    #[error("{0} no encontrado")]
    NoEncontrado(&'static str),

    // Regla de dominio central: un descuento que dejaria stock negativo
    // se rechaza entero e identifica al insumo ofensor.
    #[error("Stock insuficiente de '{insumo}': disponible {disponible}, solicitado {solicitado}")]
    StockInsuficiente {
        insumo: String,
        disponible: Decimal,
        solicitado: Decimal,
    },

    #[error("La labor tiene jornales ya liquidados y no puede modificarse")]
    AsignacionYaLiquidada,

    #[error("Algunas asignaciones ya fueron liquidadas por otra operación")]
    LiquidacionEnConflicto,

    #[error("No hay jornales pendientes para liquidar en el período")]
    SinPendientes,

    // Errores de infraestructura: se loguean con detalle y al cliente
    // le llega un mensaje generico.
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devuelve todos los detalles de la validacion, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail o contraseña inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.".to_string(),
            ),
            AppError::UsuarioSinTenant => (
                StatusCode::BAD_REQUEST,
                "El usuario no tiene un tenant asignado.".to_string(),
            ),

            AppError::NoEncontrado(_) => (StatusCode::NOT_FOUND, self.to_string()),

            // Conflictos de dominio: el mensaje especifico llega al usuario.
            AppError::EmailAlreadyExists
            | AppError::TenantYaExiste(_)
            | AppError::StockInsuficiente { .. }
            | AppError::AsignacionYaLiquidada
            | AppError::LiquidacionEnConflicto
            | AppError::SinPendientes => (StatusCode::CONFLICT, self.to_string()),

            // Todo lo demas (DatabaseError, InternalServerError...) es 500.
            // `tracing` loguea el mensaje detallado que thiserror armo.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
