// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Un usuario tal como viene de la base de datos.
// tenant_id queda en NULL hasta que el usuario crea su tenant (onboarding).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE: nunca exponer el hash
    #[schema(ignore)]
    pub password_hash: String,

    pub nombre: String,
    pub tenant_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(email(message = "El e-mail no es válido."))]
    #[schema(example = "productor@tabacal.com.ar")]
    pub email: String,

    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 2, message = "El nombre es obligatorio."))]
    #[schema(example = "Juan Pérez")]
    pub nombre: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "El e-mail no es válido."))]
    pub email: String,

    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Claims dentro del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // ID del usuario
    pub exp: usize, // expiración
    pub iat: usize, // emisión
}
