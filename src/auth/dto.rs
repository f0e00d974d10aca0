use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration. Fields default to empty so a
/// missing field surfaces as a field-level validation error instead of
/// a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after registration. The plaintext password and
/// its hash are never part of any response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: Uuid,
    pub access_token: String,
}

/// Login result. Unknown email and wrong password serialize to the
/// same `{"notFound": true}` body so callers cannot probe which emails
/// are registered.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginOutcome {
    #[serde(rename_all = "camelCase")]
    Success { user_id: Uuid, access_token: String },
    #[serde(rename_all = "camelCase")]
    NotFound { not_found: bool },
}

impl LoginOutcome {
    pub fn not_found() -> Self {
        LoginOutcome::NotFound { not_found: true }
    }
}
