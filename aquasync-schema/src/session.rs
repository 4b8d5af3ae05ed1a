use serde::{Deserialize, Serialize};

use crate::lax::string_or_number;

/// Body of `POST sessions`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of a successful credential exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub user: UserBody,
    pub token: TokenBody,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserBody {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TokenBody {
    /// Token scheme as reported by the backend, usually `bearer`.
    #[serde(rename = "type", default = "default_token_kind")]
    pub kind: String,
    pub token: String,
}

fn default_token_kind() -> String {
    "bearer".to_string()
}

/// Body of `POST users`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST users/forgot-password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Body of `POST users/push-token`.
#[derive(Debug, Clone, Serialize)]
pub struct PushTokenRequest {
    pub token: String,
}
