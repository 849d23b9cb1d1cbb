//! `/api/auth` endpoints.

use medportal_domain::{ApiRequest, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const PREFIX: &str = "/api/auth";

/// Credentials for `POST /api/auth/login`. `username` may also be an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub username: String,
    /// Plain password.
    pub password: String,
}

/// Payload for `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Unique username.
    pub username: String,
    /// Unique email.
    pub email: String,
    /// Plain password.
    pub password: String,
}

/// Payload for `POST /api/auth/change_password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Password being replaced.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Successful login answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Signed-in user, when the server sends one.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer carrying only a message plus whatever else the server adds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `POST /api/auth/register`.
pub fn register(payload: &RegisterRequest) -> ApiRequest {
    ApiRequest::post(format!("{PREFIX}/register")).json(json!({
        "username": payload.username,
        "email": payload.email,
        "password": payload.password,
    }))
}

/// `POST /api/auth/login`.
pub fn login(payload: &LoginRequest) -> ApiRequest {
    ApiRequest::post(format!("{PREFIX}/login")).json(json!({
        "username": payload.username,
        "password": payload.password,
    }))
}

/// `GET /api/auth/profile`.
pub fn get_profile() -> ApiRequest {
    ApiRequest::get(format!("{PREFIX}/profile"))
}

/// `PUT /api/auth/profile`.
pub fn update_profile(payload: Value) -> ApiRequest {
    ApiRequest::put(format!("{PREFIX}/profile")).json(payload)
}

/// `POST /api/auth/change_password`.
pub fn change_password(payload: &ChangePasswordRequest) -> ApiRequest {
    ApiRequest::post(format!("{PREFIX}/change_password")).json(json!({
        "current_password": payload.current_password,
        "new_password": payload.new_password,
    }))
}
