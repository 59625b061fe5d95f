//! Authentication and account types.

use serde::{Deserialize, Serialize};

use super::Id;

/// User profile returned on login/signup and persisted with the session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login/signup response. The backend names the token `access_token`;
/// older deployments used `token`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthResponse {
    /// The bearer token under whichever key the server used. Empty strings
    /// count as missing.
    pub fn bearer(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.access_token.as_deref().filter(|t| !t.is_empty()))
    }
}

/// Answer of the token validation endpoint.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct TokenStatus {
    pub valid: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ValidateCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordConfirmRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}
