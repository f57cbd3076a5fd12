use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::PublicIdentity;
use warden_credentials::Credential;

/// Username/password presented at login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Data needed to register a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: Credential,
    pub expires_at: DateTime<Utc>,
    pub user: PublicIdentity,
}
