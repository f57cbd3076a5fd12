use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use warden_credentials::VerificationError;

use crate::store::StoreError;

/// Body text for every per-request authorization failure.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";
/// Body text for a failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid username or password";

/// Authenticator errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("authorization header missing")]
    MissingAuthorization,

    #[error("authorization header is not 'Bearer <credential>'")]
    MalformedAuthorization,

    #[error("credential rejected: {0}")]
    Verification(#[from] VerificationError),

    #[error("handle already taken: {0}")]
    HandleTaken(String),

    #[error("user not found")]
    UserNotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Per-request authorization failures, all reported to clients the same way.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::MissingAuthorization | Self::MalformedAuthorization | Self::Verification(_)
        )
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingAuthorization => "missing_authorization",
            Self::MalformedAuthorization => "malformed_authorization",
            Self::Verification(e) => e.kind(),
            Self::HandleTaken(_) => "handle_taken",
            Self::UserNotFound => "user_not_found",
            Self::Validation(_) => "validation",
            Self::Store(_) => "store",
            Self::Internal(_) => "internal",
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                INVALID_CREDENTIALS_MESSAGE.to_string(),
            ),
            e if e.is_unauthorized() => {
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string())
            }
            Self::HandleTaken(_) => (StatusCode::CONFLICT, "username already exists".into()),
            Self::UserNotFound => (StatusCode::NOT_FOUND, "user not found".into()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::HandleTaken(handle) => Self::HandleTaken(handle),
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, "authentication request failed");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
