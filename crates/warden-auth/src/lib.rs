//! Warden Auth: the collaborator-facing façade over password verification,
//! credential issuance and verification, plus the axum middleware that
//! guards protected routes.

pub mod authenticator;
pub mod bearer;
pub mod error;
pub mod middleware;
pub mod store;
pub mod types;

pub use authenticator::Authenticator;
pub use bearer::bearer_token;
pub use error::AuthError;
pub use middleware::{protected, require_principal, Principal};
pub use store::{InMemoryUserStore, StoreError, UserStore};
pub use types::{LoginRequest, LoginResponse, RegistrationRequest};
