//! Warden Core: Fundamental types, policies, and errors shared by the
//! password, credential, and authorization crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CredentialPolicy, PasswordPolicy};
pub use error::CoreError;
pub use types::{AuthenticatedPrincipal, Handle, Identity, PasswordHash, Profile, PublicIdentity, UserId};
