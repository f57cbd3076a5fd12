//! Warden Credentials: HS256 bearer credential envelope, issuer, and verifier.

pub mod envelope;
pub mod error;
pub mod issuer;
pub mod verifier;

pub use envelope::{Claims, Credential, Header, ALGORITHM, TOKEN_TYPE};
pub use error::{CredentialError, VerificationError};
pub use issuer::{CredentialIssuer, IssuedCredential};
pub use verifier::CredentialVerifier;
