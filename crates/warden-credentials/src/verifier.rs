use chrono::{DateTime, Utc};
use std::sync::Arc;

use warden_core::AuthenticatedPrincipal;
use warden_crypto::SigningSecret;

use crate::envelope;
use crate::error::VerificationError;

/// Stateless credential verifier.
///
/// Needs only the shared secret: no store lookups, so a credential for a user
/// deactivated after issuance stays valid until it expires.
#[derive(Clone)]
pub struct CredentialVerifier {
    secret: Arc<SigningSecret>,
}

impl CredentialVerifier {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        Self { secret }
    }

    /// Verify a credential against the current time.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedPrincipal, VerificationError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a credential as if the current time were `now`.
    ///
    /// Valid iff the signature checks out and `now` is strictly before `exp`,
    /// at second precision.
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedPrincipal, VerificationError> {
        let claims = envelope::decode(token, &self.secret)?;

        if now.timestamp() >= claims.exp {
            return Err(VerificationError::Expired {
                expires_at: claims.exp,
            });
        }

        Ok(AuthenticatedPrincipal {
            user_id: claims.user_id,
            handle: claims.username,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
