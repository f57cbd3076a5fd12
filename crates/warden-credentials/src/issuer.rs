use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use warden_core::{CredentialPolicy, Handle, Identity, UserId};
use warden_crypto::SigningSecret;

use crate::envelope::{self, Claims, Credential};
use crate::error::CredentialError;

/// A freshly minted credential and its validity window.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub credential: Credential,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues HS256 bearer credentials for authenticated identities.
#[derive(Clone)]
pub struct CredentialIssuer {
    /// Shared signing secret.
    secret: Arc<SigningSecret>,
    /// Credential lifetime.
    ttl: Duration,
}

impl CredentialIssuer {
    /// Create an issuer using the TTL from the credential policy.
    pub fn new(secret: Arc<SigningSecret>, policy: &CredentialPolicy) -> Result<Self, CredentialError> {
        let secs = i64::try_from(policy.ttl_secs)
            .map_err(|_| CredentialError::InvalidTtl(format!("{}s is out of range", policy.ttl_secs)))?;
        Self::with_ttl(secret, Duration::seconds(secs))
    }

    /// Create an issuer with an explicit TTL.
    pub fn with_ttl(secret: Arc<SigningSecret>, ttl: Duration) -> Result<Self, CredentialError> {
        if ttl.num_seconds() <= 0 {
            return Err(CredentialError::InvalidTtl(format!(
                "ttl must be at least one second, got {}s",
                ttl.num_seconds()
            )));
        }
        Ok(Self { secret, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a credential for a stored identity, valid from now.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedCredential, CredentialError> {
        self.issue_at(identity.id, &identity.handle, Utc::now())
    }

    /// Issue a credential as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: UserId,
        handle: &Handle,
        now: DateTime<Utc>,
    ) -> Result<IssuedCredential, CredentialError> {
        let iat = now.timestamp();
        let exp = iat
            .checked_add(self.ttl.num_seconds())
            .ok_or_else(|| CredentialError::InvalidTtl("expiry overflows".into()))?;
        let issued_at = DateTime::from_timestamp(iat, 0)
            .ok_or_else(|| CredentialError::InvalidTtl("issue time out of range".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| CredentialError::InvalidTtl("expiry out of range".into()))?;

        let claims = Claims {
            user_id,
            username: handle.clone(),
            iat,
            exp,
        };
        let credential = envelope::encode(&claims, &self.secret)?;

        tracing::info!(
            user_id = %user_id,
            handle = %handle,
            expires = %expires_at,
            "credential issued"
        );

        Ok(IssuedCredential {
            credential,
            issued_at,
            expires_at,
        })
    }
}
