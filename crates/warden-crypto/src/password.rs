use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;
use rand::RngCore;

use warden_core::PasswordPolicy;

use crate::error::CryptoError;

const SALT_LEN: usize = 16;

/// Plaintext hashed at construction to give unknown users a comparison target.
const DUMMY_PASSWORD: &[u8] = b"warden-dummy-password";

/// Argon2id password hashing and verification.
///
/// Stateless apart from configuration; hashing is deliberately slow, so async
/// callers should run it on a blocking pool.
pub struct PasswordAuthenticator {
    argon2: Argon2<'static>,
    policy: PasswordPolicy,
    dummy_hash: String,
}

impl PasswordAuthenticator {
    /// Build an authenticator with the given length bounds and work factor.
    pub fn new(policy: PasswordPolicy) -> Result<Self, CryptoError> {
        policy
            .validate()
            .map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        let params = Params::new(
            policy.memory_kib,
            policy.iterations,
            policy.parallelism,
            None,
        )
        .map_err(|e| CryptoError::InvalidInput(format!("invalid argon2 parameters: {}", e)))?;

        let mut auth = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            policy,
            dummy_hash: String::new(),
        };
        auth.dummy_hash = auth.hash_bytes(DUMMY_PASSWORD)?;
        Ok(auth)
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Hash a password into a self-describing PHC string with a fresh salt.
    pub fn hash(&self, password: &str) -> Result<String, CryptoError> {
        if !self.policy.accepts(password) {
            return Err(CryptoError::PasswordPolicy(format!(
                "password must be {}..={} bytes",
                self.policy.min_length, self.policy.max_length
            )));
        }
        self.hash_bytes(password.as_bytes())
    }

    fn hash_bytes(&self, password: &[u8]) -> Result<String, CryptoError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| CryptoError::HashingFailed(format!("salt encoding failed: {}", e)))?;

        let hash = self
            .argon2
            .hash_password(password, &salt)
            .map_err(|e| CryptoError::HashingFailed(format!("argon2 hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC string.
    ///
    /// A wrong password, a malformed stored hash and out-of-range input all
    /// return `false`. Work-factor parameters are read from the stored hash.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        if password.is_empty() || password.len() > self.policy.max_length {
            tracing::debug!("password length outside accepted range");
            return false;
        }

        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "stored password hash is malformed");
                return false;
            }
        };

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                tracing::debug!(error = %e, "password verification error");
                false
            }
        }
    }

    /// Run a full verification against a fixed hash and discard the result.
    ///
    /// Used for unknown users so a login attempt costs the same either way.
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> PasswordAuthenticator {
        PasswordAuthenticator::new(PasswordPolicy {
            memory_kib: 256,
            iterations: 1,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let auth = fast();
        let hash = auth.hash("correcthorsebatterystaple").unwrap();
        assert!(auth.verify("correcthorsebatterystaple", &hash));
    }

    #[test]
    fn test_wrong_password_fails() {
        let auth = fast();
        let hash = auth.hash("password-one").unwrap();
        assert!(!auth.verify("password-two", &hash));
    }

    #[test]
    fn test_salt_uniqueness() {
        let auth = fast();
        let h1 = auth.hash("same-password").unwrap();
        let h2 = auth.hash("same-password").unwrap();
        assert_ne!(h1, h2);
        assert!(auth.verify("same-password", &h1));
        assert!(auth.verify("same-password", &h2));
    }

    #[test]
    fn test_hash_is_self_describing() {
        let auth = fast();
        let hash = auth.hash("self-describing").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=256,t=1,p=1$"));
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let hash = fast().hash("portable-password").unwrap();
        let default_cost = PasswordAuthenticator::new(PasswordPolicy::default()).unwrap();
        assert!(default_cost.verify("portable-password", &hash));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        let auth = fast();
        assert!(!auth.verify("anything-at-all", "not-a-phc-string"));
        assert!(!auth.verify("anything-at-all", ""));
        assert!(!auth.verify("anything-at-all", "$argon2id$v=19$m=256,t=1,p=1$garbage"));
    }

    #[test]
    fn test_hash_rejects_out_of_policy() {
        let auth = fast();
        assert!(matches!(auth.hash(""), Err(CryptoError::PasswordPolicy(_))));
        assert!(matches!(auth.hash("short"), Err(CryptoError::PasswordPolicy(_))));
        assert!(matches!(
            auth.hash(&"x".repeat(129)),
            Err(CryptoError::PasswordPolicy(_))
        ));
    }

    #[test]
    fn test_verify_rejects_empty_and_oversized() {
        let auth = fast();
        let hash = auth.hash("valid-password").unwrap();
        assert!(!auth.verify("", &hash));
        assert!(!auth.verify(&"x".repeat(10_000), &hash));
    }

    #[test]
    fn test_dummy_hash_ready_after_construction() {
        let auth = fast();
        assert!(auth.dummy_hash.starts_with("$argon2id$v=19$m=256,t=1,p=1$"));
        assert!(auth.verify("warden-dummy-password", &auth.dummy_hash));
    }

    #[test]
    fn test_verify_dummy_does_not_panic() {
        let auth = fast();
        auth.verify_dummy("whatever-password");
        auth.verify_dummy("");
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = PasswordAuthenticator::new(PasswordPolicy {
            memory_kib: 1,
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
