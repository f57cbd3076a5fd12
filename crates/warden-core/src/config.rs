use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default credential lifetime: 72 hours.
pub const DEFAULT_TTL_SECS: u64 = 72 * 60 * 60;

/// Credential issuance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPolicy {
    /// Lifetime of an issued credential, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Name of the environment variable holding the signing secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

/// Password length bounds and Argon2id work factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum accepted length at registration, in bytes.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Maximum accepted length, in bytes. Longer input is never hashed.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}
fn default_secret_env() -> String {
    "WARDEN_SIGNING_SECRET".into()
}
fn default_min_length() -> usize {
    8
}
fn default_max_length() -> usize {
    128
}
fn default_memory_kib() -> u32 {
    19 * 1024
}
fn default_iterations() -> u32 {
    2
}
fn default_parallelism() -> u32 {
    1
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            secret_env: default_secret_env(),
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl CredentialPolicy {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ttl_secs == 0 {
            return Err(CoreError::InvalidConfig("ttl_secs must be positive".into()));
        }
        if i64::try_from(self.ttl_secs).is_err() {
            return Err(CoreError::InvalidConfig("ttl_secs is out of range".into()));
        }
        if self.secret_env.is_empty() {
            return Err(CoreError::InvalidConfig("secret_env must not be empty".into()));
        }
        Ok(())
    }
}

impl PasswordPolicy {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_length == 0 {
            return Err(CoreError::InvalidConfig("min_length must be at least 1".into()));
        }
        if self.max_length < self.min_length {
            return Err(CoreError::InvalidConfig(format!(
                "max_length ({}) is below min_length ({})",
                self.max_length, self.min_length
            )));
        }
        Ok(())
    }

    /// Whether a password length is acceptable for hashing.
    pub fn accepts(&self, password: &str) -> bool {
        (self.min_length..=self.max_length).contains(&password.len())
    }
}
