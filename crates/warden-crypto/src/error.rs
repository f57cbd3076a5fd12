/// Cryptographic operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("password rejected by policy: {0}")]
    PasswordPolicy(String),

    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("MAC verification failed")]
    MacFailed,
}
