/// Reasons a presented credential is rejected.
///
/// These are internal diagnostics; callers must collapse them into a single
/// "unauthorized" outcome before anything reaches the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("bad signature: {0}")]
    BadSignature(String),

    #[error("missing or ill-typed claim: {0}")]
    MissingClaims(String),

    #[error("credential expired at {expires_at}")]
    Expired { expires_at: i64 },
}

impl VerificationError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedCredential(_) => "malformed_credential",
            Self::BadSignature(_) => "bad_signature",
            Self::MissingClaims(_) => "missing_claims",
            Self::Expired { .. } => "expired",
        }
    }
}

/// Credential issuance errors.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid credential ttl: {0}")]
    InvalidTtl(String),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] warden_crypto::CryptoError),
}
