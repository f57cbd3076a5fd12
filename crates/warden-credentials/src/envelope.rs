//! Three-segment signed envelope: `base64url(header).base64url(payload).base64url(tag)`.
//!
//! The tag is HMAC-SHA256 over the ASCII text `header "." payload`, which makes
//! the format readable by any HS256 JWT implementation.

use serde::{Deserialize, Serialize};
use std::fmt;

use warden_core::{Handle, UserId};
use warden_crypto::{b64url_decode, b64url_encode, SigningSecret, TAG_LEN};

use crate::error::{CredentialError, VerificationError};

/// The only accepted signing algorithm.
pub const ALGORITHM: &str = "HS256";
/// Declared token type.
pub const TOKEN_TYPE: &str = "JWT";

/// Envelope header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.into(),
            typ: Some(TOKEN_TYPE.into()),
        }
    }
}

/// Fixed-shape claim record carried in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub user_id: UserId,
    pub username: Handle,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expires-at, Unix seconds.
    pub exp: i64,
}

/// Opaque encoded bearer credential.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} chars>)", self.0.len())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialize, sign, and frame a claim set.
pub fn encode(claims: &Claims, secret: &SigningSecret) -> Result<Credential, CredentialError> {
    let header = b64url_encode(&serde_json::to_vec(&Header::default())?);
    let payload = b64url_encode(&serde_json::to_vec(claims)?);
    let signing_input = format!("{}.{}", header, payload);
    let tag = warden_crypto::sign(signing_input.as_bytes(), secret)?;
    Ok(Credential(format!(
        "{}.{}",
        signing_input,
        b64url_encode(tag.as_bytes())
    )))
}

/// Check framing, algorithm and signature, then decode the claims.
///
/// Expiry is not checked here.
pub fn decode(token: &str, secret: &SigningSecret) -> Result<Claims, VerificationError> {
    // The tag is authenticated over the raw text before the payload is looked
    // at, so any alteration of payload or tag fails as a bad signature.
    let (signing_input, tag_segment) = token
        .rsplit_once('.')
        .ok_or_else(|| malformed("expected three dot-separated segments"))?;
    let (header_segment, payload_segment) = signing_input
        .split_once('.')
        .ok_or_else(|| malformed("expected three dot-separated segments"))?;
    if header_segment.is_empty() {
        return Err(malformed("empty header segment"));
    }

    let header_bytes =
        b64url_decode(header_segment).map_err(|e| malformed(&format!("header: {}", e)))?;
    let header: Header = serde_json::from_slice(&header_bytes)
        .map_err(|e| malformed(&format!("header json: {}", e)))?;
    if header.alg != ALGORITHM {
        return Err(VerificationError::BadSignature(format!(
            "unexpected signing algorithm '{}'",
            header.alg
        )));
    }

    let tag = b64url_decode(tag_segment)
        .map_err(|_| VerificationError::BadSignature("signature is not base64url".into()))?;
    if tag.len() != TAG_LEN {
        return Err(VerificationError::BadSignature(format!(
            "signature must be {} bytes, got {}",
            TAG_LEN,
            tag.len()
        )));
    }
    warden_crypto::verify(signing_input.as_bytes(), &tag, secret)
        .map_err(|_| VerificationError::BadSignature("signature mismatch".into()))?;

    let payload_bytes =
        b64url_decode(payload_segment).map_err(|e| malformed(&format!("payload: {}", e)))?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes)
        .map_err(|e| malformed(&format!("payload json: {}", e)))?;
    claims_from_value(&payload)
}

fn malformed(detail: &str) -> VerificationError {
    VerificationError::MalformedCredential(detail.to_string())
}

fn missing(claim: &str) -> VerificationError {
    VerificationError::MissingClaims(claim.to_string())
}

fn claims_from_value(payload: &serde_json::Value) -> Result<Claims, VerificationError> {
    let object = payload
        .as_object()
        .ok_or_else(|| malformed("payload is not a json object"))?;

    let user_id = object
        .get("user_id")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<UserId>().ok())
        .ok_or_else(|| missing("user_id"))?;
    let username = object
        .get("username")
        .and_then(|v| v.as_str())
        .and_then(|s| Handle::new(s).ok())
        .ok_or_else(|| missing("username"))?;
    let iat = object
        .get("iat")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| missing("iat"))?;
    let exp = object
        .get("exp")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| missing("exp"))?;

    Ok(Claims {
        user_id,
        username,
        iat,
        exp,
    })
}
