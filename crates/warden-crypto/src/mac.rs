use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CryptoError;
use crate::secret::SigningSecret;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 tag length in bytes.
pub const TAG_LEN: usize = 32;

/// HMAC-SHA256 authentication tag (32 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag([u8; TAG_LEN]);

impl Tag {
    pub fn to_bytes(&self) -> [u8; TAG_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

fn keyed(secret: &SigningSecret) -> Result<HmacSha256, CryptoError> {
    HmacSha256::new_from_slice(secret.expose())
        .map_err(|e| CryptoError::InvalidInput(format!("hmac key rejected: {}", e)))
}

/// Compute HMAC-SHA256 over `message`.
pub fn sign(message: &[u8], secret: &SigningSecret) -> Result<Tag, CryptoError> {
    let mut mac = keyed(secret)?;
    mac.update(message);
    Ok(Tag(mac.finalize().into_bytes().into()))
}

/// Verify an HMAC-SHA256 tag in constant time.
///
/// A tag of the wrong length fails the same way as a wrong tag.
pub fn verify(message: &[u8], tag: &[u8], secret: &SigningSecret) -> Result<(), CryptoError> {
    let mut mac = keyed(secret)?;
    mac.update(message);
    mac.verify_slice(tag).map_err(|_| CryptoError::MacFailed)
}
