pub mod encoding;
pub mod error;
pub mod mac;
pub mod password;
pub mod secret;

pub use encoding::{b64url_decode, b64url_encode};
pub use error::CryptoError;
pub use mac::{sign, verify, Tag, TAG_LEN};
pub use password::PasswordAuthenticator;
pub use secret::SigningSecret;
