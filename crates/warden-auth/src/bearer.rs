use axum::http::{header, HeaderMap};

use crate::error::AuthError;

/// Extract the credential from an `Authorization: Bearer <credential>` header.
///
/// The scheme is matched case-insensitively; anything other than exactly two
/// space-separated parts is malformed.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorization)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedAuthorization),
    }
}
