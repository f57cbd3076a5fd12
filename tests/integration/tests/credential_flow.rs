//! Integration test: login, credential issuance and authorization across crates.
//!
//! Exercises warden-crypto hashing, warden-credentials issuance and
//! verification, and the warden-auth authenticator together.

use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use warden_auth::AuthError;
use warden_credentials::{CredentialIssuer, CredentialVerifier, VerificationError};
use warden_integration_tests::{authenticator, secret, store_with_alice, ALICE_PASSWORD};

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("header value"),
    );
    headers
}

// =========================================================================
// Login → authorize
// =========================================================================

#[tokio::test]
async fn test_alice_logs_in_and_is_authorized() {
    let (store, alice) = store_with_alice();
    let auth = authenticator(b"integration-secret", store);

    let response = auth
        .login("alice", ALICE_PASSWORD)
        .await
        .expect("login should succeed");
    assert_eq!(response.user.id, alice.id);
    assert_eq!(response.user.display_name, "Alice");

    let principal = auth
        .authorize(&bearer(response.token.as_str()))
        .expect("fresh credential should authorize");
    assert_eq!(principal.user_id, alice.id);
    assert_eq!(principal.handle.as_str(), "alice");
    assert_eq!(principal.expires_at, response.expires_at.timestamp());
    assert_eq!(principal.expires_at - principal.issued_at, 72 * 3600);

    let found = auth
        .lookup_principal(&principal)
        .await
        .expect("principal resolves to stored user");
    assert_eq!(found.handle, alice.handle);
}

#[tokio::test]
async fn test_login_response_never_carries_password_hash() {
    let (store, _) = store_with_alice();
    let auth = authenticator(b"integration-secret", store);

    let response = auth.login("alice", ALICE_PASSWORD).await.expect("login");
    let json = serde_json::to_value(&response).expect("serialize");
    assert!(json["token"].is_string());
    assert!(json["expires_at"].is_string());
    assert_eq!(json["user"]["username"], "alice");
    assert!(json["user"].get("password_hash").is_none());
    assert!(!json.to_string().contains("$argon2id$"));
}

#[tokio::test]
async fn test_wrong_password_is_invalid_credentials() {
    let (store, _) = store_with_alice();
    let auth = authenticator(b"integration-secret", store);

    let err = auth.login("alice", "wrongpass").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_garbage_bearer_is_malformed_and_unauthorized() {
    let (store, _) = store_with_alice();
    let auth = authenticator(b"integration-secret", store);

    let err = auth.authorize(&bearer("garbage")).unwrap_err();
    assert!(matches!(
        err,
        AuthError::Verification(VerificationError::MalformedCredential(_))
    ));
    assert!(err.is_unauthorized());
}

// =========================================================================
// Secrets and expiry
// =========================================================================

#[tokio::test]
async fn test_credential_from_other_secret_is_rejected() {
    let (store, _) = store_with_alice();
    let issuing = authenticator(b"secret-one", Arc::clone(&store));
    let checking = authenticator(b"secret-two", store);

    let response = issuing.login("alice", ALICE_PASSWORD).await.expect("login");
    let err = checking
        .authorize(&bearer(response.token.as_str()))
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::Verification(VerificationError::BadSignature(_))
    ));
}

#[test]
fn test_expiry_boundary_across_issuer_and_verifier() {
    let (_, alice) = store_with_alice();
    let shared = Arc::new(secret(b"expiry-secret"));
    let issuer = CredentialIssuer::with_ttl(Arc::clone(&shared), Duration::seconds(60))
        .expect("ttl is positive");
    let verifier = CredentialVerifier::new(shared);

    let issued_at = Utc::now() - Duration::seconds(120);
    let issued = issuer
        .issue_at(alice.id, &alice.handle, issued_at)
        .expect("issue");
    let exp = issued.expires_at;

    assert!(verifier
        .verify_at(issued.credential.as_str(), exp - Duration::seconds(1))
        .is_ok());
    assert!(matches!(
        verifier.verify_at(issued.credential.as_str(), exp),
        Err(VerificationError::Expired { .. })
    ));
    assert!(matches!(
        verifier.verify(issued.credential.as_str()),
        Err(VerificationError::Expired { .. })
    ));
}

#[tokio::test]
async fn test_deactivated_user_cannot_log_in_again() {
    let (store, alice) = store_with_alice();
    let auth = authenticator(b"integration-secret", Arc::clone(&store));

    let first = auth.login("alice", ALICE_PASSWORD).await.expect("login");
    assert!(store.set_active(alice.id, false));

    assert!(matches!(
        auth.login("alice", ALICE_PASSWORD).await,
        Err(AuthError::InvalidCredentials)
    ));
    // Credentials already issued stay valid until they expire.
    assert!(auth.authorize(&bearer(first.token.as_str())).is_ok());
}
