//! Fixtures shared by the cross-crate tests.

use std::sync::Arc;

use warden_auth::{Authenticator, InMemoryUserStore};
use warden_core::{CredentialPolicy, Handle, Identity, PasswordHash, PasswordPolicy};
use warden_crypto::{PasswordAuthenticator, SigningSecret};

pub const ALICE_PASSWORD: &str = "correcthorsebatterystaple";

/// Argon2id parameters cheap enough for tests.
pub fn fast_policy() -> PasswordPolicy {
    PasswordPolicy {
        memory_kib: 256,
        iterations: 1,
        ..Default::default()
    }
}

pub fn secret(bytes: &[u8]) -> SigningSecret {
    SigningSecret::new(bytes.to_vec()).expect("test secret is non-empty")
}

/// A store seeded with `alice`, whose hash was produced out of band the way an
/// operator seeding the user file would.
pub fn store_with_alice() -> (Arc<InMemoryUserStore>, Identity) {
    let hasher = PasswordAuthenticator::new(fast_policy()).expect("valid policy");
    let phc = hasher.hash(ALICE_PASSWORD).expect("hash succeeds");
    let identity = Identity::new(
        Handle::new("alice").expect("valid handle"),
        PasswordHash::new(phc),
        Some("Alice".into()),
    );
    let store = Arc::new(InMemoryUserStore::new());
    store.insert(identity.clone()).expect("insert succeeds");
    (store, identity)
}

pub fn authenticator(secret_bytes: &[u8], store: Arc<InMemoryUserStore>) -> Arc<Authenticator> {
    Arc::new(
        Authenticator::from_policies(
            secret(secret_bytes),
            &CredentialPolicy::default(),
            fast_policy(),
            store,
        )
        .expect("authenticator builds"),
    )
}
