use axum::http::HeaderMap;
use std::sync::Arc;

use warden_core::{
    AuthenticatedPrincipal, CredentialPolicy, Handle, Identity, PasswordHash, PasswordPolicy,
};
use warden_credentials::{CredentialIssuer, CredentialVerifier};
use warden_crypto::{PasswordAuthenticator, SigningSecret};

use crate::bearer::bearer_token;
use crate::error::AuthError;
use crate::store::UserStore;
use crate::types::{LoginResponse, RegistrationRequest};

/// Login, registration and request authorization, built once at startup and
/// shared by every handler.
pub struct Authenticator {
    store: Arc<dyn UserStore>,
    passwords: Arc<PasswordAuthenticator>,
    issuer: CredentialIssuer,
    verifier: CredentialVerifier,
}

impl Authenticator {
    /// Assemble an authenticator from already-built parts.
    pub fn new(
        store: Arc<dyn UserStore>,
        passwords: Arc<PasswordAuthenticator>,
        issuer: CredentialIssuer,
        verifier: CredentialVerifier,
    ) -> Self {
        Self {
            store,
            passwords,
            issuer,
            verifier,
        }
    }

    /// Build issuer, verifier and password hasher around one shared secret.
    pub fn from_policies(
        secret: SigningSecret,
        credentials: &CredentialPolicy,
        password: PasswordPolicy,
        store: Arc<dyn UserStore>,
    ) -> Result<Self, AuthError> {
        let secret = Arc::new(secret);
        let issuer = CredentialIssuer::new(Arc::clone(&secret), credentials)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let verifier = CredentialVerifier::new(secret);
        let passwords = PasswordAuthenticator::new(password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self::new(store, Arc::new(passwords), issuer, verifier))
    }

    pub fn issuer(&self) -> &CredentialIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    /// Check a username/password pair and mint a credential.
    ///
    /// Unknown handle, inactive account and wrong password are
    /// indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let identity = match self.store.find_by_username(username).await? {
            Some(identity) if identity.is_active => identity,
            found => {
                let reason = if found.is_some() { "inactive_user" } else { "unknown_user" };
                tracing::debug!(reason, "login rejected");
                self.burn_verification(password).await?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let passwords = Arc::clone(&self.passwords);
        let candidate = password.to_string();
        let stored = identity.password_hash.as_str().to_string();
        let matches = tokio::task::spawn_blocking(move || passwords.verify(&candidate, &stored))
            .await
            .map_err(|e| AuthError::Internal(format!("password verification task failed: {}", e)))?;

        if !matches {
            tracing::debug!(user_id = %identity.id, reason = "wrong_password", "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .issuer
            .issue(&identity)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        tracing::info!(user_id = %identity.id, "login succeeded");

        Ok(LoginResponse {
            token: issued.credential,
            expires_at: issued.expires_at,
            user: identity.public_view(),
        })
    }

    /// Spend the same hashing work as a real verification.
    async fn burn_verification(&self, password: &str) -> Result<(), AuthError> {
        let passwords = Arc::clone(&self.passwords);
        let candidate = password.to_string();
        tokio::task::spawn_blocking(move || passwords.verify_dummy(&candidate))
            .await
            .map_err(|e| AuthError::Internal(format!("password verification task failed: {}", e)))
    }

    /// Register a new user with a freshly hashed password.
    pub async fn register(&self, request: RegistrationRequest) -> Result<Identity, AuthError> {
        let handle =
            Handle::new(request.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        if !self.passwords.policy().accepts(&request.password) {
            let policy = self.passwords.policy();
            return Err(AuthError::Validation(format!(
                "password must be {}..={} bytes",
                policy.min_length, policy.max_length
            )));
        }
        if self.store.find_by_username(handle.as_str()).await?.is_some() {
            return Err(AuthError::HandleTaken(handle.to_string()));
        }

        let passwords = Arc::clone(&self.passwords);
        let password = request.password;
        let hash = tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let identity = Identity::new(handle, PasswordHash::new(hash), request.display_name);
        self.store.create(identity.clone()).await?;
        tracing::info!(user_id = %identity.id, handle = %identity.handle, "user registered");
        Ok(identity)
    }

    /// Authorize a request from its `Authorization` header.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<AuthenticatedPrincipal, AuthError> {
        let token = bearer_token(headers)?;
        Ok(self.verifier.verify(token)?)
    }

    /// Resolve an authorized principal to its current user record.
    pub async fn lookup_principal(
        &self,
        principal: &AuthenticatedPrincipal,
    ) -> Result<Identity, AuthError> {
        self.store
            .find_by_id(principal.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
