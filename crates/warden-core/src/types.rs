use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Minimum handle length in characters.
pub const HANDLE_MIN_LEN: usize = 3;
/// Maximum handle length in characters.
pub const HANDLE_MAX_LEN: usize = 50;

/// Opaque, globally unique identifier of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a fresh time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| CoreError::Validation(format!("invalid user id '{}': {}", s, e)))
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Unique human-readable handle (the username).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate and wrap a handle. Handles are taken verbatim: no trimming,
    /// no case folding.
    pub fn new(handle: impl Into<String>) -> Result<Self, CoreError> {
        let handle = handle.into();
        let len = handle.chars().count();
        if !(HANDLE_MIN_LEN..=HANDLE_MAX_LEN).contains(&len) {
            return Err(CoreError::InvalidHandle(format!(
                "handle must be {}..={} characters, got {}",
                HANDLE_MIN_LEN, HANDLE_MAX_LEN, len
            )));
        }
        if handle.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidHandle(
                "handle must not contain whitespace".into(),
            ));
        }
        Ok(Self(handle))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Handle {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

/// Self-describing password hash string (PHC format).
///
/// Deliberately neither `Serialize` nor `Display`; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Mutable display profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
}

/// A registered principal as held by the user-record store.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: UserId,
    pub handle: Handle,
    pub password_hash: PasswordHash,
    pub profile: Profile,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new active identity with a fresh identifier. An empty
    /// display name defaults to the handle.
    pub fn new(handle: Handle, password_hash: PasswordHash, display_name: Option<String>) -> Self {
        let now = Utc::now();
        let display_name = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| handle.as_str().to_string());
        Self {
            id: UserId::generate(),
            handle,
            password_hash,
            profile: Profile {
                display_name,
                bio: String::new(),
            },
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The view of this identity that may leave the service.
    pub fn public_view(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id,
            username: self.handle.as_str().to_string(),
            display_name: self.profile.display_name.clone(),
            bio: self.profile.bio.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable identity without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub bio: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity decoded from a valid credential, scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: UserId,
    pub handle: Handle,
    /// Unix seconds.
    pub issued_at: i64,
    /// Unix seconds.
    pub expires_at: i64,
}
