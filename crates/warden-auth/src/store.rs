use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use warden_core::{Identity, UserId};

/// User-record store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("handle already taken: {0}")]
    HandleTaken(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Lookup interface onto the user-record store.
///
/// Implementations own persistence; the authenticator only reads records,
/// plus `create` for registration.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact handle.
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    /// Find a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError>;

    /// Insert a new user. Fails if the handle is taken.
    async fn create(&self, identity: Identity) -> Result<(), StoreError>;
}

/// In-memory user store backed by concurrent maps.
#[derive(Default)]
pub struct InMemoryUserStore {
    by_id: DashMap<UserId, Identity>,
    by_handle: DashMap<String, UserId>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record synchronously (seeding).
    pub fn insert(&self, identity: Identity) -> Result<(), StoreError> {
        match self.by_handle.entry(identity.handle.as_str().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::HandleTaken(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(identity.id);
                self.by_id.insert(identity.id, identity);
                Ok(())
            }
        }
    }

    /// Flip the active flag. Returns false if the user does not exist.
    pub fn set_active(&self, id: UserId, active: bool) -> bool {
        match self.by_id.get_mut(&id) {
            Some(mut identity) => {
                identity.is_active = active;
                identity.updated_at = chrono::Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.by_id.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        let id = match self.by_handle.get(username) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.by_id.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError> {
        Ok(self.by_id.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, identity: Identity) -> Result<(), StoreError> {
        self.insert(identity)
    }
}
