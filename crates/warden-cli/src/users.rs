//! User seed file: a TOML list of `[[users]]` records loaded into memory.

use chrono::Utc;
use serde::Deserialize;
use std::path::Path;

use warden_auth::InMemoryUserStore;
use warden_core::{Handle, Identity, PasswordHash, Profile, UserId};

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: UserId,
    username: String,
    password_hash: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    bio: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserRecord {
    fn into_identity(self) -> anyhow::Result<Identity> {
        let handle = Handle::new(self.username)?;
        let now = Utc::now();
        Ok(Identity {
            id: self.id,
            profile: Profile {
                display_name: self
                    .display_name
                    .unwrap_or_else(|| handle.as_str().to_string()),
                bio: self.bio,
            },
            handle,
            password_hash: PasswordHash::new(self.password_hash),
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Parse seed file contents into a fresh store.
pub fn parse_store(contents: &str) -> anyhow::Result<InMemoryUserStore> {
    let seed: SeedFile = toml::from_str(contents)?;
    let store = InMemoryUserStore::new();
    for record in seed.users {
        store.insert(record.into_identity()?)?;
    }
    Ok(store)
}

pub fn load_store(path: &Path) -> anyhow::Result<InMemoryUserStore> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read user file {}: {}", path.display(), e))?;
    let store = parse_store(&contents)?;
    tracing::info!(path = %path.display(), users = store.count(), "user file loaded");
    Ok(store)
}
