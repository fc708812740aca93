//! In-memory profile store.
//!
//! Backs tests and transient deployments; production uses the SQLite store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::user::{UserId, UserProfile};
use crate::error::Result;
use crate::port::store::ProfileStore;

/// Map-backed [`ProfileStore`] with no durability.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    /// Whether the store holds no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn save(&self, profile: &UserProfile) -> Result<()> {
        self.profiles
            .write()
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().get(&user).cloned())
    }
}
