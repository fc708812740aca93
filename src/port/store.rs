//! Durable profile storage port.

use async_trait::async_trait;

use crate::domain::user::{UserId, UserProfile};
use crate::error::Result;

/// Durable mapping from user id to registered profile.
///
/// `save` must be durable before it returns: the engine acknowledges
/// registration to the user only after the write completes, so a crash
/// after the acknowledgment never loses the profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the profile for `profile.user_id`.
    async fn save(&self, profile: &UserProfile) -> Result<()>;

    /// Fetch a profile, `None` when the user never registered.
    async fn get(&self, user: UserId) -> Result<Option<UserProfile>>;
}
