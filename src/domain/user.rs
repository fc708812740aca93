//! User identity and registered profile.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform-independent user identifier - newtype for type safety.
///
/// The Telegram adapter maps chat IDs onto this; other transports may map
/// whatever identity they carry, as long as it is stable per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Create a new `UserId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A registered user profile.
///
/// Created when the registration flow completes; overwritten whole on
/// re-registration. The engine never deletes profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user.
    pub user_id: UserId,
    /// Display name collected during registration, stored verbatim (trimmed).
    pub display_name: String,
    /// Ethereum-style address, normalized to carry a `0x` prefix.
    pub address: String,
    /// When the profile was last written.
    pub registered_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile stamped with the current time.
    ///
    /// The address is expected to be pre-normalized by
    /// [`crate::domain::validate::normalize_address`].
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            address: address.into(),
            registered_at: Utc::now(),
        }
    }
}
