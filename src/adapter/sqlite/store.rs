//! SQLite profile store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::adapter::sqlite::connection::DbPool;
use crate::adapter::sqlite::model::ProfileRow;
use crate::adapter::sqlite::schema::profiles;
use crate::domain::user::{UserId, UserProfile};
use crate::error::{Error, Result};
use crate::port::store::ProfileStore;

/// SQLite-backed [`ProfileStore`].
///
/// Writes go through `replace_into`, so re-registration overwrites the
/// existing row in place.
pub struct SqliteProfileStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteProfileStore {
    /// Create a new profile store over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(profile: &UserProfile) -> ProfileRow {
        ProfileRow {
            user_id: profile.user_id.value(),
            display_name: profile.display_name.clone(),
            address: profile.address.clone(),
            registered_at: profile.registered_at.to_rfc3339(),
        }
    }

    fn from_row(row: ProfileRow) -> Result<UserProfile> {
        let registered_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.registered_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);

        Ok(UserProfile {
            user_id: UserId::new(row.user_id),
            display_name: row.display_name,
            address: row.address,
            registered_at,
        })
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn save(&self, profile: &UserProfile) -> Result<()> {
        let row = Self::to_row(profile);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(profiles::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<UserProfile>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<ProfileRow> = profiles::table
            .find(user.value())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }
}
