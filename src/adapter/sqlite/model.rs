//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::profiles;

/// Database row for a user profile.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileRow {
    pub user_id: i64,
    pub display_name: String,
    pub address: String,
    pub registered_at: String,
}
