//! SQLite persistence for user profiles.

pub mod connection;
pub mod model;
pub mod schema;
pub mod store;

pub use connection::{create_pool, run_migrations, DbPool};
pub use store::SqliteProfileStore;
