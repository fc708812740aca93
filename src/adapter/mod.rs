//! Concrete implementations of the engine's ports.

pub mod memory;
pub mod oracle;
pub mod sqlite;

#[cfg(feature = "telegram")]
pub mod telegram;
