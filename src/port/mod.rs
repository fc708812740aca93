//! Trait seams between the engine and its collaborators.
//!
//! The engine only ever sees these traits; concrete implementations live in
//! [`crate::adapter`].

pub mod oracle;
pub mod outbox;
pub mod store;
