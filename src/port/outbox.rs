//! Outbound delivery port.

use async_trait::async_trait;

use crate::engine::event::Effect;
use crate::error::Result;

/// Delivers engine effects to the user over the active transport.
///
/// Delivery order within one user's effects must match the order the engine
/// produced them. `AckChoices` semantically resolves the most recent choice
/// prompt; a transport may edit the original message or send a new one, as
/// long as it is clear the selection was registered.
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Deliver one effect.
    async fn deliver(&self, effect: Effect) -> Result<()>;
}
