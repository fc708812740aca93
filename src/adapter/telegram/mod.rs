//! Telegram transport adapter.
//!
//! Decodes Telegram updates into abstract engine events at the boundary and
//! renders engine effects back out as messages with inline keyboards.
//!
//! Requires the `telegram` feature to be enabled.

mod outbox;
mod transport;

pub use outbox::TelegramOutbox;
pub use transport::run_dispatcher;
