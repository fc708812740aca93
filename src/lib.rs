//! Swapdesk - Conversational token-swap assistant.
//!
//! This crate implements a chat-driven workflow engine: users register a
//! display name and wallet address, then walk a button-driven wizard that
//! quotes and executes cross-chain or on-chain token swaps.
//!
//! # Architecture
//!
//! The conversation core is transport-agnostic:
//!
//! - **`engine`** - The per-user finite-state machine. `ConversationEngine`
//!   turns one inbound event into outbound effects; `SessionRouter` gives
//!   each user a serialized event lane.
//! - **`port`** - Traits at the seams: `ProfileStore`, `QuoteOracle`,
//!   `ExecutionOracle`, `Outbox`.
//! - **`adapter`** - Concrete implementations: SQLite profile storage,
//!   deterministic-ish dummy oracles, and the Telegram transport.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML with env overrides
//! - [`domain`] - Users, trades, asset catalog, input validation
//! - [`engine`] - Events, session state, the FSM, and the session router
//! - [`port`] - Trait definitions for storage, oracles, and delivery
//! - [`adapter`] - SQLite, dummy oracles, Telegram (requires `telegram`)
//! - [`error`] - Error types for the crate
//! - [`app`] - Application orchestration (requires `telegram` feature)
//!
//! # Features
//!
//! - `telegram` - Enable the Telegram transport (enabled by default)
//! - `testkit` - Deterministic fakes for downstream tests

pub mod adapter;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod port;

#[cfg(feature = "telegram")]
pub mod app;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
